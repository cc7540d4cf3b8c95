use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioDecoder, DecodeError, DecodedAudio};

/// Decodes local audio files to mono `f32` PCM, optionally resampled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaAudioDecoder {
    target_sample_rate: Option<u32>,
}

impl SymphoniaAudioDecoder {
    pub fn new(target_sample_rate: Option<u32>) -> Self {
        Self { target_sample_rate }
    }
}

impl AudioDecoder for SymphoniaAudioDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError> {
        let file = File::open(path)
            .map_err(|e| DecodeError::Unreadable(format!("{}: {}", path.display(), e)))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| DecodeError::UnsupportedFormat(format!("probe: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| DecodeError::DecodingFailed("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let source_rate = codec_params
            .sample_rate
            .ok_or_else(|| DecodeError::DecodingFailed("unknown sample rate".to_string()))?;
        let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| DecodeError::UnsupportedFormat(format!("codec: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(DecodeError::DecodingFailed(format!("packet: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!(error = %e, "Skipping corrupt audio frame");
                    continue;
                }
                Err(e) => {
                    return Err(DecodeError::DecodingFailed(format!("decode: {}", e)));
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            if num_frames == 0 {
                continue;
            }

            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            let interleaved = sample_buf.samples();

            if channels > 1 {
                for frame in interleaved.chunks(channels) {
                    samples.push(frame.iter().sum::<f32>() / channels as f32);
                }
            } else {
                samples.extend_from_slice(interleaved);
            }
        }

        if samples.is_empty() {
            return Err(DecodeError::DecodingFailed(
                "no audio samples decoded".to_string(),
            ));
        }

        let sample_rate = match self.target_sample_rate {
            Some(target) if target != source_rate => {
                samples = resample(&samples, source_rate, target)?;
                target
            }
            _ => source_rate,
        };

        tracing::debug!(
            path = %path.display(),
            samples = samples.len(),
            source_rate,
            sample_rate,
            "Audio decoded to mono PCM"
        );

        Ok(DecodedAudio {
            samples,
            sample_rate,
        })
    }
}

const MAX_FLUSH_ROUNDS: usize = 8;

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, DecodeError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| DecodeError::DecodingFailed(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    let delay = resampler.output_delay();
    let expected_len = (samples.len() as f64 * ratio) as usize;

    let mut chunks = samples.chunks(chunk_size);
    let mut flush_rounds = 0;
    while output.len() < delay + expected_len {
        let mut input = match chunks.next() {
            Some(chunk) => chunk.to_vec(),
            None if flush_rounds < MAX_FLUSH_ROUNDS => {
                flush_rounds += 1;
                Vec::new()
            }
            None => break,
        };
        input.resize(chunk_size, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| DecodeError::DecodingFailed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    // The filter's latency shifts everything right; drop it, then the padding.
    output.drain(..delay.min(output.len()));
    output.truncate(expected_len);

    Ok(output)
}
