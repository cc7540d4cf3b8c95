use std::sync::Mutex;

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{InitializationError, InvocationError, RecognitionEngine};
use crate::domain::{
    ComputeDevice, EngineOutput, EngineSpec, InferenceOptions, Precision, Task, TimestampedChunk,
};

use super::whisper_languages::{LANGUAGES, language_token, resolve_language_code};

pub const DEFAULT_MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

const MAX_DECODE_TOKENS: usize = 224;
const TIMESTAMP_RESOLUTION_SECS: f32 = 0.02;

struct SpecialTokens {
    sot: u32,
    transcribe: u32,
    translate: u32,
    no_timestamps: u32,
    eot: u32,
}

impl SpecialTokens {
    fn from_tokenizer(tokenizer: &Tokenizer) -> Result<Self, InitializationError> {
        let lookup = |token: &str| {
            tokenizer.token_to_id(token).ok_or_else(|| {
                InitializationError::ModelLoadFailed(format!("token not found: {}", token))
            })
        };
        Ok(Self {
            sot: lookup(m::SOT_TOKEN)?,
            transcribe: lookup(m::TRANSCRIBE_TOKEN)?,
            translate: lookup(m::TRANSLATE_TOKEN)?,
            no_timestamps: lookup(m::NO_TIMESTAMPS_TOKEN)?,
            eot: lookup(m::EOT_TOKEN)?,
        })
    }

    /// `<|0.00|>` sits right after `<|notimestamps|>`.
    fn timestamp_begin(&self) -> u32 {
        self.no_timestamps + 1
    }
}

/// Whisper running in-process on candle.
///
/// The decoder keeps a KV cache, so calls are serialized on an internal mutex.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    dtype: DType,
    mel_filters: Vec<f32>,
    chunk_samples: usize,
    special: SpecialTokens,
}

impl CandleWhisperEngine {
    pub fn new(spec: &EngineSpec, mel_filters_repo: &str) -> Result<Self, InitializationError> {
        let device = Self::select_device(spec.config.device())?;
        let dtype = Self::select_dtype(spec.config.precision());

        tracing::info!(
            device = ?device,
            dtype = ?dtype,
            model = %spec.model_id,
            "Initializing Candle Whisper recognition engine"
        );

        let api = Api::new().map_err(|e| InitializationError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(spec.model_id.clone(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| InitializationError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| InitializationError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            InitializationError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let mel_repo = api.repo(Repo::new(mel_filters_repo.to_string(), RepoType::Model));
        let mel_bytes_path = mel_repo.get("melfilters.bytes").map_err(|e| {
            InitializationError::ModelLoadFailed(format!("melfilters.bytes: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| InitializationError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| InitializationError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| InitializationError::ModelLoadFailed(format!("tokenizer: {}", e)))?;
        let special = SpecialTokens::from_tokenizer(&tokenizer)?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| InitializationError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| InitializationError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| InitializationError::ModelLoadFailed(format!("model: {}", e)))?;

        let chunk_samples = (spec.chunk_length_secs as usize * m::SAMPLE_RATE).min(m::N_SAMPLES);

        tracing::info!(chunk_samples, "Candle Whisper engine loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            dtype,
            mel_filters,
            chunk_samples,
            special,
        })
    }

    pub fn select_device(device: ComputeDevice) -> Result<Device, InitializationError> {
        match device {
            ComputeDevice::Cpu => Ok(Device::Cpu),
            ComputeDevice::Accelerator => {
                if candle_core::utils::cuda_is_available() {
                    Device::new_cuda(0).map_err(|e| {
                        InitializationError::DeviceUnavailable(format!("cuda: {}", e))
                    })
                } else if candle_core::utils::metal_is_available() {
                    Device::new_metal(0).map_err(|e| {
                        InitializationError::DeviceUnavailable(format!("metal: {}", e))
                    })
                } else {
                    Err(InitializationError::DeviceUnavailable(
                        "no accelerator backend compiled in".to_string(),
                    ))
                }
            }
        }
    }

    pub fn select_dtype(precision: Precision) -> DType {
        match precision {
            Precision::Full32 => DType::F32,
            Precision::Half16 => DType::F16,
        }
    }

    /// Log-mel spectrogram of one window, zero padded to the full 30 seconds.
    fn window_mel(&self, window: &[f32]) -> Result<Tensor, InvocationError> {
        let mut samples = window.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .and_then(|t| t.narrow(2, 0, n_frames.min(m::N_FRAMES)))
            .and_then(|t| t.to_dtype(self.dtype))
            .map_err(failed)
    }

    fn task_token(&self, task: Task) -> u32 {
        match task {
            Task::Transcribe => self.special.transcribe,
            Task::Translate => self.special.translate,
        }
    }

    fn requested_language(&self, language: &str) -> Result<(String, u32), InvocationError> {
        let code = resolve_language_code(language)
            .ok_or_else(|| InvocationError::UnsupportedLanguage(language.to_string()))?;
        let id = self
            .tokenizer
            .token_to_id(&language_token(code))
            .ok_or_else(|| InvocationError::UnsupportedLanguage(language.to_string()))?;
        Ok((code.to_string(), id))
    }

    fn detect_language(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<(String, u32), InvocationError> {
        let candidates: Vec<(&str, u32)> = LANGUAGES
            .iter()
            .filter_map(|(code, _)| {
                self.tokenizer
                    .token_to_id(&language_token(code))
                    .map(|id| (*code, id))
            })
            .collect();
        let ids: Vec<u32> = candidates.iter().map(|(_, id)| *id).collect();

        let audio_features = model.encoder.forward(mel, true).map_err(failed)?;
        let tokens = Tensor::new(&[[self.special.sot]], &self.device).map_err(failed)?;
        let ys = model
            .decoder
            .forward(&tokens, &audio_features, true)
            .map_err(failed)?;
        let logits = model
            .decoder
            .final_linear(&ys.i(..1).map_err(failed)?)
            .and_then(|l| l.i(0))
            .and_then(|l| l.i(0))
            .map_err(failed)?;

        let ids_tensor = Tensor::new(ids.as_slice(), &self.device).map_err(failed)?;
        let best = logits
            .index_select(&ids_tensor, 0)
            .and_then(|l| l.to_dtype(DType::F32))
            .and_then(|l| l.argmax(0))
            .and_then(|l| l.to_scalar::<u32>())
            .map_err(failed)? as usize;

        model.reset_kv_cache();

        let (code, id) = candidates
            .get(best)
            .ok_or_else(|| InvocationError::InferenceFailed("language detection".to_string()))?;

        tracing::debug!(language = code, "Detected spoken language");
        Ok((code.to_string(), *id))
    }

    fn decode_window(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
        prompt: &[u32],
    ) -> Result<Vec<u32>, InvocationError> {
        let audio_features = model.encoder.forward(mel, true).map_err(failed)?;

        let mut tokens = prompt.to_vec();

        for i in 0..MAX_DECODE_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed)?;

            let ys = model
                .decoder
                .forward(&token_tensor, &audio_features, i == 0)
                .map_err(failed)?;

            let (_, seq_len, _) = ys.dims3().map_err(failed)?;
            let next_token = ys
                .i((..1, seq_len - 1..))
                .and_then(|last| model.decoder.final_linear(&last))
                .and_then(|l| l.i(0))
                .and_then(|l| l.i(0))
                .and_then(|l| l.to_dtype(DType::F32))
                .and_then(|l| l.argmax(0))
                .and_then(|l| l.to_scalar::<u32>())
                .map_err(failed)?;

            if next_token == self.special.eot {
                break;
            }
            tokens.push(next_token);
        }

        model.reset_kv_cache();

        Ok(tokens.split_off(prompt.len()))
    }

    fn decode_text(&self, tokens: &[u32]) -> Result<String, InvocationError> {
        let text_tokens: Vec<u32> = tokens
            .iter()
            .copied()
            .filter(|t| *t < self.special.eot)
            .collect();
        self.tokenizer
            .decode(&text_tokens, true)
            .map(|s| s.trim().to_string())
            .map_err(|e| InvocationError::InferenceFailed(format!("detokenize: {}", e)))
    }
}

impl RecognitionEngine for CandleWhisperEngine {
    fn infer(
        &self,
        samples: &[f32],
        options: &InferenceOptions,
    ) -> Result<EngineOutput, InvocationError> {
        if samples.is_empty() {
            return Ok(EngineOutput::default());
        }

        let windows: Vec<&[f32]> = samples.chunks(self.chunk_samples).collect();
        let mut model = self.model.lock().map_err(|_| InvocationError::Poisoned)?;

        let first_mel = self.window_mel(windows[0])?;
        let (language, language_id) = match &options.generation.language {
            Some(language) => self.requested_language(language)?,
            None => self.detect_language(&mut model, &first_mel)?,
        };

        let mut prompt = vec![
            self.special.sot,
            language_id,
            self.task_token(options.generation.task),
        ];
        if !options.return_timestamps {
            prompt.push(self.special.no_timestamps);
        }

        let window_secs = self.chunk_samples as f32 / m::SAMPLE_RATE as f32;
        let mut texts: Vec<String> = Vec::new();
        let mut chunks: Vec<TimestampedChunk> = Vec::new();

        for (i, window) in windows.iter().enumerate() {
            let mel = if i == 0 {
                first_mel.clone()
            } else {
                self.window_mel(window)?
            };

            tracing::debug!(window = i, "Decoding audio window");
            let generated = self.decode_window(&mut model, &mel, &prompt)?;

            if options.return_timestamps {
                let offset = i as f32 * window_secs;
                let end = offset + window.len() as f32 / m::SAMPLE_RATE as f32;
                for span in group_timestamped(
                    &generated,
                    self.special.eot,
                    self.special.timestamp_begin(),
                    offset,
                    end,
                ) {
                    let text = self.decode_text(&span.tokens)?;
                    if !text.is_empty() {
                        chunks.push(TimestampedChunk {
                            start_secs: span.start_secs,
                            end_secs: span.end_secs,
                            text,
                        });
                    }
                }
            }

            let text = self.decode_text(&generated)?;
            if !text.is_empty() {
                texts.push(text);
            }
        }

        let text = texts.join(" ");

        tracing::info!(
            windows = windows.len(),
            chars = text.len(),
            language = %language,
            task = %options.generation.task,
            "Audio recognition completed"
        );

        Ok(EngineOutput {
            text,
            language: Some(language),
            chunks,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TokenSpan {
    start_secs: f32,
    end_secs: f32,
    tokens: Vec<u32>,
}

/// Splits generated tokens into spans bounded by timestamp tokens.
fn group_timestamped(
    tokens: &[u32],
    eot: u32,
    timestamp_begin: u32,
    offset_secs: f32,
    window_end_secs: f32,
) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut start: Option<f32> = None;
    let mut text: Vec<u32> = Vec::new();

    for &token in tokens {
        if token >= timestamp_begin {
            let at = offset_secs + (token - timestamp_begin) as f32 * TIMESTAMP_RESOLUTION_SECS;
            match start {
                Some(start_secs) if !text.is_empty() => {
                    spans.push(TokenSpan {
                        start_secs,
                        end_secs: at,
                        tokens: std::mem::take(&mut text),
                    });
                    start = None;
                }
                _ => start = Some(at),
            }
        } else if token < eot {
            if start.is_none() {
                start = Some(offset_secs);
            }
            text.push(token);
        }
    }

    if !text.is_empty() {
        spans.push(TokenSpan {
            start_secs: start.unwrap_or(offset_secs),
            end_secs: window_end_secs,
            tokens: text,
        });
    }

    spans
}

fn failed(e: candle_core::Error) -> InvocationError {
    InvocationError::InferenceFailed(e.to_string())
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, InitializationError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(InitializationError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
