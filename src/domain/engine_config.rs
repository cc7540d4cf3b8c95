use std::fmt;

/// Fixed model identity served by this endpoint.
pub const MODEL_ID: &str = "openai/whisper-small";

/// Audio is fed to the engine in windows of this many seconds.
pub const CHUNK_LENGTH_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeDevice {
    Cpu,
    Accelerator,
}

impl ComputeDevice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeDevice::Cpu => "cpu",
            ComputeDevice::Accelerator => "accelerator",
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Full32,
    Half16,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Full32 => "f32",
            Precision::Half16 => "f16",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device and precision pair for the recognition engine.
///
/// Fields are private: the only constructors keep half precision tied to the
/// accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    device: ComputeDevice,
    precision: Precision,
}

impl EngineConfig {
    pub fn accelerator() -> Self {
        Self {
            device: ComputeDevice::Accelerator,
            precision: Precision::Half16,
        }
    }

    pub fn cpu() -> Self {
        Self {
            device: ComputeDevice::Cpu,
            precision: Precision::Full32,
        }
    }

    pub fn for_accelerator_availability(accelerator_available: bool) -> Self {
        if accelerator_available {
            Self::accelerator()
        } else {
            Self::cpu()
        }
    }

    pub fn device(&self) -> ComputeDevice {
        self.device
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }
}

/// Everything needed to build one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSpec {
    pub model_id: String,
    pub config: EngineConfig,
    pub chunk_length_secs: u32,
}

impl EngineSpec {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            model_id: MODEL_ID.to_string(),
            config,
            chunk_length_secs: CHUNK_LENGTH_SECS,
        }
    }
}
