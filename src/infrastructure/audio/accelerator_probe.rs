use candle_core::Device;

use crate::application::ports::AcceleratorProbe;

/// Checks for a usable CUDA or Metal device through candle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandleAcceleratorProbe;

impl AcceleratorProbe for CandleAcceleratorProbe {
    fn accelerator_available(&self) -> bool {
        let cuda = candle_core::utils::cuda_is_available() && Device::new_cuda(0).is_ok();
        let metal =
            !cuda && candle_core::utils::metal_is_available() && Device::new_metal(0).is_ok();

        tracing::debug!(cuda, metal, "Probed inference accelerators");
        cuda || metal
    }
}

/// Fixed answer, for hosts that pin the device through configuration.
#[derive(Debug, Clone, Copy)]
pub struct StaticAcceleratorProbe(pub bool);

impl AcceleratorProbe for StaticAcceleratorProbe {
    fn accelerator_available(&self) -> bool {
        self.0
    }
}
