use crate::crop::CropClass;

/// Why a pixel with a usable curve is still excluded from the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NonTargetCrop,
    WeakSignal,
}

/// Final gate: crop type must be corn or soybean and the post-peak HPI
/// maximum must exceed `min_peak_hpi`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidityMask {
    pub min_peak_hpi: f32,
}

impl ValidityMask {
    pub fn new(min_peak_hpi: f32) -> Self {
        Self { min_peak_hpi }
    }

    pub fn check(&self, hpi_max: f32, crop: CropClass) -> Result<(), Rejection> {
        if !crop.is_target() {
            return Err(Rejection::NonTargetCrop);
        }
        // NaN never passes.
        if hpi_max > self.min_peak_hpi {
            Ok(())
        } else {
            Err(Rejection::WeakSignal)
        }
    }
}
