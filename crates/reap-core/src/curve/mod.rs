//! Per-pixel temporal curve analysis.
//!
//! Each stage is a left-to-right fold over a chronologically sorted series:
//! NDVI peak, search window, HPI extrema, normalization, threshold crossing.
//! Reordering the input changes the tie-break and first-hit semantics.

pub mod crossing;
pub mod extrema;
pub mod normalize;
pub mod params;
pub mod peak;
pub mod validity;

use crate::crop::CropClass;
use crate::series::Sample;

pub use crossing::{CrossingDetector, CrossingOutcome, CrossingState, Observation};
pub use extrema::HpiExtrema;
pub use normalize::{NormalizedSample, Normalizer};
pub use params::DetectionParams;
pub use peak::{SearchWindow, SeasonalPeak};
pub use validity::{Rejection, ValidityMask};

/// Every intermediate quantity of one pixel's analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelAnalysis {
    pub peak: SeasonalPeak,
    pub window: Option<SearchWindow>,
    pub extrema: HpiExtrema,
    pub normalizer: Option<Normalizer>,
    pub crossing: CrossingOutcome,
}

/// Final verdict for one pixel. Only `Harvested` carries a date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PixelStatus {
    Harvested {
        doy: f64,
        edge: bool,
    },
    NonTargetCrop,
    WeakSignal,
    NoWindow,
    DegenerateRange,
    NoCrossing,
}

impl PixelStatus {
    pub fn harvest_doy(&self) -> Option<f64> {
        match *self {
            Self::Harvested { doy, .. } => Some(doy),
            _ => None,
        }
    }

    pub fn is_harvested(&self) -> bool {
        matches!(self, Self::Harvested { .. })
    }
}

impl std::fmt::Display for PixelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Harvested { doy, edge: false } => write!(f, "Harvested (DOY {:.2})", doy),
            Self::Harvested { doy, edge: true } => write!(f, "Harvested (DOY {:.2}, edge)", doy),
            Self::NonTargetCrop => write!(f, "Not corn/soybean"),
            Self::WeakSignal => write!(f, "Weak HPI signal"),
            Self::NoWindow => write!(f, "No NDVI decay"),
            Self::DegenerateRange => write!(f, "Degenerate HPI range"),
            Self::NoCrossing => write!(f, "No crossing"),
        }
    }
}

/// Run every stage on one pixel's series (sorted by DOY).
pub fn analyze_series(samples: &[Sample], params: &DetectionParams) -> PixelAnalysis {
    let peak = SeasonalPeak::detect(samples);
    let window = SearchWindow::detect(samples, &peak, params);
    let extrema = HpiExtrema::detect(samples, &peak, window.as_ref(), params.hpi_upper_bound);
    let normalizer = Normalizer::new(&extrema, params.hpi_upper_bound);

    let crossing = match (&window, &normalizer) {
        (Some(w), Some(norm)) => CrossingDetector::new(params.nhpi_threshold, w.start)
            .detect(norm.normalize_series(samples)),
        _ => CrossingOutcome::NoCrossing,
    };

    PixelAnalysis {
        peak,
        window,
        extrema,
        normalizer,
        crossing,
    }
}

impl PixelAnalysis {
    /// Apply the validity mask and fold the analysis into a verdict.
    ///
    /// Precedence: crop, signal strength, window, range, crossing.
    pub fn status(&self, crop: CropClass, params: &DetectionParams) -> PixelStatus {
        let mask = ValidityMask::new(params.min_peak_hpi);
        if let Err(rejection) = mask.check(self.extrema.max, crop) {
            return match rejection {
                Rejection::NonTargetCrop => PixelStatus::NonTargetCrop,
                Rejection::WeakSignal => PixelStatus::WeakSignal,
            };
        }
        if self.window.is_none() {
            return PixelStatus::NoWindow;
        }
        if self.normalizer.is_none() {
            return PixelStatus::DegenerateRange;
        }
        match self.crossing {
            CrossingOutcome::NoCrossing => PixelStatus::NoCrossing,
            CrossingOutcome::Edge { doy } => PixelStatus::Harvested { doy, edge: true },
            CrossingOutcome::Interpolated { doy, .. } => {
                PixelStatus::Harvested { doy, edge: false }
            }
        }
    }
}
