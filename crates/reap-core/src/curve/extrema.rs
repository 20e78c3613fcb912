use crate::consts::{HPI_MAX_FLOOR, HPI_MIN_CEILING};
use crate::series::Sample;

use super::peak::{SearchWindow, SeasonalPeak};

/// Post-peak HPI maximum and in-window HPI minimum of one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HpiExtrema {
    pub max: f32,
    /// `None` while `max` is still the floor value.
    pub max_doy: Option<f64>,
    pub min: f32,
    /// `None` while `min` is still the ceiling value.
    pub min_doy: Option<f64>,
}

impl Default for HpiExtrema {
    fn default() -> Self {
        Self {
            max: HPI_MAX_FLOOR,
            max_doy: None,
            min: HPI_MIN_CEILING,
            min_doy: None,
        }
    }
}

impl HpiExtrema {
    /// Fold both extrema over the series.
    ///
    /// The maximum considers observed HPI strictly after the NDVI peak and
    /// below `upper_bound`; a tie keeps the earliest date. The minimum
    /// considers observed HPI inside the window; a tie also keeps the
    /// earliest date. Without a window the minimum stays at its ceiling.
    pub fn detect(
        samples: &[Sample],
        peak: &SeasonalPeak,
        window: Option<&SearchWindow>,
        upper_bound: f32,
    ) -> Self {
        samples.iter().fold(Self::default(), |mut acc, s| {
            let Some(hpi) = s.hpi() else {
                return acc;
            };
            if s.doy > peak.doy && hpi < upper_bound && hpi > acc.max {
                acc.max = hpi;
                acc.max_doy = Some(s.doy);
            }
            if window.is_some_and(|w| w.contains(s.doy)) && hpi < acc.min {
                acc.min = hpi;
                acc.min_doy = Some(s.doy);
            }
            acc
        })
    }

    /// Width of the normalization range; not positive when degenerate.
    pub fn range(&self) -> f32 {
        self.max - self.min
    }
}
