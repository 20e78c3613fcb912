use crate::consts::NDVI_PEAK_FLOOR;
use crate::series::Sample;

use super::params::DetectionParams;

/// Seasonal NDVI maximum and its date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeasonalPeak {
    pub ndvi: f32,
    pub doy: f64,
}

impl Default for SeasonalPeak {
    fn default() -> Self {
        Self {
            ndvi: NDVI_PEAK_FLOOR,
            doy: 0.0,
        }
    }
}

impl SeasonalPeak {
    /// Running maximum over observed NDVI. Equal values move the peak to the
    /// later date.
    pub fn detect(samples: &[Sample]) -> Self {
        samples.iter().fold(Self::default(), |peak, s| match s.ndvi() {
            Some(ndvi) if ndvi >= peak.ndvi => Self { ndvi, doy: s.doy },
            _ => peak,
        })
    }

    /// Decay threshold halfway between the peak and the off-season baseline.
    pub fn vi50(&self, baseline: f32) -> f32 {
        (self.ndvi + baseline) / 2.0
    }
}

/// Fixed-length span after the peak in which harvest is searched for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchWindow {
    pub start: f64,
    pub end: f64,
    /// Date of the NDVI decay crossing that anchored the window.
    pub decay_doy: f64,
}

impl SearchWindow {
    /// Anchor the window on the first post-peak date where observed NDVI
    /// drops below VI50. Later candidates never replace the first one.
    /// `None` when NDVI never decays after the peak.
    pub fn detect(
        samples: &[Sample],
        peak: &SeasonalPeak,
        params: &DetectionParams,
    ) -> Option<Self> {
        let vi50 = peak.vi50(params.ndvi_baseline);
        samples
            .iter()
            .filter(|s| s.doy > peak.doy)
            .find(|s| s.ndvi().is_some_and(|ndvi| ndvi < vi50))
            .map(|s| {
                let start = s.doy - params.window_lead_in_days;
                Self {
                    start,
                    end: start + params.window_length_days,
                    decay_doy: s.doy,
                }
            })
    }

    /// Half-open membership: `start <= doy < end`.
    pub fn contains(&self, doy: f64) -> bool {
        doy >= self.start && doy < self.end
    }
}
