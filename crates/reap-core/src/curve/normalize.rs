use crate::series::Sample;

use super::extrema::HpiExtrema;

/// A date of the normalized series. `nhpi` is `None` where the raw HPI was
/// absent or at/above the upper bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedSample {
    pub doy: f64,
    pub nhpi: Option<f32>,
}

/// Rescales raw HPI to NHPI = (HPI - min) / (max - min).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalizer {
    min: f32,
    range: f32,
    upper_bound: f32,
}

impl Normalizer {
    /// `None` when the range is degenerate: `max <= min` or non-finite.
    /// Such pixels cannot produce a crossing.
    pub fn new(extrema: &HpiExtrema, upper_bound: f32) -> Option<Self> {
        let range = extrema.range();
        if !extrema.min.is_finite() || !range.is_finite() || range <= 0.0 {
            return None;
        }
        Some(Self {
            min: extrema.min,
            range,
            upper_bound,
        })
    }

    pub fn normalize(&self, sample: &Sample) -> NormalizedSample {
        let nhpi = sample
            .hpi()
            .filter(|&hpi| hpi < self.upper_bound)
            .map(|hpi| (hpi - self.min) / self.range);
        NormalizedSample {
            doy: sample.doy,
            nhpi,
        }
    }

    pub fn normalize_series<'a>(
        &'a self,
        samples: &'a [Sample],
    ) -> impl Iterator<Item = NormalizedSample> + 'a {
        samples.iter().map(move |s| self.normalize(s))
    }
}
