use crate::consts::SENTINEL;

/// True when `value` is a real measurement rather than the sentinel.
/// Anything at or below the sentinel, and NaN, counts as absent.
#[inline]
pub fn is_observed(value: f32) -> bool {
    value > SENTINEL
}

/// One date of a pixel's time series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub doy: f64,
    pub ndvi: f32,
    pub hpi: f32,
}

impl Sample {
    pub fn new(doy: f64, ndvi: f32, hpi: f32) -> Self {
        Self { doy, ndvi, hpi }
    }

    pub fn ndvi(&self) -> Option<f32> {
        is_observed(self.ndvi).then_some(self.ndvi)
    }

    pub fn hpi(&self) -> Option<f32> {
        is_observed(self.hpi).then_some(self.hpi)
    }
}

/// Chronologically ordered samples of one pixel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelSeries {
    samples: Vec<Sample>,
}

impl PixelSeries {
    /// Sort by DOY. Equal dates keep their input order.
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| a.doy.total_cmp(&b.doy));
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of dates with at least one observed index.
    pub fn observed_dates(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.ndvi().is_some() || s.hpi().is_some())
            .count()
    }
}

impl AsRef<[Sample]> for PixelSeries {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}
