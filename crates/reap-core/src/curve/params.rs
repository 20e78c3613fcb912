use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HPI_UPPER_BOUND, DEFAULT_MIN_PEAK_HPI, DEFAULT_NDVI_BASELINE, DEFAULT_NHPI_THRESHOLD,
    DEFAULT_WINDOW_LEAD_IN_DAYS, DEFAULT_WINDOW_LENGTH_DAYS,
};
use crate::error::{ReapError, Result};

/// Tunables of the per-pixel curve analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionParams {
    /// NHPI level whose first exceedance marks the harvest.
    #[serde(default = "default_nhpi_threshold")]
    pub nhpi_threshold: f32,
    /// Raw HPI at or above this is an artifact and ignored.
    #[serde(default = "default_hpi_upper_bound")]
    pub hpi_upper_bound: f32,
    /// Post-peak HPI maximum must exceed this for the pixel to be trusted.
    #[serde(default = "default_min_peak_hpi")]
    pub min_peak_hpi: f32,
    #[serde(default = "default_window_length_days")]
    pub window_length_days: f64,
    /// Days between the window start and the NDVI decay crossing.
    #[serde(default = "default_window_lead_in_days")]
    pub window_lead_in_days: f64,
    /// Off-season NDVI level; VI50 = (peak + baseline) / 2.
    #[serde(default = "default_ndvi_baseline")]
    pub ndvi_baseline: f32,
}

fn default_nhpi_threshold() -> f32 {
    DEFAULT_NHPI_THRESHOLD
}
fn default_hpi_upper_bound() -> f32 {
    DEFAULT_HPI_UPPER_BOUND
}
fn default_min_peak_hpi() -> f32 {
    DEFAULT_MIN_PEAK_HPI
}
fn default_window_length_days() -> f64 {
    DEFAULT_WINDOW_LENGTH_DAYS
}
fn default_window_lead_in_days() -> f64 {
    DEFAULT_WINDOW_LEAD_IN_DAYS
}
fn default_ndvi_baseline() -> f32 {
    DEFAULT_NDVI_BASELINE
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            nhpi_threshold: DEFAULT_NHPI_THRESHOLD,
            hpi_upper_bound: DEFAULT_HPI_UPPER_BOUND,
            min_peak_hpi: DEFAULT_MIN_PEAK_HPI,
            window_length_days: DEFAULT_WINDOW_LENGTH_DAYS,
            window_lead_in_days: DEFAULT_WINDOW_LEAD_IN_DAYS,
            ndvi_baseline: DEFAULT_NDVI_BASELINE,
        }
    }
}

impl DetectionParams {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("nhpi_threshold", self.nhpi_threshold.is_finite()),
            ("hpi_upper_bound", self.hpi_upper_bound.is_finite()),
            ("min_peak_hpi", self.min_peak_hpi.is_finite()),
            ("window_length_days", self.window_length_days.is_finite()),
            ("window_lead_in_days", self.window_lead_in_days.is_finite()),
            ("ndvi_baseline", self.ndvi_baseline.is_finite()),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, ok)| !ok) {
            return Err(ReapError::InvalidConfig(format!("{} must be finite", name)));
        }
        if self.window_length_days <= 0.0 {
            return Err(ReapError::InvalidConfig(format!(
                "window_length_days must be positive, got {}",
                self.window_length_days
            )));
        }
        if self.window_lead_in_days < 0.0 {
            return Err(ReapError::InvalidConfig(format!(
                "window_lead_in_days must not be negative, got {}",
                self.window_lead_in_days
            )));
        }
        if self.hpi_upper_bound <= self.min_peak_hpi {
            return Err(ReapError::InvalidConfig(format!(
                "hpi_upper_bound ({}) must exceed min_peak_hpi ({})",
                self.hpi_upper_bound, self.min_peak_hpi
            )));
        }
        Ok(())
    }
}
