use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SEASON_END, DEFAULT_SEASON_START, DEFAULT_SNOW_NDSI_THRESHOLD};
use crate::crop::CropCodes;
use crate::curve::DetectionParams;
use crate::error::{ReapError, Result};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2200;

/// Full configuration of one harvest-mapping run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Target year; DOY 0.0 is January 1, 00:00 UTC of this year.
    pub year: i32,
    pub output: PathBuf,
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub season: SeasonConfig,
    #[serde(default)]
    pub detection: DetectionParams,
    #[serde(default)]
    pub snow_mask: SnowMaskConfig,
    #[serde(default)]
    pub crops: CropCodes,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputsConfig {
    /// NDVI stacks, one per sensor.
    #[serde(default)]
    pub ndvi: Vec<PathBuf>,
    #[serde(default)]
    pub hpi: Vec<PathBuf>,
    /// Optional NDSI stacks feeding the snow mask.
    #[serde(default)]
    pub ndsi: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_raster: Option<PathBuf>,
}

/// Inclusive acquisition-date range. Unset bounds fall back to Aug 1 and
/// Dec 31 of the target year.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnowMaskConfig {
    #[serde(default = "default_snow_enabled")]
    pub enabled: bool,
    /// HPI is dropped where same-date NDSI is at or above this.
    #[serde(default = "default_ndsi_threshold")]
    pub ndsi_threshold: f32,
}

fn default_snow_enabled() -> bool {
    true
}
fn default_ndsi_threshold() -> f32 {
    DEFAULT_SNOW_NDSI_THRESHOLD
}

impl Default for SnowMaskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ndsi_threshold: DEFAULT_SNOW_NDSI_THRESHOLD,
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            year: 2024,
            output: PathBuf::from("harvest.tif"),
            inputs: InputsConfig::default(),
            season: SeasonConfig::default(),
            detection: DetectionParams::default(),
            snow_mask: SnowMaskConfig::default(),
            crops: CropCodes::default(),
        }
    }
}

impl HarvestConfig {
    /// Default configuration with placeholder input paths, as written by
    /// `reap config`. Season bounds stay unset so they follow `year`.
    pub fn template() -> Self {
        let mut config = Self::default();
        config.inputs.ndvi = vec![PathBuf::from("ndvi.rstk")];
        config.inputs.hpi = vec![PathBuf::from("hpi.rstk")];
        config.inputs.crop_raster = Some(PathBuf::from("cdl.tif"));
        config
    }

    /// Resolved inclusive season bounds.
    pub fn season_bounds(&self) -> Result<(NaiveDate, NaiveDate)> {
        let default_date = |(month, day): (u32, u32)| {
            NaiveDate::from_ymd_opt(self.year, month, day).ok_or(ReapError::InvalidYear(self.year))
        };
        let start = match self.season.start {
            Some(d) => d,
            None => default_date(DEFAULT_SEASON_START)?,
        };
        let end = match self.season.end {
            Some(d) => d,
            None => default_date(DEFAULT_SEASON_END)?,
        };
        Ok((start, end))
    }

    /// Snow threshold to apply, if the mask is on.
    pub fn snow_threshold(&self) -> Option<f32> {
        self.snow_mask.enabled.then_some(self.snow_mask.ndsi_threshold)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(ReapError::InvalidYear(self.year));
        }
        if self.inputs.ndvi.is_empty() {
            return Err(ReapError::InvalidConfig("no NDVI stacks given".into()));
        }
        if self.inputs.hpi.is_empty() {
            return Err(ReapError::InvalidConfig("no HPI stacks given".into()));
        }
        self.detection.validate()?;
        if !self.snow_mask.ndsi_threshold.is_finite() {
            return Err(ReapError::InvalidConfig(
                "ndsi_threshold must be finite".into(),
            ));
        }
        let (start, end) = self.season_bounds()?;
        if end < start {
            return Err(ReapError::InvalidConfig(format!(
                "season ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(())
    }
}
