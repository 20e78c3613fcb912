use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::consts::SENTINEL;
use crate::doy::{day_of_year, DoyKey};
use crate::error::Result;

/// Spectral quantity carried by a scene or a stack file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    Ndvi,
    Hpi,
    Ndsi,
    HarvestDoy,
}

impl IndexKind {
    pub fn code(self) -> i32 {
        match self {
            Self::Ndvi => 0,
            Self::Hpi => 1,
            Self::Ndsi => 2,
            Self::HarvestDoy => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ndvi),
            1 => Some(Self::Hpi),
            2 => Some(Self::Ndsi),
            3 => Some(Self::HarvestDoy),
            _ => None,
        }
    }

    /// Band-name prefix, e.g. `NDVI` in `NDVI_DOY_0215000000`.
    pub fn band_prefix(self) -> &'static str {
        match self {
            Self::Ndvi => "NDVI",
            Self::Hpi => "HPI",
            Self::Ndsi => "NDSI",
            Self::HarvestDoy => "HARVEST",
        }
    }

    pub fn from_band_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "NDVI" => Some(Self::Ndvi),
            "HPI" => Some(Self::Hpi),
            "NDSI" => Some(Self::Ndsi),
            "HARVEST" => Some(Self::HarvestDoy),
            _ => None,
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ndvi => write!(f, "NDVI"),
            Self::Hpi => write!(f, "HPI"),
            Self::Ndsi => write!(f, "NDSI"),
            Self::HarvestDoy => write!(f, "Harvest DOY"),
        }
    }
}

/// Platform that acquired a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sensor {
    Landsat7,
    Landsat8,
    Landsat9,
    Sentinel2,
    Hls,
    #[default]
    Unknown,
}

impl Sensor {
    pub fn code(self) -> i32 {
        match self {
            Self::Landsat7 => 7,
            Self::Landsat8 => 8,
            Self::Landsat9 => 9,
            Self::Sentinel2 => 2,
            Self::Hls => 30,
            Self::Unknown => 0,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            7 => Self::Landsat7,
            8 => Self::Landsat8,
            9 => Self::Landsat9,
            2 => Self::Sentinel2,
            30 => Self::Hls,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Landsat7 => write!(f, "Landsat 7"),
            Self::Landsat8 => write!(f, "Landsat 8"),
            Self::Landsat9 => write!(f, "Landsat 9"),
            Self::Sentinel2 => write!(f, "Sentinel-2"),
            Self::Hls => write!(f, "HLS"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One entry of a stack's scene table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneInfo {
    pub acquired: DateTime<Utc>,
    pub sensor: Sensor,
}

impl SceneInfo {
    pub fn new(acquired: DateTime<Utc>, sensor: Sensor) -> Self {
        Self { acquired, sensor }
    }

    /// Fractional day-of-year relative to January 1 of `year`.
    pub fn doy(&self, year: i32) -> Result<f64> {
        day_of_year(self.acquired, year)
    }

    pub fn doy_key(&self, year: i32) -> Result<DoyKey> {
        DoyKey::for_acquisition(self.acquired, year)
    }
}

/// A single-band, single-date raster of one spectral index.
/// Absent observations hold [`SENTINEL`].
#[derive(Clone, Debug)]
pub struct Scene {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    pub metadata: SceneMetadata,
}

impl Scene {
    pub fn new(data: Array2<f32>, kind: IndexKind, info: SceneInfo) -> Self {
        Self {
            data,
            metadata: SceneMetadata {
                kind,
                info,
                scene_index: 0,
            },
        }
    }

    /// A scene with no observation at any pixel.
    pub fn empty(height: usize, width: usize, kind: IndexKind, info: SceneInfo) -> Self {
        Self::new(Array2::from_elem((height, width), SENTINEL), kind, info)
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn kind(&self) -> IndexKind {
        self.metadata.kind
    }

    /// Band name encoding kind and DOY key, e.g. `HPI_DOY_0212500000`.
    pub fn band_name(&self, year: i32) -> Result<String> {
        Ok(self.metadata.info.doy_key(year)?.band_name(self.kind()))
    }
}

#[derive(Clone, Debug)]
pub struct SceneMetadata {
    pub kind: IndexKind,
    pub info: SceneInfo,
    /// Position within the source stack file.
    pub scene_index: usize,
}

/// Metadata about a stack file.
#[derive(Clone, Debug)]
pub struct StackSummary {
    pub filename: PathBuf,
    pub kind: IndexKind,
    pub total_scenes: usize,
    pub width: u32,
    pub height: u32,
    pub year: i32,
    pub nodata: f32,
    pub description: Option<String>,
}
