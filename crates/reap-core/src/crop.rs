use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CORN_CODE, DEFAULT_SOYBEAN_CODE};

/// Crop-type codes recognised as harvest targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCodes {
    #[serde(default = "default_corn")]
    pub corn: u16,
    #[serde(default = "default_soybean")]
    pub soybean: u16,
}

fn default_corn() -> u16 {
    DEFAULT_CORN_CODE
}
fn default_soybean() -> u16 {
    DEFAULT_SOYBEAN_CODE
}

impl Default for CropCodes {
    fn default() -> Self {
        Self {
            corn: DEFAULT_CORN_CODE,
            soybean: DEFAULT_SOYBEAN_CODE,
        }
    }
}

impl CropCodes {
    pub fn classify(&self, code: u16) -> CropClass {
        if code == self.corn {
            CropClass::Corn
        } else if code == self.soybean {
            CropClass::Soybean
        } else {
            CropClass::Other(code)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropClass {
    Corn,
    Soybean,
    Other(u16),
}

impl CropClass {
    pub fn is_target(self) -> bool {
        matches!(self, Self::Corn | Self::Soybean)
    }
}

impl std::fmt::Display for CropClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corn => write!(f, "Corn"),
            Self::Soybean => write!(f, "Soybean"),
            Self::Other(code) => write!(f, "Other ({})", code),
        }
    }
}

/// Crop-type classification raster, co-registered with the index stacks.
#[derive(Clone, Debug)]
pub struct CropMap {
    /// Crop codes, shape = (height, width)
    pub codes: Array2<u16>,
}

impl CropMap {
    pub fn new(codes: Array2<u16>) -> Self {
        Self { codes }
    }

    /// A map where every pixel carries `code`.
    pub fn uniform(height: usize, width: usize, code: u16) -> Self {
        Self::new(Array2::from_elem((height, width), code))
    }

    pub fn dim(&self) -> (usize, usize) {
        self.codes.dim()
    }

    pub fn code(&self, row: usize, col: usize) -> u16 {
        self.codes[[row, col]]
    }
}
