use thiserror::Error;

use crate::scene::IndexKind;

#[derive(Error, Debug)]
pub enum ReapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stack file: {0}")]
    InvalidStack(String),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("{source_name}: expected {expected_rows}x{expected_cols} raster, got {rows}x{cols}")]
    DimensionMismatch {
        source_name: String,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Scene index {index} out of range (total: {total})")]
    SceneIndexOutOfRange { index: usize, total: usize },

    #[error("Expected a {expected} stack, found {found}")]
    KindMismatch { expected: IndexKind, found: IndexKind },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid target year: {0}")]
    InvalidYear(i32),

    #[error("Invalid acquisition timestamp: {0} ms")]
    InvalidTimestamp(i64),

    #[error("Invalid band name: {0}")]
    InvalidBandName(String),

    #[error("Unsupported raster: {0}")]
    UnsupportedRaster(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty scene sequence: {0}")]
    EmptySequence(String),
}

pub type Result<T> = std::result::Result<T, ReapError>;
