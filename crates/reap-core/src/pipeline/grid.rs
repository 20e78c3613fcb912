use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::crop::{CropCodes, CropMap};
use crate::curve::{analyze_series, DetectionParams, PixelStatus};
use crate::error::{ReapError, Result};
use crate::series::{Sample, SeriesCube};

use super::types::{PipelineStage, ProgressReporter};

/// Run the curve analysis on every pixel of the cube.
///
/// Pixels are independent. Parallelizes at the row level for grids >= 256x256;
/// each row owns its sample buffer. Reports one progress item per row.
pub fn analyze_grid(
    cube: &SeriesCube,
    crops: &CropMap,
    codes: &CropCodes,
    params: &DetectionParams,
    reporter: &dyn ProgressReporter,
) -> Result<Array2<PixelStatus>> {
    let (h, w) = cube.dim();
    if crops.dim() != (h, w) {
        let (rows, cols) = crops.dim();
        return Err(ReapError::DimensionMismatch {
            source_name: "crop raster".into(),
            expected_rows: h,
            expected_cols: w,
            rows,
            cols,
        });
    }

    reporter.begin_stage(PipelineStage::Analyzing, Some(h));
    let done = AtomicUsize::new(0);

    let analyze_row = |row: usize, buf: &mut Vec<Sample>| -> Vec<PixelStatus> {
        let statuses = (0..w)
            .map(|col| {
                cube.fill_pixel_series(row, col, buf);
                let crop = codes.classify(crops.code(row, col));
                analyze_series(buf.as_slice(), params).status(crop, params)
            })
            .collect();
        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
        statuses
    };

    let rows: Vec<Vec<PixelStatus>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h)
            .into_par_iter()
            .map(|row| {
                let mut buf = Vec::with_capacity(cube.date_count());
                analyze_row(row, &mut buf)
            })
            .collect()
    } else {
        let mut buf = Vec::with_capacity(cube.date_count());
        (0..h).map(|row| analyze_row(row, &mut buf)).collect()
    };
    reporter.finish_stage();

    let flat: Vec<PixelStatus> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((h, w), flat).map_err(|e| ReapError::InvalidStack(e.to_string()))
}
