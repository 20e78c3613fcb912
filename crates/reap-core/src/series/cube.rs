use ndarray::Array3;

use crate::doy::DoyKey;
use crate::error::{ReapError, Result};

use super::sample::{PixelSeries, Sample};

/// Uniformly indexed NDVI/HPI series for a whole grid.
///
/// Every pixel has one value per date on a shared ascending DOY axis, with
/// [`SENTINEL`](crate::consts::SENTINEL) where nothing was observed. Arrays
/// are shaped `(dates, rows, cols)`.
#[derive(Clone, Debug)]
pub struct SeriesCube {
    keys: Vec<DoyKey>,
    doys: Vec<f64>,
    ndvi: Array3<f32>,
    hpi: Array3<f32>,
}

impl SeriesCube {
    /// Assemble a cube from a strictly ascending date axis and two
    /// `(dates, rows, cols)` arrays.
    pub fn from_arrays(keys: Vec<DoyKey>, ndvi: Array3<f32>, hpi: Array3<f32>) -> Result<Self> {
        if ndvi.dim() != hpi.dim() {
            let (_, rows, cols) = hpi.dim();
            let (_, expected_rows, expected_cols) = ndvi.dim();
            return Err(ReapError::DimensionMismatch {
                source_name: "HPI cube".into(),
                expected_rows,
                expected_cols,
                rows,
                cols,
            });
        }
        if ndvi.dim().0 != keys.len() {
            return Err(ReapError::InvalidStack(format!(
                "Cube has {} date slices but {} dates",
                ndvi.dim().0,
                keys.len()
            )));
        }
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReapError::InvalidStack(
                "Cube dates must be strictly ascending".into(),
            ));
        }
        let doys = keys.iter().map(|k| k.doy()).collect();
        Ok(Self {
            keys,
            doys,
            ndvi,
            hpi,
        })
    }

    /// Grid shape as (rows, cols).
    pub fn dim(&self) -> (usize, usize) {
        let (_, rows, cols) = self.ndvi.dim();
        (rows, cols)
    }

    pub fn date_count(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[DoyKey] {
        &self.keys
    }

    pub fn doys(&self) -> &[f64] {
        &self.doys
    }

    pub fn ndvi(&self) -> &Array3<f32> {
        &self.ndvi
    }

    pub fn hpi(&self) -> &Array3<f32> {
        &self.hpi
    }

    /// Refill `buf` with the series of one pixel, reusing its allocation.
    pub fn fill_pixel_series(&self, row: usize, col: usize, buf: &mut Vec<Sample>) {
        buf.clear();
        buf.extend(self.doys.iter().enumerate().map(|(t, &doy)| {
            Sample::new(doy, self.ndvi[[t, row, col]], self.hpi[[t, row, col]])
        }));
    }

    pub fn pixel_series(&self, row: usize, col: usize) -> PixelSeries {
        let mut buf = Vec::with_capacity(self.date_count());
        self.fill_pixel_series(row, col, &mut buf);
        // Already in date order.
        PixelSeries::from_samples(buf)
    }
}
