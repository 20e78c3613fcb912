use ndarray::Array2;

use crate::curve::PixelStatus;

/// Per-pixel verdicts of one run.
#[derive(Clone, Debug)]
pub struct HarvestMap {
    /// Verdicts, shape = (rows, cols)
    pub statuses: Array2<PixelStatus>,
    pub year: i32,
}

/// Counts of each verdict plus harvested-DOY statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HarvestSummary {
    pub pixels: usize,
    pub harvested: usize,
    pub edge: usize,
    pub non_target_crop: usize,
    pub weak_signal: usize,
    pub no_window: usize,
    pub degenerate_range: usize,
    pub no_crossing: usize,
    pub min_doy: Option<f64>,
    pub max_doy: Option<f64>,
    pub mean_doy: Option<f64>,
}

impl HarvestMap {
    pub fn new(statuses: Array2<PixelStatus>, year: i32) -> Self {
        Self { statuses, year }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.statuses.dim()
    }

    pub fn status(&self, row: usize, col: usize) -> PixelStatus {
        self.statuses[[row, col]]
    }

    /// Harvest DOY per pixel, NaN where masked.
    pub fn doy_raster(&self) -> Array2<f64> {
        self.statuses.mapv(|s| s.harvest_doy().unwrap_or(f64::NAN))
    }

    pub fn summary(&self) -> HarvestSummary {
        let mut s = HarvestSummary {
            pixels: self.statuses.len(),
            ..Default::default()
        };
        let mut sum = 0.0;
        for status in self.statuses.iter() {
            match *status {
                PixelStatus::Harvested { doy, edge } => {
                    s.harvested += 1;
                    if edge {
                        s.edge += 1;
                    }
                    sum += doy;
                    s.min_doy = Some(s.min_doy.map_or(doy, |m| m.min(doy)));
                    s.max_doy = Some(s.max_doy.map_or(doy, |m| m.max(doy)));
                }
                PixelStatus::NonTargetCrop => s.non_target_crop += 1,
                PixelStatus::WeakSignal => s.weak_signal += 1,
                PixelStatus::NoWindow => s.no_window += 1,
                PixelStatus::DegenerateRange => s.degenerate_range += 1,
                PixelStatus::NoCrossing => s.no_crossing += 1,
            }
        }
        if s.harvested > 0 {
            s.mean_doy = Some(sum / s.harvested as f64);
        }
        s
    }
}
