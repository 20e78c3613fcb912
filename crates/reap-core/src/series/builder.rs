use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use ndarray::{Array2, Array3, ArrayViewMut2, Axis, Zip};
use tracing::{debug, info};

use crate::consts::SENTINEL;
use crate::doy::{year_start, DoyKey};
use crate::error::{ReapError, Result};
use crate::scene::{IndexKind, Scene};

use super::cube::SeriesCube;
use super::sample::is_observed;

/// Counters describing what went into a [`SeriesCube`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub ndvi_scenes: usize,
    pub hpi_scenes: usize,
    pub ndsi_scenes: usize,
    pub outside_season: usize,
    /// HPI pixel observations dropped by the snow mask.
    pub snow_masked: usize,
    pub dates: usize,
}

/// Merges NDVI, HPI and optional NDSI scenes from any number of sensors into
/// a uniformly indexed [`SeriesCube`].
pub struct SeriesBuilder {
    year: i32,
    season: Option<(NaiveDate, NaiveDate)>,
    snow_threshold: Option<f32>,
    dims: Option<(usize, usize)>,
    ndvi: Vec<(DoyKey, Scene)>,
    hpi: Vec<(DoyKey, Scene)>,
    ndsi: Vec<(DoyKey, Scene)>,
    report: BuildReport,
}

impl SeriesBuilder {
    /// `year` sets the DOY epoch.
    pub fn new(year: i32) -> Result<Self> {
        year_start(year)?;
        Ok(Self {
            year,
            season: None,
            snow_threshold: None,
            dims: None,
            ndvi: Vec::new(),
            hpi: Vec::new(),
            ndsi: Vec::new(),
            report: BuildReport::default(),
        })
    }

    /// Keep only scenes acquired on `start..=end` (UTC dates).
    pub fn with_season(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.season = Some((start, end));
        self
    }

    /// Drop HPI observations whose same-date NDSI is `>= ndsi_threshold`.
    pub fn with_snow_mask(mut self, ndsi_threshold: f32) -> Self {
        self.snow_threshold = Some(ndsi_threshold);
        self
    }

    /// Add one scene. Returns `false` when the scene falls outside the season.
    pub fn add_scene(&mut self, scene: Scene) -> Result<bool> {
        let kind = scene.kind();
        let key = scene.metadata.info.doy_key(self.year)?;
        let dims = scene.data.dim();
        match self.dims {
            None => self.dims = Some(dims),
            Some((rows, cols)) if (rows, cols) != dims => {
                return Err(ReapError::DimensionMismatch {
                    source_name: key.band_name(kind),
                    expected_rows: rows,
                    expected_cols: cols,
                    rows: dims.0,
                    cols: dims.1,
                });
            }
            Some(_) => {}
        }

        if let Some((start, end)) = self.season {
            let date = scene.metadata.info.acquired.date_naive();
            if date < start || date > end {
                debug!(band = %key.band_name(kind), %date, "Scene outside season, skipped");
                self.report.outside_season += 1;
                return Ok(false);
            }
        }

        match kind {
            IndexKind::Ndvi => {
                self.report.ndvi_scenes += 1;
                self.ndvi.push((key, scene));
            }
            IndexKind::Hpi => {
                self.report.hpi_scenes += 1;
                self.hpi.push((key, scene));
            }
            IndexKind::Ndsi => {
                self.report.ndsi_scenes += 1;
                self.ndsi.push((key, scene));
            }
            IndexKind::HarvestDoy => {
                return Err(ReapError::UnsupportedRaster(format!(
                    "{} scenes cannot enter a series",
                    kind
                )));
            }
        }
        Ok(true)
    }

    pub fn add_scenes<I>(&mut self, scenes: I) -> Result<usize>
    where
        I: IntoIterator<Item = Scene>,
    {
        let mut accepted = 0;
        for scene in scenes {
            if self.add_scene(scene)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Merge everything into a cube on the union of NDVI and HPI dates.
    pub fn build(self) -> Result<(SeriesCube, BuildReport)> {
        if self.ndvi.is_empty() {
            return Err(ReapError::EmptySequence("no NDVI scenes in season".into()));
        }
        if self.hpi.is_empty() {
            return Err(ReapError::EmptySequence("no HPI scenes in season".into()));
        }
        let (rows, cols) = self
            .dims
            .ok_or_else(|| ReapError::EmptySequence("no scenes".into()))?;

        let keys: Vec<DoyKey> = self
            .ndvi
            .iter()
            .chain(self.hpi.iter())
            .map(|(k, _)| *k)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let slot: BTreeMap<DoyKey, usize> = keys.iter().enumerate().map(|(t, k)| (*k, t)).collect();
        let n = keys.len();

        let mut report = self.report;
        report.dates = n;

        let mut ndvi = Array3::from_elem((n, rows, cols), SENTINEL);
        for (key, scene) in &self.ndvi {
            merge_first_observed(ndvi.index_axis_mut(Axis(0), slot[key]), &scene.data);
        }

        let mut snow: BTreeMap<DoyKey, Array2<f32>> = BTreeMap::new();
        for (key, scene) in &self.ndsi {
            let layer = snow
                .entry(*key)
                .or_insert_with(|| Array2::from_elem((rows, cols), SENTINEL));
            merge_first_observed(layer.view_mut(), &scene.data);
        }

        let mut hpi = Array3::from_elem((n, rows, cols), SENTINEL);
        for (key, scene) in &self.hpi {
            let dst = hpi.index_axis_mut(Axis(0), slot[key]);
            match (self.snow_threshold, snow.get(key)) {
                (Some(threshold), Some(ndsi)) => {
                    report.snow_masked += merge_snow_masked(dst, &scene.data, ndsi, threshold);
                }
                _ => merge_first_observed(dst, &scene.data),
            }
        }

        info!(
            dates = n,
            rows,
            cols,
            ndvi_scenes = report.ndvi_scenes,
            hpi_scenes = report.hpi_scenes,
            snow_masked = report.snow_masked,
            "Series cube built"
        );

        let cube = SeriesCube::from_arrays(keys, ndvi, hpi)?;
        Ok((cube, report))
    }
}

/// Fill absent pixels of `dst` from `src`; earlier values win.
fn merge_first_observed(mut dst: ArrayViewMut2<f32>, src: &Array2<f32>) {
    Zip::from(&mut dst).and(src).for_each(|d, &v| {
        if !is_observed(*d) && is_observed(v) {
            *d = v;
        }
    });
}

/// Like [`merge_first_observed`] but skips snow-contaminated pixels.
/// Returns the number of observations dropped.
fn merge_snow_masked(
    mut dst: ArrayViewMut2<f32>,
    src: &Array2<f32>,
    ndsi: &Array2<f32>,
    threshold: f32,
) -> usize {
    let mut masked = 0;
    Zip::from(&mut dst).and(src).and(ndsi).for_each(|d, &v, &s| {
        if is_observed(*d) || !is_observed(v) {
            return;
        }
        if is_observed(s) && s >= threshold {
            masked += 1;
        } else {
            *d = v;
        }
    });
    masked
}
