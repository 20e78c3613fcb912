use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::crop::CropMap;
use crate::error::{ReapError, Result};
use crate::io::raster::{load_crop_raster, save_harvest_map};
use crate::io::stack::StackReader;
use crate::scene::IndexKind;
use crate::series::{BuildReport, SeriesBuilder, SeriesCube};

use super::config::HarvestConfig;
use super::grid::analyze_grid;
use super::harvest_map::HarvestMap;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter};

/// Result of a full run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub map: HarvestMap,
    pub report: BuildReport,
}

/// Open every configured stack and merge it into a series cube.
pub fn load_series(
    config: &HarvestConfig,
    reporter: &dyn ProgressReporter,
) -> Result<(SeriesCube, BuildReport)> {
    let inputs = &config.inputs;
    let roles = inputs
        .ndvi
        .iter()
        .map(|p| (IndexKind::Ndvi, p))
        .chain(inputs.hpi.iter().map(|p| (IndexKind::Hpi, p)))
        .chain(inputs.ndsi.iter().map(|p| (IndexKind::Ndsi, p)));

    let mut builder = SeriesBuilder::new(config.year)?;
    let (start, end) = config.season_bounds()?;
    builder = builder.with_season(start, end);
    if let Some(threshold) = config.snow_threshold() {
        builder = builder.with_snow_mask(threshold);
    }

    let stacks = inputs.ndvi.len() + inputs.hpi.len() + inputs.ndsi.len();
    reporter.begin_stage(PipelineStage::Reading, Some(stacks));
    for (i, (role, path)) in roles.enumerate() {
        let reader = open_stack(path, role, config.year)?;
        let accepted = builder.add_scenes(reader.scenes().collect::<Result<Vec<_>>>()?)?;
        info!(
            path = %path.display(),
            kind = %role,
            scenes = reader.scene_count(),
            accepted,
            "Stack loaded"
        );
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::BuildingSeries, None);
    let built = builder.build()?;
    reporter.finish_stage();
    Ok(built)
}

fn open_stack(path: &Path, role: IndexKind, year: i32) -> Result<StackReader> {
    let reader = StackReader::open(path)?;
    if reader.kind() != role {
        return Err(ReapError::KindMismatch {
            expected: role,
            found: reader.kind(),
        });
    }
    if reader.header.year != year {
        warn!(
            path = %path.display(),
            stack_year = reader.header.year,
            target_year = year,
            "Stack was produced for a different year"
        );
    }
    Ok(reader)
}

/// Load the configured crop-type raster.
pub fn load_crop_map(config: &HarvestConfig) -> Result<CropMap> {
    let path = config
        .inputs
        .crop_raster
        .as_deref()
        .ok_or_else(|| ReapError::InvalidConfig("no crop raster given".into()))?;
    let crops = load_crop_raster(path)?;
    let (rows, cols) = crops.dim();
    info!(path = %path.display(), rows, cols, "Crop raster loaded");
    Ok(crops)
}

/// Run the full harvest-mapping pipeline with a thread-safe progress reporter.
pub fn run_pipeline_reported(
    config: &HarvestConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineOutput> {
    config.validate()?;

    let (cube, report) = load_series(config, reporter.as_ref())?;
    let crops = load_crop_map(config)?;

    let (rows, cols) = cube.dim();
    info!(rows, cols, dates = cube.date_count(), "Analyzing pixels");
    let statuses = analyze_grid(
        &cube,
        &crops,
        &config.crops,
        &config.detection,
        reporter.as_ref(),
    )?;
    let map = HarvestMap::new(statuses, config.year);

    let summary = map.summary();
    info!(
        harvested = summary.harvested,
        pixels = summary.pixels,
        "Analysis complete"
    );

    reporter.begin_stage(PipelineStage::Writing, None);
    save_harvest_map(&map, &config.output)?;
    reporter.finish_stage();
    info!(path = %config.output.display(), "Harvest map saved");

    Ok(PipelineOutput { map, report })
}

/// Run the full pipeline without progress reporting.
pub fn run_pipeline(config: &HarvestConfig) -> Result<PipelineOutput> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}
