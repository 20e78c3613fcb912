pub mod config;
mod grid;
mod harvest_map;
mod orchestrator;
mod types;

pub use grid::analyze_grid;
pub use harvest_map::{HarvestMap, HarvestSummary};
pub use orchestrator::{
    load_crop_map, load_series, run_pipeline, run_pipeline_reported, PipelineOutput,
};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter};
