use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use reap_core::pipeline::config::HarvestConfig;
use reap_core::pipeline::{run_pipeline_reported, PipelineStage, ProgressReporter};

use crate::summary::{print_result_summary, print_run_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Run config file (TOML). Flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// NDVI stack file (repeatable, one per sensor)
    #[arg(long)]
    pub ndvi: Vec<PathBuf>,

    /// HPI stack file (repeatable)
    #[arg(long)]
    pub hpi: Vec<PathBuf>,

    /// NDSI stack file for the snow mask (repeatable)
    #[arg(long)]
    pub ndsi: Vec<PathBuf>,

    /// Crop-type raster (8/16-bit grayscale)
    #[arg(long)]
    pub crop: Option<PathBuf>,

    /// Target year; DOY 0 is January 1 of this year
    #[arg(long)]
    pub year: Option<i32>,

    /// NHPI crossing threshold
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Raw HPI values at or above this are ignored
    #[arg(long)]
    pub upper_bound: Option<f32>,

    /// Minimum post-peak HPI for a pixel to be kept
    #[arg(long)]
    pub min_peak_hpi: Option<f32>,

    /// Disable the NDSI snow mask
    #[arg(long)]
    pub no_snow_mask: bool,

    /// Output file path (.tif or .rstk)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Drives one indicatif bar across pipeline stages.
struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self { bar })
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.bar.reset();
        self.bar.set_length(total_items.unwrap_or(1) as u64);
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate().context("Invalid run configuration")?;

    print_run_summary(&config);

    let reporter = Arc::new(BarReporter::new()?);
    let output = run_pipeline_reported(&config, reporter.clone())?;
    reporter.bar.finish_with_message("Done");

    print_result_summary(&output.map.summary(), &output.report);
    println!("\nOutput saved to {}", config.output.display());

    Ok(())
}

fn build_config(args: &RunArgs) -> Result<HarvestConfig> {
    let mut config = match args.config {
        Some(ref path) => super::load_config(path)?,
        None => HarvestConfig::default(),
    };

    if !args.ndvi.is_empty() {
        config.inputs.ndvi = args.ndvi.clone();
    }
    if !args.hpi.is_empty() {
        config.inputs.hpi = args.hpi.clone();
    }
    if !args.ndsi.is_empty() {
        config.inputs.ndsi = args.ndsi.clone();
    }
    if let Some(ref crop) = args.crop {
        config.inputs.crop_raster = Some(crop.clone());
    }
    if let Some(year) = args.year {
        config.year = year;
    }
    if let Some(t) = args.threshold {
        config.detection.nhpi_threshold = t;
    }
    if let Some(u) = args.upper_bound {
        config.detection.hpi_upper_bound = u;
    }
    if let Some(m) = args.min_peak_hpi {
        config.detection.min_peak_hpi = m;
    }
    if args.no_snow_mask {
        config.snow_mask.enabled = false;
    }
    if let Some(ref out) = args.output {
        config.output = out.clone();
    }
    Ok(config)
}
