use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use reap_core::curve::{analyze_series, CrossingOutcome};
use reap_core::pipeline::{load_crop_map, load_series, NoOpReporter};

use super::load_config;

#[derive(Args)]
pub struct ProbeArgs {
    /// Run config file (TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Pixel row
    #[arg(long)]
    pub row: usize,

    /// Pixel column
    #[arg(long)]
    pub col: usize,
}

/// Print one pixel's series and every intermediate quantity of its analysis.
pub fn run(args: &ProbeArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    config.validate()?;

    let (cube, _) = load_series(&config, &NoOpReporter)?;
    let crops = load_crop_map(&config)?;
    let (rows, cols) = cube.dim();
    if args.row >= rows || args.col >= cols {
        bail!(
            "Pixel ({}, {}) is outside the {}x{} grid",
            args.row,
            args.col,
            rows,
            cols
        );
    }
    if crops.dim() != (rows, cols) {
        bail!(
            "Crop raster is {}x{}, stacks are {}x{}",
            crops.dim().0,
            crops.dim().1,
            rows,
            cols
        );
    }

    let params = &config.detection;
    let series = cube.pixel_series(args.row, args.col);
    let analysis = analyze_series(series.samples(), params);
    let crop = config.crops.classify(crops.code(args.row, args.col));

    println!("Pixel ({}, {}), crop {}", args.row, args.col, crop);
    println!(
        "{} dates, {} with observations",
        series.len(),
        series.observed_dates()
    );
    println!();
    println!("  {:>10}  {:>8}  {:>8}  {:>8}", "DOY", "NDVI", "HPI", "NHPI");
    for s in series.samples() {
        let nhpi = analysis
            .normalizer
            .as_ref()
            .and_then(|n| n.normalize(s).nhpi);
        println!(
            "  {:>10.4}  {:>8}  {:>8}  {:>8}",
            s.doy,
            fmt_opt(s.ndvi()),
            fmt_opt(s.hpi()),
            fmt_opt(nhpi)
        );
    }
    println!();

    let peak = &analysis.peak;
    println!(
        "Peak NDVI:   {:.4} on DOY {:.4} (VI50 {:.4})",
        peak.ndvi,
        peak.doy,
        peak.vi50(params.ndvi_baseline)
    );
    match analysis.window {
        Some(w) => println!(
            "Window:      [{:.4}, {:.4}) from decay on DOY {:.4}",
            w.start, w.end, w.decay_doy
        ),
        None => println!("Window:      none (NDVI never decays after the peak)"),
    }
    let ext = &analysis.extrema;
    println!("HPI max:     {:.4}{}", ext.max, fmt_doy(ext.max_doy));
    println!("HPI min:     {:.4}{}", ext.min, fmt_doy(ext.min_doy));
    match analysis.crossing {
        CrossingOutcome::NoCrossing => println!("Crossing:    none"),
        CrossingOutcome::Edge { doy } => println!("Crossing:    edge at DOY {:.4}", doy),
        CrossingOutcome::Interpolated { doy, prev, hit } => println!(
            "Crossing:    DOY {:.4} between ({:.4}, {:.4}) and ({:.4}, {:.4})",
            doy, prev.doy, prev.nhpi, hit.doy, hit.nhpi
        ),
    }
    println!("Verdict:     {}", analysis.status(crop, params));

    Ok(())
}

fn fmt_opt(v: Option<f32>) -> String {
    v.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".into())
}

fn fmt_doy(doy: Option<f64>) -> String {
    doy.map(|d| format!(" on DOY {:.4}", d)).unwrap_or_default()
}
