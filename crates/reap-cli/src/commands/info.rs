use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use reap_core::io::stack::StackReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input stack file (.rstk)
    pub file: PathBuf,

    /// Year used for DOYs and band names (defaults to the stack's year)
    #[arg(long)]
    pub year: Option<i32>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = StackReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = reader.summary(&args.file);
    let year = args.year.unwrap_or(info.year);

    println!("File:        {}", info.filename.display());
    println!("Index:       {}", info.kind);
    println!("Scenes:      {}", info.total_scenes);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Year:        {}", info.year);
    println!("Nodata:      {}", info.nodata);
    if let Some(ref desc) = info.description {
        println!("Description: {}", desc);
    }

    let scene_bytes = reader.header.scene_byte_size();
    let total_mb = (scene_bytes * info.total_scenes) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    if info.total_scenes == 0 {
        return Ok(());
    }
    println!();
    println!("  {:>4}  {:<22}  {:<12}  {:>12}  Band", "#", "Acquired (UTC)", "Sensor", "DOY");
    for (i, scene) in reader.scene_infos().iter().enumerate() {
        let key = scene.doy_key(year)?;
        println!(
            "  {:>4}  {:<22}  {:<12}  {:>12}  {}",
            i,
            scene.acquired.format("%Y-%m-%d %H:%M:%S"),
            scene.sensor.to_string(),
            key.to_string(),
            key.band_name(info.kind)
        );
    }

    Ok(())
}
