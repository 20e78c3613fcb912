use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;

use crate::consts::{HARVEST_TIFF_SCALE, SENTINEL};
use crate::crop::CropMap;
use crate::doy::year_start;
use crate::error::{ReapError, Result};
use crate::io::stack::StackHeader;
use crate::io::stack_writer::StackWriter;
use crate::pipeline::HarvestMap;
use crate::scene::{IndexKind, SceneInfo, Sensor};

/// Load a crop-type raster (8- or 16-bit grayscale) as a [`CropMap`].
pub fn load_crop_raster(path: &Path) -> Result<CropMap> {
    let img = image::open(path)?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let codes: Vec<u16> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(u16::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw(),
        other => {
            return Err(ReapError::UnsupportedRaster(format!(
                "{}: crop raster must be single-band grayscale, got {:?}",
                path.display(),
                other.color()
            )));
        }
    };
    let codes = Array2::from_shape_vec((h, w), codes)
        .map_err(|e| ReapError::UnsupportedRaster(e.to_string()))?;
    Ok(CropMap::new(codes))
}

/// Encode a harvest DOY as a 16-bit TIFF value. `None` (masked) is 0.
pub fn encode_tiff_doy(doy: Option<f64>) -> u16 {
    match doy {
        Some(d) if d.is_finite() => (d * HARVEST_TIFF_SCALE)
            .round()
            .clamp(1.0, u16::MAX as f64) as u16,
        _ => 0,
    }
}

/// Save the harvest map as 16-bit grayscale TIFF (DOY x 100, 0 = masked).
pub fn save_harvest_tiff(map: &HarvestMap, path: &Path) -> Result<()> {
    let (h, w) = map.dim();
    let pixels: Vec<u16> = map
        .statuses
        .iter()
        .map(|s| encode_tiff_doy(s.harvest_doy()))
        .collect();
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels).ok_or(
        ReapError::InvalidDimensions {
            width: w as u32,
            height: h as u32,
        },
    )?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save the harvest map as a single-scene `HARVEST` stack (f32 DOY, sentinel = masked).
pub fn save_harvest_stack(map: &HarvestMap, path: &Path) -> Result<()> {
    let (h, w) = map.dim();
    let mut header = StackHeader::new(IndexKind::HarvestDoy, w as u32, h as u32, 1, map.year);
    header.description = format!("Harvest DOY {}", map.year);

    let acquired = year_start(map.year)?;
    let raster = map
        .statuses
        .mapv(|s| s.harvest_doy().map(|d| d as f32).unwrap_or(SENTINEL));

    let mut writer = StackWriter::create(path, &header)?;
    writer.write_raster(&raster, SceneInfo::new(acquired, Sensor::Unknown))?;
    writer.finalize()
}

/// Save the harvest map, choosing the format from the file extension.
pub fn save_harvest_map(map: &HarvestMap, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("rstk") => save_harvest_stack(map, path),
        _ => save_harvest_tiff(map, path),
    }
}
