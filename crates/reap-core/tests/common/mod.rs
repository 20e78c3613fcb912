#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use ndarray::Array2;

use reap_core::consts::SENTINEL;
use reap_core::doy::year_start;
use reap_core::io::stack::StackHeader;
use reap_core::io::stack_writer::StackWriter;
use reap_core::scene::{IndexKind, Scene, SceneInfo, Sensor};
use reap_core::series::Sample;

pub const YEAR: i32 = 2024;
pub const S: f32 = SENTINEL;

/// Acquisition timestamp at a (whole-millisecond) DOY of `YEAR`.
pub fn at_doy(doy: f64) -> DateTime<Utc> {
    let start = year_start(YEAR).unwrap();
    start + Duration::milliseconds((doy * 86_400_000.0).round() as i64)
}

pub fn info_at(doy: f64, sensor: Sensor) -> SceneInfo {
    SceneInfo::new(at_doy(doy), sensor)
}

/// `(doy, ndvi, hpi)` triples as samples. Use `S` for "absent".
pub fn samples(points: &[(f64, f32, f32)]) -> Vec<Sample> {
    points
        .iter()
        .map(|&(doy, ndvi, hpi)| Sample::new(doy, ndvi, hpi))
        .collect()
}

/// A single-pixel season with a known answer.
///
/// NDVI peaks at 0.8 on DOY 200 and first falls below VI50 = 0.5 on DOY 215,
/// so the window is [210, 270). HPI min is 0.1 on 212, the post-peak max
/// below 1.5 is 1.2 on 260 (1.7 on 280 is above the bound). NHPI is 0.55 on
/// 240 and 0.65 on 245, so threshold 0.6 is crossed at DOY 242.5.
pub const E2E_POINTS: &[(f64, f32, f32)] = &[
    (150.0, 0.40, 0.30),
    (180.0, 0.70, S),
    (200.0, 0.80, 0.25),
    (207.0, 0.60, S),
    (212.0, S, 0.10),
    (215.0, 0.45, S),
    (220.0, S, 0.20),
    (230.0, 0.30, 0.40),
    (240.0, S, 0.705),
    (245.0, S, 0.815),
    (260.0, S, 1.20),
    (280.0, S, 1.70),
    (290.0, S, 1.10),
];

pub const E2E_HARVEST_DOY: f64 = 242.5;

pub fn e2e_samples() -> Vec<Sample> {
    samples(E2E_POINTS)
}

/// NDVI and HPI scenes reproducing `E2E_POINTS` on an `h x w` grid, one
/// scene per observed value.
pub fn e2e_scenes(h: usize, w: usize) -> (Vec<Scene>, Vec<Scene>) {
    let mut ndvi = Vec::new();
    let mut hpi = Vec::new();
    for &(doy, n, p) in E2E_POINTS {
        if n > SENTINEL {
            ndvi.push(uniform_scene(h, w, n, IndexKind::Ndvi, doy));
        }
        if p > SENTINEL {
            hpi.push(uniform_scene(h, w, p, IndexKind::Hpi, doy));
        }
    }
    (ndvi, hpi)
}

pub fn uniform_scene(h: usize, w: usize, value: f32, kind: IndexKind, doy: f64) -> Scene {
    Scene::new(
        Array2::from_elem((h, w), value),
        kind,
        info_at(doy, Sensor::Landsat8),
    )
}

/// Write scenes to a stack file. All scenes must share `kind` and shape.
pub fn write_stack(path: &Path, kind: IndexKind, scenes: &[Scene]) {
    let (h, w) = scenes[0].data.dim();
    let header = StackHeader::new(kind, w as u32, h as u32, scenes.len() as u32, YEAR);
    let mut writer = StackWriter::create(path, &header).unwrap();
    for scene in scenes {
        writer.write_scene(scene).unwrap();
    }
    writer.finalize().unwrap();
}

/// Write a 16-bit grayscale crop raster.
pub fn write_crop_raster(path: &Path, codes: &Array2<u16>) {
    let (h, w) = codes.dim();
    let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(
        w as u32,
        h as u32,
        codes.iter().copied().collect(),
    )
    .unwrap();
    img.save(path).unwrap();
}
