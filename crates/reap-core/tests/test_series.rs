mod common;

use chrono::NaiveDate;
use ndarray::Array2;

use common::{info_at, uniform_scene, S, YEAR};
use reap_core::consts::SENTINEL;
use reap_core::doy::DoyKey;
use reap_core::error::ReapError;
use reap_core::scene::{IndexKind, Scene, Sensor};
use reap_core::series::{PixelSeries, Sample, SeriesBuilder};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(YEAR, m, d).unwrap()
}

#[test]
fn test_date_axis_is_union_of_ndvi_and_hpi() {
    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(2, 2, 0.8, IndexKind::Ndvi, 220.0)).unwrap();
    b.add_scene(uniform_scene(2, 2, 0.3, IndexKind::Hpi, 215.5)).unwrap();
    b.add_scene(uniform_scene(2, 2, 0.7, IndexKind::Ndvi, 215.5)).unwrap();
    b.add_scene(uniform_scene(2, 2, 0.4, IndexKind::Hpi, 230.0)).unwrap();
    let (cube, report) = b.build().unwrap();

    assert_eq!(cube.keys(), &[DoyKey(215_500_000), DoyKey(220_000_000), DoyKey(230_000_000)]);
    assert_eq!(cube.doys(), &[215.5, 220.0, 230.0]);
    assert_eq!(report.dates, 3);

    let series = cube.pixel_series(1, 1);
    let s = series.samples();
    assert_eq!(s[0], Sample::new(215.5, 0.7, 0.3));
    assert_eq!(s[1], Sample::new(220.0, 0.8, SENTINEL));
    assert_eq!(s[2], Sample::new(230.0, SENTINEL, 0.4));
}

#[test]
fn test_same_key_first_observed_wins() {
    let mut first = Array2::from_elem((1, 2), 0.5);
    first[[0, 1]] = S;
    let first = Scene::new(first, IndexKind::Hpi, info_at(240.0, Sensor::Landsat8));
    let second = Scene::new(
        Array2::from_elem((1, 2), 0.9),
        IndexKind::Hpi,
        info_at(240.0, Sensor::Sentinel2),
    );

    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(1, 2, 0.8, IndexKind::Ndvi, 200.0)).unwrap();
    b.add_scenes([first, second]).unwrap();
    let (cube, _) = b.build().unwrap();

    assert_eq!(cube.date_count(), 2);
    assert_eq!(cube.hpi()[[1, 0, 0]], 0.5);
    assert_eq!(cube.hpi()[[1, 0, 1]], 0.9);
}

#[test]
fn test_season_filter_is_inclusive() {
    let mut b = SeriesBuilder::new(YEAR)
        .unwrap()
        .with_season(date(8, 1), date(12, 31));
    // 2024 is a leap year: Aug 1 is DOY 213, Dec 31 is DOY 365.
    assert!(b.add_scene(uniform_scene(1, 1, 0.5, IndexKind::Ndvi, 213.0)).unwrap());
    assert!(b.add_scene(uniform_scene(1, 1, 0.5, IndexKind::Hpi, 365.9)).unwrap());
    assert!(!b.add_scene(uniform_scene(1, 1, 0.5, IndexKind::Ndvi, 212.9)).unwrap());
    assert!(!b.add_scene(uniform_scene(1, 1, 0.5, IndexKind::Hpi, 366.0)).unwrap());

    let (cube, report) = b.build().unwrap();
    assert_eq!(report.outside_season, 2);
    assert_eq!(report.ndvi_scenes, 1);
    assert_eq!(report.hpi_scenes, 1);
    assert_eq!(cube.date_count(), 2);
}

#[test]
fn test_snow_mask_drops_hpi_at_matching_dates() {
    let ndsi = Array2::from_shape_vec((1, 3), vec![0.1, -0.5, S]).unwrap();
    let mut b = SeriesBuilder::new(YEAR).unwrap().with_snow_mask(-0.3);
    b.add_scene(uniform_scene(1, 3, 0.8, IndexKind::Ndvi, 200.0)).unwrap();
    b.add_scene(uniform_scene(1, 3, 0.6, IndexKind::Hpi, 300.0)).unwrap();
    b.add_scene(uniform_scene(1, 3, 0.7, IndexKind::Hpi, 310.0)).unwrap();
    b.add_scene(Scene::new(ndsi, IndexKind::Ndsi, info_at(300.0, Sensor::Sentinel2)))
        .unwrap();
    let (cube, report) = b.build().unwrap();

    // Snow (NDSI >= -0.3), clear, unknown.
    assert_eq!(cube.hpi()[[1, 0, 0]], SENTINEL);
    assert_eq!(cube.hpi()[[1, 0, 1]], 0.6);
    assert_eq!(cube.hpi()[[1, 0, 2]], 0.6);
    // No NDSI at 310: untouched.
    assert_eq!(cube.hpi()[[2, 0, 0]], 0.7);
    assert_eq!(report.snow_masked, 1);
    assert_eq!(report.ndsi_scenes, 1);
}

#[test]
fn test_ndsi_ignored_without_snow_mask() {
    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(1, 1, 0.8, IndexKind::Ndvi, 200.0)).unwrap();
    b.add_scene(uniform_scene(1, 1, 0.6, IndexKind::Hpi, 300.0)).unwrap();
    b.add_scene(uniform_scene(1, 1, 0.9, IndexKind::Ndsi, 300.0)).unwrap();
    let (cube, report) = b.build().unwrap();
    assert_eq!(cube.hpi()[[1, 0, 0]], 0.6);
    assert_eq!(report.snow_masked, 0);
}

#[test]
fn test_dimension_mismatch_is_an_error() {
    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(2, 2, 0.8, IndexKind::Ndvi, 200.0)).unwrap();
    let err = b
        .add_scene(uniform_scene(2, 3, 0.4, IndexKind::Hpi, 210.0))
        .unwrap_err();
    match err {
        ReapError::DimensionMismatch {
            source_name,
            expected_cols,
            cols,
            ..
        } => {
            assert_eq!(source_name, "HPI_DOY_0210000000");
            assert_eq!(expected_cols, 2);
            assert_eq!(cols, 3);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_build_requires_both_indices() {
    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(1, 1, 0.8, IndexKind::Ndvi, 200.0)).unwrap();
    assert!(matches!(b.build(), Err(ReapError::EmptySequence(_))));

    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(1, 1, 0.8, IndexKind::Hpi, 200.0)).unwrap();
    assert!(matches!(b.build(), Err(ReapError::EmptySequence(_))));
}

#[test]
fn test_harvest_scene_cannot_enter_series() {
    let mut b = SeriesBuilder::new(YEAR).unwrap();
    let scene = uniform_scene(1, 1, 242.5, IndexKind::HarvestDoy, 0.0);
    assert!(matches!(
        b.add_scene(scene),
        Err(ReapError::UnsupportedRaster(_))
    ));
}

#[test]
fn test_pixel_series_sort_is_stable() {
    let series = PixelSeries::from_samples(vec![
        Sample::new(20.0, 0.1, S),
        Sample::new(10.0, 0.2, S),
        Sample::new(20.0, 0.3, S),
    ]);
    let doys: Vec<f64> = series.samples().iter().map(|s| s.doy).collect();
    assert_eq!(doys, vec![10.0, 20.0, 20.0]);
    assert_eq!(series.samples()[1].ndvi, 0.1);
    assert_eq!(series.samples()[2].ndvi, 0.3);
    assert_eq!(series.observed_dates(), 3);
}

#[test]
fn test_empty_scene_adds_date_without_values() {
    let mut b = SeriesBuilder::new(YEAR).unwrap();
    b.add_scene(uniform_scene(1, 1, 0.8, IndexKind::Ndvi, 200.0)).unwrap();
    b.add_scene(Scene::empty(1, 1, IndexKind::Hpi, info_at(210.0, Sensor::Landsat7)))
        .unwrap();
    let (cube, _) = b.build().unwrap();
    assert_eq!(cube.date_count(), 2);
    let series = cube.pixel_series(0, 0);
    assert_eq!(series.observed_dates(), 1);
    assert_eq!(series.samples()[1].hpi(), None);
}
