mod common;

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};

use reap_core::doy::{day_of_year, parse_band_name, year_start, DoyKey};
use reap_core::scene::{IndexKind, SceneInfo, Sensor};

#[test]
fn test_jan_first_midnight_is_zero() {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(day_of_year(t, 2024).unwrap(), 0.0);
}

#[test]
fn test_doy_keeps_sub_day_precision() {
    // Aug 1, 2024 is DOY 213 (leap year); 18:00 adds 0.75.
    let t = Utc.with_ymd_and_hms(2024, 8, 2, 18, 0, 0).unwrap();
    assert_abs_diff_eq!(day_of_year(t, 2024).unwrap(), 214.75, epsilon = 1e-12);
}

#[test]
fn test_doy_before_target_year_is_negative() {
    let t = Utc.with_ymd_and_hms(2023, 12, 31, 12, 0, 0).unwrap();
    assert_abs_diff_eq!(day_of_year(t, 2024).unwrap(), -0.5, epsilon = 1e-12);
}

#[test]
fn test_key_from_acquisition_is_exact() {
    let t = Utc.with_ymd_and_hms(2024, 8, 2, 18, 0, 0).unwrap();
    let key = DoyKey::for_acquisition(t, 2024).unwrap();
    assert_eq!(key, DoyKey(214_750_000));
    assert_eq!(key.doy(), 214.75);
}

#[test]
fn test_key_truncates_fractional_microdays() {
    assert_eq!(DoyKey::from_doy(215.123_456_9), DoyKey(215_123_456));
}

#[test]
fn test_band_name_format() {
    let key = DoyKey::from_doy(215.0);
    assert_eq!(key.band_name(IndexKind::Ndvi), "NDVI_DOY_0215000000");
    assert_eq!(key.band_name(IndexKind::Hpi), "HPI_DOY_0215000000");
}

#[test]
fn test_band_name_parse_recovers_key() {
    let key = DoyKey(245_437_500);
    let name = key.band_name(IndexKind::Ndsi);
    let (kind, parsed) = parse_band_name(&name).unwrap();
    assert_eq!(kind, IndexKind::Ndsi);
    assert_eq!(parsed, key);
}

#[test]
fn test_band_name_order_is_chronological() {
    let keys = [DoyKey(9_500_000), DoyKey(100_000_000), DoyKey(99_999_999), DoyKey(0)];
    let mut by_name: Vec<String> = keys.iter().map(|k| k.band_name(IndexKind::Hpi)).collect();
    by_name.sort();
    let mut by_key = keys.to_vec();
    by_key.sort();
    let expected: Vec<String> = by_key.iter().map(|k| k.band_name(IndexKind::Hpi)).collect();
    assert_eq!(by_name, expected);
}

#[test]
fn test_band_name_parse_rejects_garbage() {
    assert!(parse_band_name("NDVI_0215000000").is_err());
    assert!(parse_band_name("EVI_DOY_0215000000").is_err());
    assert!(parse_band_name("NDVI_DOY_abc").is_err());
}

#[test]
fn test_year_start_is_utc_midnight() {
    let start = year_start(2021).unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_scene_info_band_name_uses_target_year() {
    let info = SceneInfo::new(common::at_doy(230.5), Sensor::Sentinel2);
    let key = info.doy_key(common::YEAR).unwrap();
    assert_eq!(key.band_name(IndexKind::Hpi), "HPI_DOY_0230500000");
}
