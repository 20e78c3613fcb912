use std::path::PathBuf;

use chrono::NaiveDate;

use reap_core::crop::{CropClass, CropCodes};
use reap_core::curve::DetectionParams;
use reap_core::error::ReapError;
use reap_core::pipeline::config::HarvestConfig;
use reap_core::pipeline::PipelineStage;

fn valid_config() -> HarvestConfig {
    let mut config = HarvestConfig::default();
    config.inputs.ndvi = vec![PathBuf::from("ndvi.rstk")];
    config.inputs.hpi = vec![PathBuf::from("hpi.rstk")];
    config
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_detection_defaults() {
    let p = DetectionParams::default();
    assert_eq!(p.nhpi_threshold, 0.6);
    assert_eq!(p.hpi_upper_bound, 1.5);
    assert_eq!(p.min_peak_hpi, 0.8);
    assert_eq!(p.window_length_days, 60.0);
    assert_eq!(p.window_lead_in_days, 5.0);
    assert_eq!(p.ndvi_baseline, 0.2);
}

#[test]
fn test_crop_code_defaults() {
    let codes = CropCodes::default();
    assert_eq!(codes.classify(1), CropClass::Corn);
    assert_eq!(codes.classify(5), CropClass::Soybean);
    assert_eq!(codes.classify(24), CropClass::Other(24));
    assert!(!codes.classify(0).is_target());
}

#[test]
fn test_default_season_bounds() {
    let config = valid_config();
    let (start, end) = config.season_bounds().unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert_eq!(config.snow_threshold(), Some(-0.3));
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_parse_full_toml() {
    let text = r#"
year = 2023
output = "out.rstk"

[inputs]
ndvi = ["ndvi_l8.rstk", "ndvi_s2.rstk"]
hpi = ["hpi_l8.rstk"]
ndsi = ["ndsi_s2.rstk"]
crop_raster = "cdl.tif"

[season]
start = "2023-09-01"
end = "2023-11-30"

[detection]
nhpi_threshold = 0.55
window_length_days = 45.0

[snow_mask]
enabled = false

[crops]
corn = 10
"#;
    let config: HarvestConfig = toml::from_str(text).unwrap();
    assert_eq!(config.year, 2023);
    assert_eq!(config.output, PathBuf::from("out.rstk"));
    assert_eq!(config.inputs.ndvi.len(), 2);
    assert_eq!(config.inputs.crop_raster, Some(PathBuf::from("cdl.tif")));
    assert_eq!(config.detection.nhpi_threshold, 0.55);
    assert_eq!(config.detection.window_length_days, 45.0);
    // Unset fields keep their defaults.
    assert_eq!(config.detection.hpi_upper_bound, 1.5);
    assert_eq!(config.snow_mask.ndsi_threshold, -0.3);
    assert_eq!(config.snow_threshold(), None);
    assert_eq!(config.crops.corn, 10);
    assert_eq!(config.crops.soybean, 5);
    assert_eq!(
        config.season_bounds().unwrap(),
        (
            NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 11, 30).unwrap()
        )
    );
    config.validate().unwrap();
}

#[test]
fn test_parse_minimal_toml() {
    let text = r#"
year = 2024
output = "harvest.tif"
"#;
    let config: HarvestConfig = toml::from_str(text).unwrap();
    assert!(config.inputs.ndvi.is_empty());
    assert_eq!(config.detection, DetectionParams::default());
    assert!(config.snow_mask.enabled);
}

#[test]
fn test_default_config_serializes_and_parses_back() {
    let config = valid_config();
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: HarvestConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_serializes_to_json() {
    let json = serde_json::to_value(valid_config()).unwrap();
    assert_eq!(json["year"], 2024);
    assert_eq!(json["crops"]["soybean"], 5);
}

#[test]
fn test_template_season_follows_edited_year() {
    let text = toml::to_string_pretty(&HarvestConfig::template()).unwrap();
    let edited = text.replace("year = 2024", "year = 2021");
    let config: HarvestConfig = toml::from_str(&edited).unwrap();
    assert_eq!(config.year, 2021);
    assert_eq!(config.season.start, None);
    assert_eq!(
        config.season_bounds().unwrap(),
        (
            NaiveDate::from_ymd_opt(2021, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 12, 31).unwrap()
        )
    );
    config.validate().unwrap();
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_validate_accepts_defaults_with_inputs() {
    valid_config().validate().unwrap();
}

#[test]
fn test_validate_requires_inputs() {
    let mut config = valid_config();
    config.inputs.hpi.clear();
    assert!(matches!(config.validate(), Err(ReapError::InvalidConfig(_))));
}

#[test]
fn test_validate_rejects_year_out_of_range() {
    let mut config = valid_config();
    config.year = 1850;
    assert!(matches!(config.validate(), Err(ReapError::InvalidYear(1850))));
}

#[test]
fn test_validate_rejects_inverted_season() {
    let mut config = valid_config();
    config.season.start = NaiveDate::from_ymd_opt(2024, 10, 1);
    config.season.end = NaiveDate::from_ymd_opt(2024, 9, 1);
    assert!(matches!(config.validate(), Err(ReapError::InvalidConfig(_))));
}

#[test]
fn test_validate_rejects_bad_detection_params() {
    let cases = [
        DetectionParams {
            window_length_days: 0.0,
            ..Default::default()
        },
        DetectionParams {
            window_lead_in_days: -1.0,
            ..Default::default()
        },
        DetectionParams {
            hpi_upper_bound: 0.8,
            ..Default::default()
        },
        DetectionParams {
            nhpi_threshold: f32::NAN,
            ..Default::default()
        },
    ];
    for params in cases {
        let mut config = valid_config();
        config.detection = params.clone();
        assert!(
            matches!(config.validate(), Err(ReapError::InvalidConfig(_))),
            "accepted {:?}",
            params
        );
    }
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(PipelineStage::Reading.to_string(), "Reading stacks");
    assert_eq!(PipelineStage::Analyzing.to_string(), "Analyzing pixels");
}
