/// Reserved value marking "no valid observation" for a pixel at a date.
/// Any value at or below it, and NaN, is treated as absent.
pub const SENTINEL: f32 = -2.0;

/// Fixed-point scale of a DOY key (1e-6 day, about 86 ms).
pub const DOY_KEY_SCALE: f64 = 1e6;

/// Zero-padded digit count of the key in a band name. Keeps lexicographic
/// order equal to chronological order for non-negative DOYs.
pub const BAND_KEY_WIDTH: usize = 10;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default NHPI level whose first exceedance marks the harvest.
pub const DEFAULT_NHPI_THRESHOLD: f32 = 0.60;

/// Default cap on raw HPI. Values at or above it are treated as artifacts.
pub const DEFAULT_HPI_UPPER_BOUND: f32 = 1.5;

/// Default minimum post-peak HPI maximum for a pixel to be trusted.
pub const DEFAULT_MIN_PEAK_HPI: f32 = 0.8;

/// Default length of the post-peak search window, in days.
pub const DEFAULT_WINDOW_LENGTH_DAYS: f64 = 60.0;

/// Default lead-in before the NDVI decay crossing, in days.
pub const DEFAULT_WINDOW_LEAD_IN_DAYS: f64 = 5.0;

/// Default off-season NDVI level blended with the peak to form VI50.
pub const DEFAULT_NDVI_BASELINE: f32 = 0.2;

/// Starting value of the NDVI running maximum.
pub const NDVI_PEAK_FLOOR: f32 = 0.0;

/// Starting value of the HPI running maximum.
pub const HPI_MAX_FLOOR: f32 = 0.0;

/// Starting value of the in-window HPI running minimum.
pub const HPI_MIN_CEILING: f32 = 2.0;

/// Default NDSI level at or above which an HPI observation is snow-contaminated.
pub const DEFAULT_SNOW_NDSI_THRESHOLD: f32 = -0.3;

/// USDA Cropland Data Layer code for corn.
pub const DEFAULT_CORN_CODE: u16 = 1;

/// USDA Cropland Data Layer code for soybeans.
pub const DEFAULT_SOYBEAN_CODE: u16 = 5;

/// Default season bounds as (month, day) within the target year.
pub const DEFAULT_SEASON_START: (u32, u32) = (8, 1);
pub const DEFAULT_SEASON_END: (u32, u32) = (12, 31);

/// Fixed-point scale of harvest DOY in 16-bit TIFF output (0 = masked).
pub const HARVEST_TIFF_SCALE: f64 = 100.0;
