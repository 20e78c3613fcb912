mod builder;
mod cube;
mod sample;

pub use builder::{BuildReport, SeriesBuilder};
pub use cube::SeriesCube;
pub use sample::{is_observed, PixelSeries, Sample};
