pub mod raster;
pub mod stack;
pub mod stack_writer;

pub use raster::{load_crop_raster, save_harvest_map};
pub use stack::{StackHeader, StackReader};
pub use stack_writer::StackWriter;
