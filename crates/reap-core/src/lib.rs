pub mod consts;
pub mod crop;
pub mod curve;
pub mod doy;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod series;
