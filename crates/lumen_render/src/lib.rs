pub mod plugin;
pub mod raster;
pub mod ui;

pub use raster::{Pixmap, Rgba8};
