// src/lib.rs

//! Converts raster images into SVG documents built from solid-color
//! rectangles.
//!
//! The pipeline is: decode the image into a `PixelGrid`, cover the grid with
//! rectangles using a `CoveringEngine`, render the rectangles through an
//! `Emitter`, and shrink the rendered text with `compact`.

pub mod color;
pub mod compact;
pub mod config;
pub mod convert;
pub mod decode;
pub mod engine;
pub mod error;
pub mod grid;
pub mod output;
pub mod strategy;
pub mod svg;

pub use config::Config;
pub use convert::{Conversion, Converter};
pub use error::{ConvertError, Result};
