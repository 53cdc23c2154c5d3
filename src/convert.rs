// src/convert.rs

//! The end-to-end pipeline: decode, build the grid, cover it, compact the
//! rendered document, write it out.

use crate::compact::compact;
use crate::config::Config;
use crate::decode::load_image;
use crate::engine::{CoverStats, CoveringEngine};
use crate::error::Result;
use crate::grid::PixelGrid;
use crate::output::write_document;
use crate::svg::{RenderedRectangle, SvgDocument};
use log::info;
use std::path::Path;

/// The result of converting one image.
#[derive(Debug, Clone)]
pub struct Conversion {
    grid: PixelGrid,
    rects: Vec<RenderedRectangle>,
    document: String,
    stats: CoverStats,
}

impl Conversion {
    /// The compacted SVG text.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Rectangles in the order they were emitted.
    pub fn rects(&self) -> &[RenderedRectangle] {
        &self.rects
    }

    pub fn stats(&self) -> CoverStats {
        self.stats
    }

    /// Writes the document to `destination` (`-` for standard output).
    pub fn write(&self, destination: &str) -> Result<()> {
        write_document(&self.grid, &self.document, destination)
    }
}

/// Runs conversions with a fixed `Config`.
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Converter {
            config: config.normalized(),
        }
    }

    /// Converts already decoded pixels.
    pub fn convert_image(&self, image: &image::RgbaImage) -> Conversion {
        let mut grid = PixelGrid::from_image(image);
        info!(
            "Converting {}x{} image ({} opaque pixels)",
            grid.width(),
            grid.height(),
            grid.opaque_count()
        );

        let mut svg = SvgDocument::new(grid.width(), grid.height());
        let mut strategy = self.config.strategy.build(self.config.seed);
        let stats = CoveringEngine::new(&mut grid, &mut svg)
            .run(strategy.as_mut(), self.config.cover_options());

        let document = compact(&svg.render());
        Conversion {
            grid,
            rects: svg.rects().to_vec(),
            document,
            stats,
        }
    }

    /// Decodes and converts the image at `input`.
    pub fn convert_file(&self, input: &Path) -> Result<Conversion> {
        let image = load_image(input)?;
        Ok(self.convert_image(&image))
    }

    /// Converts `input` and writes the result to the configured output.
    pub fn run(&self, input: &Path) -> Result<CoverStats> {
        let conversion = self.convert_file(input)?;
        conversion.write(&self.config.output)?;
        Ok(conversion.stats())
    }
}
