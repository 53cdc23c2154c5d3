// src/engine.rs

//! The covering engine.
//!
//! `CoveringEngine` owns the seed/expand/cover loop. It borrows the
//! `PixelGrid` mutably for the whole run and is the only place that marks
//! pixels covered or hands rectangles to the `Emitter`.
//!
//! Each outer iteration moves through
//! `Scanning -> Seeded -> {Expanded | NotExpanded} -> Covered` and starts
//! over until the grid reports that every pixel is covered. Every iteration
//! covers at least the seed pixel, so the loop terminates.

use crate::color::PINK;
use crate::grid::PixelGrid;
use crate::strategy::{BoxStrategy, Region};
use crate::svg::{Emitter, RenderedRectangle};
use log::{debug, info, trace};

/// How the engine should cover the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverOptions {
    /// Skip expansion and emit one 1x1 rectangle per opaque pixel.
    pub single_pixel: bool,
    /// Fill boxes larger than 1x1 with `PINK` instead of their color.
    pub pink: bool,
    /// Match and fill by quantization bucket instead of exact color.
    pub quantize: bool,
}

/// Counters collected while covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverStats {
    /// Rectangles handed to the emitter.
    pub rectangles: usize,
    /// Rectangles larger than 1x1.
    pub expanded: usize,
    /// Pixels newly covered by those rectangles.
    pub pixels: usize,
}

pub struct CoveringEngine<'a> {
    grid: &'a mut PixelGrid,
    emitter: &'a mut dyn Emitter,
    stats: CoverStats,
}

impl<'a> CoveringEngine<'a> {
    pub fn new(grid: &'a mut PixelGrid, emitter: &'a mut dyn Emitter) -> Self {
        CoveringEngine {
            grid,
            emitter,
            stats: CoverStats::default(),
        }
    }

    pub fn stats(&self) -> CoverStats {
        self.stats
    }

    /// Covers every remaining pixel, either with expanding boxes chosen by
    /// `strategy` or, in single-pixel mode, with 1x1 rectangles.
    pub fn run(&mut self, strategy: &mut dyn BoxStrategy, options: CoverOptions) -> CoverStats {
        if options.single_pixel {
            self.cover_all_pixels();
        } else {
            self.cover_with(strategy, options.pink, options.quantize);
        }
        info!(
            "Covered {} pixels with {} rectangles ({} expanded, {} 1x1)",
            self.stats.pixels,
            self.stats.rectangles,
            self.stats.expanded,
            self.stats.rectangles - self.stats.expanded
        );
        self.stats
    }

    /// The main loop: seed, expand, cover, until nothing is left uncovered.
    pub fn cover_with(&mut self, strategy: &mut dyn BoxStrategy, pink: bool, quantize: bool) {
        while !self.grid.all_covered() {
            let (x, y) = strategy.seed(self.grid);
            let mut region = Region::seeded(self.grid, x, y);
            let expanded = strategy.expand(self.grid, &mut region, quantize);
            self.cover_box(&region, expanded && pink, quantize);
        }
    }

    /// Marks every pixel inside `region` covered and emits exactly one
    /// rectangle for it.
    ///
    /// The fill is `PINK` when `pink_override` is set and the box is larger
    /// than 1x1. Otherwise it is the seed color, reduced to its quantization
    /// bucket when `quantize` is set.
    pub fn cover_box(&mut self, region: &Region, pink_override: bool, quantize: bool) {
        for y in region.y1..=region.y2 {
            for x in region.x1..=region.x2 {
                debug_assert!(
                    !self.grid.is_covered(x, y),
                    "box {:?} spans covered pixel ({}, {})",
                    region,
                    x,
                    y
                );
                self.grid.cover(x, y);
            }
        }

        let expanded = !region.is_single_pixel();
        let fill = if pink_override && expanded {
            PINK
        } else if quantize {
            region.seed.quantized()
        } else {
            region.seed
        };

        trace!(
            "Covering {}x{} box at ({}, {}) with {}",
            region.width(),
            region.height(),
            region.x1,
            region.y1,
            fill
        );
        self.emitter.rect(RenderedRectangle {
            x: region.x1,
            y: region.y1,
            width: region.width(),
            height: region.height(),
            fill,
        });

        self.stats.rectangles += 1;
        self.stats.pixels += region.width() as usize * region.height() as usize;
        if expanded {
            self.stats.expanded += 1;
        }
    }

    /// Uniform fallback: emits a 1x1 rectangle in the exact source color for
    /// every pixel that is still uncovered, in row-major order.
    ///
    /// Returns the number of pixels covered.
    pub fn cover_all_pixels(&mut self) -> usize {
        let remaining: Vec<(u32, u32)> = self.grid.uncovered().collect();
        for &(x, y) in &remaining {
            let region = Region::seeded(self.grid, x, y);
            self.cover_box(&region, false, false);
        }
        debug!("Covered {} pixels with 1x1 rectangles", remaining.len());
        remaining.len()
    }
}
