// src/strategy.rs

//! Box selection strategies.
//!
//! A strategy decides where the next working box is seeded and how it grows.
//! `ScanlineStrategy` is the one used for real conversions: seed at the first
//! uncovered pixel in row-major order, grow right, then grow down.
//! `RandomStrategy` seeds at a random uncovered pixel and grows in all four
//! directions. It tends to produce more rectangles and is only kept for
//! comparison runs.

use crate::color::Rgb;
use crate::grid::PixelGrid;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A working box: an inclusive rectangle `(x1, y1)..=(x2, y2)` plus the
/// color of the pixel it was seeded on.
///
/// While a box grows, every pixel inside it is uncovered and matches `seed`
/// (exactly, or by quantization bucket when quantizing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub seed: Rgb,
}

impl Region {
    /// A 1x1 box on the pixel at `(x, y)`.
    pub fn seeded(grid: &PixelGrid, x: u32, y: u32) -> Self {
        Region {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
            seed: grid.color_at(x, y),
        }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }

    pub fn is_single_pixel(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }
}

/// Picks seed pixels and grows boxes from them.
pub trait BoxStrategy {
    /// Chooses the pixel the next box is seeded on.
    ///
    /// Only called while at least one pixel is uncovered.
    fn seed(&mut self, grid: &PixelGrid) -> (u32, u32);

    /// Grows `region` as far as the strategy allows.
    ///
    /// Returns `true` if the box ended up larger than 1x1.
    fn expand(&mut self, grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool;
}

/// Which `BoxStrategy` a conversion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// First uncovered pixel, grown right then down.
    #[default]
    Scanline,
    /// Random uncovered pixel, grown in every direction.
    Random,
}

impl StrategyKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn BoxStrategy> {
        match self {
            StrategyKind::Scanline => Box::new(ScanlineStrategy),
            StrategyKind::Random => Box::new(match seed {
                Some(seed) => RandomStrategy::seeded(seed),
                None => RandomStrategy::new(),
            }),
        }
    }
}

/// True if the pixel can join a box seeded on `seed`.
fn fits(grid: &PixelGrid, x: u32, y: u32, seed: Rgb, quantize: bool) -> bool {
    if grid.is_covered(x, y) {
        return false;
    }
    let color = grid.color_at(x, y);
    if quantize {
        color.same_bucket(seed)
    } else {
        color == seed
    }
}

fn column_fits(grid: &PixelGrid, x: u32, region: &Region, quantize: bool) -> bool {
    (region.y1..=region.y2).all(|y| fits(grid, x, y, region.seed, quantize))
}

fn row_fits(grid: &PixelGrid, y: u32, region: &Region, quantize: bool) -> bool {
    (region.x1..=region.x2).all(|x| fits(grid, x, y, region.seed, quantize))
}

fn grow_right(grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool {
    if region.x2 + 1 < grid.width() && column_fits(grid, region.x2 + 1, region, quantize) {
        region.x2 += 1;
        return true;
    }
    false
}

fn grow_down(grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool {
    if region.y2 + 1 < grid.height() && row_fits(grid, region.y2 + 1, region, quantize) {
        region.y2 += 1;
        return true;
    }
    false
}

fn grow_left(grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool {
    if region.x1 > 0 && column_fits(grid, region.x1 - 1, region, quantize) {
        region.x1 -= 1;
        return true;
    }
    false
}

fn grow_up(grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool {
    if region.y1 > 0 && row_fits(grid, region.y1 - 1, region, quantize) {
        region.y1 -= 1;
        return true;
    }
    false
}

/// Seeds at the first uncovered pixel in row-major order and grows the box
/// in two phases: right until a column fails, then down until a row fails.
///
/// The result is deterministic but not maximal. A box is never tried
/// down-then-right, so some images get more rectangles than an optimal
/// decomposition would need.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineStrategy;

impl BoxStrategy for ScanlineStrategy {
    fn seed(&mut self, grid: &PixelGrid) -> (u32, u32) {
        grid.first_uncovered()
    }

    fn expand(&mut self, grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool {
        while grow_right(grid, region, quantize) {}
        // The column range is fixed from here on.
        while grow_down(grid, region, quantize) {}

        trace!(
            "Expanded box at ({}, {}) to {}x{}",
            region.x1,
            region.y1,
            region.width(),
            region.height()
        );
        !region.is_single_pixel()
    }
}

/// Seeds at a uniformly random uncovered pixel and grows the box one step
/// at a time to the right, down, left and up, until no side can move.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        RandomStrategy {
            rng: StdRng::from_entropy(),
        }
    }

    /// A strategy with a reproducible seed sequence.
    pub fn seeded(seed: u64) -> Self {
        RandomStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxStrategy for RandomStrategy {
    fn seed(&mut self, grid: &PixelGrid) -> (u32, u32) {
        let remaining = grid.uncovered_count();
        if remaining == 0 {
            panic!("RandomStrategy::seed called on a fully covered grid");
        }
        let pick = self.rng.gen_range(0..remaining);
        // `pick < uncovered_count`, so `nth` always finds a pixel.
        grid.uncovered().nth(pick).unwrap_or_else(|| grid.first_uncovered())
    }

    fn expand(&mut self, grid: &PixelGrid, region: &mut Region, quantize: bool) -> bool {
        loop {
            let mut grew = grow_right(grid, region, quantize);
            grew |= grow_down(grid, region, quantize);
            grew |= grow_left(grid, region, quantize);
            grew |= grow_up(grid, region, quantize);
            if !grew {
                break;
            }
        }
        !region.is_single_pixel()
    }
}
