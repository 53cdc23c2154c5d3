// src/grid.rs

//! Defines the `PixelGrid`, the per-pixel color and coverage state of one
//! conversion run.
//!
//! The grid is built once from decoded RGBA data. Afterwards the only thing
//! that changes is the `covered` flag of each pixel, which goes from `false`
//! to `true` exactly once and is never reset. Pixels with an alpha of zero
//! start out covered: they are represented in the output by absence.

use crate::color::Rgb;
use log::debug;

/// A single source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: Rgb,
    pub alpha: u8,
    pub covered: bool,
}

/// Row-major grid of `width * height` pixels.
///
/// All coordinates handed to the query methods must satisfy
/// `x < width` and `y < height`; anything else is a caller bug and panics.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Builds a grid from tightly packed RGBA bytes, four per pixel.
    ///
    /// # Panics
    /// Panics if `rgba.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let expected = width as usize * height as usize * 4;
        assert_eq!(
            rgba.len(),
            expected,
            "RGBA buffer holds {} bytes, a {}x{} grid needs {}",
            rgba.len(),
            width,
            height,
            expected
        );

        let pixels: Vec<Pixel> = rgba
            .chunks_exact(4)
            .enumerate()
            .map(|(i, px)| {
                let alpha = px[3];
                Pixel {
                    x: (i % width as usize) as u32,
                    y: (i / width as usize) as u32,
                    color: Rgb::new(px[0], px[1], px[2]),
                    alpha,
                    covered: alpha == 0,
                }
            })
            .collect();

        let grid = PixelGrid {
            width,
            height,
            pixels,
        };
        debug!(
            "Built {}x{} pixel grid, {} transparent pixels pre-covered",
            width,
            height,
            grid.pixels.len() - grid.uncovered_count()
        );
        grid
    }

    /// Builds a grid from a decoded image.
    pub fn from_image(image: &image::RgbaImage) -> Self {
        Self::from_rgba(image.width(), image.height(), image.as_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "coordinate ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// The RGB color of the pixel at `(x, y)`.
    pub fn color_at(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)].color
    }

    /// True if the pixel at `(x, y)` is already represented in the output.
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.pixels[self.index(x, y)].covered
    }

    /// Marks the pixel at `(x, y)` covered. Covering twice is a no-op.
    pub(crate) fn cover(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        self.pixels[i].covered = true;
    }

    /// True if no uncovered pixel remains.
    pub fn all_covered(&self) -> bool {
        self.pixels.iter().all(|p| p.covered)
    }

    pub fn uncovered_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.covered).count()
    }

    /// Number of pixels with a non-zero alpha.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.alpha != 0).count()
    }

    /// Returns the first uncovered coordinate in row-major order
    /// (smallest `y`, then smallest `x`).
    ///
    /// # Panics
    /// Panics if every pixel is covered. Callers check `all_covered` first.
    pub fn first_uncovered(&self) -> (u32, u32) {
        match self.pixels.iter().find(|p| !p.covered) {
            Some(p) => (p.x, p.y),
            None => panic!("first_uncovered called on a fully covered grid"),
        }
    }

    /// Iterates over the coordinates of every uncovered pixel in row-major order.
    pub fn uncovered(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pixels.iter().filter(|p| !p.covered).map(|p| (p.x, p.y))
    }
}
