// src/svg.rs

//! The markup emitter.
//!
//! The covering engine does not build SVG text itself. It hands every
//! committed rectangle to an `Emitter`, which owns the output document.
//! `SvgDocument` is the emitter used in production: it keeps a fixed SVG
//! envelope and renders one `<rect>` element per line, which is the layout
//! the `compact` pass expects as input.

use crate::color::Rgb;

/// SVG namespace declared on the root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A committed, solid-color rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedRectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub fill: Rgb,
}

impl RenderedRectangle {
    /// True if the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Accepts drawing calls from the covering engine.
pub trait Emitter {
    /// Adds one rectangle to the document.
    fn rect(&mut self, rect: RenderedRectangle);
}

/// An SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    rects: Vec<RenderedRectangle>,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        SvgDocument {
            width,
            height,
            rects: Vec::new(),
        }
    }

    pub fn rects(&self) -> &[RenderedRectangle] {
        &self.rects
    }

    /// Renders the document, one element per line.
    ///
    /// This is the uncompacted form; see `compact::compact` for the
    /// minimized output.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(160 + self.rects.len() * 64);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"{}\" version=\"1.1\" width=\"{}\" height=\"{}\">\n",
            SVG_NAMESPACE, self.width, self.height
        ));
        for r in &self.rects {
            out.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" />\n",
                r.x,
                r.y,
                r.width,
                r.height,
                r.fill.to_hex()
            ));
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Emitter for SvgDocument {
    fn rect(&mut self, rect: RenderedRectangle) {
        self.rects.push(rect);
    }
}
