// src/output.rs

//! Writes finished documents to a file or to standard output.

use crate::error::{ConvertError, Result};
use crate::grid::PixelGrid;
use log::info;
use std::fs::File;
use std::io::{self, Write};

/// Destination name meaning "standard output".
pub const STDOUT: &str = "-";

/// Writes `document` to `destination`, or to standard output when the
/// destination is `-`.
///
/// Nothing is written unless every pixel of `grid` is covered.
pub fn write_document(grid: &PixelGrid, document: &str, destination: &str) -> Result<()> {
    ensure_covered(grid)?;
    info!("Writing {}", destination);

    let io_error = |source: io::Error| ConvertError::Io {
        path: destination.to_string(),
        source,
    };
    if destination == STDOUT {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_to(document, &mut handle).map_err(io_error)
    } else {
        let mut file = File::create(destination).map_err(io_error)?;
        write_to(document, &mut file).map_err(io_error)
    }
}

fn write_to<W: Write>(document: &str, sink: &mut W) -> io::Result<()> {
    sink.write_all(document.as_bytes())?;
    sink.flush()
}

fn ensure_covered(grid: &PixelGrid) -> Result<()> {
    match grid.uncovered_count() {
        0 => Ok(()),
        uncovered => Err(ConvertError::IncompleteCoverage { uncovered }),
    }
}
