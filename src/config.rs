// src/config.rs

//! Defines the options of a conversion run.
//!
//! `Config` can be deserialized from a JSON file, built from command-line
//! flags, or both: the binary loads the file first and lays the flags on
//! top. Missing fields fall back to their defaults.

use crate::engine::CoverOptions;
use crate::error::{ConvertError, Result};
use crate::output::STDOUT;
use crate::strategy::StrategyKind;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output path, `-` for standard output.
    pub output: String,
    /// Emit one 1x1 rectangle per opaque pixel and skip expansion.
    pub single_pixel: bool,
    /// Color expanded boxes pink. Turns `single_pixel` off.
    pub pink: bool,
    /// Cap the palette at 4096 colors.
    pub quantize: bool,
    /// Log progress to stderr.
    pub verbose: bool,
    /// How boxes are seeded and grown.
    pub strategy: StrategyKind,
    /// Seed for `StrategyKind::Random`. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: STDOUT.to_string(),
            single_pixel: false,
            pink: false,
            quantize: false,
            verbose: false,
            strategy: StrategyKind::Scanline,
            seed: None,
        }
    }
}

impl Config {
    /// Reads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConvertError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Resolves conflicting options: pink mode needs expansion, so it
    /// switches single-pixel mode off.
    pub fn normalized(mut self) -> Self {
        if self.pink {
            self.single_pixel = false;
        }
        self
    }

    pub fn cover_options(&self) -> CoverOptions {
        CoverOptions {
            single_pixel: self.single_pixel && !self.pink,
            pink: self.pink,
            quantize: self.quantize,
        }
    }
}
