// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use rectsvg::{strategy::StrategyKind, Config, Converter};
use std::ffi::OsString;
use std::path::PathBuf;

/// Convert a raster image into an SVG document made of solid-color rectangles.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image (PNG, GIF, BMP or JPEG)
    input: PathBuf,

    /// Output SVG filename, `-` for standard output
    #[arg(short, long)]
    output: Option<String>,

    /// Use only single pixel rectangles
    #[arg(short = 'p', long)]
    single_pixel: bool,

    /// Color expanded rectangles pink
    #[arg(short = 'c', long)]
    pink: bool,

    /// Quantize colors (max 4096 colors)
    #[arg(short, long)]
    quantize: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// How rectangles are seeded and grown
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Seed for the random strategy
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Lays the command-line flags over the configuration file, if any.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config.single_pixel |= self.single_pixel;
        config.pink |= self.pink;
        config.quantize |= self.quantize;
        config.verbose |= self.verbose;
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config.normalized())
    }
}

/// Boolean short flags that may be bundled together, as in `-qV`.
const BUNDLED_FLAGS: &str = "pcqvV";

/// True if the command line asks for the version anywhere before `--`.
///
/// This runs ahead of clap so that `-V` wins over any other argument,
/// including ones clap would reject.
fn version_requested<I: IntoIterator<Item = OsString>>(args: I) -> bool {
    args.into_iter()
        .skip(1)
        .take_while(|arg| arg != "--")
        .any(|arg| match arg.to_str() {
            Some("--version") => true,
            Some(short) if short.starts_with('-') && !short.starts_with("--") => {
                let letters = &short[1..];
                letters.contains('V') && letters.chars().all(|c| BUNDLED_FLAGS.contains(c))
            }
            _ => false,
        })
}

fn main() -> anyhow::Result<()> {
    if version_requested(std::env::args_os()) {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Usage errors exit with 1; --help prints and exits with 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let config = args.resolve_config()?;

    let default_filter = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_micros()
        .init();
    debug!("Effective configuration: {:?}", config);

    let converter = Converter::new(config);
    let stats = converter
        .run(&args.input)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    info!(
        "Done: {} rectangles for {} pixels",
        stats.rectangles, stats.pixels
    );
    Ok(())
}
