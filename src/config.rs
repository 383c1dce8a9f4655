//! Command-line configuration for the `wsi-region` tool.
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use wsi_region::config::{Cli, Command};
//!
//! let cli = Cli::parse();
//! match cli.command {
//!     Command::Info(config) => { /* print levels */ }
//!     Command::Region(config) => { /* extract and write */ }
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `WSIR_LEVEL` - Pyramid level for `region` (default: 0)
//! - `WSIR_JPEG_QUALITY` - JPEG quality for `.jpg` output (default: 80)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::export::{is_valid_quality, OutputFormat, DEFAULT_JPEG_QUALITY};

// =============================================================================
// CLI Arguments
// =============================================================================

/// WSI Region - read regions of Whole Slide Images as RGBA.
#[derive(Parser, Debug, Clone)]
#[command(name = "wsi-region")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the pyramid level geometry of a slide.
    Info(InfoConfig),

    /// Extract a region and write it as PNG or JPEG.
    Region(RegionConfig),
}

/// Arguments for `wsi-region info`.
#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    /// Path to the slide file.
    pub slide: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments for `wsi-region region`.
#[derive(Args, Debug, Clone)]
pub struct RegionConfig {
    /// Path to the slide file.
    pub slide: PathBuf,

    /// Pyramid level (0 = highest resolution).
    #[arg(short, long, default_value_t = 0, env = "WSIR_LEVEL")]
    pub level: i32,

    /// Left edge of the region, in level pixels.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub x: i64,

    /// Top edge of the region, in level pixels.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub y: i64,

    /// Region width in pixels.
    #[arg(long)]
    pub width: i64,

    /// Region height in pixels.
    #[arg(long)]
    pub height: i64,

    /// Output file; the extension selects PNG or JPEG.
    #[arg(short, long)]
    pub output: PathBuf,

    /// JPEG quality (1-100), ignored for PNG output.
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, env = "WSIR_JPEG_QUALITY")]
    pub jpeg_quality: u8,
}

impl RegionConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.level < 0 {
            return Err("level must not be negative".to_string());
        }

        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if !is_valid_quality(self.jpeg_quality) {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        self.output_format()?;

        Ok(())
    }

    /// Output format implied by the output path.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        OutputFormat::from_path(&self.output).map_err(|_| {
            format!(
                "cannot infer output format from '{}'; use a .png, .jpg or .jpeg extension",
                self.output.display()
            )
        })
    }

    /// The slide path.
    pub fn slide_path(&self) -> &Path {
        &self.slide
    }
}

// =============================================================================
// Tests
// =============================================================================
