//! WSI Region - command line front end.
//!
//! Opens a slide with OpenSlide, prints its level geometry or extracts a
//! region to PNG/JPEG.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wsi_region::{
    config::{Cli, Command, InfoConfig, RegionConfig},
    export::RegionEncoder,
    Slide,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Info(config) => run_info(config),
        Command::Region(config) => run_region(config),
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "wsi_region=debug"
    } else {
        "wsi_region=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Info Command
// =============================================================================

fn run_info(config: InfoConfig) -> ExitCode {
    let slide = match Slide::open(&config.slide) {
        Ok(slide) => slide,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let levels = match slide.levels() {
        Ok(levels) => levels,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.json {
        let json = serde_json::json!({
            "slide": slide.identifier(),
            "level_count": levels.len(),
            "levels": levels,
        });
        match serde_json::to_string_pretty(&json) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to serialize levels: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("Slide: {}", slide.identifier());
        println!("Levels: {}", levels.len());
        println!();
        println!("  {:>5}  {:>10}  {:>10}  {:>10}", "level", "width", "height", "downsample");
        for level in &levels {
            println!(
                "  {:>5}  {:>10}  {:>10}  {:>10.3}",
                level.level, level.width, level.height, level.downsample
            );
        }
    }

    slide.close();
    ExitCode::SUCCESS
}

// =============================================================================
// Region Command
// =============================================================================

fn run_region(config: RegionConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let slide = match Slide::open(config.slide_path()) {
        Ok(slide) => slide,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match slide.level_contains(config.level, config.x, config.y, config.width, config.height) {
        Ok(true) => {}
        Ok(false) => info!("Region extends past the level bounds; uncovered pixels are transparent"),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    let region = match slide.read_rgba_region(
        config.level,
        config.x,
        config.y,
        config.width,
        config.height,
    ) {
        Ok(region) => region,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    slide.close();

    let encoder = RegionEncoder::with_jpeg_quality(config.jpeg_quality);
    match encoder.write_to_file(&region, &config.output) {
        Ok(bytes) => {
            info!(
                "Wrote {}x{} region to {} ({} bytes)",
                region.width(),
                region.height(),
                config.output.display(),
                bytes
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to write {}: {}", config.output.display(), e);
            ExitCode::FAILURE
        }
    }
}
