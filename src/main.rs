use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use favicon_tools::logging::init_logging;
use favicon_tools::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit status when the image codec for the input format is not available.
const EXIT_MISSING_CAPABILITY: u8 = 2;

#[derive(Parser)]
#[command(name = "favicon")]
#[command(about = "Clean up a favicon: strip white backgrounds, trim transparent padding")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML or JSON file with default paths and logging settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Make the white background transparent and re-crop, in place
    Strip {
        /// Image to rewrite (defaults to strip.target from the config)
        path: Option<PathBuf>,
    },

    /// Crop to non-transparent content and save to a destination
    Crop {
        /// Image to read (defaults to crop.source from the config)
        source: Option<PathBuf>,

        /// Where to write the PNG (defaults to crop.destination from the config)
        destination: Option<PathBuf>,
    },

    /// Print corner pixels, white pixel count and content box without writing
    Inspect {
        /// Image to analyze (defaults to strip.target from the config)
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let err = anyhow::Error::from(err);
            println!("Error: {err:#}");
            return exit_code(&cli.command, &err);
        }
    };

    let _log_guard = match init_logging(&config.logging, cli.verbose) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Logging disabled: {err:#}");
            None
        }
    };

    let result = match &cli.command {
        Commands::Strip { path } => handle_strip(path.as_deref(), &config),
        Commands::Crop {
            source,
            destination,
        } => handle_crop(source.as_deref(), destination.as_deref(), &config),
        Commands::Inspect { path } => handle_inspect(path.as_deref(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {err:#}");
            if is_missing_capability(&err) {
                println!(
                    "This build cannot decode the input format. Rebuild with the matching \
                     `image` crate codec feature enabled, or convert the file to PNG first."
                );
            }
            exit_code(&cli.command, &err)
        }
    }
}

fn exit_code(command: &Commands, err: &anyhow::Error) -> ExitCode {
    ExitCode::from(failure_status(command, err))
}

/// `strip` reports failures but always exits 0. `crop` distinguishes a
/// missing codec from other failures; `inspect` exits 1 on any failure.
fn failure_status(command: &Commands, err: &anyhow::Error) -> u8 {
    match command {
        Commands::Strip { .. } => 0,
        Commands::Crop { .. } if is_missing_capability(err) => EXIT_MISSING_CAPABILITY,
        Commands::Crop { .. } | Commands::Inspect { .. } => 1,
    }
}

fn is_missing_capability(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Error>()
        .is_some_and(Error::is_missing_capability)
}

fn resolve<'a>(arg: Option<&'a Path>, configured: Option<&'a Path>, what: &str) -> Result<&'a Path> {
    arg.or(configured).with_context(|| {
        format!("no {what} given: pass it as an argument or set it in the config file")
    })
}

fn handle_strip(path: Option<&Path>, config: &Config) -> Result<()> {
    let path = resolve(path, config.strip.target.as_deref(), "strip target")?;

    let report = strip_file(path)
        .with_context(|| format!("Failed to strip background of {}", path.display()))?;

    println!("Corner pixels: {}", report.corners);
    if report.removed == 0 {
        println!("No significant white background detected.");
        return Ok(());
    }

    println!(
        "Detected white background ({} pixels), converting to transparent and re-cropping...",
        report.removed
    );
    match report.bbox {
        Some(bbox) => {
            println!("New bounding box: {}", bbox);
            println!(
                "Saved corrected favicon ({}x{}) to {}",
                bbox.width(),
                bbox.height(),
                report.path.display()
            );
        }
        None => println!("Image became empty after removing white, file left unchanged."),
    }

    Ok(())
}

fn handle_crop(source: Option<&Path>, destination: Option<&Path>, config: &Config) -> Result<()> {
    let source = resolve(source, config.crop.source.as_deref(), "crop source")?;
    let destination = resolve(destination, config.crop.destination.as_deref(), "crop destination")?;

    let report = crop_file(source, destination)
        .with_context(|| format!("Failed to crop {}", source.display()))?;

    let (width, height) = report.original_size;
    println!("Original size: {}x{}", width, height);
    match report.bbox {
        Some(bbox) => {
            println!("Bounding box: {}", bbox);
            let (width, height) = report.output_size;
            println!("Cropped size: {}x{}", width, height);
            println!("Saved optimized favicon to {}", report.destination.display());
        }
        None => println!("Image is fully transparent or empty, copying original."),
    }

    Ok(())
}

fn handle_inspect(path: Option<&Path>, config: &Config) -> Result<()> {
    let path = resolve(path, config.strip.target.as_deref(), "image to inspect")?;

    let report = inspect_file(path).with_context(|| format!("Failed to inspect {}", path.display()))?;

    let (width, height) = report.size;
    println!("Image: {}", report.path.display());
    println!("Size: {}x{}", width, height);
    println!("Corner pixels: {}", report.corners);
    println!("White-ish pixels: {}", report.white_pixels);
    match report.bbox {
        Some(bbox) => println!("Content bounding box: {} ({}x{})", bbox, bbox.width(), bbox.height()),
        None => println!("Content bounding box: none (fully transparent)"),
    }

    Ok(())
}
