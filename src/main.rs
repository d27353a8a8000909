use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing::Level;

use phstrip::{AnalysisConfig, PhPipeline};

#[derive(Parser)]
#[command(name = "phstrip")]
#[command(about = "Estimate pH from a photo of a colorimetric test card")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", required_unless_present = "write_default_config")]
    image_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with pipeline parameters (defaults to the built-in presets)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the default configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_default_config: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    if let Some(path) = &args.write_default_config {
        AnalysisConfig::default().to_json_file(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let image_path = args
        .image_path
        .ok_or_else(|| anyhow::anyhow!("No image given"))?;
    if !image_path.is_file() {
        anyhow::bail!("Image not found: {}", image_path.display());
    }

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    tracing::debug!("Loading image: {:?}", image_path);
    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?
        .to_rgb8();
    tracing::debug!("Image loaded: {}x{}", img.width(), img.height());

    let mut pipeline = PhPipeline::new(config);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let analysis = pipeline.run(&img)?;
    let report = analysis.report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("background rgb {:?} hsv {:?}", report.background.rgb, report.background.hsv);
    println!(
        "leveled background rgb {:?} hsv {:?}",
        report.leveled_background.rgb, report.leveled_background.hsv
    );
    println!("white {:?}", report.white);
    println!("black {:?}", report.black);
    println!("center rgb {:?} hsv {:?}", report.center.rgb, report.center.hsv);
    if report.center_contours != 1 {
        println!("warning: {} center regions passed the filter", report.center_contours);
    }
    println!("\nEstimated pH value: {:.1}\n", report.ph_rounded);

    Ok(())
}
