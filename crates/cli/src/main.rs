use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use handgesture_core::media::domain::image_reader::ImageReader;
use handgesture_core::media::domain::image_writer::ImageWriter;
use handgesture_core::media::infrastructure::image_file_reader::ImageFileReader;
use handgesture_core::media::infrastructure::image_file_writer::ImageFileWriter;
use handgesture_core::pipeline::detector::Detector;
use handgesture_core::pipeline::pipeline_logger::{
    NullPipelineLogger, PipelineLogger, StdoutPipelineLogger,
};
use handgesture_core::shared::config::DetectorConfig;
use handgesture_core::shared::constants::IMAGE_EXTENSIONS;
use handgesture_core::OperatingMode;

/// Hand gesture direction detection for still images.
///
/// Inputs are processed in order as one frame sequence through a single
/// detector; the verdict for each frame is printed to stdout.
#[derive(Parser)]
#[command(name = "gesture-detect")]
struct Cli {
    /// Input image files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Operating mode: 0 = position, 1 = tilt, 2 = blend.
    #[arg(long, default_value = "0")]
    mode: i32,

    /// Write annotated images to this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Detector config JSON (defaults to the platform config file if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image of the empty scene, used for background subtraction.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Swap left and right (front-facing camera).
    #[arg(long)]
    mirrored: bool,

    /// Log per-stage timing after the run (shown with RUST_LOG=info).
    #[arg(long)]
    summary: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mode = OperatingMode::try_from(cli.mode)?;
    let mut detector = build_detector(&cli)?;
    let reader = ImageFileReader::new();
    let writer = ImageFileWriter::new();

    if let Some(background) = &cli.background {
        let frame = reader.read(background)?;
        detector.set_background(Some(&frame))?;
        log::info!("Background reference loaded from {}", background.display());
    }

    for input in &cli.inputs {
        let frame = reader.read(input)?;
        let annotated = detector.detect_gesture_with_mode(&frame, mode)?;
        println!("{}\t{}", input.display(), detector.gesture_type());

        if let Some(dir) = &cli.output_dir {
            let path = output_path(dir, input);
            writer.write(&path, &annotated)?;
            log::info!("Annotated frame written to {}", path.display());
        }
    }

    detector.log_summary();
    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Detector, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::load_or_default(),
    };
    if cli.mirrored {
        config.mirrored = true;
    }

    let logger: Box<dyn PipelineLogger> = if cli.summary {
        Box::new(StdoutPipelineLogger::default())
    } else {
        Box::new(NullPipelineLogger)
    };
    Ok(Detector::with_config(config)?.with_logger(logger))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    OperatingMode::try_from(cli.mode)?;
    for input in cli.inputs.iter().chain(cli.background.iter()) {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !is_image(input) {
            return Err(format!(
                "Unsupported image type: {} (expected one of {})",
                input.display(),
                IMAGE_EXTENSIONS.join(", ")
            )
            .into());
        }
    }
    if let Some(dir) = &cli.output_dir {
        if dir.is_file() {
            return Err(format!("Output path is a file: {}", dir.display()).into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// `<dir>/<stem>_annotated.png`; PNG keeps the overlay colors exact.
fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    dir.join(format!("{stem}_annotated.png"))
}
