//! Render every shirt/pant combination for one still photo.
//!
//! Usage:
//!   cargo run --example tryon_still -- <photo> <garment-dir> [output-dir] [tier]
//!
//! Without the `rustface` feature the face is simulated (centred, upper third).
//! With it, set `SEETAFACE_MODEL` to a SeetaFace model file to detect the face.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tryon::{
    output_file_name, DetectionTier, FaceDetector, GarmentCatalog, OutputFormat, PantStyle,
    ShirtStyle, SimulatedFaceDetector, StillFrame, TryOn,
};

#[cfg(feature = "rustface")]
fn detector() -> Arc<dyn FaceDetector> {
    if let Some(model) = std::env::var_os("SEETAFACE_MODEL") {
        match tryon::RustfaceDetector::open(&model) {
            Ok(detector) => return Arc::new(detector),
            Err(e) => tracing::warn!("falling back to simulated face: {e}"),
        }
    }
    Arc::new(SimulatedFaceDetector)
}

#[cfg(not(feature = "rustface"))]
fn detector() -> Arc<dyn FaceDetector> {
    Arc::new(SimulatedFaceDetector)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <photo> <garment-dir> [output-dir] [tier]", args[0]);
        std::process::exit(2);
    }
    let photo = Path::new(&args[1]);
    let catalog = Arc::new(GarmentCatalog::load(&args[2]));
    let output_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));
    let tier = args
        .get(4)
        .map(|name| DetectionTier::from_name_or_default(name))
        .unwrap_or(DetectionTier::Strict);

    std::fs::create_dir_all(&output_dir).unwrap();
    let mut camera = StillFrame::open(photo).unwrap();
    let tryon = TryOn::new(catalog, detector())
        .detection_tier(tier)
        .capture_attempts(1)
        .mark_face(true);

    for shirt in ShirtStyle::ALL {
        for pant in PantStyle::ALL {
            let output = match tryon.capture_and_render(&mut camera, shirt, pant) {
                Ok(output) => output,
                Err(e) => {
                    println!("  shirt {} / pant {}: {e}", shirt.number(), pant.number());
                    continue;
                }
            };

            let name = output_file_name(shirt, pant, OutputFormat::Jpeg);
            let data = output.encode(OutputFormat::Jpeg, 0.9).unwrap();
            std::fs::write(output_dir.join(&name), &data).unwrap();

            println!(
                "  {name}: face=({}, {}, {}x{}) shirt={:?} pant={:?} ({} bytes)",
                output.report.face.x,
                output.report.face.y,
                output.report.face.width,
                output.report.face.height,
                output.report.shirt,
                output.report.pant,
                data.len(),
            );
        }
    }
}
