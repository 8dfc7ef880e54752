// moviedim-cli/src/commands/detect.rs
//
// Runs the detector on a single file and prints the outcome.

use std::path::Path;

use moviedim_core::processing::{DetectionOutcome, FallbackReason};
use moviedim_core::{AspectRatioDetector, AspectRatioResult, CoreConfig};
use serde::Serialize;

use crate::cli::DetectArgs;

#[derive(Serialize)]
struct DetectReport<'a> {
    file_path: &'a Path,
    #[serde(flatten)]
    result: &'a AspectRatioResult,
}

pub fn run_detect(config: &CoreConfig, args: &DetectArgs) -> anyhow::Result<()> {
    log::debug!(
        "Detecting {} ({} samples, threshold {})",
        args.path.display(),
        config.sample_frames,
        config.black_threshold
    );

    let detector = AspectRatioDetector::from_config(config);
    let result = detector.calculate(&args.path);

    if args.json {
        let report = DetectReport {
            file_path: &args.path,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}: {}", args.path.display(), describe(&result));
    }
    Ok(())
}

/// One-line, human-readable summary of a result.
pub fn describe(result: &AspectRatioResult) -> String {
    let validity = if result.valid { "valid" } else { "invalid" };
    let detail = match &result.outcome {
        DetectionOutcome::Classified {
            band,
            width,
            height,
        } => format!("{band}, visible {width}x{height}"),
        DetectionOutcome::Unclassified {
            measured,
            width,
            height,
        } => format!("measured {measured} from {width}x{height}, outside known ratios"),
        DetectionOutcome::Fallback { reason } => match reason {
            FallbackReason::FileNotFound => "file not found".to_string(),
            FallbackReason::SourceUnavailable => "could not open video".to_string(),
            FallbackReason::NoVisibleContent => "no visible content in sampled frames".to_string(),
            FallbackReason::DegenerateGeometry => "invalid visible dimensions".to_string(),
        },
    };
    format!("{} ({validity}; {detail})", result.aspect_ratio)
}
