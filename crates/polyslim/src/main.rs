//! polyslim: CLI demo for bounded-error polyline simplification.
//!
//! Reads a track as JSON (or uses a built-in sample), simplifies it at
//! a given deviation threshold, prints point-count diagnostics, and
//! writes a PNG overlay showing the original path, the simplified
//! path, and the detected corner points. Useful for:
//!
//! - Judging a threshold choice visually before wiring the library in
//! - Checking how many points a given track actually needs
//! - Inspecting which points the corner filter flags
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin polyslim -- [OPTIONS] [TRACK_PATH]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use polyslim_core::{Point, Polyline, corner_points, simplify_by_key};
use polyslim_render::{OverlayStyle, render_overlay_png, to_overlay_svg};
use serde::{Deserialize, Serialize};

/// Default deviation threshold in track units.
const DEFAULT_THRESHOLD: f64 = 0.1;

/// Bounded-error polyline simplification demo.
///
/// Simplifies a 2D track so that no discarded point deviates from the
/// result by more than the threshold, and renders an overlay of the
/// original path (blue), the simplified path (red), and the detected
/// corner points (green).
#[derive(Parser)]
#[command(name = "polyslim", version)]
struct Cli {
    /// Path to a JSON track: an array of {"x", "y"} objects, each with
    /// an optional "minute" timestamp. Uses a built-in sample track
    /// when omitted.
    track_path: Option<PathBuf>,

    /// Maximum allowed deviation of discarded points, in track units.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Write the PNG overlay to this path.
    #[arg(short, long, default_value = "polyline.png")]
    output: PathBuf,

    /// Also write an SVG overlay to this path.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,
}

/// One recorded track fix. The timestamp rides along untouched so the
/// simplified output keeps the original recording times.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Fix {
    x: f64,
    y: f64,
    /// Minutes since the start of the recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minute: Option<u32>,
}

impl Fix {
    const fn new(x: f64, y: f64, minute: u32) -> Self {
        Self {
            x,
            y,
            minute: Some(minute),
        }
    }

    const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Built-in sample: a short winding track with uneven fix timing.
fn sample_track() -> Vec<Fix> {
    vec![
        Fix::new(0.0, 0.0, 0),
        Fix::new(1.0, 0.0, 4),
        Fix::new(2.0, 1.0, 5),
        Fix::new(2.0, 2.0, 6),
        Fix::new(1.0, 4.0, 7),
        Fix::new(0.0, 5.0, 8),
        Fix::new(1.0, 6.0, 9),
        Fix::new(2.0, 6.0, 10),
        Fix::new(3.0, 6.0, 11),
        Fix::new(4.0, 7.0, 12),
        Fix::new(4.0, 8.0, 13),
        Fix::new(3.0, 8.0, 14),
        Fix::new(2.0, 8.0, 15),
        Fix::new(1.0, 8.0, 16),
    ]
}

/// Load the track from `--track-path`, or fall back to the sample.
fn load_track(path: Option<&PathBuf>) -> Result<Vec<Fix>, String> {
    let Some(path) = path else {
        return Ok(sample_track());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("Error parsing {}: {e}", path.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let fixes = match load_track(cli.track_path.as_ref()) {
        Ok(fixes) => fixes,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let simplified_fixes = match simplify_by_key(&fixes, Fix::point, cli.threshold) {
        Ok(fixes) => fixes,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let original = Polyline::new(fixes.iter().map(Fix::point).collect());
    let simplified = Polyline::new(simplified_fixes.iter().map(Fix::point).collect());
    let corners = corner_points(&original);

    println!("Threshold: {}", cli.threshold);
    println!("Input points:  {}", original.len());
    println!("Corner points: {}", corners.len());
    println!("Output points: {}", simplified.len());
    if !original.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let kept = simplified.len() as f64 / original.len() as f64 * 100.0;
        println!("Kept: {kept:.1}%");
    }
    println!();
    for fix in &simplified_fixes {
        match fix.minute {
            Some(minute) => println!("({}, {}) at minute {minute}", fix.x, fix.y),
            None => println!("({}, {})", fix.x, fix.y),
        }
    }

    let style = OverlayStyle::default();

    match render_overlay_png(&original, &simplified, &corners, cli.width, cli.height, &style) {
        Ok(png) => match std::fs::write(&cli.output, &png) {
            Ok(()) => {
                eprintln!("PNG written to {} ({} bytes)", cli.output.display(), png.len());
            }
            Err(e) => {
                eprintln!("Error writing PNG to {}: {e}", cli.output.display());
                return ExitCode::FAILURE;
            }
        },
        Err(e) => {
            eprintln!("Render error: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(ref svg_path) = cli.svg {
        match to_overlay_svg(&original, &simplified, &corners, cli.width, cli.height, &style) {
            Ok(svg) => match std::fs::write(svg_path, &svg) {
                Ok(()) => {
                    eprintln!("SVG written to {} ({} bytes)", svg_path.display(), svg.len());
                }
                Err(e) => {
                    eprintln!("Error writing SVG to {}: {e}", svg_path.display());
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                eprintln!("Render error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
