//! Subcommand implementations

use anyhow::{Context, Result};
use kurv_animation::share;
use kurv_core::LinearScale;
use kurv_editor::{curves_for_animation, Curve, EditorConfig};
use std::fmt::Write;
use std::path::Path;

use crate::document::AnimationDocument;

fn load_curves(path: &Path, config: &EditorConfig) -> Result<(String, Vec<Curve>)> {
    let animation = AnimationDocument::load(path)?.into_animation();
    let name = animation.name().to_string();
    tracing::info!(animation = %name, keys = animation.len(), "loaded animation");

    let curves = curves_for_animation(&share(animation), config)
        .with_context(|| format!("Failed to build curves for {}", name))?;
    Ok((name, curves))
}

fn label(name: &str, curve: &Curve) -> String {
    match curve.projection().name() {
        Some(component) => format!("{}.{}", name, component),
        None => name.to_string(),
    }
}

/// Frame and value bounds over every key and handle
fn bounds(curves: &[Curve]) -> Option<((f32, f32), (f32, f32))> {
    let mut frames: Option<(f32, f32)> = None;
    let mut values: Option<(f32, f32)> = None;
    let mut include = |frame: f32, value: f32| {
        frames = Some(frames.map_or((frame, frame), |(lo, hi)| (lo.min(frame), hi.max(frame))));
        values = Some(values.map_or((value, value), |(lo, hi)| (lo.min(value), hi.max(value))));
    };

    for curve in curves {
        for (i, key) in curve.keys().iter().enumerate() {
            include(key.frame, key.value);
            for cp in [curve.in_control_point(i), curve.out_control_point(i)]
                .into_iter()
                .flatten()
            {
                include(cp.frame, cp.value);
            }
        }
    }

    Some((frames?, values?))
}

/// Widen a degenerate range so it maps to a non-zero span
fn padded((lo, hi): (f32, f32)) -> (f32, f32) {
    if (hi - lo).abs() < f32::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// `kurv path`: one line of SVG path data per curve, fitted to the viewport
pub fn path(file: &Path, config: &EditorConfig, width: f32, height: f32) -> Result<String> {
    let (name, curves) = load_curves(file, config)?;
    let mut out = String::new();

    let Some((frames, values)) = bounds(&curves) else {
        tracing::warn!(animation = %name, "animation has no keys");
        return Ok(out);
    };
    let (f0, f1) = padded(frames);
    let (v0, v1) = padded(values);
    let x = LinearScale::new(f0, f1, 0.0, width);
    // Screen y grows downwards
    let y = LinearScale::new(v0, v1, height, 0.0);

    for curve in &curves {
        writeln!(
            out,
            "{}\t{}\t{}",
            label(&name, curve),
            curve.color(),
            curve.path_data(|f| x.map(f), |v| y.map(v))
        )?;
    }
    Ok(out)
}

/// `kurv handles`: keys and their control points in curve space
pub fn handles(file: &Path, config: &EditorConfig) -> Result<String> {
    let (name, curves) = load_curves(file, config)?;
    let mut out = String::new();

    for curve in &curves {
        writeln!(out, "{}", label(&name, curve))?;
        for (i, key) in curve.keys().iter().enumerate() {
            write!(out, "  [{}] frame={} value={}", i, key.frame, key.value)?;
            if let Some(cp) = curve.in_control_point(i) {
                write!(out, " in=({}, {})", cp.frame, cp.value)?;
            }
            if let Some(cp) = curve.out_control_point(i) {
                write!(out, " out=({}, {})", cp.frame, cp.value)?;
            }
            writeln!(out)?;
        }
    }
    Ok(out)
}
