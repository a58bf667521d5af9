//! Pure calculation functions for target dimensions.
//!
//! All functions here are pure and testable without any buffers. They
//! answer one question: what size should the resample step target. Policy
//! about cropping afterwards lives in the pipeline; a computed zero
//! dimension is deliberately passed through and rejected at the resample
//! boundary instead.

use crate::geometry::Size;
use crate::params::ResizeSpec;

/// Final integer pixel dimensions for resampling `source` under `spec`.
///
/// - `Scale`: each dimension is `round(source * factor)`. Factors were
///   validated finite and positive at spec construction.
/// - `Explicit` without aspect preservation: exactly the requested
///   dimensions (may distort). With only one bound present, the other
///   derives from the source aspect ratio.
/// - `Explicit` with aspect preservation: the largest scale that keeps
///   the result inside every *specified* bound, applied to both
///   dimensions; an absent bound does not constrain.
pub fn compute_target(source: Size, spec: &ResizeSpec) -> (u32, u32) {
    match *spec {
        ResizeSpec::Scale {
            width_factor,
            height_factor,
        } => (
            (source.width() as f64 * width_factor).round() as u32,
            (source.height() as f64 * height_factor).round() as u32,
        ),
        ResizeSpec::Explicit {
            width,
            height,
            keep_aspect_ratio,
            ..
        } => {
            if !keep_aspect_ratio {
                if let (Some(w), Some(h)) = (width, height) {
                    return (w, h);
                }
            }
            scaled_to_fit(source, width, height)
        }
    }
}

fn scaled_to_fit(source: Size, width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    let scale_w = width.map(|w| w as f64 / source.width() as f64);
    let scale_h = height.map(|h| h as f64 / source.height() as f64);
    let scale = match (scale_w, scale_h) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => 1.0,
    };
    (
        (source.width() as f64 * scale).round() as u32,
        (source.height() as f64 * scale).round() as u32,
    )
}

/// Dimensions that completely cover `target` while keeping the source
/// aspect ratio: one dimension matches the target exactly, the other
/// meets or exceeds it. The crop-to-exact stage trims the overhang.
pub fn fill_dimensions(source: Size, target: Size) -> (u32, u32) {
    let src_aspect = source.aspect_ratio();
    let tgt_aspect = target.aspect_ratio();

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed.
        let h = target.height();
        let w = (h as f64 * src_aspect).round() as u32;
        (w, h)
    } else {
        // Source is taller: width will match, height will exceed.
        let w = target.width();
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h)
    }
}
