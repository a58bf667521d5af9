//! Multi-pass progressive bilinear downscaling.
//!
//! Repeatedly halves the image (bilinear to `max(current/2, target)` per
//! dimension) until the remaining ratio is at most 2x, then one final
//! bilinear pass to the exact target. Each halving pass has a scale ratio
//! near 2, where bilinear degenerates into a 2x2 box average, so the
//! chain approximates a properly low-pass-filtered downscale without a
//! wide filter kernel. Intermediates are dropped as soon as the next pass
//! exists; peak memory is two buffers.

use super::{bilinear, PROGRESSIVE_THRESHOLD};
use crate::buffer::PixelBuffer;
use crate::error::Result;

pub(crate) fn resample(
    source: &PixelBuffer,
    target_width: u32,
    target_height: u32,
) -> Result<PixelBuffer> {
    let mut current_width = source.width();
    let mut current_height = source.height();
    let mut current: Option<PixelBuffer> = None;

    while current_width > target_width.saturating_mul(PROGRESSIVE_THRESHOLD)
        || current_height > target_height.saturating_mul(PROGRESSIVE_THRESHOLD)
    {
        let next_width = (current_width / 2).max(target_width);
        let next_height = (current_height / 2).max(target_height);
        let stage_source = current.as_ref().unwrap_or(source);
        current = Some(bilinear::resample(stage_source, next_width, next_height)?);
        current_width = next_width;
        current_height = next_height;
    }

    match current {
        Some(buffer) if current_width == target_width && current_height == target_height => {
            Ok(buffer)
        }
        Some(buffer) => bilinear::resample(&buffer, target_width, target_height),
        None => bilinear::resample(source, target_width, target_height),
    }
}
