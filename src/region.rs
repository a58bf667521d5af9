//! Source-region resolution, clamping, and extraction.
//!
//! A requested region may hang off any side of the source, or sit
//! entirely outside it. Clamping translates/truncates the rectangle to
//! its intersection with the source bounds; extraction copies exactly
//! those pixels, never resampling. This runs before dimension
//! computation, since later stages size relative to the cropped region.

use crate::buffer::PixelBuffer;
use crate::error::{Result, ThumbError};
use crate::geometry::{Region, Size};

/// A region resolved and clamped into source bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRegion {
    pub left: u32,
    pub top: u32,
    pub size: Size,
}

/// Resolve a region's position against `source` and intersect the
/// rectangle with the source bounds.
///
/// A zero-area intersection is an [`ThumbError::EmptyRegion`], never a
/// silently empty result.
pub fn clamp(source: Size, region: &Region) -> Result<ClampedRegion> {
    let origin = region.position.resolve(source, region.size);
    let x0 = origin.x.max(0);
    let y0 = origin.y.max(0);
    let x1 = (origin.x + region.size.width() as i64).min(source.width() as i64);
    let y1 = (origin.y + region.size.height() as i64).min(source.height() as i64);

    if x1 <= x0 || y1 <= y0 {
        return Err(ThumbError::EmptyRegion {
            left: origin.x,
            top: origin.y,
            width: region.size.width(),
            height: region.size.height(),
            source_width: source.width(),
            source_height: source.height(),
        });
    }

    Ok(ClampedRegion {
        left: x0 as u32,
        top: y0 as u32,
        size: Size::new((x1 - x0) as u32, (y1 - y0) as u32)?,
    })
}

/// Extract the clamped region's pixels as a fresh buffer.
pub fn extract(source: &PixelBuffer, region: &Region) -> Result<PixelBuffer> {
    let clamped = clamp(source.size(), region)?;
    source.crop(clamped.left, clamped.top, clamped.size)
}
