//! Post-resample filters.
//!
//! Filters run after resampling, on the small buffer, in registration
//! order. Each consumes a buffer by reference and returns a new one.
//! Built-ins cover the orthogonal transforms, watermark overlays, and
//! arbitrary-angle rotation; anything else goes through the
//! [`ImageFilter`] trait.

use std::sync::Arc;

use crate::buffer::{ChannelLayout, PixelBuffer};
use crate::error::{Result, ThumbError};
use crate::geometry::{Position, Size};
use crate::transform::Transform;

/// A caller-supplied buffer-to-buffer filter.
pub trait ImageFilter: Send + Sync {
    fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer>;
}

/// One step of the post-filter chain.
#[derive(Clone)]
pub enum Filter {
    /// An orthogonal flip/rotation/transpose.
    Orient(Transform),
    /// Arbitrary-angle rotation.
    Rotate(RotateFilter),
    /// Overlay another buffer with opacity.
    Watermark(WatermarkFilter),
    /// Caller-supplied filter.
    Custom(Arc<dyn ImageFilter>),
}

impl Filter {
    pub fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
        match self {
            Filter::Orient(transform) => Ok(transform.apply(source)),
            Filter::Rotate(rotate) => rotate.apply(source),
            Filter::Watermark(watermark) => Ok(watermark.apply(source)),
            Filter::Custom(filter) => filter.apply(source),
        }
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Orient(t) => write!(f, "Orient({t:?})"),
            Filter::Rotate(r) => write!(f, "Rotate({} deg)", r.degrees),
            Filter::Watermark(w) => write!(f, "Watermark({})", w.overlay.size()),
            Filter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Transform> for Filter {
    fn from(t: Transform) -> Self {
        Filter::Orient(t)
    }
}

/// Rotation by an arbitrary angle, positive degrees turning clockwise.
///
/// The output canvas is the rotated bounding box; pixels the source does
/// not cover take the fill color. Right-angle multiples delegate to the
/// exact orthogonal transforms.
#[derive(Debug, Clone, Copy)]
pub struct RotateFilter {
    degrees: f64,
    fill: [u8; 4],
}

impl RotateFilter {
    /// Fill defaults to black (transparent black for alpha layouts).
    pub fn new(degrees: f64) -> Result<Self> {
        Self::with_fill(degrees, [0, 0, 0, 0])
    }

    /// `fill` is interpreted per layout: `[gray, _, _, _]` for gray
    /// buffers, `[r, g, b, _]` for RGB, all four channels for RGBA.
    pub fn with_fill(degrees: f64, fill: [u8; 4]) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(ThumbError::invalid_spec(format!(
                "rotation angle must be finite, got {degrees}"
            )));
        }
        Ok(Self { degrees, fill })
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
        let degrees = self.degrees.rem_euclid(360.0);
        if degrees == 0.0 {
            return Ok(source.clone());
        }
        if degrees == 90.0 {
            return Ok(Transform::Rotate90Cw.apply(source));
        }
        if degrees == 180.0 {
            return Ok(Transform::Rotate180.apply(source));
        }
        if degrees == 270.0 {
            return Ok(Transform::Rotate90Ccw.apply(source));
        }
        self.rotate_free(source, degrees)
    }

    fn rotate_free(&self, source: &PixelBuffer, degrees: f64) -> Result<PixelBuffer> {
        let theta = degrees.to_radians();
        let (sin_t, cos_t) = theta.sin_cos();
        let src_w = source.width() as f64;
        let src_h = source.height() as f64;

        let out_w = (src_w * cos_t.abs() + src_h * sin_t.abs()).ceil().max(1.0) as u32;
        let out_h = (src_w * sin_t.abs() + src_h * cos_t.abs()).ceil().max(1.0) as u32;
        let out_size = Size::new(out_w, out_h)?;

        let channels = source.layout().channels();
        let mut out = PixelBuffer::from_fn(out_size, source.layout(), |_, _| self.fill);

        let (out_cx, out_cy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);
        let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);
        let max_x = source.width() as usize - 1;
        let max_y = source.height() as usize - 1;
        let data = source.data();
        let src_row = source.width() as usize;

        for y in 0..out_h {
            for x in 0..out_w {
                // Inverse rotation of the destination pixel center.
                let dx = x as f64 + 0.5 - out_cx;
                let dy = y as f64 + 0.5 - out_cy;
                let sx = cos_t * dx + sin_t * dy + src_cx - 0.5;
                let sy = -sin_t * dx + cos_t * dy + src_cy - 0.5;

                if sx < -0.5 || sy < -0.5 || sx > src_w - 0.5 || sy > src_h - 0.5 {
                    continue; // keep fill
                }

                let x0 = (sx.floor().max(0.0) as usize).min(max_x);
                let y0 = (sy.floor().max(0.0) as usize).min(max_y);
                let x1 = (x0 + 1).min(max_x);
                let y1 = (y0 + 1).min(max_y);
                let fx = (sx - x0 as f64).clamp(0.0, 1.0);
                let fy = (sy - y0 as f64).clamp(0.0, 1.0);

                let idx00 = (y0 * src_row + x0) * channels;
                let idx01 = (y0 * src_row + x1) * channels;
                let idx10 = (y1 * src_row + x0) * channels;
                let idx11 = (y1 * src_row + x1) * channels;

                let px = out.pixel_mut(x, y);
                for c in 0..channels {
                    let top =
                        data[idx00 + c] as f64 * (1.0 - fx) + data[idx01 + c] as f64 * fx;
                    let bottom =
                        data[idx10 + c] as f64 * (1.0 - fx) + data[idx11 + c] as f64 * fx;
                    px[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        Ok(out)
    }
}

impl From<RotateFilter> for Filter {
    fn from(r: RotateFilter) -> Self {
        Filter::Rotate(r)
    }
}

/// Overlay a smaller buffer onto the result at a resolved position.
#[derive(Clone)]
pub struct WatermarkFilter {
    overlay: Arc<PixelBuffer>,
    position: Position,
    opacity: f32,
}

impl WatermarkFilter {
    /// `opacity` must lie in `[0, 1]`. The overlay's own alpha channel
    /// (if any) multiplies with it.
    pub fn new(
        overlay: PixelBuffer,
        position: impl Into<Position>,
        opacity: f32,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ThumbError::invalid_spec(format!(
                "watermark opacity must be within [0, 1], got {opacity}"
            )));
        }
        Ok(Self {
            overlay: Arc::new(overlay),
            position: position.into(),
            opacity,
        })
    }

    fn apply(&self, source: &PixelBuffer) -> PixelBuffer {
        let mut out = source.clone();
        let layout = out.layout();
        let origin = self
            .position
            .resolve(source.size(), self.overlay.size());

        for oy in 0..self.overlay.height() {
            let cy = origin.y + oy as i64;
            if cy < 0 || cy >= source.height() as i64 {
                continue;
            }
            for ox in 0..self.overlay.width() {
                let cx = origin.x + ox as i64;
                if cx < 0 || cx >= source.width() as i64 {
                    continue;
                }
                let over = expand_rgba(self.overlay.pixel(ox, oy), self.overlay.layout());
                let alpha = self.opacity * (over[3] as f32 / 255.0);
                if alpha <= 0.0 {
                    continue;
                }
                blend_pixel(out.pixel_mut(cx as u32, cy as u32), layout, over, alpha);
            }
        }
        out
    }
}

impl From<WatermarkFilter> for Filter {
    fn from(w: WatermarkFilter) -> Self {
        Filter::Watermark(w)
    }
}

/// Expand any layout's pixel to RGBA for blending.
#[inline]
fn expand_rgba(px: &[u8], layout: ChannelLayout) -> [u8; 4] {
    match layout {
        ChannelLayout::Gray => [px[0], px[0], px[0], 255],
        ChannelLayout::Rgb => [px[0], px[1], px[2], 255],
        ChannelLayout::Rgba => [px[0], px[1], px[2], px[3]],
    }
}

#[inline]
fn lerp(base: u8, over: u8, alpha: f32) -> u8 {
    (base as f32 + (over as f32 - base as f32) * alpha).round() as u8
}

#[inline]
fn blend_pixel(dst: &mut [u8], layout: ChannelLayout, over: [u8; 4], alpha: f32) {
    match layout {
        ChannelLayout::Gray => {
            let luma =
                ((over[0] as u32 + over[1] as u32 + over[2] as u32) / 3) as u8;
            dst[0] = lerp(dst[0], luma, alpha);
        }
        ChannelLayout::Rgb => {
            for c in 0..3 {
                dst[c] = lerp(dst[c], over[c], alpha);
            }
        }
        ChannelLayout::Rgba => {
            for c in 0..3 {
                dst[c] = lerp(dst[c], over[c], alpha);
            }
            dst[3] = (alpha * 255.0 + dst[3] as f32 * (1.0 - alpha)).round() as u8;
        }
    }
}
