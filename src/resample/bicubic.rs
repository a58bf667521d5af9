//! Single-pass bicubic interpolation (Catmull-Rom).
//!
//! Each output pixel blends a 4x4 source neighborhood with separable
//! cubic weights. Sharper than bilinear on a single pass; like bilinear
//! it still aliases on large downscales, where the progressive variant
//! applies.

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::geometry::Size;

/// Catmull-Rom cubic weight (a = -0.5). Support is |t| < 2.
#[inline]
fn cubic_weight(t: f32) -> f32 {
    let t = t.abs();
    if t < 1.0 {
        1.5 * t * t * t - 2.5 * t * t + 1.0
    } else if t < 2.0 {
        -0.5 * t * t * t + 2.5 * t * t - 4.0 * t + 2.0
    } else {
        0.0
    }
}

pub(crate) fn resample(
    source: &PixelBuffer,
    target_width: u32,
    target_height: u32,
) -> Result<PixelBuffer> {
    let target = Size::new(target_width, target_height)?;
    let src_w = source.width() as i64;
    let src_h = source.height() as i64;
    let channels = source.layout().channels();
    let data = source.data();

    let x_ratio = src_w as f32 / target_width as f32;
    let y_ratio = src_h as f32 / target_height as f32;

    let mut out = Vec::with_capacity(target.area() as usize * channels);
    for dst_y in 0..target_height {
        let src_y = (dst_y as f32 + 0.5) * y_ratio - 0.5;
        let y_base = src_y.floor() as i64;
        let fy = src_y - y_base as f32;
        let wy = [
            cubic_weight(-1.0 - fy),
            cubic_weight(-fy),
            cubic_weight(1.0 - fy),
            cubic_weight(2.0 - fy),
        ];

        for dst_x in 0..target_width {
            let src_x = (dst_x as f32 + 0.5) * x_ratio - 0.5;
            let x_base = src_x.floor() as i64;
            let fx = src_x - x_base as f32;
            let wx = [
                cubic_weight(-1.0 - fx),
                cubic_weight(-fx),
                cubic_weight(1.0 - fx),
                cubic_weight(2.0 - fx),
            ];

            let mut sums = [0.0f32; 4];
            let mut weight_sum = 0.0f32;
            for (j, &wyj) in wy.iter().enumerate() {
                let sy = (y_base + j as i64 - 1).clamp(0, src_h - 1) as usize;
                for (i, &wxi) in wx.iter().enumerate() {
                    let sx = (x_base + i as i64 - 1).clamp(0, src_w - 1) as usize;
                    let weight = wxi * wyj;
                    weight_sum += weight;
                    let idx = (sy * src_w as usize + sx) * channels;
                    for c in 0..channels {
                        sums[c] += data[idx + c] as f32 * weight;
                    }
                }
            }

            // Catmull-Rom weights sum to 1, but guard the division anyway;
            // overshoot past [0,255] is expected and clamped.
            for sum in sums.iter().take(channels) {
                let value = if weight_sum.abs() > f32::EPSILON {
                    sum / weight_sum
                } else {
                    *sum
                };
                out.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    PixelBuffer::from_raw(target, source.layout(), out)
}
