//! Single-pass bilinear interpolation.
//!
//! Pixel-center mapping: output pixel `d` samples the source at
//! `(d + 0.5) * ratio - 0.5` and blends the 2x2 neighborhood around that
//! point. Appropriate for modest scale changes and all upscales; for
//! large downscales see the progressive variant.

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::geometry::Size;

pub(crate) fn resample(
    source: &PixelBuffer,
    target_width: u32,
    target_height: u32,
) -> Result<PixelBuffer> {
    let target = Size::new(target_width, target_height)?;
    let src_w = source.width() as usize;
    let src_h = source.height() as usize;
    let channels = source.layout().channels();
    let data = source.data();

    let x_ratio = src_w as f32 / target_width as f32;
    let y_ratio = src_h as f32 / target_height as f32;

    let mut out = Vec::with_capacity(target.area() as usize * channels);
    for dst_y in 0..target_height {
        let src_y = ((dst_y as f32 + 0.5) * y_ratio - 0.5).max(0.0);
        let y0 = (src_y.floor() as usize).min(src_h - 1);
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = src_y - y0 as f32;

        for dst_x in 0..target_width {
            let src_x = ((dst_x as f32 + 0.5) * x_ratio - 0.5).max(0.0);
            let x0 = (src_x.floor() as usize).min(src_w - 1);
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = src_x - x0 as f32;

            let idx00 = (y0 * src_w + x0) * channels;
            let idx01 = (y0 * src_w + x1) * channels;
            let idx10 = (y1 * src_w + x0) * channels;
            let idx11 = (y1 * src_w + x1) * channels;

            for c in 0..channels {
                let top =
                    data[idx00 + c] as f32 * (1.0 - fx) + data[idx01 + c] as f32 * fx;
                let bottom =
                    data[idx10 + c] as f32 * (1.0 - fx) + data[idx11 + c] as f32 * fx;
                let value = top * (1.0 - fy) + bottom * fy;
                out.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    PixelBuffer::from_raw(target, source.layout(), out)
}
