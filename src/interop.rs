//! Conversions between [`PixelBuffer`] and the `image` crate's types.
//!
//! The pipeline only sees decoded buffers; this bridge lets callers who
//! decode with the `image` crate hand those buffers over without copying
//! code. Luma8, Rgb8, and Rgba8 map directly; every other decoded variant
//! is normalized through Rgba8 first, the same normalization a decoder is
//! expected to perform for palette formats.

use image::DynamicImage;

use crate::buffer::{ChannelLayout, PixelBuffer};
use crate::error::{Result, ThumbError};
use crate::geometry::Size;

/// Convert a decoded `image` buffer into a [`PixelBuffer`].
pub fn from_dynamic(img: &DynamicImage) -> Result<PixelBuffer> {
    let size = Size::new(img.width(), img.height())?;
    match img {
        DynamicImage::ImageLuma8(gray) => {
            PixelBuffer::from_raw(size, ChannelLayout::Gray, gray.as_raw().clone())
        }
        DynamicImage::ImageRgb8(rgb) => {
            PixelBuffer::from_raw(size, ChannelLayout::Rgb, rgb.as_raw().clone())
        }
        DynamicImage::ImageRgba8(rgba) => {
            PixelBuffer::from_raw(size, ChannelLayout::Rgba, rgba.as_raw().clone())
        }
        other => PixelBuffer::from_raw(size, ChannelLayout::Rgba, other.to_rgba8().into_raw()),
    }
}

/// Convert a [`PixelBuffer`] back into a `DynamicImage` for encoding.
pub fn to_dynamic(buffer: &PixelBuffer) -> Result<DynamicImage> {
    let (w, h) = (buffer.width(), buffer.height());
    let data = buffer.data().to_vec();
    match buffer.layout() {
        ChannelLayout::Gray => image::GrayImage::from_raw(w, h, data)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(|| ThumbError::kernel_failure("gray buffer length mismatch")),
        ChannelLayout::Rgb => image::RgbImage::from_raw(w, h, data)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| ThumbError::kernel_failure("rgb buffer length mismatch")),
        ChannelLayout::Rgba => image::RgbaImage::from_raw(w, h, data)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| ThumbError::kernel_failure("rgba buffer length mismatch")),
    }
}
