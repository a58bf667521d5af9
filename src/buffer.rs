//! Decoded pixel buffers.
//!
//! [`PixelBuffer`] is the only pixel representation the pipeline knows: a
//! row-major grid of 8-bit channels with one of three layouts. The
//! pipeline never interprets encoded bytes; decoding is the caller's
//! responsibility (see [`crate::interop`] for the `image`-crate bridge).
//! Stages consume buffers by reference and return new ones, so two stages
//! never alias the same storage.

use crate::error::{Result, ThumbError};
use crate::geometry::Size;

/// Per-pixel channel layout. 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    Gray,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, ChannelLayout::Rgba)
    }
}

/// A decoded raster: width, height, layout, and row-major channel data.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// A zero-filled buffer.
    pub fn new(size: Size, layout: ChannelLayout) -> Self {
        let len = size.area() as usize * layout.channels();
        Self {
            size,
            layout,
            data: vec![0; len],
        }
    }

    /// Wrap raw channel data. The length must be exactly
    /// `width * height * channels`.
    pub fn from_raw(size: Size, layout: ChannelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = size.area() as usize * layout.channels();
        if data.len() != expected {
            return Err(ThumbError::kernel_failure(format!(
                "buffer length {} does not match {size} {layout:?} (expected {expected})",
                data.len()
            )));
        }
        Ok(Self { size, layout, data })
    }

    /// Build a buffer from a per-pixel function. The closure returns up to
    /// four channel values; the first `layout.channels()` are used.
    pub fn from_fn(
        size: Size,
        layout: ChannelLayout,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Self {
        let channels = layout.channels();
        let mut data = Vec::with_capacity(size.area() as usize * channels);
        for y in 0..size.height() {
            for x in 0..size.width() {
                data.extend_from_slice(&f(x, y)[..channels]);
            }
        }
        Self { size, layout, data }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.size.width() as usize + x as usize) * self.layout.channels()
    }

    /// Channel slice of one pixel. Panics if `(x, y)` is out of bounds,
    /// like slice indexing.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = self.offset(x, y);
        &self.data[i..i + self.layout.channels()]
    }

    /// Mutable channel slice of one pixel. Panics if out of bounds.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let i = self.offset(x, y);
        let channels = self.layout.channels();
        &mut self.data[i..i + channels]
    }

    /// Copy out the rectangle `size` at `(left, top)`. The rectangle must
    /// lie within the buffer; callers (region extraction, crop-to-exact)
    /// establish that via clamping first.
    pub fn crop(&self, left: u32, top: u32, size: Size) -> Result<PixelBuffer> {
        let right = left as u64 + size.width() as u64;
        let bottom = top as u64 + size.height() as u64;
        if right > self.width() as u64 || bottom > self.height() as u64 {
            return Err(ThumbError::kernel_failure(format!(
                "crop rectangle {size} at ({left},{top}) escapes the {} buffer",
                self.size
            )));
        }
        let channels = self.layout.channels();
        let row_len = size.width() as usize * channels;
        let mut data = Vec::with_capacity(size.area() as usize * channels);
        for y in 0..size.height() {
            let start = self.offset(left, top + y);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(PixelBuffer {
            size,
            layout: self.layout,
            data,
        })
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("size", &self.size)
            .field("layout", &self.layout)
            .field("bytes", &self.data.len())
            .finish()
    }
}
