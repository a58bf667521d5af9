//! Orthogonal pixel transforms: flips, 90-degree rotations, transposes.
//!
//! These are exact coordinate remappings with no interpolation, which
//! keeps them fast and makes every one of them losslessly invertible.
//! The orientation corrector and the right-angle fast path of the
//! rotation filter are built on this set.

use crate::buffer::PixelBuffer;
use crate::geometry::Size;

/// The seven non-identity orthogonal transforms.
///
/// `Transpose` flips across the main diagonal (top-left to bottom-right);
/// `AntiTranspose` flips across the anti-diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    FlipHorizontal,
    FlipVertical,
    Rotate180,
    Rotate90Cw,
    Rotate90Ccw,
    Transpose,
    AntiTranspose,
}

impl Transform {
    /// True for the four transforms that exchange width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Transform::Rotate90Cw
                | Transform::Rotate90Ccw
                | Transform::Transpose
                | Transform::AntiTranspose
        )
    }

    /// Output dimensions for a given input size.
    pub fn output_size(self, input: Size) -> Size {
        if self.swaps_dimensions() {
            // width/height swap of a valid Size is always a valid Size
            Size::new(input.height(), input.width()).unwrap_or(input)
        } else {
            input
        }
    }

    /// The transform that undoes this one. Flips, 180-degree rotation,
    /// and both transposes are self-inverse; the quarter rotations swap.
    pub fn inverse(self) -> Transform {
        match self {
            Transform::Rotate90Cw => Transform::Rotate90Ccw,
            Transform::Rotate90Ccw => Transform::Rotate90Cw,
            other => other,
        }
    }

    /// Source coordinates feeding destination pixel `(x, y)`.
    ///
    /// `max_x`/`max_y` are the source's last column/row indices.
    #[inline]
    fn source_coordinates(self, x: u32, y: u32, max_x: u32, max_y: u32) -> (u32, u32) {
        match self {
            Transform::FlipHorizontal => (max_x - x, y),
            Transform::FlipVertical => (x, max_y - y),
            Transform::Rotate180 => (max_x - x, max_y - y),
            Transform::Rotate90Cw => (y, max_y - x),
            Transform::Rotate90Ccw => (max_x - y, x),
            Transform::Transpose => (y, x),
            Transform::AntiTranspose => (max_x - y, max_y - x),
        }
    }

    /// Apply to a buffer, producing a fresh buffer.
    pub fn apply(self, source: &PixelBuffer) -> PixelBuffer {
        let out_size = self.output_size(source.size());
        let mut out = PixelBuffer::new(out_size, source.layout());
        let max_x = source.width() - 1;
        let max_y = source.height() - 1;
        for y in 0..out_size.height() {
            for x in 0..out_size.width() {
                let (sx, sy) = self.source_coordinates(x, y, max_x, max_y);
                out.pixel_mut(x, y).copy_from_slice(source.pixel(sx, sy));
            }
        }
        out
    }
}
