//! Geometry value types shared by every pipeline stage.
//!
//! All types here are immutable plain values. [`Size`] enforces strictly
//! positive dimensions at construction; [`Coordinate`] is signed because a
//! region offset may lie outside the source before clamping. These types
//! serialize with serde so callers can persist planned jobs the same way
//! the rest of a batch pipeline persists its manifests.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThumbError};

/// Strictly positive pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize", into = "RawSize")]
pub struct Size {
    width: u32,
    height: u32,
}

/// Serde shape for [`Size`]; funnels deserialization through the
/// positive-dimension check.
#[derive(Serialize, Deserialize, Clone, Copy)]
struct RawSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawSize> for Size {
    type Error = ThumbError;

    fn try_from(raw: RawSize) -> Result<Self> {
        Size::new(raw.width, raw.height)
    }
}

impl From<Size> for RawSize {
    fn from(size: Size) -> Self {
        RawSize {
            width: size.width,
            height: size.height,
        }
    }
}

impl Size {
    /// Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ThumbError::invalid_spec(format!(
                "size dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Total pixel count.
    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pixel offset. May be negative: a region can start above/left of the
/// source before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Nine named placements of an inner rectangle within an outer one.
///
/// Used for region positions, the crop-to-exact stage, and watermark
/// placement. Resolution happens against concrete sizes at use time, so
/// the same anchored value works for any source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    /// Top-left coordinate of an `inner`-sized rectangle placed within
    /// `outer`. If `inner` exceeds `outer`, coordinates go negative and
    /// the placement stays centered/edge-aligned as named.
    pub fn place(self, outer: Size, inner: Size) -> Coordinate {
        let span_x = outer.width() as i64 - inner.width() as i64;
        let span_y = outer.height() as i64 - inner.height() as i64;
        let (fx, fy) = match self {
            Anchor::TopLeft => (0, 0),
            Anchor::Top => (1, 0),
            Anchor::TopRight => (2, 0),
            Anchor::Left => (0, 1),
            Anchor::Center => (1, 1),
            Anchor::Right => (2, 1),
            Anchor::BottomLeft => (0, 2),
            Anchor::Bottom => (1, 2),
            Anchor::BottomRight => (2, 2),
        };
        Coordinate::new(span_x * fx / 2, span_y * fy / 2)
    }
}

/// Where a rectangle sits: an absolute top-left corner or a named anchor
/// resolved at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Absolute(Coordinate),
    Anchored(Anchor),
}

impl Position {
    /// Resolve to an absolute top-left coordinate for an `inner`-sized
    /// rectangle within `outer`.
    pub fn resolve(self, outer: Size, inner: Size) -> Coordinate {
        match self {
            Position::Absolute(c) => c,
            Position::Anchored(a) => a.place(outer, inner),
        }
    }
}

impl From<Coordinate> for Position {
    fn from(c: Coordinate) -> Self {
        Position::Absolute(c)
    }
}

impl From<Anchor> for Position {
    fn from(a: Anchor) -> Self {
        Position::Anchored(a)
    }
}

/// A caller-requested sub-rectangle of a source image. Not guaranteed to
/// lie within the source until clamped by region extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub position: Position,
    pub size: Size,
}

impl Region {
    pub fn new(position: impl Into<Position>, size: Size) -> Self {
        Self {
            position: position.into(),
            size,
        }
    }
}
