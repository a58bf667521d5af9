//! Parameter types for thumbnail requests.
//!
//! These describe *what* to produce, not *how*. [`ResizeSpec`] is the
//! validated sizing instruction; [`ThumbnailRequest`] bundles it with the
//! optional region, orientation, kernel choice, and post-filters. The
//! builder does all option-state checking up front and yields an
//! immutable value, so the pipeline never re-validates which options were
//! set. A request is cheap to clone but is not meant to be shared mutably
//! across concurrent calls; give each request its own value.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThumbError};
use crate::filters::Filter;
use crate::geometry::{Anchor, Region};
use crate::orientation::Orientation;
use crate::resample::KernelChoice;

/// How target dimensions are derived from the source.
///
/// Exactly one variant is active. `Explicit` bounds may be open on one
/// side (`None` = unbounded); `keep_aspect_ratio` chooses between
/// fit/fill and forced sizing, and `fit_within` distinguishes
/// letterbox-fit from crop-to-fill when the aspect ratio is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResizeSpec {
    Explicit {
        width: Option<u32>,
        height: Option<u32>,
        keep_aspect_ratio: bool,
        fit_within: bool,
    },
    Scale {
        width_factor: f64,
        height_factor: f64,
    },
}

impl ResizeSpec {
    /// Force the result to exactly `width` x `height`, possibly
    /// distorting the aspect ratio.
    pub fn exact(width: u32, height: u32) -> Result<Self> {
        Self::explicit(Some(width), Some(height), false, true)
    }

    /// Shrink to fit inside `width` x `height`, preserving the aspect
    /// ratio; neither result dimension exceeds its bound.
    pub fn fit_within(width: u32, height: u32) -> Result<Self> {
        Self::explicit(Some(width), Some(height), true, true)
    }

    /// Fill `width` x `height` exactly, preserving the aspect ratio by
    /// cropping the overhanging dimension.
    pub fn crop_to_fill(width: u32, height: u32) -> Result<Self> {
        Self::explicit(Some(width), Some(height), true, false)
    }

    /// Bound only the width; height follows the aspect ratio.
    pub fn bounded_width(width: u32) -> Result<Self> {
        Self::explicit(Some(width), None, true, true)
    }

    /// Bound only the height; width follows the aspect ratio.
    pub fn bounded_height(height: u32) -> Result<Self> {
        Self::explicit(None, Some(height), true, true)
    }

    /// Scale both dimensions by the same factor.
    pub fn scale(factor: f64) -> Result<Self> {
        Self::scale_xy(factor, factor)
    }

    /// Scale width and height independently.
    pub fn scale_xy(width_factor: f64, height_factor: f64) -> Result<Self> {
        for (name, factor) in [("width", width_factor), ("height", height_factor)] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ThumbError::invalid_spec(format!(
                    "{name} scale factor must be finite and positive, got {factor}"
                )));
            }
        }
        Ok(Self::Scale {
            width_factor,
            height_factor,
        })
    }

    fn explicit(
        width: Option<u32>,
        height: Option<u32>,
        keep_aspect_ratio: bool,
        fit_within: bool,
    ) -> Result<Self> {
        if width.is_none() && height.is_none() {
            return Err(ThumbError::invalid_spec(
                "explicit size needs at least one bound",
            ));
        }
        for (name, bound) in [("width", width), ("height", height)] {
            if bound == Some(0) {
                return Err(ThumbError::invalid_spec(format!(
                    "explicit {name} must be positive"
                )));
            }
        }
        Ok(Self::Explicit {
            width,
            height,
            keep_aspect_ratio,
            fit_within,
        })
    }
}

/// An immutable, fully-validated thumbnail request.
///
/// Build one with [`ThumbnailRequest::builder`]; the pipeline consumes it
/// read-only and an instance can be reused across sequential calls.
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    spec: ResizeSpec,
    region: Option<Region>,
    orientation: Orientation,
    kernel: KernelChoice,
    crop_anchor: Anchor,
    filters: Vec<Filter>,
}

impl ThumbnailRequest {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    pub fn spec(&self) -> &ResizeSpec {
        &self.spec
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn kernel(&self) -> &KernelChoice {
        &self.kernel
    }

    pub fn crop_anchor(&self) -> Anchor {
        self.crop_anchor
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}

/// Accumulates request options and validates them once at
/// [`build`](RequestBuilder::build).
///
/// Sizing is set through exactly one family: the explicit-size setters
/// ([`size`](Self::size), [`forced_size`](Self::forced_size),
/// [`crop_to_fill`](Self::crop_to_fill), [`width`](Self::width),
/// [`height`](Self::height)) or the scale setters. Mixing families, or
/// setting neither, is reported at build time.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    width: Option<u32>,
    height: Option<u32>,
    keep_aspect_ratio: bool,
    fit_within: bool,
    explicit_set: bool,
    scale: Option<(f64, f64)>,
    region: Option<Region>,
    orientation: Orientation,
    kernel: KernelChoice,
    crop_anchor: Anchor,
    filters: Vec<Filter>,
}

impl RequestBuilder {
    /// Fit inside `width` x `height`, preserving aspect ratio.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.keep_aspect_ratio = true;
        self.fit_within = true;
        self.explicit_set = true;
        self
    }

    /// Exactly `width` x `height`, aspect ratio not preserved.
    pub fn forced_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.keep_aspect_ratio = false;
        self.fit_within = true;
        self.explicit_set = true;
        self
    }

    /// Exactly `width` x `height`, aspect ratio preserved by cropping
    /// the overhang at the [`crop_anchor`](Self::crop_anchor).
    pub fn crop_to_fill(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.keep_aspect_ratio = true;
        self.fit_within = false;
        self.explicit_set = true;
        self
    }

    /// Bound only the width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self.keep_aspect_ratio = true;
        self.fit_within = true;
        self.explicit_set = true;
        self
    }

    /// Bound only the height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self.keep_aspect_ratio = true;
        self.fit_within = true;
        self.explicit_set = true;
        self
    }

    /// Scale both dimensions by `factor`.
    pub fn scale(mut self, factor: f64) -> Self {
        self.scale = Some((factor, factor));
        self
    }

    /// Scale width and height independently.
    pub fn scale_xy(mut self, width_factor: f64, height_factor: f64) -> Self {
        self.scale = Some((width_factor, height_factor));
        self
    }

    /// Extract this sub-region before sizing.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Correct this orientation before any geometry is computed.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Pin a resampling kernel instead of the automatic selector.
    pub fn kernel(mut self, kernel: KernelChoice) -> Self {
        self.kernel = kernel;
        self
    }

    /// Where crop-to-fill trims the overhang. Defaults to center.
    pub fn crop_anchor(mut self, anchor: Anchor) -> Self {
        self.crop_anchor = anchor;
        self
    }

    /// Append a post-filter; filters run in registration order.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn build(self) -> Result<ThumbnailRequest> {
        let spec = match (self.explicit_set, self.scale) {
            (true, Some(_)) => {
                return Err(ThumbError::invalid_spec(
                    "both an explicit size and a scale factor were set; pick one",
                ));
            }
            (false, None) => {
                return Err(ThumbError::invalid_spec(
                    "no target was set; use a size or scale setter",
                ));
            }
            (true, None) => ResizeSpec::explicit(
                self.width,
                self.height,
                self.keep_aspect_ratio,
                self.fit_within,
            )?,
            (false, Some((wf, hf))) => ResizeSpec::scale_xy(wf, hf)?,
        };

        Ok(ThumbnailRequest {
            spec,
            region: self.region,
            orientation: self.orientation,
            kernel: self.kernel,
            crop_anchor: self.crop_anchor,
            filters: self.filters,
        })
    }
}
