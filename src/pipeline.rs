//! The pipeline orchestrator.
//!
//! Stages run in strict order with no branching back:
//!
//! ```text
//! acquire -> [orient] -> [region extract] -> dimension compute
//!         -> resample -> [crop-to-exact] -> [post-filters] -> emit
//! ```
//!
//! Orientation correction runs first, before any geometry is computed,
//! so region coordinates and aspect ratios always refer to the upright
//! image. (All eight corrections are flips or quarter turns, which
//! commute with isotropic resampling, so running them on the full-size
//! source is a scheduling choice, not a semantic one.)
//!
//! The crop-to-exact stage exists only for crop-to-fill requests: the
//! resample targets an oversized intermediate that matches the requested
//! box in one dimension and overhangs the other; the overhang is then
//! trimmed at the request's anchor. Any stage failure aborts the whole
//! run; a caller never sees a partial result.

use std::borrow::Cow;

use crate::buffer::PixelBuffer;
use crate::dimensions;
use crate::error::Result;
use crate::geometry::Size;
use crate::params::{ResizeSpec, ThumbnailRequest};
use crate::region;

/// How the resample and crop stages will run for one request.
enum Plan {
    /// Resample straight to the final dimensions.
    Direct(u32, u32),
    /// Resample to an oversized intermediate, then crop to `target`.
    FillThenCrop { fill: (u32, u32), target: Size },
}

fn plan(source: Size, spec: &ResizeSpec) -> Result<Plan> {
    if let ResizeSpec::Explicit {
        width: Some(w),
        height: Some(h),
        keep_aspect_ratio: true,
        fit_within: false,
    } = *spec
    {
        let target = Size::new(w, h)?;
        return Ok(Plan::FillThenCrop {
            fill: dimensions::fill_dimensions(source, target),
            target,
        });
    }
    let (w, h) = dimensions::compute_target(source, spec);
    Ok(Plan::Direct(w, h))
}

/// Run the full pipeline for one request.
///
/// The result's dimensions exactly match the computed (possibly
/// crop-adjusted) target; sinks may rely on that and skip their own
/// bounds checks.
pub fn produce(source: &PixelBuffer, request: &ThumbnailRequest) -> Result<PixelBuffer> {
    let mut current = Cow::Borrowed(source);

    if let Some(correction) = request.orientation().correction() {
        current = Cow::Owned(correction.apply(&current));
    }

    if let Some(requested) = request.region() {
        current = Cow::Owned(region::extract(&current, requested)?);
    }

    let mut result = match plan(current.size(), request.spec())? {
        Plan::Direct(width, height) => request.kernel().resample(&current, width, height)?,
        Plan::FillThenCrop {
            fill: (fill_w, fill_h),
            target,
        } => {
            let filled = request.kernel().resample(&current, fill_w, fill_h)?;
            let origin = request.crop_anchor().place(filled.size(), target);
            filled.crop(origin.x.max(0) as u32, origin.y.max(0) as u32, target)?
        }
    };

    for filter in request.filters() {
        result = filter.apply(&result)?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ChannelLayout;
    use crate::error::ThumbError;
    use crate::geometry::{Anchor, Coordinate, Region};
    use crate::orientation::Orientation;
    use crate::resample::KernelChoice;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(size(w, h), ChannelLayout::Rgb, |x, y| {
            [(x * 3 % 251) as u8, (y * 5 % 241) as u8, 33, 0]
        })
    }

    #[test]
    fn result_matches_computed_target() {
        let src = gradient(100, 50);
        let request = ThumbnailRequest::builder().size(20, 20).build().unwrap();
        let out = produce(&src, &request).unwrap();
        assert_eq!((out.width(), out.height()), (20, 10));
    }

    #[test]
    fn forced_size_is_exact() {
        let src = gradient(100, 50);
        let request = ThumbnailRequest::builder()
            .forced_size(20, 20)
            .build()
            .unwrap();
        let out = produce(&src, &request).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
    }

    #[test]
    fn crop_to_fill_hits_exact_size() {
        let src = gradient(800, 600);
        let request = ThumbnailRequest::builder()
            .crop_to_fill(400, 500)
            .build()
            .unwrap();
        let out = produce(&src, &request).unwrap();
        assert_eq!((out.width(), out.height()), (400, 500));
    }

    #[test]
    fn crop_to_fill_anchor_selects_the_kept_side() {
        // A horizontal two-tone source: left half dark, right half light.
        // Cropping a square out of the wide fill keeps the anchored side.
        let src = PixelBuffer::from_fn(size(200, 100), ChannelLayout::Gray, |x, _| {
            [if x < 100 { 10 } else { 240 }, 0, 0, 0]
        });

        let left = ThumbnailRequest::builder()
            .crop_to_fill(50, 50)
            .crop_anchor(Anchor::Left)
            .build()
            .unwrap();
        let out = produce(&src, &left).unwrap();
        assert_eq!(out.pixel(0, 25), &[10]);

        let right = ThumbnailRequest::builder()
            .crop_to_fill(50, 50)
            .crop_anchor(Anchor::Right)
            .build()
            .unwrap();
        let out = produce(&src, &right).unwrap();
        assert_eq!(out.pixel(49, 25), &[240]);
    }

    #[test]
    fn region_then_resize_equals_direct_resize_of_crop() {
        let src = gradient(100, 100);
        let request = ThumbnailRequest::builder()
            .size(20, 20)
            .region(Region::new(Coordinate::new(0, 0), size(40, 40)))
            .build()
            .unwrap();
        let with_region = produce(&src, &request).unwrap();

        let cropped = src.crop(0, 0, size(40, 40)).unwrap();
        let direct_request = ThumbnailRequest::builder().size(20, 20).build().unwrap();
        let direct = produce(&cropped, &direct_request).unwrap();

        assert_eq!(with_region, direct);
    }

    #[test]
    fn clamped_region_feeds_the_resize() {
        let src = gradient(100, 100);
        // Overhangs right/bottom by 20: clamps to 80x80 at (20,20).
        let request = ThumbnailRequest::builder()
            .scale(1.0)
            .region(Region::new(Coordinate::new(20, 20), size(100, 100)))
            .build()
            .unwrap();
        let out = produce(&src, &request).unwrap();
        assert_eq!((out.width(), out.height()), (80, 80));
        assert_eq!(out.pixel(0, 0), src.pixel(20, 20));
    }

    #[test]
    fn disjoint_region_aborts_with_empty_region() {
        let src = gradient(100, 100);
        let request = ThumbnailRequest::builder()
            .size(10, 10)
            .region(Region::new(Coordinate::new(500, 500), size(10, 10)))
            .build()
            .unwrap();
        assert!(matches!(
            produce(&src, &request),
            Err(ThumbError::EmptyRegion { .. })
        ));
    }

    #[test]
    fn degenerate_target_aborts() {
        let src = gradient(1, 1);
        let request = ThumbnailRequest::builder().scale(0.001).build().unwrap();
        assert!(matches!(
            produce(&src, &request),
            Err(ThumbError::DegenerateTarget { .. })
        ));
    }

    #[test]
    fn orientation_runs_before_dimension_computation() {
        // A 100x50 source tagged Rotate90 is upright at 50x100; fitting
        // into a 20x20 box must therefore be height-constrained.
        let src = gradient(100, 50);
        let request = ThumbnailRequest::builder()
            .size(20, 20)
            .orientation(Orientation::Rotate90)
            .build()
            .unwrap();
        let out = produce(&src, &request).unwrap();
        assert_eq!((out.width(), out.height()), (10, 20));
    }

    #[test]
    fn identity_orientation_adds_no_stage() {
        let src = gradient(40, 40);
        let tagged = ThumbnailRequest::builder()
            .size(10, 10)
            .orientation(Orientation::Normal)
            .build()
            .unwrap();
        let untagged = ThumbnailRequest::builder().size(10, 10).build().unwrap();
        assert_eq!(
            produce(&src, &tagged).unwrap(),
            produce(&src, &untagged).unwrap()
        );
    }

    #[test]
    fn pinned_kernel_is_used() {
        struct Marker;
        impl crate::resample::ResamplingKernel for Marker {
            fn resample(
                &self,
                _source: &PixelBuffer,
                tw: u32,
                th: u32,
            ) -> Result<PixelBuffer> {
                Ok(PixelBuffer::from_fn(
                    Size::new(tw, th)?,
                    ChannelLayout::Gray,
                    |_, _| [42, 0, 0, 0],
                ))
            }
        }

        let src = gradient(64, 64);
        let request = ThumbnailRequest::builder()
            .size(8, 8)
            .kernel(KernelChoice::Custom(std::sync::Arc::new(Marker)))
            .build()
            .unwrap();
        let out = produce(&src, &request).unwrap();
        assert!(out.data().iter().all(|&v| v == 42));
    }

    #[test]
    fn filters_run_in_registration_order() {
        use crate::filters::{Filter, ImageFilter};
        use std::sync::Arc;

        struct AddOne;
        impl ImageFilter for AddOne {
            fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
                PixelBuffer::from_raw(
                    source.size(),
                    source.layout(),
                    source.data().iter().map(|&v| v.saturating_add(1)).collect(),
                )
            }
        }
        struct Double;
        impl ImageFilter for Double {
            fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer> {
                PixelBuffer::from_raw(
                    source.size(),
                    source.layout(),
                    source.data().iter().map(|&v| v.saturating_mul(2)).collect(),
                )
            }
        }

        let src = PixelBuffer::from_fn(size(4, 4), ChannelLayout::Gray, |_, _| [5, 0, 0, 0]);
        let request = ThumbnailRequest::builder()
            .scale(1.0)
            .filter(Filter::Custom(Arc::new(AddOne)))
            .filter(Filter::Custom(Arc::new(Double)))
            .build()
            .unwrap();
        let out = produce(&src, &request).unwrap();
        // (5 + 1) * 2, not 5 * 2 + 1.
        assert!(out.data().iter().all(|&v| v == 12));
    }
}
