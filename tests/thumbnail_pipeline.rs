//! End-to-end pipeline scenarios.
//!
//! Unit tests cover each stage in isolation; these run whole requests
//! through the public surface, including one pass through a real encoded
//! file via the `image`-crate bridge.

use thumbpipe::{
    batch::{self, Job},
    interop, pipeline, Anchor, ChannelLayout, Coordinate, KernelChoice, Orientation, PixelBuffer,
    Region, Size, ThumbError, ThumbnailRequest,
};

fn size(w: u32, h: u32) -> Size {
    Size::new(w, h).unwrap()
}

fn gradient(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from_fn(size(w, h), ChannelLayout::Rgb, |x, y| {
        [(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8, 0]
    })
}

/// Deterministic per-pixel noise, dense in high frequencies.
fn noise(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from_fn(size(w, h), ChannelLayout::Gray, |x, y| {
        let v = x
            .wrapping_mul(2654435761)
            .wrapping_add(y.wrapping_mul(40503))
            .wrapping_mul(2246822519);
        [(v >> 24) as u8, 0, 0, 0]
    })
}

// =============================================================================
// Sizing scenarios
// =============================================================================

#[test]
fn square_source_into_square_box() {
    let out = pipeline::produce(
        &gradient(100, 100),
        &ThumbnailRequest::builder().size(20, 20).build().unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (20, 20));
}

#[test]
fn wide_source_is_width_constrained() {
    let out = pipeline::produce(
        &gradient(100, 50),
        &ThumbnailRequest::builder().size(20, 20).build().unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (20, 10));
}

#[test]
fn aspect_ratio_holds_across_sources() {
    let request = ThumbnailRequest::builder().size(48, 48).build().unwrap();
    for (w, h) in [(100, 100), (320, 240), (1000, 300), (75, 300)] {
        let src = gradient(w, h);
        let out = pipeline::produce(&src, &request).unwrap();
        assert!(out.width() <= 48 && out.height() <= 48, "{w}x{h}");
        let expected_h =
            (out.width() as f64 * h as f64 / w as f64).round() as u32;
        assert!(
            out.height().abs_diff(expected_h) <= 1,
            "{w}x{h} -> {}x{}",
            out.width(),
            out.height()
        );
    }
}

#[test]
fn scale_factors_round_per_dimension() {
    let out = pipeline::produce(
        &gradient(100, 100),
        &ThumbnailRequest::builder()
            .scale_xy(0.335, 0.5)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (34, 50));
}

// =============================================================================
// Region scenarios
// =============================================================================

#[test]
fn region_then_resize_equals_direct_resize_of_subimage() {
    let src = gradient(100, 100);
    let with_region = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .size(20, 20)
            .region(Region::new(Coordinate::new(0, 0), size(40, 40)))
            .build()
            .unwrap(),
    )
    .unwrap();

    let sub = src.crop(0, 0, size(40, 40)).unwrap();
    let direct = pipeline::produce(
        &sub,
        &ThumbnailRequest::builder().size(20, 20).build().unwrap(),
    )
    .unwrap();
    assert_eq!(with_region, direct);
}

#[test]
fn region_overhanging_right_bottom_is_truncated_in_place() {
    let src = gradient(100, 100);
    let out = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .scale(1.0)
            .region(Region::new(Coordinate::new(20, 20), size(100, 100)))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (80, 80));
    assert_eq!(out.pixel(0, 0), src.pixel(20, 20));
    assert_eq!(out.pixel(79, 79), src.pixel(99, 99));
}

#[test]
fn region_overhanging_top_left_is_translated() {
    let src = gradient(100, 100);
    let out = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .scale(1.0)
            .region(Region::new(Coordinate::new(-20, -20), size(100, 100)))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (80, 80));
    assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
}

#[test]
fn region_fully_outside_fails_with_empty_region() {
    let result = pipeline::produce(
        &gradient(100, 100),
        &ThumbnailRequest::builder()
            .size(10, 10)
            .region(Region::new(Coordinate::new(-300, 0), size(100, 100)))
            .build()
            .unwrap(),
    );
    assert!(matches!(result, Err(ThumbError::EmptyRegion { .. })));
}

// =============================================================================
// Orientation scenarios
// =============================================================================

#[test]
fn orientation_case_2_flips_a_3x3_pattern() {
    let src = PixelBuffer::from_raw(
        size(3, 3),
        ChannelLayout::Gray,
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
    )
    .unwrap();
    let out = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .scale(1.0)
            .orientation(Orientation::FlipHorizontal)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(out.data(), &[3, 2, 1, 6, 5, 4, 9, 8, 7]);
}

#[test]
fn every_orientation_roundtrips_to_the_original() {
    let src = gradient(7, 5);
    for exif in 1..=8u16 {
        let orientation = Orientation::from_exif(exif);
        let corrected = pipeline::produce(
            &src,
            &ThumbnailRequest::builder()
                .scale(1.0)
                .orientation(orientation)
                .build()
                .unwrap(),
        )
        .unwrap();
        let back = match orientation.correction() {
            Some(transform) => transform.inverse().apply(&corrected),
            None => corrected,
        };
        assert_eq!(back, src, "orientation {exif}");
    }
}

#[test]
fn quarter_turned_source_fits_by_its_upright_aspect() {
    // 200x100 tagged Rotate90 is upright at 100x200; a 50x50 box is
    // height-constrained.
    let out = pipeline::produce(
        &gradient(200, 100),
        &ThumbnailRequest::builder()
            .size(50, 50)
            .orientation(Orientation::Rotate90)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (25, 50));
}

// =============================================================================
// Progressive-bilinear convergence
// =============================================================================

/// Mean of the source block feeding each target pixel; the exact
/// box-filtered reference for integer-ratio downscales.
fn box_reference(src: &PixelBuffer, tw: u32, th: u32) -> Vec<f64> {
    let bx = src.width() / tw;
    let by = src.height() / th;
    let mut means = Vec::with_capacity((tw * th) as usize);
    for ty in 0..th {
        for tx in 0..tw {
            let mut sum = 0u64;
            for y in ty * by..(ty + 1) * by {
                for x in tx * bx..(tx + 1) * bx {
                    sum += src.pixel(x, y)[0] as u64;
                }
            }
            means.push(sum as f64 / (bx as u64 * by as u64) as f64);
        }
    }
    means
}

fn mean_squared_error(buf: &PixelBuffer, reference: &[f64]) -> f64 {
    buf.data()
        .iter()
        .zip(reference)
        .map(|(&v, &r)| (v as f64 - r) * (v as f64 - r))
        .sum::<f64>()
        / reference.len() as f64
}

#[test]
fn progressive_downscale_aliases_less_than_single_pass() {
    let src = noise(2048, 2048);
    let reference = box_reference(&src, 32, 32);

    let progressive = KernelChoice::ProgressiveBilinear
        .resample(&src, 32, 32)
        .unwrap();
    let single_pass = KernelChoice::Bilinear.resample(&src, 32, 32).unwrap();

    let mse_progressive = mean_squared_error(&progressive, &reference);
    let mse_single = mean_squared_error(&single_pass, &reference);
    assert!(
        mse_progressive * 4.0 < mse_single,
        "progressive mse {mse_progressive} should be well under single-pass {mse_single}"
    );
}

#[test]
fn auto_selection_is_part_of_the_contract() {
    // At exactly 2x the pipeline stays single-pass: identical output to a
    // pinned bilinear kernel. Past 2x it must match pinned progressive.
    let src = noise(256, 256);

    let auto_at_boundary = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .forced_size(128, 128)
            .build()
            .unwrap(),
    )
    .unwrap();
    let pinned_bilinear = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .forced_size(128, 128)
            .kernel(KernelChoice::Bilinear)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(auto_at_boundary, pinned_bilinear);

    let auto_past_boundary = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .forced_size(127, 127)
            .build()
            .unwrap(),
    )
    .unwrap();
    let pinned_progressive = pipeline::produce(
        &src,
        &ThumbnailRequest::builder()
            .forced_size(127, 127)
            .kernel(KernelChoice::ProgressiveBilinear)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(auto_past_boundary, pinned_progressive);
}

#[test]
fn identical_requests_produce_identical_bytes() {
    let src = gradient(313, 217);
    let request = ThumbnailRequest::builder()
        .crop_to_fill(64, 48)
        .orientation(Orientation::Rotate180)
        .build()
        .unwrap();
    let a = pipeline::produce(&src, &request).unwrap();
    let b = pipeline::produce(&src, &request).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Crop-to-fill
// =============================================================================

#[test]
fn crop_to_fill_reaches_exact_size_from_any_aspect() {
    let request = ThumbnailRequest::builder()
        .crop_to_fill(40, 50)
        .build()
        .unwrap();
    for (w, h) in [(800, 600), (600, 800), (111, 444), (500, 500)] {
        let out = pipeline::produce(&gradient(w, h), &request).unwrap();
        assert_eq!((out.width(), out.height()), (40, 50), "{w}x{h}");
    }
}

#[test]
fn crop_anchor_defaults_to_center() {
    let request = ThumbnailRequest::builder()
        .crop_to_fill(10, 10)
        .build()
        .unwrap();
    assert_eq!(request.crop_anchor(), Anchor::Center);
}

// =============================================================================
// Batch
// =============================================================================

#[test]
fn batch_results_line_up_with_jobs() {
    let request = ThumbnailRequest::builder().size(16, 16).build().unwrap();
    let jobs: Vec<Job> = [(64, 32), (32, 64), (16, 16)]
        .into_iter()
        .map(|(w, h)| Job::new(gradient(w, h), request.clone()))
        .collect();
    let results = batch::produce_all(&jobs);
    let dims: Vec<(u32, u32)> = results
        .iter()
        .map(|r| {
            let b = r.as_ref().unwrap();
            (b.width(), b.height())
        })
        .collect();
    assert_eq!(dims, vec![(16, 8), (8, 16), (16, 16)]);
}

// =============================================================================
// Persisted request specs
// =============================================================================

#[test]
fn planned_specs_survive_json() {
    let spec = thumbpipe::ResizeSpec::crop_to_fill(400, 500).unwrap();
    let region = Region::new(Anchor::Center, size(1200, 1500));
    let json = serde_json::to_string(&(spec, region, Orientation::Rotate270)).unwrap();
    let (spec_back, region_back, orientation_back): (
        thumbpipe::ResizeSpec,
        Region,
        Orientation,
    ) = serde_json::from_str(&json).unwrap();
    assert_eq!(spec_back, spec);
    assert_eq!(region_back, region);
    assert_eq!(orientation_back, Orientation::Rotate270);
}

// =============================================================================
// Through a real encoded file
// =============================================================================

#[test]
fn png_decode_pipeline_encode_roundtrip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source_path = tmp.path().join("source.png");
    let thumb_path = tmp.path().join("thumb.png");

    let img = image::RgbImage::from_fn(320, 200, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(&source_path).unwrap();

    let decoded = image::open(&source_path).unwrap();
    let source = interop::from_dynamic(&decoded).unwrap();
    let request = ThumbnailRequest::builder()
        .crop_to_fill(64, 64)
        .build()
        .unwrap();
    let thumb = pipeline::produce(&source, &request).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (64, 64));

    interop::to_dynamic(&thumb).unwrap().save(&thumb_path).unwrap();
    let reopened = image::open(&thumb_path).unwrap();
    assert_eq!((reopened.width(), reopened.height()), (64, 64));
}
