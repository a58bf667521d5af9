//! # thumbpipe
//!
//! A thumbnail resampling and transform pipeline. Callers decode an image
//! however they like, hand the pipeline a decoded [`PixelBuffer`] plus an
//! immutable [`ThumbnailRequest`], and get back a single resampled,
//! filtered buffer sized exactly as computed. Encoding and all I/O stay
//! on the caller's side of the boundary.
//!
//! ```no_run
//! use thumbpipe::{pipeline, ThumbnailRequest};
//! # fn decode() -> thumbpipe::PixelBuffer { unimplemented!() }
//!
//! # fn main() -> thumbpipe::Result<()> {
//! let source = decode();
//! let request = ThumbnailRequest::builder().size(320, 200).build()?;
//! let thumb = pipeline::produce(&source, &request)?;
//! # Ok(()) }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Immutable value types: sizes, coordinates, anchors, regions |
//! | [`buffer`] | The decoded pixel representation every stage consumes |
//! | [`params`] | [`ResizeSpec`], [`ThumbnailRequest`], and the validating builder |
//! | [`dimensions`] | Pure target-dimension math (fit, force, fill) |
//! | [`region`] | Sub-rectangle resolution, clamping, extraction |
//! | [`resample`] | Bilinear / bicubic / progressive-bilinear kernels and the selector |
//! | [`orientation`] | The eight EXIF orientation cases and their corrections |
//! | [`transform`] | Exact orthogonal pixel transforms backing the corrections |
//! | [`filters`] | Post-resample filters: watermark, rotation, custom |
//! | [`pipeline`] | The stage orchestrator |
//! | [`batch`] | Rayon-parallel execution of independent jobs |
//! | [`interop`] | Bridge to and from the `image` crate's buffer types |
//!
//! # Design Decisions
//!
//! ## Progressive downscaling past 2x
//!
//! Single-pass bilinear samples a 2x2 neighborhood per output pixel, so
//! shrinking by a large factor skips most of the input and aliases. Past
//! a 2x downscale ([`resample::PROGRESSIVE_THRESHOLD`]) the default
//! selector switches to progressive bilinear, which halves repeatedly and
//! lets each pass box-average its full neighborhood. Callers can pin any
//! kernel per request; there is no global default to mutate, so tests and
//! concurrent callers never affect each other.
//!
//! ## Orientation first
//!
//! Orientation correction runs before any geometry is computed. Region
//! coordinates and aspect ratios therefore always refer to the upright
//! image, which is what callers mean when they say "the top-left 40x40"
//! of a photo shot on a rotated camera. Identity orientation contributes
//! no stage at all.
//!
//! ## Validate once, then run
//!
//! All option checking happens in [`RequestBuilder::build`]; the pipeline
//! consumes a request that is already coherent. Errors split into four
//! kinds ([`ThumbError`]) so batch callers can skip a bad region but
//! abort on a malformed spec.
//!
//! ## New buffer out of every stage
//!
//! Stages never mutate their input. That costs an allocation per stage
//! and buys aliasing-free testing and fearless parallelism: [`batch`]
//! fans requests out over rayon with no locks because there is nothing
//! shared to lock.

pub mod batch;
pub mod buffer;
pub mod dimensions;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod interop;
pub mod orientation;
pub mod params;
pub mod pipeline;
pub mod region;
pub mod resample;
pub mod transform;

pub use buffer::{ChannelLayout, PixelBuffer};
pub use error::{Result, ThumbError};
pub use filters::{Filter, ImageFilter, RotateFilter, WatermarkFilter};
pub use geometry::{Anchor, Coordinate, Position, Region, Size};
pub use orientation::Orientation;
pub use params::{RequestBuilder, ResizeSpec, ThumbnailRequest};
pub use pipeline::produce;
pub use resample::{select_kernel, KernelChoice, ResamplingKernel, PROGRESSIVE_THRESHOLD};
pub use transform::Transform;
