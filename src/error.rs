//! Error types for the thumbnail pipeline.
//!
//! Four kinds, matching how a batch caller needs to branch: bad input
//! (`InvalidSpec`), a region with nothing under it (`EmptyRegion`), a
//! resample target that collapsed to zero (`DegenerateTarget`), and
//! internal invariant violations (`KernelFailure`). Every variant carries
//! the offending values so a failure can be reproduced from the message
//! alone.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThumbError {
    /// Malformed request input, detected at construction time so the
    /// pipeline never starts on a doomed request.
    #[error("invalid spec: {reason}")]
    InvalidSpec { reason: String },

    /// The requested region's clamped intersection with the source has
    /// zero area. Fatal for the request; batch callers typically
    /// skip-and-continue on this one.
    #[error(
        "region {width}x{height} at ({left},{top}) has no overlap with \
         the {source_width}x{source_height} source"
    )]
    EmptyRegion {
        left: i64,
        top: i64,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    /// A computed target dimension reached the resample boundary as zero
    /// (possible with extreme scale factors on tiny sources).
    #[error("resample target {width}x{height} has a zero dimension")]
    DegenerateTarget { width: u32, height: u32 },

    /// A buffer-length or rectangle invariant was violated inside a
    /// pipeline stage. This signals a defect, not a recoverable
    /// condition; it is propagated, never swallowed.
    #[error("kernel failure: {detail}")]
    KernelFailure { detail: String },
}

impl ThumbError {
    pub(crate) fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    pub(crate) fn kernel_failure(detail: impl Into<String>) -> Self {
        Self::KernelFailure {
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThumbError>;
