//! Parallel execution of independent thumbnail jobs.
//!
//! Requests are embarrassingly parallel: every stage is pure and each
//! job owns its buffers, so jobs fan out over rayon's pool with no
//! shared state. One failing job does not abort the batch; callers
//! inspect each result and typically skip-and-continue on
//! [`EmptyRegion`](crate::ThumbError::EmptyRegion) while treating
//! [`InvalidSpec`](crate::ThumbError::InvalidSpec) as a caller bug.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::params::ThumbnailRequest;
use crate::pipeline;

/// One unit of batch work: a decoded source and the request to run on it.
#[derive(Debug, Clone)]
pub struct Job {
    pub source: PixelBuffer,
    pub request: ThumbnailRequest,
}

impl Job {
    pub fn new(source: PixelBuffer, request: ThumbnailRequest) -> Self {
        Self { source, request }
    }
}

/// Run every job, in parallel, preserving input order in the results.
pub fn produce_all(jobs: &[Job]) -> Vec<Result<PixelBuffer>> {
    jobs.par_iter()
        .map(|job| pipeline::produce(&job.source, &job.request))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ChannelLayout;
    use crate::error::ThumbError;
    use crate::geometry::{Coordinate, Region, Size};

    fn source(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(Size::new(w, h).unwrap(), ChannelLayout::Rgb, |x, y| {
            [(x % 256) as u8, (y % 256) as u8, 128, 0]
        })
    }

    #[test]
    fn results_preserve_job_order() {
        let jobs: Vec<Job> = (1..=8)
            .map(|i| {
                Job::new(
                    source(64, 64),
                    ThumbnailRequest::builder()
                        .forced_size(i, i)
                        .build()
                        .unwrap(),
                )
            })
            .collect();

        let results = produce_all(&jobs);
        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            let buf = result.as_ref().unwrap();
            assert_eq!(buf.width(), i as u32 + 1);
        }
    }

    #[test]
    fn one_failure_does_not_poison_the_batch() {
        let good = ThumbnailRequest::builder().size(8, 8).build().unwrap();
        let bad = ThumbnailRequest::builder()
            .size(8, 8)
            .region(Region::new(
                Coordinate::new(1000, 1000),
                Size::new(4, 4).unwrap(),
            ))
            .build()
            .unwrap();

        let jobs = vec![
            Job::new(source(32, 32), good.clone()),
            Job::new(source(32, 32), bad),
            Job::new(source(32, 32), good),
        ];
        let results = produce_all(&jobs);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ThumbError::EmptyRegion { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn parallel_results_match_sequential() {
        let jobs: Vec<Job> = (0..4)
            .map(|i| {
                Job::new(
                    source(100 + i * 10, 60),
                    ThumbnailRequest::builder().size(24, 24).build().unwrap(),
                )
            })
            .collect();

        let parallel = produce_all(&jobs);
        for (job, result) in jobs.iter().zip(&parallel) {
            let sequential = pipeline::produce(&job.source, &job.request).unwrap();
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
    }
}
