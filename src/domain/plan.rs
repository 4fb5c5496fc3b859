//! Fixed-length segment planning.

use super::errors::PlanError;
use super::jobs::{clip_file_name, JobId, Segment, SegmentState};
use std::path::Path;

/// Upper bound on segments per job.
pub const MAX_SEGMENTS: usize = 100_000;

/// A planned time range, before it is bound to a job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRange {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// Split `[0, duration)` into consecutive ranges of `segment_length` seconds.
/// The last range is shorter when `duration` is not a multiple of the length.
pub fn plan(duration: f64, segment_length: f64) -> Result<Vec<SegmentRange>, PlanError> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(PlanError::InvalidDuration(duration));
    }
    if !segment_length.is_finite() || segment_length <= 0.0 {
        return Err(PlanError::InvalidSegmentLength(segment_length));
    }

    let estimate = (duration / segment_length).ceil();
    if estimate > MAX_SEGMENTS as f64 {
        return Err(PlanError::TooManySegments(estimate));
    }

    let mut count = estimate as usize;
    // Rounding in the division can overshoot by one (2.1 / 0.15 > 14).
    while count > 1 && boundary(count - 1, segment_length) >= duration {
        count -= 1;
    }
    if count == 0 {
        return Err(PlanError::Empty);
    }

    // Every boundary is index * length, never a running sum, so the end of
    // one range is bit-identical to the start of the next.
    let ranges = (0..count)
        .map(|index| SegmentRange {
            index,
            start: boundary(index, segment_length),
            end: if index + 1 == count {
                duration
            } else {
                boundary(index + 1, segment_length)
            },
        })
        .collect();
    Ok(ranges)
}

fn boundary(index: usize, segment_length: f64) -> f64 {
    index as f64 * segment_length
}

/// Bind planned ranges to a job, naming each output inside `clip_dir`.
pub fn segments_for(job_id: JobId, ranges: &[SegmentRange], clip_dir: &Path) -> Vec<Segment> {
    ranges
        .iter()
        .map(|range| Segment {
            job_id,
            index: range.index,
            start: range.start,
            end: range.end,
            output_path: clip_dir.join(clip_file_name(job_id, range.index)),
            state: SegmentState::Pending,
        })
        .collect()
}
