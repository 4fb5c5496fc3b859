use crate::domain::jobs::JobId;
use crate::ports::ids::JobIdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond timestamps, bumped by one when two jobs land in the same
/// millisecond so ids stay unique and strictly increasing.
#[derive(Debug, Default)]
pub struct TimestampJobIds {
    last: AtomicU64,
}

impl TimestampJobIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl JobIdGenerator for TimestampJobIds {
    fn next_id(&self) -> JobId {
        let now = Self::now_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return JobId(next),
                Err(current) => last = current,
            }
        }
    }
}
