use crate::domain::jobs::JobId;

/// Source of job identifiers. Every call returns a value never returned before.
#[cfg_attr(test, mockall::automock)]
pub trait JobIdGenerator: Send + Sync {
    fn next_id(&self) -> JobId;
}
