//! Domain layer - Pure business logic.

pub mod download;
pub mod errors;
pub mod extract;
pub mod jobs;
pub mod plan;
pub mod probe;
pub(crate) mod tool_output;
