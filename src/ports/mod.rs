//! Ports - trait seams between the pipeline and the outside world.

pub mod ids;
pub mod service;
pub mod tools;
