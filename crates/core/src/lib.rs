#![forbid(unsafe_code)]

pub mod builder;
pub mod model;

pub use builder::{SessionBuilder, build_session, shuffle};
