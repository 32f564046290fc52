//! CLI command implementations.

pub mod migrate;
pub mod pipeline;
pub mod seed;
pub mod stats;
