//! Support for the batch driver: planning request windows, naming and writing output files,
//! and running a plan end to end.

pub mod output;
pub mod plan;
pub mod runner;
