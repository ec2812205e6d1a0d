pub mod dataset;
pub mod endpoint;
pub mod measurement;
pub mod station;
pub mod window;
