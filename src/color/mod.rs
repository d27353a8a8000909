//! Region color sampling and background-referenced color correction

pub mod correction;
pub mod sampling;

pub use correction::{darkest_channels, level, remap};
pub use sampling::sample_region;
