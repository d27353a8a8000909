#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from phstrip for tests
pub use phstrip::{
    AnalysisConfig, BlackPoint, ColorSample, PhError, PhPipeline, PipelineConfig,
    RegionColorPipeline, WhitePoint,
};
