//! Estimate the pH of a liquid from a photo of a colorimetric test card.
//!
//! The card's background is used as a white reference: the image is levelled
//! and remapped so the background becomes neutral white, then the saturated
//! test center is segmented in HSV space, averaged, and its hue mapped to pH.
//!
//! ```no_run
//! use phstrip::PhPipeline;
//!
//! let img = image::open("strip.jpg")?.to_rgb8();
//! let analysis = PhPipeline::default().run(&img)?;
//! println!("pH {:.1}", analysis.ph);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod ph;
pub mod pipeline;

pub use config::{
    AnalysisConfig, BlackPoint, FilterCriteria, PipelineConfig, ThresholdRange, WhitePoint,
};
pub use detection::{PipelineRun, RegionColorPipeline};
pub use error::{PhError, Result};
pub use models::{BoundingBox, ColorSample, Contour, Mask};
pub use ph::get_ph;
pub use pipeline::{DebugConfig, PhAnalysis, PhPipeline, PhReport};
