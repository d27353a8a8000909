pub mod contours;
pub mod filter;
pub mod preprocessing;

use crate::color::sample_region;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{ColorSample, Contour, Mask};
use image::RgbImage;
use tracing::debug;

/// Everything one region pipeline run produced, kept for sampling and
/// diagnostics
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Pixels whose HSV values fell inside the threshold range
    pub mask: Mask,
    /// Input image with unselected pixels zeroed
    pub masked: RgbImage,
    /// All contours of the mask
    pub contours: Vec<Contour>,
    /// Contours that passed the geometric filter
    pub filtered: Vec<Contour>,
    region: &'static str,
}

impl PipelineRun {
    /// Mean color of the selected region.
    ///
    /// Sampling follows the mask, so it is unaffected by how many contours
    /// passed the filter.
    pub fn sample(&self) -> Result<ColorSample> {
        sample_region(&self.masked, &self.mask, self.region)
    }
}

/// HSV threshold → mask → contours → contour filter, with one fixed
/// configuration
#[derive(Debug, Clone)]
pub struct RegionColorPipeline {
    pub config: PipelineConfig,
    region: &'static str,
}

impl RegionColorPipeline {
    pub fn new(region: &'static str, config: PipelineConfig) -> Self {
        Self { config, region }
    }

    pub fn background() -> Self {
        Self::new("background", PipelineConfig::background())
    }

    pub fn center() -> Self {
        Self::new("center", PipelineConfig::center())
    }

    /// Run all four steps on an image
    pub fn run(&self, img: &RgbImage) -> Result<PipelineRun> {
        debug!("[{}] HSV threshold {:?}", self.region, self.config.threshold);
        let mask = preprocessing::hsv_threshold(img, &self.config.threshold)?;

        let masked = preprocessing::apply_mask(img, &mask)?;

        let contours = contours::find_contours(&mask, self.config.external_only);
        debug!("[{}] Found {} contours", self.region, contours.len());

        let filtered = filter::filter_contours(&contours, &self.config.filter);
        debug!(
            "[{}] {} contours passed the filter (from {} total)",
            self.region,
            filtered.len(),
            contours.len()
        );

        Ok(PipelineRun {
            mask,
            masked,
            contours,
            filtered,
            region: self.region,
        })
    }
}
