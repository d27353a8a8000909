use crate::color::{darkest_channels, level, remap};
use crate::config::{AnalysisConfig, BlackPoint, WhitePoint};
use crate::detection::preprocessing::ensure_not_empty;
use crate::detection::{PipelineRun, RegionColorPipeline};
use crate::error::{PhError, Result};
use crate::models::{ColorSample, Contour};
use crate::ph::{get_ph, round_ph};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Write one intermediate image as `NN_<name>.png`
    fn save(&self, index: usize, name: &str, image: DynamicImage) -> Result<()> {
        let filename = format!("{:02}_{}.png", index, name);
        image.save(self.output_dir.join(&filename))?;
        debug!("Debug: saved {}", filename);
        Ok(())
    }
}

/// Result of a complete analysis, including intermediate artifacts
#[derive(Debug, Clone)]
pub struct PhAnalysis {
    /// Background measured on the raw image
    pub background: ColorSample,
    /// Background re-measured after levelling
    pub leveled_background: ColorSample,
    /// Remap white reference, taken from one of the two background samples
    pub white: [u8; 3],
    pub black: [u8; 3],
    pub center: ColorSample,
    pub ph: f64,
    pub leveled: RgbImage,
    pub remapped: RgbImage,
    pub background_run: PipelineRun,
    pub center_run: PipelineRun,
}

impl PhAnalysis {
    pub fn report(&self) -> PhReport {
        PhReport {
            background: self.background,
            leveled_background: self.leveled_background,
            white: self.white,
            black: self.black,
            center: self.center,
            center_contours: self.center_run.filtered.len(),
            ph: self.ph,
            ph_rounded: round_ph(self.ph),
        }
    }
}

/// Serializable summary of a [`PhAnalysis`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhReport {
    pub background: ColorSample,
    pub leveled_background: ColorSample,
    pub white: [u8; 3],
    pub black: [u8; 3],
    pub center: ColorSample,
    /// Number of center contours that passed the filter
    pub center_contours: usize,
    pub ph: f64,
    pub ph_rounded: f64,
}

/// End-to-end pH estimation: find the background, correct the image
/// against it, then sample the test center and map its hue to pH.
pub struct PhPipeline {
    background: RegionColorPipeline,
    center: RegionColorPipeline,
    white_point: WhitePoint,
    black_point: BlackPoint,
    debug: Option<DebugConfig>,
}

impl PhPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            background: RegionColorPipeline::new("background", config.background),
            center: RegionColorPipeline::new("center", config.center),
            white_point: config.white_point,
            black_point: config.black_point,
            debug: None,
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            if std::fs::read_dir(&output_dir)?.next().is_some() {
                return Err(PhError::DebugDirNotEmpty { path: output_dir });
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    pub fn run(&self, img: &RgbImage) -> Result<PhAnalysis> {
        ensure_not_empty(img)?;
        self.save_debug(0, "input", || DynamicImage::ImageRgb8(img.clone()))?;

        let background = self.background.run(img)?.sample()?;
        info!("Background rgb {:?} hsv {:?}", background.rgb, background.hsv);

        let leveled = level(img, background.rgb);
        self.save_debug(1, "leveled", || DynamicImage::ImageRgb8(leveled.clone()))?;

        let background_run = self.background.run(&leveled)?;
        let leveled_background = background_run.sample()?;
        info!(
            "Leveled background rgb {:?} hsv {:?}",
            leveled_background.rgb, leveled_background.hsv
        );
        self.save_debug(2, "background_masked", || {
            DynamicImage::ImageRgb8(background_run.masked.clone())
        })?;

        let black = match self.black_point {
            BlackPoint::Zero => [0, 0, 0],
            BlackPoint::Darkest => darkest_channels(&leveled),
        };
        let white = match self.white_point {
            WhitePoint::Initial => background.rgb,
            WhitePoint::Leveled => leveled_background.rgb,
        };
        debug!("Remapping with white {:?} black {:?}", white, black);
        let remapped = remap(&leveled, white, black)?;
        self.save_debug(3, "remapped", || DynamicImage::ImageRgb8(remapped.clone()))?;

        let center_run = self.center.run(&remapped)?;
        self.save_debug(4, "center_threshold", || {
            DynamicImage::ImageLuma8(center_run.mask.clone())
        })?;
        self.save_debug(5, "center_contours", || {
            DynamicImage::ImageRgb8(draw_contours(&remapped, &center_run.filtered, Rgb([0, 255, 0])))
        })?;
        self.save_debug(6, "center_masked", || {
            DynamicImage::ImageRgb8(center_run.masked.clone())
        })?;

        let center = center_run.sample()?;
        info!("Center rgb {:?} hsv {:?}", center.rgb, center.hsv);

        let ph = get_ph(center.hue() as f64)?;
        info!("Estimated pH {:.1}", ph);

        Ok(PhAnalysis {
            background,
            leveled_background,
            white,
            black,
            center,
            ph,
            leveled,
            remapped,
            background_run,
            center_run,
        })
    }

    fn save_debug<F>(&self, index: usize, name: &str, image: F) -> Result<()>
    where
        F: FnOnce() -> DynamicImage,
    {
        match &self.debug {
            Some(debug_config) => debug_config.save(index, name, image()),
            None => Ok(()),
        }
    }
}

impl Default for PhPipeline {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Outline contours on a copy of `img`
pub fn draw_contours(img: &RgbImage, contours: &[Contour], color: Rgb<u8>) -> RgbImage {
    let mut canvas = img.clone();
    for c in contours {
        for i in 0..c.points.len() {
            let p1 = c.points[i];
            let p2 = c.points[(i + 1) % c.points.len()];
            draw_line_segment_mut(
                &mut canvas,
                (p1.x as f32, p1.y as f32),
                (p2.x as f32, p2.y as f32),
                color,
            );
        }
    }
    canvas
}
