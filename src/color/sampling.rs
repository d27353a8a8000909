use crate::detection::preprocessing::{ensure_same_dimensions, rgb_to_hsv};
use crate::error::{PhError, Result};
use crate::models::{ColorSample, Mask};
use image::RgbImage;

/// Average the colors of the pixels selected by `mask`.
///
/// The rounded RGB mean is converted to HSV as if it were a single pixel, so
/// both triples describe the same color. `region` names the area in the
/// `EmptyRegion` error returned when the mask selects nothing.
pub fn sample_region(img: &RgbImage, mask: &Mask, region: &str) -> Result<ColorSample> {
    ensure_same_dimensions(img, mask)?;

    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for (x, y, pixel) in img.enumerate_pixels() {
        if mask.get_pixel(x, y)[0] == 0 {
            continue;
        }
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += channel as u64;
        }
        count += 1;
    }

    if count == 0 {
        return Err(PhError::empty_region(region));
    }

    let rgb = sums.map(|sum| (sum as f64 / count as f64).round() as u8);
    Ok(ColorSample {
        rgb,
        hsv: rgb_to_hsv(rgb),
        pixel_count: count,
    })
}
