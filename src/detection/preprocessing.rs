use crate::config::ThresholdRange;
use crate::error::{PhError, Result};
use crate::models::Mask;
use image::{Luma, Rgb, RgbImage};

/// Convert an RGB triple to 8-bit HSV: hue in half-degrees (0..=179),
/// saturation and value in 0..=255.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(|c| c as f32);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let mut h_byte = (h / 2.0).round() as u32;
    if h_byte >= 180 {
        h_byte -= 180;
    }

    [h_byte as u8, s.round() as u8, max as u8]
}

/// Convert a whole image to HSV (channels stored as H, S, V)
pub fn to_hsv(img: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        hsv.put_pixel(x, y, Rgb(rgb_to_hsv(pixel.0)));
    }
    hsv
}

/// Select pixels whose HSV channels all fall inside `range`
pub fn hsv_threshold(img: &RgbImage, range: &ThresholdRange) -> Result<Mask> {
    ensure_not_empty(img)?;

    let hsv = to_hsv(img);
    let mut mask = Mask::new(img.width(), img.height());
    for (x, y, pixel) in hsv.enumerate_pixels() {
        let [h, s, v] = pixel.0;
        if range.contains(h, s, v) {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    Ok(mask)
}

/// Keep the colors of selected pixels and zero everything else
pub fn apply_mask(img: &RgbImage, mask: &Mask) -> Result<RgbImage> {
    ensure_same_dimensions(img, mask)?;

    let mut output = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        if mask.get_pixel(x, y)[0] > 0 {
            output.put_pixel(x, y, *pixel);
        }
    }
    Ok(output)
}

pub(crate) fn ensure_not_empty(img: &RgbImage) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(PhError::invalid_image(format!(
            "image has no pixels ({}x{})",
            img.width(),
            img.height()
        )));
    }
    Ok(())
}

pub(crate) fn ensure_same_dimensions(img: &RgbImage, mask: &Mask) -> Result<()> {
    if img.dimensions() != mask.dimensions() {
        let (iw, ih) = img.dimensions();
        let (mw, mh) = mask.dimensions();
        return Err(PhError::invalid_image(format!(
            "mask is {mw}x{mh} but image is {iw}x{ih}"
        )));
    }
    Ok(())
}
