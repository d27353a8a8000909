//! Channel-wise linear color corrections driven by the measured background.
//!
//! Both transforms saturate to 0..=255 on both sides so an 8-bit channel can
//! never wrap around.

use crate::error::{PhError, Result};
use image::{Rgb, RgbImage};

/// Shift each channel so the reference color's channels become equal.
///
/// Every channel is raised by the distance between the reference's brightest
/// channel and its own value, which removes the tint of the reference without
/// darkening it.
pub fn level(img: &RgbImage, reference: [u8; 3]) -> RgbImage {
    let max = reference.iter().copied().max().unwrap_or(0) as i16;
    let shift = reference.map(|c| max - c as i16);

    map_channels(img, |channel, value| {
        (value as i16 + shift[channel]).clamp(0, 255) as u8
    })
}

/// Stretch each channel so `white` maps to 255 and `black` maps to 0.
pub fn remap(img: &RgbImage, white: [u8; 3], black: [u8; 3]) -> Result<RgbImage> {
    let mut scale = [0f64; 3];
    for channel in 0..3 {
        if white[channel] <= black[channel] {
            return Err(PhError::DegenerateColorTransform {
                channel,
                white: white[channel],
                black: black[channel],
            });
        }
        scale[channel] = 255.0 / (white[channel] - black[channel]) as f64;
    }

    Ok(map_channels(img, |channel, value| {
        let stretched = (value as f64 - black[channel] as f64) * scale[channel];
        stretched.round().clamp(0.0, 255.0) as u8
    }))
}

/// Per-channel minimum over the whole image
pub fn darkest_channels(img: &RgbImage) -> [u8; 3] {
    let mut darkest = [u8::MAX; 3];
    for pixel in img.pixels() {
        for (d, &c) in darkest.iter_mut().zip(pixel.0.iter()) {
            *d = (*d).min(c);
        }
    }
    darkest
}

fn map_channels<F>(img: &RgbImage, f: F) -> RgbImage
where
    F: Fn(usize, u8) -> u8,
{
    let mut output = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        output.put_pixel(x, y, Rgb([f(0, r), f(1, g), f(2, b)]));
    }
    output
}
