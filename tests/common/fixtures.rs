use image::{ImageBuffer, Rgb, RgbImage};

/// Fill of the test block: hue 45 (90 degrees), saturation 255, value 200
pub const HUE_45: Rgb<u8> = Rgb([100, 200, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Creates a `size`x`size` card of `background` with a centered `block`x`block`
/// square of `fill`.
pub fn card_with_center(size: u32, block: u32, background: Rgb<u8>, fill: Rgb<u8>) -> RgbImage {
    let start = (size - block) / 2;
    let end = start + block;
    ImageBuffer::from_fn(size, size, |x, y| {
        if (start..end).contains(&x) && (start..end).contains(&y) {
            fill
        } else {
            background
        }
    })
}

/// The 240x240 white card with a 40x40 hue-45 center
pub fn reference_card() -> RgbImage {
    card_with_center(240, 40, WHITE, HUE_45)
}

/// Saves `img` as a PNG inside a fresh temp directory.
/// Returns the directory (keep alive) and the file path.
pub fn save_temp_png(img: &RgbImage) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("card.png");
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    (dir, path)
}
