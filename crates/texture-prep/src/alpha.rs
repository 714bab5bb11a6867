use image::RgbaImage;

/// Alpha for a pixel from its grayscale brightness.
///
/// `gray = (r + g + b) / 3`, normalized to 0..1 and scaled back to 0..255,
/// so black is fully transparent and white fully opaque. The sum of three
/// channels is never a half-integer multiple of 3, so rounding has no ties.
pub fn brightness_alpha(r: u8, g: u8, b: u8) -> u8 {
    let gray = (u16::from(r) + u16::from(g) + u16::from(b)) as f32 / 3.0;
    let normalized = gray / 255.0;
    (normalized * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Overwrite every pixel's alpha with its brightness. Color channels are kept.
pub fn apply_brightness_alpha(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        pixel.0[3] = brightness_alpha(r, g, b);
    }
}
