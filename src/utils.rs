use crate::error::AppError;

use image::{imageops, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use palette::Srgb;

pub fn hex_to_rgb(hex: &str) -> Result<Srgb<u8>, AppError> {
    hex.parse::<Srgb<u8>>()
        .map_err(|e| AppError::Color(hex.to_string(), e))
}

/// ITU-R 601-2 luma in 16-bit fixed point, rounding half up.
#[inline]
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| Luma([luma(img.get_pixel(x, y))]))
}

/// Replaces every channel value `v` with `255 - v`.
pub fn invert(img: &RgbImage) -> RgbImage {
    let mut inverted = img.clone();
    imageops::invert(&mut inverted);
    inverted
}

/// Per-channel maximum of two equally sized images.
pub fn blend_lighter(base: &RgbImage, overlay: &RgbImage) -> RgbImage {
    blend_with(base, overlay, |a, b| a.max(b))
}

/// Per-channel product normalized back to 0-255, truncating.
pub fn blend_multiply(base: &RgbImage, overlay: &RgbImage) -> RgbImage {
    blend_with(base, overlay, |a, b| ((a as u16 * b as u16) / 255) as u8)
}

fn blend_with<F>(base: &RgbImage, overlay: &RgbImage, op: F) -> RgbImage
where
    F: Fn(u8, u8) -> u8,
{
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    let (width, height) = base.dimensions();

    ImageBuffer::from_fn(width, height, |x, y| {
        let a = base.get_pixel(x, y);
        let b = overlay.get_pixel(x, y);
        Rgb([op(a[0], b[0]), op(a[1], b[1]), op(a[2], b[2])])
    })
}
