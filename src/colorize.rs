use crate::colors::{BLACK, WHITE};
use crate::error::AppError;
use crate::filters::{find_edges, smooth_more};
use crate::types::{AppConfig, Effect, Mode, Theme};
use crate::utils::{blend_lighter, blend_multiply, hex_to_rgb, invert, to_grayscale};

use image::{GrayImage, ImageBuffer, Rgb, RgbImage};
use indicatif::ProgressBar;
use log::debug;
use palette::Srgb;

/// Number of progress steps each effect reports.
pub fn stage_count(effect: Effect) -> u64 {
    match effect {
        Effect::Standard | Effect::Outline => 2,
        Effect::Mixed => 4,
    }
}

pub fn colorize(
    img: &RgbImage,
    config: &AppConfig,
    theme: &Theme,
    pb: &ProgressBar,
) -> Result<RgbImage, AppError> {
    let output = match config.effect {
        Effect::Standard => {
            apply_standard_effect(img, theme, config.invert, config.suppress, pb)
        }
        Effect::Outline => apply_outline_effect(img, theme, config.mode, pb),
        Effect::Mixed => apply_mixed_effect(img, theme, config.mode, config.invert, pb)?,
    };

    pb.finish_with_message(format!("{} effect applied", config.effect));
    Ok(output)
}

fn apply_standard_effect(
    img: &RgbImage,
    theme: &Theme,
    invert_input: bool,
    suppress: bool,
    pb: &ProgressBar,
) -> RgbImage {
    pb.set_message("Preparing source");
    let source = if invert_input {
        debug!("inverting source luminosity");
        invert(img)
    } else {
        img.clone()
    };
    pb.inc(1);

    if suppress {
        // The gradient map already discards every original hue.
        debug!("suppress requested; duotone mapping leaves nothing to suppress");
    }

    pb.set_message("Mapping luminosity");
    let output = map_luminosity(&source, theme.darkest, theme.lightest);
    pb.inc(1);
    output
}

/// Outline strokes only. Dark mode draws light lines on the dark color, light
/// mode draws dark lines on the light color.
pub fn apply_outline_effect(
    img: &RgbImage,
    theme: &Theme,
    mode: Mode,
    pb: &ProgressBar,
) -> RgbImage {
    pb.set_message("Detecting edges");
    let edges = find_edges(&to_grayscale(img));
    pb.inc(1);

    let (background, stroke) = match mode {
        Mode::Dark => (theme.darkest, theme.lightest),
        Mode::Light => (theme.lightest, theme.darkest),
    };

    pb.set_message("Mapping outline");
    let output = apply_theme_mapping(&edges, background, stroke);
    pb.inc(1);
    output
}

/// Filled gradient with softened edge strokes composited on top.
pub fn apply_mixed_effect(
    img: &RgbImage,
    theme: &Theme,
    mode: Mode,
    invert_input: bool,
    pb: &ProgressBar,
) -> Result<RgbImage, AppError> {
    let source = if invert_input {
        debug!("inverting source luminosity");
        invert(img)
    } else {
        img.clone()
    };
    let gray = to_grayscale(&source);

    pb.set_message("Mapping fill");
    let filled = apply_theme_mapping(&gray, theme.darkest, theme.lightest);
    pb.inc(1);

    pb.set_message("Detecting edges");
    let edges = smooth_more(&find_edges(&gray));
    pb.inc(1);

    pb.set_message("Building edge overlay");
    let overlay = match mode {
        Mode::Dark => apply_theme_mapping(&edges, hex_to_rgb(BLACK)?, theme.lightest),
        Mode::Light => apply_theme_mapping(&edges, hex_to_rgb(WHITE)?, theme.darkest),
    };
    pb.inc(1);

    pb.set_message("Compositing");
    let output = match mode {
        Mode::Dark => blend_lighter(&filled, &overlay),
        Mode::Light => blend_multiply(&filled, &overlay),
    };
    pb.inc(1);

    Ok(output)
}

pub fn map_luminosity(img: &RgbImage, dark: Srgb<u8>, light: Srgb<u8>) -> RgbImage {
    apply_theme_mapping(&to_grayscale(img), dark, light)
}

/// Maps each gray level onto the gradient between `dark` (0) and `light` (255).
pub fn apply_theme_mapping(gray: &GrayImage, dark: Srgb<u8>, light: Srgb<u8>) -> RgbImage {
    let (width, height) = gray.dimensions();

    // The gradient only has 256 stops, so build it once.
    let mut lut = [Rgb([0u8; 3]); 256];
    for (level, stop) in lut.iter_mut().enumerate() {
        let t = level as f64 / 255.0;
        *stop = Rgb([
            interpolate_channel(dark.red, light.red, t),
            interpolate_channel(dark.green, light.green, t),
            interpolate_channel(dark.blue, light.blue, t),
        ]);
    }

    ImageBuffer::from_fn(width, height, |x, y| lut[gray.get_pixel(x, y)[0] as usize])
}

#[inline]
fn interpolate_channel(dark: u8, light: u8, t: f64) -> u8 {
    let value = (dark as f64 * (1.0 - t) + light as f64 * t) as u8;
    value.clamp(dark.min(light), dark.max(light))
}
