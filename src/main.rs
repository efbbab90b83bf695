mod colorize;
mod colors;
mod config;
mod constants;
mod error;
mod filters;
mod types;
mod utils;

use crate::colorize::{colorize, stage_count};
use crate::config::init;
use crate::error::AppError;
use crate::types::{AppConfig, Theme};

use std::path::Path;

use image::io::Reader as ImageReader;
use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = init()?;
    debug!("resolved configuration: {:?}", config);

    let pb = ProgressBar::new(stage_count(config.effect));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    match process_image(&config, pb) {
        Ok(()) => Ok(()),
        // Unreadable input is reported, not fatal.
        Err(e @ (AppError::InputNotFound(_) | AppError::Decode(_))) => {
            eprintln!("Error: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn process_image(config: &AppConfig, pb: ProgressBar) -> Result<(), AppError> {
    if !config.input_path.exists() {
        return Err(AppError::InputNotFound(config.input_path.clone()));
    }

    println!("Loading image: {}...", config.input_path.display());
    let img = load_image(&config.input_path).map_err(AppError::Decode)?;
    debug!("decoded {}x{} image", img.width(), img.height());

    let theme = Theme::for_mode(config.mode)?;
    println!(
        "Applying {} theme with {} effect...",
        config.mode, config.effect
    );
    let final_output = colorize(&img, config, &theme, &pb)?;

    final_output
        .save(&config.output_path)
        .map_err(AppError::Save)?;
    println!("Success! Saved to {}", config.output_path.display());
    Ok(())
}

/// Decodes by content rather than extension, dropping any alpha channel.
fn load_image(path: &Path) -> Result<RgbImage, image::ImageError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::{Effect, Mode};

    use std::fs;
    use std::path::PathBuf;

    use image::Rgb;

    fn run_config(input: PathBuf, output: PathBuf, mode: Mode, effect: Effect) -> AppConfig {
        AppConfig {
            input_path: input,
            output_path: output,
            mode,
            effect,
            invert: false,
            suppress: false,
        }
    }

    #[test]
    fn checkerboard_maps_to_exact_theme_colors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("checker.png");
        let output = dir.path().join("themed.png");

        let black = Rgb([0, 0, 0]);
        let white = Rgb([255, 255, 255]);
        let img = RgbImage::from_fn(2, 2, |x, _| if x == 0 { black } else { white });
        img.save(&input).unwrap();

        let config = run_config(input, output.clone(), Mode::Dark, Effect::Standard);
        process_image(&config, ProgressBar::hidden()).unwrap();

        let themed = image::open(&output).unwrap().to_rgb8();
        assert_eq!(themed.dimensions(), (2, 2));
        for y in 0..2 {
            assert_eq!(themed.get_pixel(0, y), &Rgb([0x05, 0x08, 0x0E]));
            assert_eq!(themed.get_pixel(1, y), &Rgb([0x58, 0xA6, 0xFF]));
        }
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("themed.png");
        let config = run_config(
            dir.path().join("absent.png"),
            output.clone(),
            Mode::Dark,
            Effect::Standard,
        );

        let result = process_image(&config, ProgressBar::hidden());
        assert!(matches!(result, Err(AppError::InputNotFound(_))));
        assert!(!output.exists());
    }

    #[test]
    fn undecodable_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.png");
        fs::write(&input, b"definitely not pixels").unwrap();
        let output = dir.path().join("themed.png");

        let config = run_config(input, output.clone(), Mode::Light, Effect::Mixed);
        let result = process_image(&config, ProgressBar::hidden());
        assert!(matches!(result, Err(AppError::Decode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn output_format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flat.png");
        let output = dir.path().join("themed.bmp");
        RgbImage::from_pixel(4, 3, Rgb([10, 200, 30])).save(&input).unwrap();

        let config = run_config(input, output.clone(), Mode::Light, Effect::Outline);
        process_image(&config, ProgressBar::hidden()).unwrap();

        assert_eq!(
            image::ImageFormat::from_path(&output).unwrap(),
            image::ImageFormat::Bmp
        );
        let themed = image::open(&output).unwrap().to_rgb8();
        assert!(themed.pixels().all(|p| *p == Rgb([0xE6, 0xE4, 0xDD])));
    }
}
