use crate::colors::{DARK_THEME, LIGHT_THEME};
use crate::error::AppError;
use crate::utils::hex_to_rgb;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use palette::Srgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dark,
    Light,
}

impl Mode {
    pub const NAMES: [&'static str; 2] = ["dark", "light"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dark => "dark",
            Mode::Light => "light",
        }
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Mode::Dark),
            "light" => Ok(Mode::Light),
            _ => Err(AppError::InvalidValue {
                field: "mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Filled duotone gradient map.
    Standard,
    /// Edges only.
    Outline,
    /// Filled gradient with blended edge strokes.
    Mixed,
}

impl Effect {
    pub const NAMES: [&'static str; 3] = ["standard", "outline", "mixed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Standard => "standard",
            Effect::Outline => "outline",
            Effect::Mixed => "mixed",
        }
    }
}

impl FromStr for Effect {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Effect::Standard),
            "outline" => Ok(Effect::Outline),
            "mixed" => Ok(Effect::Mixed),
            _ => Err(AppError::InvalidValue {
                field: "effect",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two endpoint colors of a duotone gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub darkest: Srgb<u8>,
    pub lightest: Srgb<u8>,
}

impl Theme {
    pub fn for_mode(mode: Mode) -> Result<Self, AppError> {
        let [darkest, lightest] = match mode {
            Mode::Dark => DARK_THEME,
            Mode::Light => LIGHT_THEME,
        };

        Ok(Theme {
            darkest: hex_to_rgb(darkest)?,
            lightest: hex_to_rgb(lightest)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub mode: Mode,
    pub effect: Effect,
    pub invert: bool,
    pub suppress: bool,
}
