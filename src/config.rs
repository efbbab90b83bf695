use crate::constants::{DEFAULT_OUTPUT_PATH, USER_CONFIG_PATH, VERSION};
use crate::error::AppError;
use crate::types::{AppConfig, Effect, Mode};

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use serde_derive::Deserialize;

/// Run defaults as read from the config file layers. Theme colors are fixed
/// and intentionally absent here.
#[derive(Debug, Deserialize)]
struct SerializedAppConfig {
    output: String,
    mode: String,
    effect: String,
    invert: bool,
    suppress: bool,
}

fn load_config(config_path: Option<&str>) -> Result<SerializedAppConfig, config::ConfigError> {
    let mut builder = ConfigBuilder::<DefaultState>::default()
        .set_default("output", DEFAULT_OUTPUT_PATH)?
        .set_default("mode", "dark")?
        .set_default("effect", "standard")?
        .set_default("invert", false)?
        .set_default("suppress", false)?;

    let default_config_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(""))
        .join(USER_CONFIG_PATH);

    if default_config_path.exists() {
        builder = builder.add_source(File::from(default_config_path).required(false));
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    builder.build()?.try_deserialize()
}

fn cli() -> Command<'static> {
    Command::new("Theme Converter")
        .version(VERSION)
        .about("Converts an image to the 'Bit by Bit' website theme")
        .after_help("Run defaults (output, mode, effect, invert, suppress) may be set in ~/.config/theme-converter/config.toml or in a file passed with --config. Command-line flags always win. The theme colors themselves are fixed.")
        .arg(
            Arg::new("input")
                .help("Path to input image")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Path to output image (default: theme_output.png)")
                .takes_value(true),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .possible_values(Mode::NAMES)
                .help("Theme mode to apply: 'dark' (Black to Blue) or 'light' (Beige to Blue)")
                .takes_value(true),
        )
        .arg(
            Arg::new("suppress")
                .short('s')
                .long("suppress")
                .help("Strongly suppress original red/green influence (already handled by duotone mapping)"),
        )
        .arg(
            Arg::new("effect")
                .short('e')
                .long("effect")
                .value_name("EFFECT")
                .possible_values(Effect::NAMES)
                .help("Effect type: 'standard' (Filled), 'outline' (Edges Only), or 'mixed' (Shaded Edges)")
                .takes_value(true),
        )
        .arg(
            Arg::new("invert")
                .short('i')
                .long("invert")
                .help("Invert image luminosity before processing (useful for Light->Dark conversion)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("/path/to/config.toml")
                .help("Sets a custom config file")
                .takes_value(true),
        )
}

/// Command-line flags override whatever the config layers resolved to.
fn merge(matches: &ArgMatches, config: SerializedAppConfig) -> Result<AppConfig, AppError> {
    let input_path = matches.value_of("input").unwrap_or_default();

    let output = matches.value_of("output").unwrap_or(&config.output);
    let mode: Mode = matches.value_of("mode").unwrap_or(&config.mode).parse()?;
    let effect: Effect = matches
        .value_of("effect")
        .unwrap_or(&config.effect)
        .parse()?;

    Ok(AppConfig {
        input_path: PathBuf::from(input_path),
        output_path: PathBuf::from(output),
        mode,
        effect,
        invert: matches.is_present("invert") || config.invert,
        suppress: matches.is_present("suppress") || config.suppress,
    })
}

pub fn init() -> Result<AppConfig, AppError> {
    init_from(std::env::args_os())
}

pub fn init_from<I, T>(args: I) -> Result<AppConfig, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cli().get_matches_from(args);
    let config = load_config(matches.value_of("config"))?;
    merge(&matches, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    fn defaults() -> SerializedAppConfig {
        SerializedAppConfig {
            output: DEFAULT_OUTPUT_PATH.to_string(),
            mode: "dark".to_string(),
            effect: "standard".to_string(),
            invert: false,
            suppress: false,
        }
    }

    fn parse(args: &[&str]) -> Result<AppConfig, AppError> {
        let matches = cli().try_get_matches_from(args).unwrap();
        merge(&matches, defaults())
    }

    #[test]
    fn bare_input_uses_defaults() {
        let config = parse(&["theme-converter", "photo.jpg"]).unwrap();
        assert_eq!(config.input_path, PathBuf::from("photo.jpg"));
        assert_eq!(config.output_path, PathBuf::from("theme_output.png"));
        assert_eq!(config.mode, Mode::Dark);
        assert_eq!(config.effect, Effect::Standard);
        assert!(!config.invert);
        assert!(!config.suppress);
    }

    #[test]
    fn short_flags_are_recognized() {
        let config = parse(&[
            "theme-converter",
            "photo.jpg",
            "-o",
            "out.jpg",
            "-m",
            "light",
            "-e",
            "mixed",
            "-i",
            "-s",
        ])
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("out.jpg"));
        assert_eq!(config.mode, Mode::Light);
        assert_eq!(config.effect, Effect::Mixed);
        assert!(config.invert);
        assert!(config.suppress);
    }

    #[test]
    fn unknown_mode_is_rejected_by_the_parser() {
        assert!(cli()
            .try_get_matches_from(["theme-converter", "photo.jpg", "--mode", "sepia"])
            .is_err());
        assert!(cli().try_get_matches_from(["theme-converter"]).is_err());
    }

    #[test]
    fn config_file_supplies_defaults_and_flags_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "mode = \"light\"\neffect = \"outline\"\noutput = \"from_file.png\"\n",
        )
        .unwrap();
        let path = path.to_str().unwrap();

        let config = init_from(["theme-converter", "photo.jpg", "-c", path]).unwrap();
        assert_eq!(config.mode, Mode::Light);
        assert_eq!(config.effect, Effect::Outline);
        assert_eq!(config.output_path, PathBuf::from("from_file.png"));

        let config =
            init_from(["theme-converter", "photo.jpg", "-c", path, "-m", "dark"]).unwrap();
        assert_eq!(config.mode, Mode::Dark);
        assert_eq!(config.effect, Effect::Outline);
    }

    #[test]
    fn invalid_value_in_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "effect = \"watercolor\"\n").unwrap();

        let result = init_from(["theme-converter", "photo.jpg", "-c", path.to_str().unwrap()]);
        assert!(matches!(
            result,
            Err(AppError::InvalidValue { field: "effect", .. })
        ));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = init_from(["theme-converter", "photo.jpg", "-c", "/nonexistent/settings.toml"]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
