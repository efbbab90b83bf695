pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_OUTPUT_PATH: &str = "theme_output.png";

/// Location of the user config file, relative to the home directory.
pub const USER_CONFIG_PATH: &str = ".config/theme-converter/config.toml";
