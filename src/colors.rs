// Theme colors from the site stylesheet.

/// Darkest black/blue to bright blue.
pub const DARK_THEME: [&str; 2] = ["#05080E", "#58A6FF"];

/// Deep blue for lines and contrast, beige background.
pub const LIGHT_THEME: [&str; 2] = ["#2A5D9C", "#E6E4DD"];

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";
