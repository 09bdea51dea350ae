use directories::{BaseDirs, ProjectDirs};
use log::debug;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "goal-wallpaper", "goal-wallpaper")
}

/// Per-user directory holding `settings.yaml` and the default `goals.json`.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Per-user directory the generated wallpaper is written to by default.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = || BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());

    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = home() {
            return home;
        }
    }

    PathBuf::from(path)
}

/// Parses `#rrggbb` (the `#` is optional) into RGB components.
pub fn parse_hex_color(input: &str) -> Option<[u8; 3]> {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    let re = HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .expect("hex color pattern is valid")
    });

    let caps = re.captures(input.trim())?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    let rgb = [channel(1)?, channel(2)?, channel(3)?];

    debug!("Parsed color {} as {:?}", input, rgb);
    Some(rgb)
}

/// Formats a goal quantity with thousands separators; fractional values keep
/// two decimals.
pub fn format_quantity(value: f64) -> String {
    // Rounded to cents first so a carry reaches the whole part.
    let cents = (value.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        out.push_str(&format!(".{fraction:02}"));
    }

    out
}
