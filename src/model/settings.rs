use log::debug;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::util;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("error reading settings file '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid settings file '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// An opaque RGB color, written as `#rrggbb` in settings files.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        util::parse_hex_color(&value)
            .map(Color)
            .ok_or_else(|| format!("invalid color '{}', expected #rrggbb", value))
    }
}

/// Visual configuration of the rendered wallpaper.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub text: Color,
    pub primary: Color,
    /// Unfilled part of progress bars.
    pub track: Color,
    pub font: Option<PathBuf>,
    pub bold_font: Option<PathBuf>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            width: 1920,
            height: 1080,
            background: Color::rgb(245, 245, 245),
            text: Color::rgb(50, 50, 50),
            primary: Color::rgb(0, 120, 255),
            track: Color::rgb(200, 200, 200),
            font: None,
            bold_font: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub goals: Option<String>,
    pub output: Option<String>,
    /// Monitor name handed to hyprpaper; empty applies to all monitors.
    pub monitor: String,
    pub debug: Option<bool>,
    pub theme: Theme,
}

impl Settings {
    /// Loads settings from `path`, or from the per-user config directory when
    /// no path is given. Only the implicit location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match util::config_dir() {
                Some(dir) => (dir.join("settings.yaml"), false),
                None => {
                    debug!("No home directory, using default settings");
                    return Ok(Settings::default());
                }
            },
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SettingsError::NotFound { path });
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };

        debug!("Loading settings from {}", path.display());
        Self::from_yaml(&contents).map_err(|source| SettingsError::Yaml { path, source })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a map.
        if yaml.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn goals_path(&self) -> PathBuf {
        match &self.goals {
            Some(goals) => util::expand_tilde(goals),
            None => util::config_dir()
                .map(|dir| dir.join("goals.json"))
                .unwrap_or_else(|| PathBuf::from("goals.json")),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => util::expand_tilde(output),
            None => util::data_dir()
                .map(|dir| dir.join("goals_wallpaper.png"))
                .unwrap_or_else(|| PathBuf::from("goals_wallpaper.png")),
        }
    }
}
