use log::debug;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest canvas side accepted anywhere a size can be configured.
pub const MAX_CANVAS_SIDE: u32 = 16384;

/// Whether `width`x`height` is a drawable canvas size.
pub fn canvas_size_ok(width: u32, height: u32) -> bool {
    (1..=MAX_CANVAS_SIDE).contains(&width) && (1..=MAX_CANVAS_SIDE).contains(&height)
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("goals file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("error reading goals file '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid goals file '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("goals file must have a non-empty title")]
    EmptyTitle,
    #[error("resolution must be between 1 and 16384 per side, got {0}x{1}")]
    InvalidResolution(u32, u32),
}

/// Progress of a tracked goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub current: f64,
    pub target: f64,
}

impl Progress {
    /// Fraction of the target reached. Zero when the target is not positive.
    pub fn ratio(&self) -> f64 {
        if self.target > 0.0 {
            self.current / self.target
        } else {
            0.0
        }
    }

    /// Whole percentage, truncated like the bar label shows it.
    pub fn percent(&self) -> i64 {
        (self.ratio() * 100.0).trunc() as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub name: String,
    pub progress: Option<Progress>,
}

impl Goal {
    pub fn plain(name: impl Into<String>) -> Self {
        Goal {
            name: name.into(),
            progress: None,
        }
    }

    pub fn tracked(name: impl Into<String>, current: f64, target: f64) -> Self {
        Goal {
            name: name.into(),
            progress: Some(Progress { current, target }),
        }
    }
}

// Goals are either bare strings or `{name, current, target}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGoal {
    Plain(String),
    Tracked {
        #[serde(default = "default_goal_name")]
        name: String,
        #[serde(default)]
        current: f64,
        #[serde(default = "default_target")]
        target: f64,
    },
}

fn default_goal_name() -> String {
    "Goal".to_string()
}

fn default_target() -> f64 {
    100.0
}

impl From<RawGoal> for Goal {
    fn from(raw: RawGoal) -> Self {
        match raw {
            RawGoal::Plain(name) => Goal::plain(name),
            RawGoal::Tracked {
                name,
                current,
                target,
            } => Goal::tracked(name, current, target),
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    title: String,
    goals: Vec<RawGoal>,
    resolution: Option<(u32, u32)>,
}

/// Title and goals shown on the wallpaper.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalConfig {
    pub title: String,
    pub goals: Vec<Goal>,
    /// Canvas size requested by the goals file, overriding the theme.
    pub resolution: Option<(u32, u32)>,
}

impl GoalConfig {
    pub fn new(title: impl Into<String>, goals: Vec<Goal>) -> Result<Self, ParseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ParseError::EmptyTitle);
        }

        Ok(GoalConfig {
            title,
            goals,
            resolution: None,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ParseError> {
        debug!("Loading goals from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ParseError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ParseError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        Self::from_json(&contents).map_err(|err| match err {
            ParseError::Json { source, .. } => ParseError::Json {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let raw: RawConfig = serde_json::from_str(json).map_err(|source| ParseError::Json {
            path: PathBuf::new(),
            source,
        })?;

        let goals = raw.goals.into_iter().map(Goal::from).collect();
        let mut config = GoalConfig::new(raw.title, goals)?;

        if let Some((width, height)) = raw.resolution {
            if !canvas_size_ok(width, height) {
                return Err(ParseError::InvalidResolution(width, height));
            }
            config.resolution = Some((width, height));
        }

        debug!(
            "Parsed goals config: title={:?}, {} goal(s)",
            config.title,
            config.goals.len()
        );

        Ok(config)
    }
}
