pub mod config;
pub mod settings;

pub use config::{canvas_size_ok, Goal, GoalConfig, ParseError, Progress, MAX_CANVAS_SIDE};
pub use settings::{Color, Settings, SettingsError, Theme};
