//! Renders a title and a list of goals into a desktop wallpaper, and sets
//! images as the desktop background.

pub mod model;
pub mod render;
pub mod setter;
pub mod util;

pub use model::{Goal, GoalConfig, ParseError, Settings, Theme};
pub use render::{RenderError, RenderedImage, Renderer};
pub use setter::{platform_backend, set_wallpaper, SetWallpaperError, WallpaperBackend};

/// Installs the `env_logger` backend. `RUST_LOG` still wins over `debug`.
pub fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
