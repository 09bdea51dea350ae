//! Applying an image as the desktop background.
//!
//! Each supported OS gets its own [`WallpaperBackend`]; [`platform_backend`]
//! picks the one for the host.

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(any(target_os = "macos", target_os = "windows"))]
pub mod native;

use log::info;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::Settings;

#[derive(Error, Debug)]
pub enum SetWallpaperError {
    #[error("wallpaper image '{}' does not exist", path.display())]
    NotFound { path: PathBuf },
    #[error("cannot resolve '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("setting the wallpaper is not supported on {0}")]
    UnsupportedPlatform(String),
    #[error("{backend} rejected the wallpaper: {reason}")]
    Rejected { backend: String, reason: String },
    #[error("no method to set the wallpaper worked on desktop '{desktop}'")]
    NoStrategySucceeded { desktop: String },
}

/// A host mechanism able to set the desktop background.
pub trait WallpaperBackend {
    fn name(&self) -> &str;

    /// Applies `image`, which is an absolute path to an existing file.
    fn apply(&self, image: &Path) -> Result<(), SetWallpaperError>;
}

/// Sets `path` as the desktop background through `backend`.
///
/// The path is checked before the backend runs, so a missing image leaves the
/// current background untouched.
pub fn set_wallpaper(path: &Path, backend: &dyn WallpaperBackend) -> Result<(), SetWallpaperError> {
    if !path.is_file() {
        return Err(SetWallpaperError::NotFound {
            path: path.to_path_buf(),
        });
    }

    // Not `canonicalize`: on Windows it yields `\\?\` verbatim paths that
    // SystemParametersInfoW does not accept.
    let absolute = std::path::absolute(path).map_err(|source| SetWallpaperError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Setting wallpaper to {} using {}",
        absolute.display(),
        backend.name()
    );
    backend.apply(&absolute)?;
    info!("Wallpaper set");

    Ok(())
}

#[cfg(target_os = "linux")]
pub fn platform_backend(
    settings: &Settings,
) -> Result<Box<dyn WallpaperBackend>, SetWallpaperError> {
    Ok(Box::new(linux::DesktopCommands::from_env(settings.monitor.clone())))
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
pub fn platform_backend(
    _settings: &Settings,
) -> Result<Box<dyn WallpaperBackend>, SetWallpaperError> {
    Ok(Box::new(native::NativeBackend))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn platform_backend(
    _settings: &Settings,
) -> Result<Box<dyn WallpaperBackend>, SetWallpaperError> {
    Err(SetWallpaperError::UnsupportedPlatform(std::env::consts::OS.to_string()))
}
