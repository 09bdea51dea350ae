//! macOS and Windows backend built on the `wallpaper` crate.

use std::path::Path;

use super::{SetWallpaperError, WallpaperBackend};

pub struct NativeBackend;

impl WallpaperBackend for NativeBackend {
    fn name(&self) -> &str {
        "native"
    }

    fn apply(&self, image: &Path) -> Result<(), SetWallpaperError> {
        let path = image.to_str().ok_or_else(|| SetWallpaperError::Rejected {
            backend: self.name().to_string(),
            reason: format!("{} is not valid UTF-8", image.display()),
        })?;

        wallpaper::set_from_path(path).map_err(|err| SetWallpaperError::Rejected {
            backend: self.name().to_string(),
            reason: err.to_string(),
        })
    }
}
