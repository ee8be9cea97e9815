// Prompt image lookup
//
// Images are only referenced, never decoded here; the display surface owns
// decoding. A reference is checked for existence before it is handed out so
// a missing file becomes a reportable AssetLoadFailed instead of a silent
// blank prompt.

use std::path::{Path, PathBuf};

use crate::calibration::CalibrationAction;
use crate::config::AssetConfig;
use crate::error::CalibrationError;

/// Corner icon shown alongside every prompt
pub const SMALL_ICON_FILE: &str = "small_icon.png";

/// Resolves action prompt images under a root directory
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &AssetConfig) -> Self {
        Self::new(config.image_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the prompt image for `action` (not checked)
    pub fn image_for(&self, action: CalibrationAction) -> PathBuf {
        self.root.join(action.image_file())
    }

    /// Path of the corner icon (not checked)
    pub fn small_icon(&self) -> PathBuf {
        self.root.join(SMALL_ICON_FILE)
    }

    /// Verify a referenced asset is a readable file
    ///
    /// # Errors
    /// `CalibrationError::AssetLoadFailed` naming the file when it is
    /// missing or not a regular file
    pub fn load(&self, reference: &Path) -> Result<PathBuf, CalibrationError> {
        let asset = reference
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| reference.display().to_string());

        match std::fs::metadata(reference) {
            Ok(meta) if meta.is_file() => Ok(reference.to_path_buf()),
            Ok(_) => Err(CalibrationError::AssetLoadFailed {
                asset,
                reason: format!("{} is not a file", reference.display()),
            }),
            Err(err) => Err(CalibrationError::AssetLoadFailed {
                asset,
                reason: err.to_string(),
            }),
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::from_config(&AssetConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let catalog = AssetCatalog::new("imgs");
        assert_eq!(
            catalog.image_for(CalibrationAction::RightClick),
            PathBuf::from("imgs").join("right_click.png")
        );
        assert_eq!(
            catalog.small_icon(),
            PathBuf::from("imgs").join("small_icon.png")
        );
    }

    #[test]
    fn test_default_root() {
        let catalog = AssetCatalog::default();
        assert_eq!(
            catalog.root(),
            PathBuf::from("gui").join("calibration_images").as_path()
        );
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::new(dir.path());
        let path = catalog.image_for(CalibrationAction::LeftClick);
        std::fs::write(&path, b"png").unwrap();

        assert_eq!(catalog.load(&path).unwrap(), path);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::new(dir.path());

        let err = catalog.load(&catalog.small_icon()).unwrap_err();
        match err {
            CalibrationError::AssetLoadFailed { asset, .. } => {
                assert_eq!(asset, "small_icon.png")
            }
            other => panic!("Expected AssetLoadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_load_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::new(dir.path());
        assert!(catalog.load(dir.path()).is_err());
    }
}
