use crate::image_processing::is_supported_image;
use media_grid::{
    probe_dimensions, AssetSource, PhotoAsset, PickerError, Size, Thumbnail,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        for d in [
            "/data/user/0/de.teilgedanken.sheetpicker/files",
            "/data/data/de.teilgedanken.sheetpicker/files",
        ] {
            let p = PathBuf::from(d);
            if p.exists() {
                return p;
            }
        }
        PathBuf::from("./data")
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./data")
    }
}

/// Default directory scanned for pickable photos
pub fn default_photo_dir() -> PathBuf {
    get_app_data_dir().join("photos")
}

/// Photo library backed by a single directory (not recursive)
#[derive(Debug, Clone)]
pub struct FilesystemAssetSource {
    root: PathBuf,
}

impl FilesystemAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn modified(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

impl AssetSource for FilesystemAssetSource {
    fn fetch(&self) -> Result<Vec<PhotoAsset>, PickerError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Photo directory {:?} does not exist", self.root);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_supported_image(&path) {
                found.push((modified(&path), path));
            }
        }
        // Oldest first, ties broken by name
        found.sort();

        let mut assets = Vec::with_capacity(found.len());
        for (_, path) in found {
            match probe_dimensions(&path) {
                Ok((w, h)) => assets.push(PhotoAsset::image(path.to_string_lossy(), w, h)),
                Err(e) => log::warn!("Skipping unreadable image {:?}: {}", path, e),
            }
        }
        log::info!("Found {} photos in {:?}", assets.len(), self.root);
        Ok(assets)
    }

    fn resolve_thumbnail(&self, asset: &PhotoAsset, size: Size) -> Option<Thumbnail> {
        match media_grid::render_thumbnail(Path::new(asset.id.as_str()), size) {
            Ok(thumb) => Some(thumb),
            Err(e) => {
                log::warn!("Preview for {} failed: {}", asset.id.as_str(), e);
                None
            }
        }
    }
}
