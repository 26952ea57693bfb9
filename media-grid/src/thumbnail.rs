use crate::error::ThumbnailError;
use crate::models::{Size, Thumbnail};
use image::{imageops::FilterType, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Largest edge a preview is ever rendered at
const MAX_PREVIEW_EDGE: u32 = 2048;

/// Native pixel dimensions of an image file, without decoding the pixels
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32), ThumbnailError> {
    image::image_dimensions(path)
        .map_err(|e| ThumbnailError::ImageLoadError(format!("Failed to read header: {}", e)))
}

fn target_edge(value: f32) -> u32 {
    (value.round() as u32).clamp(1, MAX_PREVIEW_EDGE)
}

/// Renders a WebP preview filling `size`, cropping the overflow
pub fn render_thumbnail(path: &Path, size: Size) -> Result<Thumbnail, ThumbnailError> {
    let width = target_edge(size.width);
    let height = target_edge(size.height);
    log::debug!("Rendering {}x{} preview for {:?}", width, height, path);

    let img = image::open(path)
        .map_err(|e| ThumbnailError::ImageLoadError(format!("Failed to load image: {}", e)))?;
    let preview = img.resize_to_fill(width, height, FilterType::Lanczos3);

    let mut buffer = Cursor::new(Vec::new());
    preview
        .write_to(&mut buffer, ImageFormat::WebP)
        .map_err(|e| ThumbnailError::ImageSaveError(format!("Failed to encode preview: {}", e)))?;

    Ok(Thumbnail {
        width: preview.width(),
        height: preview.height(),
        mime: "image/webp",
        bytes: buffer.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(width: u32, height: u32) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("media-grid-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.jpg");
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 255) as u8, (y % 255) as u8, 128])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_probe_dimensions() {
        let path = write_test_image(64, 48);
        assert_eq!(probe_dimensions(&path).unwrap(), (64, 48));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_render_fills_requested_size() {
        let path = write_test_image(64, 48);
        let thumb = render_thumbnail(&path, Size::new(20.0, 20.0)).unwrap();
        assert_eq!((thumb.width, thumb.height), (20, 20));
        assert_eq!(thumb.mime, "image/webp");
        assert!(!thumb.bytes.is_empty());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = render_thumbnail(Path::new("/nonexistent/photo.jpg"), Size::square(10.0));
        assert!(matches!(result, Err(ThumbnailError::ImageLoadError(_))));
    }
}
