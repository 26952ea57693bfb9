use base64::Engine;
use image::ImageFormat;
use media_grid::Thumbnail;
use std::path::Path;

/// Whether the picker lists files of this type (formats the decoder is built with)
pub fn is_supported_image(path: &Path) -> bool {
    matches!(
        ImageFormat::from_path(path),
        Ok(ImageFormat::Jpeg) | Ok(ImageFormat::WebP)
    )
}

/// Encodes a rendered preview as a data URL for `img { src }`
pub fn thumbnail_to_data_url(thumbnail: &Thumbnail) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(&thumbnail.bytes);
    format!("data:{};base64,{}", thumbnail.mime, b64)
}
