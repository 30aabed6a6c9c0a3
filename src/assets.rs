use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mime::Mime;
use thiserror::Error;

/// Origin baked into icon URLs stored by older backend versions.
pub const LEGACY_ORIGIN: &str = "http://localhost:3001";

/// Largest icon the backend accepts.
pub const MAX_ICON_BYTES: u64 = 5 * 1024 * 1024;

/// Rewrite a stored icon path so it points at the configured backend origin.
pub fn resolve_asset_url(url: &str, origin: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let base = origin.trim_end_matches('/');
    let replaced = url.replacen(LEGACY_ORIGIN, base, 1);

    if is_absolute(&replaced) {
        replaced
    } else if replaced.starts_with('/') {
        format!("{base}{replaced}")
    } else {
        format!("{base}/{replaced}")
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a supported image (PNG, JPG, GIF, SVG, WebP, BMP)", .0.display())]
    NotAnImage(PathBuf),

    #[error("{} is {size} bytes, the limit is 5 MB", .path.display())]
    TooLarge { path: PathBuf, size: u64 },
}

/// Guess an image MIME type from the file extension.
pub fn image_mime(path: &Path) -> Option<Mime> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some(mime::IMAGE_PNG),
        "jpg" | "jpeg" => Some(mime::IMAGE_JPEG),
        "gif" => Some(mime::IMAGE_GIF),
        "svg" => Some(mime::IMAGE_SVG),
        "bmp" => Some(mime::IMAGE_BMP),
        "webp" => "image/webp".parse().ok(),
        _ => None,
    }
}

/// Build a `data:` URL for local previews.
pub fn data_url(bytes: &[u8], mime: &Mime) -> String {
    format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes))
}

/// An image picked in a form, held in memory until the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: Mime,
    pub bytes: Vec<u8>,
    pub preview: String,
}

impl SelectedFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let mime = image_mime(path).ok_or_else(|| AssetError::NotAnImage(path.to_path_buf()))?;

        let io_err = |source| AssetError::Io { path: path.to_path_buf(), source };
        let size = fs::metadata(path).map_err(io_err)?.len();
        if size > MAX_ICON_BYTES {
            return Err(AssetError::TooLarge { path: path.to_path_buf(), size });
        }
        let bytes = fs::read(path).map_err(io_err)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "icon".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            preview: data_url(&bytes, &mime),
            mime,
            bytes,
        })
    }

    /// Human-readable size, e.g. `12.3 KB`.
    pub fn size_label(&self) -> String {
        let len = self.bytes.len() as f64;
        if len >= 1024.0 * 1024.0 {
            format!("{:.1} MB", len / (1024.0 * 1024.0))
        } else {
            format!("{:.1} KB", len / 1024.0)
        }
    }
}

/// What a form should show for its icon: the local preview when a file is
/// staged, otherwise the resolved stored URL.
pub fn preview_source(selected: Option<&SelectedFile>, icon: &str, origin: &str) -> Option<String> {
    match selected {
        Some(file) => Some(file.preview.clone()),
        None if icon.is_empty() => None,
        None if icon.starts_with("data:") => Some(icon.to_string()),
        None => Some(resolve_asset_url(icon, origin)),
    }
}
