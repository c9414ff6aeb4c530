use iced::widget::image::Handle;
use image::imageops::FilterType;
use rfd::FileDialog;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task;

/// Largest edge of a contact picture, in pixels
const THUMBNAIL_SIZE: u32 = 256;

/// Extensions offered by the file picker
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Errors while turning a chosen file into a contact picture
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a supported image")]
    UnsupportedFormat(PathBuf),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("thumbnail task failed: {0}")]
    Join(#[from] task::JoinError),
}

/// Decoded pixels shared by every holder of a `ContactImage`.
/// Dropped, and its memory freed, when the last holder lets go.
struct Thumbnail {
    file_name: String,
    width: u32,
    height: u32,
    handle: Handle,
}

impl Drop for Thumbnail {
    fn drop(&mut self) {
        tracing::debug!(file = %self.file_name, "released contact image");
    }
}

/// In-memory picture attached to a draft or a saved contact.
///
/// Clones share the same pixels. Nothing is written to disk; the data lives
/// exactly as long as the draft or record holding it.
#[derive(Clone)]
pub struct ContactImage {
    inner: Arc<Thumbnail>,
}

impl ContactImage {
    /// Wrap already decoded RGBA8 pixels
    pub fn from_rgba(file_name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(Thumbnail {
                file_name: file_name.into(),
                width,
                height,
                handle: Handle::from_rgba(width, height, pixels),
            }),
        }
    }

    /// Name of the file the picture was loaded from
    pub fn file_name(&self) -> &str {
        &self.inner.file_name
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Renderer handle for the image widget
    pub fn handle(&self) -> Handle {
        self.inner.handle.clone()
    }

    /// How many drafts and records currently hold this picture
    #[cfg(test)]
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl PartialEq for ContactImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ContactImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactImage")
            .field("file_name", &self.inner.file_name)
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .finish()
    }
}

/// Show the native file picker, filtered to image files.
/// Starts in the user's picture folder when there is one.
pub fn pick_image() -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Choose Contact Image")
        .add_filter("Images", &IMAGE_EXTENSIONS);

    if let Some(pictures) = dirs::picture_dir() {
        dialog = dialog.set_directory(pictures);
    }

    dialog.pick_file()
}

/// Load a picture for a contact
///
/// Decoding and resizing are CPU-bound, so they run on the blocking pool.
pub async fn load_thumbnail(path: PathBuf) -> Result<ContactImage, ThumbnailError> {
    task::spawn_blocking(move || load_thumbnail_blocking(&path)).await?
}

/// Blocking implementation of thumbnail loading
fn load_thumbnail_blocking(path: &Path) -> Result<ContactImage, ThumbnailError> {
    let bytes = std::fs::read(path).map_err(|source| ThumbnailError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // Sniff the content instead of trusting the extension
    let format = image::guess_format(&bytes)
        .map_err(|_| ThumbnailError::UnsupportedFormat(path.to_path_buf()))?;
    let mut img = image::load_from_memory_with_format(&bytes, format)?;

    // Shrink large pictures, never enlarge small ones
    if img.width() > THUMBNAIL_SIZE || img.height() > THUMBNAIL_SIZE {
        img = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    tracing::debug!(file = %file_name, width, height, "loaded contact image");
    Ok(ContactImage::from_rgba(file_name, width, height, rgba.into_raw()))
}
