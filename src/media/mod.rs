/// Contact picture handling
///
/// This module handles:
/// - Picking an image file with the native dialog
/// - Decoding and shrinking it to an in-memory thumbnail
/// - Sharing and releasing the decoded pixels

pub mod thumbnail;

pub use thumbnail::{load_thumbnail, pick_image, ContactImage, ThumbnailError};
