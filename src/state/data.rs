/// Shared data structures for the contact directory
///
/// These structs represent the records held by the directory
/// and rendered by the UI layer.

use chrono::{DateTime, Local};
use std::fmt;

use crate::media::ContactImage;

/// Identifier of a contact, unique for the lifetime of a directory.
/// Ids are handed out from a counter and never reused after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(u64);

impl ContactId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[cfg(test)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single saved contact
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    /// Unique directory ID
    pub id: ContactId,
    /// Display name, never blank
    pub name: String,
    /// Email address, always passes `is_valid_email`
    pub email: String,
    /// Phone number as typed
    pub number: String,
    /// Chosen picture; `None` renders the placeholder avatar
    pub image: Option<ContactImage>,
    /// When the contact was first added (updates keep the original value)
    pub added_at: DateTime<Local>,
}

impl ContactRecord {
    /// Whether this card shows a real picture
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}
