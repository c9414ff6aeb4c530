/// Working values of the contact form
///
/// The draft mirrors what the user has typed so far. It is either in
/// create mode (`editing` is `None`) or in edit mode for one saved contact.
/// Nothing here touches the saved contacts; `Directory` decides when a
/// draft becomes a record.

use thiserror::Error;

use super::data::{ContactId, ContactRecord};
use super::email::{is_blank_field, is_valid_email, INVALID_EMAIL_MESSAGE};
use crate::media::ContactImage;

/// Why a draft cannot be saved yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email has an invalid format")]
    InvalidEmail,
    #[error("contact number is required")]
    MissingNumber,
}

/// Identifies one incarnation of the draft.
///
/// Every reset or re-population of the draft hands out a new ticket, so
/// work started against an older draft (an image still decoding, say) can
/// tell that its result no longer belongs anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftTicket(u64);

impl DraftTicket {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub number: String,
    pub image: Option<ContactImage>,
    validation_message: Option<&'static str>,
    editing: Option<ContactId>,
    ticket: DraftTicket,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the contact being edited, `None` in create mode
    pub fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Inline message for the email field, if the current value is malformed
    pub fn validation_message(&self) -> Option<&'static str> {
        self.validation_message
    }

    pub fn ticket(&self) -> DraftTicket {
        self.ticket
    }

    /// Replace the email and re-run the shape check.
    /// Runs on every keystroke, so an emptied field also shows the message.
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.validation_message = (!is_valid_email(&self.email)).then_some(INVALID_EMAIL_MESSAGE);
    }

    /// Check the draft can be saved.
    /// Blank means empty after trimming whitespace.
    pub fn validate(&self) -> Result<(), DraftError> {
        if is_blank_field(&self.name) {
            return Err(DraftError::MissingName);
        }
        if is_blank_field(&self.email) {
            return Err(DraftError::MissingEmail);
        }
        if !is_valid_email(&self.email) {
            return Err(DraftError::InvalidEmail);
        }
        if is_blank_field(&self.number) {
            return Err(DraftError::MissingNumber);
        }
        Ok(())
    }

    /// True when the form is empty and in create mode
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.number.is_empty()
            && self.image.is_none()
            && self.validation_message.is_none()
            && self.editing.is_none()
    }

    /// Back to an empty create-mode form. Any pending image is released.
    pub fn reset(&mut self) {
        let ticket = self.ticket.next();
        *self = Self {
            ticket,
            ..Self::default()
        };
    }

    /// Load a saved contact into the form for editing.
    /// The image field starts empty; choosing one replaces the saved picture.
    pub(crate) fn populate(&mut self, record: &ContactRecord) {
        self.reset();
        self.name = record.name.clone();
        self.set_email(record.email.clone());
        self.number = record.number.clone();
        self.editing = Some(record.id);
    }
}
