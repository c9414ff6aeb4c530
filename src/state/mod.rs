/// State management module
///
/// This module handles all application state, including:
/// - The saved contacts and the command handlers (directory.rs)
/// - Shared data structures (data.rs)
/// - The form draft and its validation (draft.rs)
/// - The email shape check (email.rs)

pub mod data;
pub mod directory;
pub mod draft;
pub mod email;

pub use data::{ContactId, ContactRecord};
pub use directory::{Directory, SubmitOutcome};
pub use draft::{Draft, DraftError, DraftTicket};
