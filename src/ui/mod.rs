/// View projection
///
/// Pure functions from directory state to widgets:
/// - The contact form (form.rs)
/// - Saved contact cards (card.rs)
/// - Placeholder avatar canvas (avatar.rs)

pub mod avatar;
pub mod card;
pub mod form;
