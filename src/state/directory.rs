use chrono::Local;

use super::data::{ContactId, ContactRecord};
use super::draft::{Draft, DraftError, DraftTicket};
use crate::media::ContactImage;

/// Result of submitting the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new contact was appended
    Added(ContactId),
    /// The edited contact was saved
    Updated(ContactId),
    /// The edited contact no longer exists; the form was cleared
    Stale(ContactId),
    /// The form is incomplete or malformed and was left as is
    Rejected(DraftError),
}

/// The Directory holds every saved contact plus the form draft.
///
/// All changes go through the command methods below. Each one runs to
/// completion on the UI thread, so callers never see a half-applied change.
#[derive(Debug)]
pub struct Directory {
    contacts: Vec<ContactRecord>,
    next_id: u64,
    draft: Draft,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// Create an empty directory in create mode
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
            draft: Draft::new(),
        }
    }

    /// Saved contacts in insertion order
    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&ContactRecord> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    /// Ticket of the current draft, to be handed back to `attach_image`
    pub fn ticket(&self) -> DraftTicket {
        self.draft.ticket()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.set_email(email.into());
    }

    pub fn set_number(&mut self, number: impl Into<String>) {
        self.draft.number = number.into();
    }

    /// Put a freshly loaded image into the draft.
    ///
    /// Returns false (and drops the image) if the draft has been reset or
    /// re-populated since `ticket` was taken.
    pub fn attach_image(&mut self, ticket: DraftTicket, image: ContactImage) -> bool {
        if ticket != self.draft.ticket() {
            tracing::debug!(file = image.file_name(), "discarding image for an outdated form");
            return false;
        }
        self.draft.image = Some(image);
        true
    }

    /// Save the draft: update the edited contact, or append a new one.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.draft.editing() {
            Some(id) => self.update_contact(id),
            None => self.add_contact(),
        }
    }

    fn add_contact(&mut self) -> SubmitOutcome {
        if let Err(err) = self.draft.validate() {
            tracing::debug!(%err, "contact not added");
            return SubmitOutcome::Rejected(err);
        }

        let id = ContactId::new(self.next_id);
        self.next_id += 1;

        let record = ContactRecord {
            id,
            name: std::mem::take(&mut self.draft.name),
            email: std::mem::take(&mut self.draft.email),
            number: std::mem::take(&mut self.draft.number),
            image: self.draft.image.take(),
            added_at: Local::now(),
        };
        tracing::info!(%id, name = %record.name, has_image = record.has_image(), "contact added");

        self.contacts.push(record);
        self.draft.reset();
        SubmitOutcome::Added(id)
    }

    fn update_contact(&mut self, id: ContactId) -> SubmitOutcome {
        let Some(index) = self.contacts.iter().position(|contact| contact.id == id) else {
            tracing::debug!(%id, "edited contact is gone, clearing form");
            self.draft.reset();
            return SubmitOutcome::Stale(id);
        };

        if let Err(err) = self.draft.validate() {
            tracing::debug!(%id, %err, "contact not updated");
            return SubmitOutcome::Rejected(err);
        }

        let contact = &mut self.contacts[index];
        contact.name = std::mem::take(&mut self.draft.name);
        contact.email = std::mem::take(&mut self.draft.email);
        contact.number = std::mem::take(&mut self.draft.number);
        if let Some(image) = self.draft.image.take() {
            // The previous picture is released here
            contact.image = Some(image);
        }
        tracing::info!(%id, name = %contact.name, "contact updated");

        self.draft.reset();
        SubmitOutcome::Updated(id)
    }

    /// Load a saved contact into the form.
    /// Returns false, leaving the draft untouched, if no contact has `id`.
    pub fn begin_edit(&mut self, id: ContactId) -> bool {
        let Some(contact) = self.contacts.iter().find(|contact| contact.id == id) else {
            tracing::debug!(%id, "cannot edit unknown contact");
            return false;
        };
        if let Some(previous) = self.draft.editing().filter(|&previous| previous != id) {
            tracing::debug!(%previous, %id, "switching edit target");
        }
        self.draft.populate(contact);
        tracing::debug!(%id, "editing contact");
        true
    }

    /// Leave edit mode and clear the form
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.draft.editing() {
            tracing::debug!(%id, "edit cancelled");
        }
        self.draft.reset();
    }

    /// Delete a contact, returning it so the caller decides when its image
    /// goes away. Deleting the contact being edited also cancels the edit.
    pub fn remove(&mut self, id: ContactId) -> Option<ContactRecord> {
        let Some(index) = self.contacts.iter().position(|contact| contact.id == id) else {
            tracing::debug!(%id, "nothing to delete");
            return None;
        };
        let removed = self.contacts.remove(index);
        tracing::info!(%id, name = %removed.name, "contact deleted");

        if self.draft.editing() == Some(id) {
            self.cancel_edit();
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::email::{is_blank_field, is_valid_email};
    use proptest::prelude::*;

    fn image(name: &str) -> ContactImage {
        ContactImage::from_rgba(name, 1, 1, vec![0, 0, 0, 255])
    }

    fn fill(directory: &mut Directory, name: &str, email: &str, number: &str) {
        directory.set_name(name);
        directory.set_email(email);
        directory.set_number(number);
    }

    fn add(directory: &mut Directory, name: &str, email: &str, number: &str) -> ContactId {
        fill(directory, name, email, number);
        match directory.submit() {
            SubmitOutcome::Added(id) => id,
            other => panic!("expected Added, got {:?}", other),
        }
    }

    #[test]
    fn test_add_appends_one_record() {
        let mut directory = Directory::new();

        let id = add(&mut directory, "Ann", "a@b.com", "123");

        assert_eq!(directory.len(), 1);
        let contact = directory.get(id).unwrap();
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.email, "a@b.com");
        assert_eq!(contact.number, "123");
        assert!(contact.image.is_none());
        assert!(directory.draft().is_blank());
    }

    #[test]
    fn test_add_rejects_incomplete_draft() {
        let cases = [
            ("", "x", "5", DraftError::MissingName),
            ("  ", "a@b.com", "5", DraftError::MissingName),
            ("Ann", "", "5", DraftError::MissingEmail),
            ("Ann", "a@b", "5", DraftError::InvalidEmail),
            ("Ann", "a@b.com", " ", DraftError::MissingNumber),
        ];

        for (name, email, number, expected) in cases {
            let mut directory = Directory::new();
            fill(&mut directory, name, email, number);

            assert_eq!(directory.submit(), SubmitOutcome::Rejected(expected));
            assert!(directory.is_empty());
            // The form keeps what was typed
            assert_eq!(directory.draft().name, name);
            assert_eq!(directory.draft().email, email);
            assert_eq!(directory.draft().number, number);
        }
    }

    #[test]
    fn test_add_moves_draft_image_into_record() {
        let mut directory = Directory::new();
        let picture = image("ann.png");
        let ticket = directory.ticket();
        assert!(directory.attach_image(ticket, picture.clone()));

        let id = add(&mut directory, "Ann", "a@b.com", "123");

        assert_eq!(directory.get(id).unwrap().image.as_ref(), Some(&picture));
        assert!(directory.draft().image.is_none());
        assert_eq!(picture.holders(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut directory = Directory::new();
        let first = add(&mut directory, "Ann", "a@b.com", "1");
        let second = add(&mut directory, "Bob", "b@b.com", "2");

        directory.remove(first);
        let third = add(&mut directory, "Cid", "c@b.com", "3");

        assert_ne!(third, second);
        assert_eq!(third.get(), 3);
        let ids: Vec<u64> = directory.contacts().iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_edit_then_submit_updates_only_that_record() {
        let mut directory = Directory::new();
        let ann = add(&mut directory, "Ann", "a@b.com", "123");
        let bob = add(&mut directory, "Bob", "bob@b.com", "456");
        let bob_before = directory.get(bob).unwrap().clone();
        let added_at = directory.get(ann).unwrap().added_at;

        assert!(directory.begin_edit(ann));
        assert_eq!(directory.draft().name, "Ann");
        directory.set_name("Annie");

        assert_eq!(directory.submit(), SubmitOutcome::Updated(ann));

        let contact = directory.get(ann).unwrap();
        assert_eq!(contact.name, "Annie");
        assert_eq!(contact.email, "a@b.com");
        assert_eq!(contact.number, "123");
        assert_eq!(contact.added_at, added_at);
        assert_eq!(directory.get(bob).unwrap(), &bob_before);
        assert!(!directory.is_editing());
        assert!(directory.draft().is_blank());
    }

    #[test]
    fn test_update_rejects_invalid_email() {
        let mut directory = Directory::new();
        let id = add(&mut directory, "Ann", "a@b.com", "123");

        directory.begin_edit(id);
        directory.set_email("not-an-email");

        assert_eq!(directory.submit(), SubmitOutcome::Rejected(DraftError::InvalidEmail));
        assert_eq!(directory.get(id).unwrap().email, "a@b.com");
        assert!(directory.is_editing());
        assert_eq!(directory.draft().email, "not-an-email");
    }

    #[test]
    fn test_update_keeps_image_unless_replaced() {
        let mut directory = Directory::new();
        let old = image("old.png");
        directory.attach_image(directory.ticket(), old.clone());
        let id = add(&mut directory, "Ann", "a@b.com", "123");

        directory.begin_edit(id);
        assert!(directory.draft().image.is_none());
        directory.submit();
        assert_eq!(directory.get(id).unwrap().image.as_ref(), Some(&old));

        let new = image("new.png");
        directory.begin_edit(id);
        directory.attach_image(directory.ticket(), new.clone());
        directory.submit();

        assert_eq!(directory.get(id).unwrap().image.as_ref(), Some(&new));
        assert_eq!(old.holders(), 1);
    }

    #[test]
    fn test_stale_edit_clears_form() {
        let mut directory = Directory::new();
        let id = add(&mut directory, "Ann", "a@b.com", "123");
        directory.begin_edit(id);
        // Simulate the record vanishing without going through remove
        directory.contacts.clear();

        assert_eq!(directory.submit(), SubmitOutcome::Stale(id));
        assert!(directory.is_empty());
        assert!(directory.draft().is_blank());
    }

    #[test]
    fn test_stale_edit_wins_over_invalid_draft() {
        let mut directory = Directory::new();
        let id = add(&mut directory, "Ann", "a@b.com", "123");
        directory.begin_edit(id);
        directory.set_email("broken");
        directory.contacts.clear();

        assert_eq!(directory.submit(), SubmitOutcome::Stale(id));
        assert!(directory.draft().is_blank());
    }

    #[test]
    fn test_begin_edit_unknown_id_is_noop() {
        let mut directory = Directory::new();
        add(&mut directory, "Ann", "a@b.com", "123");
        directory.set_name("typing");

        assert!(!directory.begin_edit(ContactId::new(42)));
        assert_eq!(directory.draft().name, "typing");
        assert!(!directory.is_editing());
    }

    #[test]
    fn test_begin_edit_then_cancel_restores_blank_form() {
        let mut directory = Directory::new();
        let id = add(&mut directory, "Ann", "a@b.com", "123");
        let before = directory.contacts().to_vec();

        directory.begin_edit(id);
        directory.cancel_edit();

        assert_eq!(directory.contacts(), before.as_slice());
        assert!(directory.draft().is_blank());
    }

    #[test]
    fn test_begin_edit_switches_target() {
        let mut directory = Directory::new();
        let ann = add(&mut directory, "Ann", "a@b.com", "1");
        let bob = add(&mut directory, "Bob", "bob@b.com", "2");

        directory.begin_edit(ann);
        directory.set_name("half typed");
        directory.begin_edit(bob);

        assert_eq!(directory.draft().editing(), Some(bob));
        assert_eq!(directory.draft().name, "Bob");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut directory = Directory::new();
        add(&mut directory, "Ann", "a@b.com", "123");
        let before = directory.contacts().to_vec();

        assert!(directory.remove(ContactId::new(7)).is_none());
        assert_eq!(directory.contacts(), before.as_slice());
    }

    #[test]
    fn test_remove_edited_contact_cancels_edit() {
        let mut directory = Directory::new();
        let ann = add(&mut directory, "Ann", "a@b.com", "1");
        let bob = add(&mut directory, "Bob", "bob@b.com", "2");

        directory.begin_edit(bob);
        directory.remove(ann);
        assert_eq!(directory.draft().editing(), Some(bob));

        directory.remove(bob);
        assert!(!directory.is_editing());
        assert!(directory.draft().is_blank());
    }

    #[test]
    fn test_remove_releases_image() {
        let mut directory = Directory::new();
        let picture = image("ann.png");
        directory.attach_image(directory.ticket(), picture.clone());
        let id = add(&mut directory, "Ann", "a@b.com", "123");
        assert_eq!(picture.holders(), 2);

        drop(directory.remove(id));

        assert_eq!(picture.holders(), 1);
    }

    #[test]
    fn test_outdated_ticket_is_rejected() {
        let mut directory = Directory::new();
        let ticket = directory.ticket();
        directory.cancel_edit();
        let picture = image("late.png");

        assert!(!directory.attach_image(ticket, picture.clone()));
        assert!(directory.draft().image.is_none());
        assert_eq!(picture.holders(), 1);
    }

    #[test]
    fn test_cancel_releases_pending_image() {
        let mut directory = Directory::new();
        let id = add(&mut directory, "Ann", "a@b.com", "123");
        let picture = image("pending.png");

        directory.begin_edit(id);
        directory.attach_image(directory.ticket(), picture.clone());
        assert_eq!(picture.holders(), 2);

        directory.cancel_edit();
        assert_eq!(picture.holders(), 1);
        assert!(directory.get(id).unwrap().image.is_none());
    }

    fn valid_contact() -> impl Strategy<Value = (String, String, String)> {
        (
            "[A-Za-z][A-Za-z '-]{0,11}",
            ("[a-z0-9.]{1,6}", "[a-z0-9]{1,6}", "[a-z]{2,4}")
                .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}")),
            "[0-9+ ()-]{0,6}[0-9]",
        )
    }

    fn any_field() -> impl Strategy<Value = String> {
        "[a-z@. \t]{0,7}"
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn test_valid_input_appends_exactly_one_record(
            existing in proptest::collection::vec(valid_contact(), 0..5),
            (name, email, number) in valid_contact(),
        ) {
            let mut directory = Directory::new();
            for (n, e, p) in &existing {
                add(&mut directory, n, e, p);
            }
            let before = directory.contacts().to_vec();

            fill(&mut directory, &name, &email, &number);
            let outcome = directory.submit();

            let SubmitOutcome::Added(id) = outcome else {
                return Err(TestCaseError::fail(format!("expected Added, got {:?}", outcome)));
            };
            prop_assert_eq!(directory.len(), before.len() + 1);
            prop_assert_eq!(&directory.contacts()[..before.len()], before.as_slice());
            let contact = directory.get(id).unwrap();
            prop_assert_eq!(&contact.name, &name);
            prop_assert_eq!(&contact.email, &email);
            prop_assert_eq!(&contact.number, &number);
        }

        #[test]
        fn test_incomplete_input_leaves_store_unchanged(
            name in any_field(),
            email in any_field(),
            number in any_field(),
        ) {
            let complete = !is_blank_field(&name)
                && !is_blank_field(&email)
                && is_valid_email(&email)
                && !is_blank_field(&number);
            prop_assume!(!complete);

            let mut directory = Directory::new();
            add(&mut directory, "Ann", "a@b.com", "123");
            let before = directory.contacts().to_vec();

            fill(&mut directory, &name, &email, &number);
            let outcome = directory.submit();

            prop_assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
            prop_assert_eq!(directory.contacts(), before.as_slice());
        }

        #[test]
        fn test_update_touches_only_the_edited_record(
            existing in proptest::collection::vec(valid_contact(), 1..6),
            target in any::<prop::sample::Index>(),
            (name, email, number) in valid_contact(),
        ) {
            let mut directory = Directory::new();
            for (n, e, p) in &existing {
                add(&mut directory, n, e, p);
            }
            let before = directory.contacts().to_vec();
            let id = before[target.index(before.len())].id;

            prop_assert!(directory.begin_edit(id));
            fill(&mut directory, &name, &email, &number);
            prop_assert_eq!(directory.submit(), SubmitOutcome::Updated(id));

            prop_assert_eq!(directory.len(), before.len());
            for (old, new) in before.iter().zip(directory.contacts()) {
                if old.id == id {
                    prop_assert_eq!(&new.name, &name);
                    prop_assert_eq!(&new.email, &email);
                    prop_assert_eq!(&new.number, &number);
                    prop_assert_eq!(new.added_at, old.added_at);
                } else {
                    prop_assert_eq!(new, old);
                }
            }
        }
    }
}
