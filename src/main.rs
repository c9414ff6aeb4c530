use clap::Parser;
use iced::widget::{column, container, horizontal_rule, scrollable, text};
use iced::{Element, Length, Task, Theme};

mod config;
mod media;
mod state;
mod ui;

use media::ContactImage;
use state::{ContactId, Directory, DraftTicket, SubmitOutcome};

/// Main application state
struct ContactList {
    /// Saved contacts and the form draft
    directory: Directory,
    /// Status message to display to the user
    status: String,
    theme: Theme,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    EmailChanged(String),
    NumberChanged(String),
    /// User clicked the image picker button
    ChooseImage,
    /// Background decode finished for the draft identified by the ticket
    ImageLoaded(DraftTicket, Result<ContactImage, String>),
    Submit,
    Edit(ContactId),
    CancelEdit,
    Delete(ContactId),
}

impl ContactList {
    /// Create a new instance of the application
    fn new(theme: Theme) -> (Self, Task<Message>) {
        tracing::info!("contact list started");
        (
            ContactList {
                directory: Directory::new(),
                status: String::from("Ready."),
                theme,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NameChanged(name) => self.directory.set_name(name),
            Message::EmailChanged(email) => self.directory.set_email(email),
            Message::NumberChanged(number) => self.directory.set_number(number),
            Message::ChooseImage => {
                if let Some(path) = media::pick_image() {
                    self.status = format!("Loading {}...", path.display());

                    // Remember which draft asked, the user may move on before decoding ends
                    let ticket = self.directory.ticket();
                    return Task::perform(media::load_thumbnail(path), move |result| {
                        Message::ImageLoaded(ticket, result.map_err(|err| err.to_string()))
                    });
                }
            }
            Message::ImageLoaded(ticket, Ok(picture)) => {
                let file_name = picture.file_name().to_string();
                let (width, height) = picture.dimensions();
                if self.directory.attach_image(ticket, picture) {
                    self.status = format!("Chose image {file_name} ({width}x{height}).");
                } else {
                    // The form moved on while decoding
                    self.status = String::from("Ready.");
                }
            }
            Message::ImageLoaded(_, Err(reason)) => {
                tracing::warn!(%reason, "failed to load contact image");
                self.status = format!("Could not load image: {reason}");
            }
            Message::Submit => {
                let outcome = self.directory.submit();
                if let Some(status) = describe(&outcome, &self.directory) {
                    self.status = status;
                }
            }
            Message::Edit(id) => {
                if self.directory.begin_edit(id) {
                    self.status = format!("Editing contact {id}.");
                }
            }
            Message::CancelEdit => {
                self.directory.cancel_edit();
                self.status = String::from("Edit cancelled.");
            }
            Message::Delete(id) => {
                if let Some(removed) = self.directory.remove(id) {
                    self.status = format!("Deleted {}.", removed.name);
                }
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let draft = self.directory.draft();

        let content = column![
            text("Contact List").size(40),
            ui::form::contact_form(draft),
            text(&self.status).size(14),
            horizontal_rule(1.0),
            text("Saved Contacts").size(28),
            ui::card::contact_grid(self.directory.contacts(), draft.editing()),
        ]
        .spacing(20)
        .padding(40);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

/// Status line for a submit; a rejected form keeps the previous status
fn describe(outcome: &SubmitOutcome, directory: &Directory) -> Option<String> {
    let name_of = |id: ContactId| {
        directory
            .get(id)
            .map(|contact| contact.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    match *outcome {
        SubmitOutcome::Added(id) => Some(format!("Added {}.", name_of(id))),
        SubmitOutcome::Updated(id) => Some(format!("Updated {}.", name_of(id))),
        SubmitOutcome::Stale(id) => Some(format!("Contact {id} no longer exists.")),
        // Only the inline email message is shown to the user
        SubmitOutcome::Rejected(_) => None,
    }
}

fn main() -> iced::Result {
    let args = config::Args::parse();
    config::init_logging(&args.log);

    let theme = args.theme.theme();
    iced::application("Contact List", ContactList::update, ContactList::view)
        .theme(ContactList::theme)
        .centered()
        .run_with(move || ContactList::new(theme))
}
