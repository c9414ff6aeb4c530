use iced::widget::{button, column, row, text, text_input, Row};
use iced::{Alignment, Element, Length};

use crate::state::Draft;
use crate::Message;

/// Width of the field labels, so the inputs line up
const LABEL_WIDTH: f32 = 140.0;

/// Label of the submit button for the current mode
pub fn submit_label(draft: &Draft) -> &'static str {
    if draft.is_editing() {
        "Update Contact"
    } else {
        "Add Contact"
    }
}

/// Caption next to the image picker
pub fn image_caption(draft: &Draft) -> &str {
    draft
        .image
        .as_ref()
        .map(|picture| picture.file_name())
        .unwrap_or("No image chosen")
}

/// The contact form. Enter in any field submits.
pub fn contact_form(draft: &Draft) -> Element<'_, Message> {
    let name = labelled(
        "Name:",
        text_input("Name", &draft.name)
            .on_input(Message::NameChanged)
            .on_submit(Message::Submit),
    );

    let mut email = labelled(
        "Email:",
        text_input("name@example.com", &draft.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::Submit),
    );
    if let Some(message) = draft.validation_message() {
        email = email.push(text(message).size(14).style(text::danger));
    }

    let number = labelled(
        "Contact Number:",
        text_input("Phone", &draft.number)
            .on_input(Message::NumberChanged)
            .on_submit(Message::Submit),
    );

    let picture = row![
        text("Choose Image:").width(Length::Fixed(LABEL_WIDTH)),
        button("Browse...").on_press(Message::ChooseImage),
        text(image_caption(draft)).size(14),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut actions = row![button(submit_label(draft)).on_press(Message::Submit).padding(10)].spacing(12);
    if draft.is_editing() {
        actions = actions.push(
            button("Cancel")
                .on_press(Message::CancelEdit)
                .style(button::secondary)
                .padding(10),
        );
    }

    column![name, email, number, picture, actions]
        .spacing(12)
        .max_width(640.0)
        .into()
}

fn labelled<'a>(label: &'a str, input: text_input::TextInput<'a, Message>) -> Row<'a, Message> {
    row![text(label).width(Length::Fixed(LABEL_WIDTH)), input]
        .spacing(12)
        .align_y(Alignment::Center)
}
