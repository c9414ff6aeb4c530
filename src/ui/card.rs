use iced::font::{self, Font};
use iced::widget::{button, column, container, row, text, Canvas};
use iced::{Alignment, Border, Element, Length, Theme};
use iced_aw::Wrap;

use super::avatar::Placeholder;
use crate::state::{ContactId, ContactRecord};
use crate::Message;

/// Edge length of the picture on a card
const AVATAR_SIZE: f32 = 64.0;

/// Width of a single card in the grid
const CARD_WIDTH: f32 = 280.0;

/// All saved contacts as a wrapping grid of cards
pub fn contact_grid<'a>(
    contacts: &'a [ContactRecord],
    editing: Option<ContactId>,
) -> Element<'a, Message> {
    if contacts.is_empty() {
        return text("No contacts yet.").size(16).into();
    }

    let cards = contacts
        .iter()
        .map(|contact| contact_card(contact, editing == Some(contact.id)))
        .collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

/// One saved contact: picture, details, and its actions
pub fn contact_card(contact: &ContactRecord, is_being_edited: bool) -> Element<'_, Message> {
    let picture: Element<Message> = match &contact.image {
        Some(picture) => iced::widget::image(picture.handle())
            .width(Length::Fixed(AVATAR_SIZE))
            .height(Length::Fixed(AVATAR_SIZE))
            .into(),
        None => Canvas::new(Placeholder::for_name(&contact.name))
            .width(Length::Fixed(AVATAR_SIZE))
            .height(Length::Fixed(AVATAR_SIZE))
            .into(),
    };

    let details = column![
        text(&contact.name).size(18).font(Font {
            weight: font::Weight::Bold,
            ..Font::DEFAULT
        }),
        text(format!("Email: {}", contact.email)).size(14),
        text(format!("Phone: {}", contact.number)).size(14),
        text(format!("Added {}", contact.added_at.format("%Y-%m-%d %H:%M"))).size(12),
    ]
    .spacing(4);

    let actions = row![
        button("Edit")
            .on_press(Message::Edit(contact.id))
            .padding([4, 12]),
        button("Delete")
            .on_press(Message::Delete(contact.id))
            .style(button::danger)
            .padding([4, 12]),
    ]
    .spacing(8);

    let content = column![
        row![picture, details].spacing(12).align_y(Alignment::Center),
        actions,
    ]
    .spacing(12);

    container(content)
        .width(Length::Fixed(CARD_WIDTH))
        .padding(12)
        .style(move |theme: &Theme| card_style(theme, is_being_edited))
        .into()
}

/// Card frame; the card being edited gets a highlighted border
fn card_style(theme: &Theme, is_being_edited: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (color, width) = if is_being_edited {
        (palette.primary.strong.color, 2.0)
    } else {
        (palette.background.strong.color, 1.0)
    };

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color,
            width,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
