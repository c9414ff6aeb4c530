/// Placeholder avatar for contacts without a picture
/// Draws a filled circle with the contact's initial
use iced::alignment;
use iced::widget::canvas::{self, Path};
use iced::{Color, Pixels, Point, Rectangle};

use crate::Message;

/// Initial-in-a-circle avatar
#[derive(Debug, Clone)]
pub struct Placeholder {
    pub initial: char,
}

impl Placeholder {
    pub fn for_name(name: &str) -> Self {
        Self {
            initial: initial_for(name),
        }
    }
}

/// First letter or digit of the name, upper-cased; `?` if there is none
pub fn initial_for(name: &str) -> char {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

impl canvas::Program<Message> for Placeholder {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let palette = theme.extended_palette();

        let center = frame.center();
        let radius = bounds.width.min(bounds.height) / 2.0;
        frame.fill(&Path::circle(center, radius), palette.primary.weak.color);

        frame.fill_text(canvas::Text {
            content: self.initial.to_string(),
            position: Point::new(center.x, center.y),
            color: Color::WHITE,
            size: Pixels(radius),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Center,
            ..canvas::Text::default()
        });

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_skips_punctuation() {
        assert_eq!(initial_for("ann"), 'A');
        assert_eq!(initial_for("  (bob)"), 'B');
        assert_eq!(initial_for("7eleven"), '7');
    }

    #[test]
    fn test_initial_falls_back() {
        assert_eq!(initial_for(""), '?');
        assert_eq!(initial_for("--"), '?');
    }
}
