/// User interface module
///
/// This module builds the views of the application:
/// - Project cards (card.rs)
/// - The create/edit form (editor.rs)
/// - Counters and filter buttons (summary.rs)
/// - Display formatting helpers (format.rs)

pub mod card;
pub mod editor;
pub mod format;
pub mod summary;

use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

/// Show `content` above `base`, dimming and blocking the background.
/// Clicking outside the content emits `on_blur`.
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.6,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
