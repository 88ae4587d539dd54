use iced::widget::{button, column, container, row, text, Row};
use iced::{Element, Length};

use crate::state::derive::{Filter, Stats};
use crate::Message;

/// The three counters above the grid
pub fn stats_row<'a>(stats: Stats) -> Element<'a, Message> {
    row![
        stat_box("Total projects", stats.total, text::base),
        stat_box("In progress", stats.active, text::primary),
        stat_box("Delivered", stats.delivered, text::success),
    ]
    .spacing(24)
    .into()
}

fn stat_box<'a>(
    label: &'a str,
    value: usize,
    style: fn(&iced::Theme) -> text::Style,
) -> Element<'a, Message> {
    container(column![text(label).size(14), text(value.to_string()).size(32).style(style)].spacing(8))
        .width(Length::Fill)
        .padding(20)
        .style(container::rounded_box)
        .into()
}

/// All / In progress / Delivered buttons, the selected one highlighted
pub fn filter_bar<'a>(selected: Filter) -> Element<'a, Message> {
    Filter::ALL
        .into_iter()
        .fold(Row::new().spacing(12), |bar, filter| {
            let style = if filter == selected {
                button::primary
            } else {
                button::secondary
            };
            bar.push(
                button(filter.label())
                    .style(style)
                    .padding([8, 16])
                    .on_press(Message::SetFilter(filter)),
            )
        })
        .into()
}
