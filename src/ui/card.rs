use iced::widget::{button, column, container, horizontal_rule, horizontal_space, image, row, text, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::format::{format_currency, format_date};
use crate::state::data::Project;
use crate::Message;

/// Width of one card in the grid
pub const CARD_WIDTH: f32 = 320.0;

/// One project card: photo, title, actions, money and dates.
/// `confirming` swaps the delete button for a confirm/cancel pair.
pub fn project_card<'a>(
    project: &'a Project,
    photo: Option<&'a image::Handle>,
    confirming: bool,
) -> Element<'a, Message> {
    let mut content = Column::new().spacing(10);

    if let Some(handle) = photo {
        content = content.push(
            image(handle.clone())
                .width(Length::Fill)
                .height(180)
                .content_fit(ContentFit::Cover),
        );
    }

    let actions: Element<Message> = if confirming {
        row![
            text("Delete?").size(14),
            button("Delete")
                .style(button::danger)
                .on_press(Message::ConfirmDelete(project.id.clone())),
            button("Cancel")
                .style(button::secondary)
                .on_press(Message::CancelDelete),
        ]
        .spacing(6)
        .align_y(Alignment::Center)
        .into()
    } else {
        row![
            button("Edit")
                .style(button::text)
                .on_press(Message::EditProject(project.id.clone())),
            button("Delete")
                .style(button::text)
                .on_press(Message::RequestDelete(project.id.clone())),
        ]
        .spacing(4)
        .into()
    };

    content = content.push(
        row![text(&project.title).size(22).width(Length::Fill), actions]
            .spacing(8)
            .align_y(Alignment::Center),
    );

    if project.is_delivered() {
        content = content.push(text("Delivered").size(13).style(text::success));
    }

    if !project.size.is_empty() {
        content = content.push(text(format!("Size: {}", project.size)).size(14));
    }
    content = content.push(text(format!("Quantity: {}", project.quantity)).size(14));

    let mut money = column![
        amount_line("Total", project.total),
        amount_line("Deposit", project.deposit),
    ]
    .spacing(4);
    if project.shows_pending() {
        money = money.push(amount_line("Pending", project.pending()));
    }
    content = content.push(horizontal_rule(1)).push(money);

    let mut dates = column![text(format!("Ordered: {}", format_date(Some(project.order_date)))).size(14)]
        .spacing(4);
    if project.estimated_delivery_date.is_some() {
        dates = dates.push(
            text(format!(
                "Estimated delivery: {}",
                format_date(project.estimated_delivery_date)
            ))
            .size(14),
        );
    }
    if project.is_delivered() {
        dates = dates.push(
            text(format!("Delivered: {}", format_date(project.delivered_date)))
                .size(14)
                .style(text::success),
        );
    }
    content = content.push(horizontal_rule(1)).push(dates);

    container(content)
        .width(CARD_WIDTH)
        .padding(16)
        .style(container::rounded_box)
        .into()
}

fn amount_line<'a>(label: &'a str, amount: f64) -> Element<'a, Message> {
    row![
        text(format!("{label}:")).size(14),
        horizontal_space(),
        text(format_currency(amount)).size(14),
    ]
    .into()
}
