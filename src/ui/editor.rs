use iced::widget::{button, column, container, image, row, scrollable, text, text_input, Column};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::form::{Field, ProjectForm};
use crate::Message;

/// The create/edit dialog content
pub fn project_form<'a>(
    form: &'a ProjectForm,
    photo: Option<&'a image::Handle>,
    status: &'a str,
) -> Element<'a, Message> {
    let heading = if form.is_editing() { "Edit project" } else { "New project" };
    let submit = if form.is_editing() { "Save changes" } else { "Create project" };

    let photo_section: Element<Message> = match photo {
        Some(handle) => row![
            image(handle.clone())
                .width(160)
                .height(120)
                .content_fit(ContentFit::Contain),
            column![
                button("Change photo").on_press(Message::PickPhoto),
                button("Remove photo")
                    .style(button::secondary)
                    .on_press(Message::RemovePhoto),
            ]
            .spacing(8),
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .into(),
        None => button("Choose a photo")
            .style(button::secondary)
            .on_press(Message::PickPhoto)
            .into(),
    };

    let mut content = column![
        text(heading).size(28),
        input(form, Field::Title, "Project title *", "e.g. Superhero figure"),
        row![
            input(form, Field::Size, "Size", "e.g. 15x10x8 cm"),
            input(form, Field::Quantity, "Quantity *", "1"),
        ]
        .spacing(16),
        row![
            input(form, Field::Deposit, "Deposit ($)", "0.00"),
            input(form, Field::Total, "Total ($) *", "0.00"),
        ]
        .spacing(16),
        row![
            input(form, Field::OrderDate, "Order date *", "YYYY-MM-DD"),
            input(form, Field::CurrentStateDate, "Current state date *", "YYYY-MM-DD"),
        ]
        .spacing(16),
        row![
            input(form, Field::EstimatedDeliveryDate, "Estimated delivery", "YYYY-MM-DD"),
            input(form, Field::DeliveredDate, "Delivered on", "YYYY-MM-DD"),
        ]
        .spacing(16),
        text("Project photo").size(14),
        photo_section,
    ]
    .spacing(16);

    if !status.is_empty() {
        content = content.push(text(status).size(14).style(text::danger));
    }

    content = content.push(
        row![
            button(text(submit).width(Length::Fill).align_x(Alignment::Center))
                .width(Length::Fill)
                .padding(12)
                .on_press(Message::SaveProject),
            button(text("Cancel").width(Length::Fill).align_x(Alignment::Center))
                .width(Length::Fill)
                .padding(12)
                .style(button::secondary)
                .on_press(Message::CancelForm),
        ]
        .spacing(12),
    );

    container(scrollable(content.padding(24)))
        .max_width(720.0)
        .max_height(760.0)
        .style(container::rounded_box)
        .into()
}

/// Labelled text input with its inline error
fn input<'a>(
    form: &'a ProjectForm,
    field: Field,
    label: &'a str,
    placeholder: &'a str,
) -> Element<'a, Message> {
    let mut column = Column::new().spacing(6).width(Length::Fill).push(text(label).size(14)).push(
        text_input(placeholder, form.value(field))
            .on_input(move |value| Message::FieldChanged(field, value))
            .on_submit(Message::SaveProject)
            .padding(8),
    );

    if let Some(error) = form.errors.get(field) {
        column = column.push(text(error).size(12).style(text::danger));
    }

    column.into()
}
