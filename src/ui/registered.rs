use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text};
use iced::{Element, Length};

use crate::http::response::RegisteredService;
use crate::pages::registered::{LoadState, Message, RegisteredPage};
use crate::testing::results::format_timestamp;

use super::style;

pub fn view(page: &RegisteredPage) -> Element<'_, Message> {
    let body: Element<'_, Message> = match &page.state {
        LoadState::Loading => text("Loading APIs...").size(14).color(style::TEXT_MUTED).into(),
        LoadState::Failed(message) => text(message.clone()).size(14).color(style::DANGER).into(),
        LoadState::Loaded(services) if services.is_empty() => text("No APIs registered yet.")
            .size(14)
            .color(style::TEXT_MUTED)
            .into(),
        LoadState::Loaded(services) => table(services),
    };

    let content = column![
        text("Registered APIs").size(24),
        text("List of all registered APIs and their test types.")
            .size(13)
            .color(style::TEXT_MUTED),
        body,
    ]
    .spacing(14)
    .padding(24);

    scrollable(container(content).width(Length::Fill))
        .height(Length::Fill)
        .into()
}

fn table(services: &[RegisteredService]) -> Element<'_, Message> {
    let header = row![
        cell("S.No.", 1),
        cell("API URL", 5),
        cell("Test Type", 2),
        cell("Registered", 3),
        cell("Last Status", 2),
        cell("Actions", 2),
    ]
    .spacing(8);

    let mut rows = column![header, horizontal_rule(1)].spacing(6);
    for (index, service) in services.iter().enumerate() {
        let status = if service.last_test_result { "PASSED" } else { "FAILED" };
        rows = rows.push(
            row![
                text((index + 1).to_string()).size(13).width(Length::FillPortion(1)),
                text(service.url.clone()).size(13).width(Length::FillPortion(5)),
                text(service.test_style.clone()).size(13).width(Length::FillPortion(2)),
                text(format_timestamp(&service.registration_time))
                    .size(13)
                    .width(Length::FillPortion(3)),
                container(super::badge(status.to_string(), service.last_test_result))
                    .width(Length::FillPortion(2)),
                container(
                    button(text("View Results").size(12))
                        .on_press(Message::ViewResultsPressed(index))
                        .padding([4, 10])
                        .style(style::subtle_button),
                )
                .width(Length::FillPortion(2)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    container(rows)
        .padding(12)
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

fn cell(label: &str, portion: u16) -> Element<'_, Message> {
    text(label)
        .size(12)
        .color(style::TEXT_MUTED)
        .width(Length::FillPortion(portion))
        .into()
}
