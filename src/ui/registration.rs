use iced::alignment::Alignment;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input};
use iced::{Element, Length};

use crate::pages::registration::{Message, RegistrationPage};
use crate::testing::TestStyle;

use super::style;

pub fn view(page: &RegistrationPage) -> Element<'_, Message> {
    let intro = column![
        text("API Testing Tool").size(24),
        text("Simplify API Testing with Automated Test Case Generation")
            .size(13)
            .color(style::TEXT_MUTED),
    ]
    .spacing(4);

    let url_input = text_input("http://localhost:8000", &page.service_url)
        .on_input(Message::UrlChanged)
        .on_submit(Message::RegisterPressed)
        .padding(10)
        .style(style::input_style)
        .width(Length::Fill);

    let style_select = pick_list(&TestStyle::ALL[..], Some(page.test_style), Message::StyleSelected)
        .width(160)
        .style(style::pick_list_style)
        .padding([8, 10]);

    let fetch_label = if page.fetching { "Fetching..." } else { "Fetch OpenAPI Spec" };
    let fetch_button = button(text(fetch_label).size(13))
        .on_press_maybe(page.can_fetch().then_some(Message::FetchSpecPressed))
        .padding([8, 14])
        .style(style::primary_button);

    let register_label = if page.registering { "Registering..." } else { "Register API" };
    let register_button = button(text(register_label).size(13))
        .on_press_maybe(page.can_register().then_some(Message::RegisterPressed))
        .padding([8, 14])
        .style(style::primary_button);

    let form = column![
        text("Register Your API").size(18),
        text("Input your FastAPI URL to fetch and register the OpenAPI specification.")
            .size(12)
            .color(style::TEXT_MUTED),
        labelled("FastAPI Link:", url_input.into()),
        labelled("Test Type:", style_select.into()),
        row![fetch_button, register_button].spacing(10),
    ]
    .spacing(12);

    let mut content = column![intro, form].spacing(20).padding(24).max_width(860.0);

    if let Some(spec) = &page.spec {
        let toggle_label = if page.spec_expanded {
            "▼ View OpenAPI Specification"
        } else {
            "▶ View OpenAPI Specification"
        };
        let mut spec_section = column![
            button(text(toggle_label).size(12))
                .on_press(Message::SpecToggled)
                .padding([6, 10])
                .style(style::subtle_button)
        ]
        .spacing(8);
        if page.spec_expanded {
            spec_section = spec_section.push(
                scrollable(super::code_block(spec.clone())).height(Length::Fixed(320.0)),
            );
        }
        content = content.push(spec_section);
    }

    if let Some(notice) = &page.notice {
        content = content.push(super::notice(notice));
    }

    let mut actions = row![
        button(text("View Registered APIs").size(13))
            .on_press(Message::ViewRegisteredPressed)
            .padding([8, 14])
            .style(style::subtle_button)
    ]
    .spacing(10);
    if page.bundle.is_some() {
        actions = actions.push(
            button(text("View Test Results").size(13))
                .on_press(Message::ViewResultsPressed)
                .padding([8, 14])
                .style(style::primary_button),
        );
    }
    content = content.push(actions);

    scrollable(container(content).center_x(Length::Fill))
        .height(Length::Fill)
        .into()
}

fn labelled<'a>(label: &'a str, field: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(13).width(110), field]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
}
