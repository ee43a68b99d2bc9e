pub mod dashboard;
pub mod header;
pub mod registered;
pub mod registration;
pub mod results;
pub mod style;

use iced::widget::{column, container, text};
use iced::{Element, Font, Length};

use crate::pages::Notice;

/// Status line in the color of its severity.
pub fn notice<'a, M: 'a>(notice: &Notice) -> Element<'a, M> {
    text(notice.text.clone())
        .size(13)
        .color(style::severity_color(notice.severity))
        .into()
}

/// Titled panel used by every page.
pub fn card<'a, M: 'a>(title: &'a str, body: impl Into<Element<'a, M>>) -> Element<'a, M> {
    let body: Element<'a, M> = body.into();
    container(column![text(title).size(16), body].spacing(10))
        .padding(14)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_1, 8.0))
        .into()
}

pub fn badge<'a, M: 'a>(label: String, passed: bool) -> Element<'a, M> {
    let color = style::outcome_color(passed);
    container(text(label).size(11).color(color))
        .padding([2, 8])
        .style(move |_| style::badge_style(color))
        .into()
}

/// Read-only monospace block for code and logs.
pub fn code_block<'a, M: 'a>(content: String) -> Element<'a, M> {
    container(text(content).size(12).font(Font::MONOSPACE))
        .padding(10)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_0, 6.0))
        .into()
}
