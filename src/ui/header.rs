use iced::alignment::Alignment;
use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Element, Length};

use crate::{Message, Route};

use super::style;

pub fn view<'a>(active: Route) -> Element<'a, Message> {
    let mut nav = row![].spacing(4);
    for route in Route::ALL {
        let is_active = route == active;
        nav = nav.push(
            button(text(route.to_string()).size(12))
                .on_press(Message::Navigate(route))
                .padding([6, 12])
                .style(move |theme, status| style::nav_button(is_active, theme, status)),
        );
    }

    container(
        row![
            text("API Testing Tool").size(16),
            text(format!("v{}", env!("CARGO_PKG_VERSION"))).size(10).color(style::TEXT_MUTED),
            horizontal_space(),
            nav
        ]
        .spacing(8)
        .padding([6, 12])
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .style(|_| style::surface_style(style::SURFACE_1, 0.0))
    .into()
}
