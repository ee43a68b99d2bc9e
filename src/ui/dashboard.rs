use iced::widget::{button, column, scrollable, text};
use iced::{Element, Length};

use crate::pages::dashboard::{DashboardPage, Message};

use super::style;

pub fn view(page: &DashboardPage) -> Element<'_, Message> {
    let run_label = if page.running { "Running..." } else { "Run Tests" };
    let mut content = column![
        text("Dashboard").size(24),
        button(text(run_label).size(13))
            .on_press_maybe((!page.running).then_some(Message::RunPressed))
            .padding([8, 14])
            .style(style::primary_button),
    ]
    .spacing(16)
    .padding(24);

    if let Some(bundle) = page.report.as_ref().and_then(|report| report.bundle.as_ref()) {
        let notice = page.report.as_ref().and_then(|report| report.notice.as_ref());
        content = content.push(super::results::report(bundle, notice).map(Message::Report));
    }

    scrollable(content).height(Length::Fill).into()
}
