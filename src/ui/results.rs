use iced::alignment::Alignment;
use iced::widget::{button, column, container, horizontal_rule, horizontal_space, progress_bar, row, scrollable, text};
use iced::{Element, Length};

use crate::pages::Notice;
use crate::pages::results::{Message, ResultsPage};
use crate::testing::TestStatus;
use crate::testing::results::{ResultsBundle, ServiceDetails, SummaryMetrics, TestResults, format_timestamp, rollup_passed};

use super::style;

const NO_CONTENT: &str = "No content available";

/// Routed page: a header with a back button over the report.
pub fn view(page: &ResultsPage) -> Element<'_, Message> {
    let header = row![
        text("Test Results").size(24),
        horizontal_space(),
        button(text("← Back").size(13))
            .on_press(Message::BackPressed)
            .padding([6, 12])
            .style(style::subtle_button)
    ]
    .align_y(Alignment::Center);

    let body = match &page.bundle {
        Some(bundle) if page.has_results() => report(bundle, page.notice.as_ref()),
        _ => no_results(),
    };

    scrollable(column![header, body].spacing(16).padding(24))
        .height(Length::Fill)
        .into()
}

/// Report body without navigation chrome, shared with the dashboard.
pub fn report<'a>(bundle: &'a ResultsBundle, notice: Option<&'a Notice>) -> Element<'a, Message> {
    let Some(results) = &bundle.results else {
        return no_results();
    };
    let summary = SummaryMetrics::from_results(results);

    let code_header = row![
        text("Generated Test Code").size(16),
        horizontal_space(),
        button(text("Download").size(12))
            .on_press(Message::DownloadPressed)
            .padding([4, 12])
            .style(style::primary_button)
    ]
    .align_y(Alignment::Center);

    let mut code_card = column![code_header].spacing(10);
    if let Some(notice) = notice {
        code_card = code_card.push(super::notice(notice));
    }
    code_card = code_card.push(super::code_block(display_or_placeholder(bundle.generated_code.as_deref())));

    column![
        super::card("API Information", api_details(bundle.service.as_ref(), results, &summary)),
        super::card("Test Summary", summary_section(&summary)),
        container(code_card)
            .padding(14)
            .width(Length::Fill)
            .style(|_| style::surface_style(style::SURFACE_1, 8.0)),
        super::card("Test Output", super::code_block(display_or_placeholder(Some(&results.output)))),
        super::card("Test Details", test_cases(results)),
    ]
    .spacing(14)
    .into()
}

fn no_results<'a>() -> Element<'a, Message> {
    container(text("No test results available.").size(14).color(style::TEXT_MUTED))
        .padding(24)
        .center_x(Length::Fill)
        .into()
}

fn api_details<'a>(
    service: Option<&'a ServiceDetails>,
    results: &TestResults,
    summary: &SummaryMetrics,
) -> Element<'a, Message> {
    let Some(service) = service else {
        return text("No API details available").size(13).color(style::TEXT_MUTED).into();
    };

    let passed = rollup_passed(results, summary);
    column![
        field("URL:", service.url.clone()),
        field("Test Type:", service.test_style.clone()),
        field("Registered:", format_timestamp(&service.registered_at)),
        row![
            text("Last Test Status:").size(13).color(style::TEXT_MUTED),
            super::badge(if passed { "PASSED" } else { "FAILED" }.to_string(), passed)
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(6)
    .into()
}

fn summary_section<'a>(summary: &SummaryMetrics) -> Element<'a, Message> {
    let stats = row![
        stat("Total Tests", summary.total.to_string(), style::INFO),
        stat("Passed", summary.passed.to_string(), style::SUCCESS),
        stat("Failed", summary.failed.to_string(), style::DANGER),
        stat(
            "Time",
            format!("{:.2}s", summary.execution_time_seconds),
            style::TEXT
        ),
    ]
    .spacing(10);

    column![
        stats,
        text("Success Rate").size(13).color(style::TEXT_MUTED),
        progress_bar(0.0..=100.0, summary.success_ratio())
            .height(10)
            .style(style::progress_style),
        text(format!("{}%", summary.success_percent())).size(13),
    ]
    .spacing(8)
    .into()
}

fn test_cases(results: &TestResults) -> Element<'_, Message> {
    if results.test_cases.is_empty() {
        return text("No test cases found in output").size(13).color(style::TEXT_MUTED).into();
    }

    let mut table = column![
        row![
            text("Test Case").size(12).color(style::TEXT_MUTED).width(Length::FillPortion(4)),
            text("Status").size(12).color(style::TEXT_MUTED).width(Length::FillPortion(1)),
        ],
        horizontal_rule(1),
    ]
    .spacing(6);

    for case in &results.test_cases {
        table = table.push(
            row![
                text(case.test_case.clone()).size(13).width(Length::FillPortion(4)),
                container(super::badge(case.status.to_string(), case.status == TestStatus::Passed))
                    .width(Length::FillPortion(1)),
            ]
            .align_y(Alignment::Center),
        );
    }

    table.into()
}

fn stat<'a>(label: &'a str, value: String, color: iced::Color) -> Element<'a, Message> {
    container(column![text(label).size(12).color(style::TEXT_MUTED), text(value).size(20).color(color)].spacing(4))
        .padding(10)
        .width(Length::Fill)
        .style(|_| style::surface_style(style::SURFACE_2, 6.0))
        .into()
}

fn field<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![text(label).size(13).color(style::TEXT_MUTED), text(value).size(13)]
        .spacing(8)
        .into()
}

fn display_or_placeholder(content: Option<&str>) -> String {
    match content {
        Some(content) if !content.is_empty() => content.to_string(),
        _ => NO_CONTENT.to_string(),
    }
}
