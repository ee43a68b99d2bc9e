use iced::widget::{button, container, pick_list, progress_bar, text_input};
use iced::{Background, Border, Color, Theme};

use crate::pages::Severity;

pub const BG: Color = Color {
    r: 17.0 / 255.0,
    g: 20.0 / 255.0,
    b: 26.0 / 255.0,
    a: 1.0,
};
pub const SURFACE_0: Color = Color {
    r: 21.0 / 255.0,
    g: 25.0 / 255.0,
    b: 33.0 / 255.0,
    a: 1.0,
};
pub const SURFACE_1: Color = Color {
    r: 26.0 / 255.0,
    g: 31.0 / 255.0,
    b: 40.0 / 255.0,
    a: 1.0,
};
pub const SURFACE_2: Color = Color {
    r: 33.0 / 255.0,
    g: 39.0 / 255.0,
    b: 49.0 / 255.0,
    a: 1.0,
};
pub const SURFACE_3: Color = Color {
    r: 40.0 / 255.0,
    g: 48.0 / 255.0,
    b: 60.0 / 255.0,
    a: 1.0,
};
pub const BORDER: Color = Color {
    r: 50.0 / 255.0,
    g: 60.0 / 255.0,
    b: 73.0 / 255.0,
    a: 1.0,
};
pub const TEXT: Color = Color {
    r: 230.0 / 255.0,
    g: 236.0 / 255.0,
    b: 244.0 / 255.0,
    a: 1.0,
};
pub const TEXT_MUTED: Color = Color {
    r: 132.0 / 255.0,
    g: 145.0 / 255.0,
    b: 160.0 / 255.0,
    a: 1.0,
};
pub const PRIMARY: Color = Color {
    r: 0.0,
    g: 150.0 / 255.0,
    b: 136.0 / 255.0,
    a: 1.0,
};
pub const PRIMARY_HOVER: Color = Color {
    r: 20.0 / 255.0,
    g: 170.0 / 255.0,
    b: 156.0 / 255.0,
    a: 1.0,
};
pub const SUCCESS: Color = Color {
    r: 58.0 / 255.0,
    g: 201.0 / 255.0,
    b: 111.0 / 255.0,
    a: 1.0,
};
pub const DANGER: Color = Color {
    r: 226.0 / 255.0,
    g: 92.0 / 255.0,
    b: 92.0 / 255.0,
    a: 1.0,
};
pub const INFO: Color = Color {
    r: 82.0 / 255.0,
    g: 167.0 / 255.0,
    b: 244.0 / 255.0,
    a: 1.0,
};

pub fn app_theme() -> Theme {
    Theme::custom(
        "FastAPI Tester".to_string(),
        iced::theme::Palette {
            background: BG,
            text: TEXT,
            primary: PRIMARY,
            success: SUCCESS,
            danger: DANGER,
        },
    )
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => INFO,
        Severity::Success => SUCCESS,
        Severity::Error => DANGER,
    }
}

pub fn outcome_color(passed: bool) -> Color {
    if passed { SUCCESS } else { DANGER }
}

pub fn surface_style(color: Color, border_radius: f32) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
        .border(Border {
            radius: border_radius.into(),
            width: 1.0,
            color: BORDER,
        })
}

pub fn flat_surface_style(color: Color) -> container::Style {
    container::Style::default()
        .background(Background::Color(color))
        .color(TEXT)
}

/// Tinted pill behind a status label.
pub fn badge_style(color: Color) -> container::Style {
    container::Style::default()
        .background(Background::Color(Color { a: 0.14, ..color }))
        .color(color)
        .border(Border {
            radius: 4.0.into(),
            width: 0.0,
            color: Color::TRANSPARENT,
        })
}

pub fn nav_button(active: bool, _theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active if active => SURFACE_2,
        button::Status::Active | button::Status::Disabled => SURFACE_1,
        button::Status::Hovered => SURFACE_2,
        button::Status::Pressed => SURFACE_3,
    };

    button::Style {
        background: Some(Background::Color(bg)),
        text_color: if active { TEXT } else { TEXT_MUTED },
        border: Border {
            radius: 6.0.into(),
            width: if active { 1.0 } else { 0.0 },
            color: if active { PRIMARY } else { BORDER },
        },
        shadow: Default::default(),
    }
}

pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active | button::Status::Pressed => PRIMARY,
        button::Status::Hovered => PRIMARY_HOVER,
        button::Status::Disabled => SURFACE_3,
    };

    button::Style {
        background: Some(Background::Color(bg)),
        text_color: if matches!(status, button::Status::Disabled) {
            TEXT_MUTED
        } else {
            TEXT
        },
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: bg,
        },
        shadow: Default::default(),
    }
}

pub fn subtle_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active => SURFACE_2,
        button::Status::Hovered | button::Status::Pressed => SURFACE_3,
        button::Status::Disabled => SURFACE_1,
    };

    button::Style {
        background: Some(Background::Color(bg)),
        text_color: if matches!(status, button::Status::Disabled) {
            TEXT_MUTED
        } else {
            TEXT
        },
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: BORDER,
        },
        shadow: Default::default(),
    }
}

pub fn input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let base = text_input::Style {
        background: Background::Color(SURFACE_1),
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: BORDER,
        },
        icon: TEXT_MUTED,
        placeholder: TEXT_MUTED,
        value: TEXT,
        selection: Color { a: 0.35, ..PRIMARY },
    };

    match status {
        text_input::Status::Active => base,
        text_input::Status::Hovered => text_input::Style {
            border: Border {
                color: SURFACE_3,
                ..base.border
            },
            ..base
        },
        text_input::Status::Focused => text_input::Style {
            border: Border {
                color: PRIMARY,
                ..base.border
            },
            ..base
        },
        text_input::Status::Disabled => text_input::Style {
            value: TEXT_MUTED,
            ..base
        },
    }
}

pub fn pick_list_style(_theme: &Theme, status: pick_list::Status) -> pick_list::Style {
    let base = pick_list::Style {
        text_color: TEXT,
        background: Background::Color(SURFACE_1),
        placeholder_color: TEXT_MUTED,
        handle_color: TEXT_MUTED,
        border: Border {
            radius: 8.0.into(),
            width: 1.0,
            color: BORDER,
        },
    };

    match status {
        pick_list::Status::Active => base,
        pick_list::Status::Hovered | pick_list::Status::Opened => pick_list::Style {
            border: Border {
                color: PRIMARY,
                ..base.border
            },
            ..base
        },
    }
}

pub fn progress_style(_theme: &Theme) -> progress_bar::Style {
    progress_bar::Style {
        background: Background::Color(SURFACE_2),
        bar: Background::Color(SUCCESS),
        border: Border {
            radius: 5.0.into(),
            width: 0.0,
            color: Color::TRANSPARENT,
        },
    }
}
