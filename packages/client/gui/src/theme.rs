use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Theme};

// Color palette
pub struct Colors;

impl Colors {
    pub const BACKGROUND: Color = Color::from_rgb(0.97, 0.98, 0.99); // #f8fafc
    pub const SURFACE: Color = Color::WHITE;
    pub const SURFACE_DIM: Color = Color::from_rgb(0.94, 0.95, 0.97); // #f0f2f7
    pub const PRIMARY: Color = Color::from_rgb(0.23, 0.51, 0.96); // #3b82f6
    pub const PRIMARY_SOFT: Color = Color::from_rgb(0.86, 0.92, 1.0); // #dbeafe
    pub const TEXT: Color = Color::from_rgb(0.12, 0.16, 0.22); // #1f2937
    pub const TEXT_DIM: Color = Color::from_rgb(0.42, 0.45, 0.50); // #6b7280
    pub const BORDER: Color = Color::from_rgb(0.90, 0.91, 0.92); // #e5e7eb
    pub const SUCCESS: Color = Color::from_rgb(0.06, 0.73, 0.51); // #10b981
    pub const WARNING: Color = Color::from_rgb(0.96, 0.62, 0.04); // #f59e0b
    pub const ERROR: Color = Color::from_rgb(0.94, 0.27, 0.27); // #ef4444
    pub const ERROR_SOFT: Color = Color::from_rgb(1.0, 0.95, 0.95); // #fef2f2
}

pub fn app_theme() -> Theme {
    Theme::custom(
        "DDDB".to_string(),
        iced::theme::Palette {
            background: Colors::BACKGROUND,
            text: Colors::TEXT,
            primary: Colors::PRIMARY,
            success: Colors::SUCCESS,
            danger: Colors::ERROR,
        },
    )
}

fn border(width: f32, radius: f32, color: Color) -> Border {
    Border {
        width,
        radius: radius.into(),
        color,
    }
}

// Navigation
pub fn nav_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::SURFACE)),
        border: border(1.0, 0.0, Colors::BORDER),
        ..Default::default()
    }
}

pub fn nav_button_active(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(Colors::PRIMARY_SOFT)),
        text_color: Colors::PRIMARY,
        border: border(0.0, 6.0, Color::TRANSPARENT),
        ..Default::default()
    }
}

pub fn nav_button_inactive(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Colors::SURFACE_DIM,
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Colors::TEXT_DIM,
        border: border(0.0, 6.0, Color::TRANSPARENT),
        ..Default::default()
    }
}

// Panels
pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::SURFACE)),
        border: border(1.0, 8.0, Colors::BORDER),
        ..Default::default()
    }
}

pub fn notice(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::PRIMARY_SOFT)),
        text_color: Some(Colors::TEXT),
        border: border(1.0, 6.0, Colors::PRIMARY),
        ..Default::default()
    }
}

pub fn error_box(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::ERROR_SOFT)),
        text_color: Some(Colors::ERROR),
        border: border(1.0, 6.0, Colors::ERROR),
        ..Default::default()
    }
}

pub fn step_badge(active: bool, done: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| {
        let (bg, fg) = if active {
            (Colors::PRIMARY, Color::WHITE)
        } else if done {
            (Colors::SUCCESS, Color::WHITE)
        } else {
            (Colors::SURFACE_DIM, Colors::TEXT_DIM)
        };
        container::Style {
            background: Some(Background::Color(bg)),
            text_color: Some(fg),
            border: border(0.0, 12.0, Color::TRANSPARENT),
            ..Default::default()
        }
    }
}

// Chat
pub fn user_message(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::PRIMARY)),
        text_color: Some(Color::WHITE),
        border: border(0.0, 8.0, Color::TRANSPARENT),
        ..Default::default()
    }
}

pub fn assistant_message(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::SURFACE)),
        border: border(1.0, 8.0, Colors::BORDER),
        ..Default::default()
    }
}

pub fn error_message(_theme: &Theme) -> container::Style {
    error_box(_theme)
}

pub fn code_block(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Colors::SURFACE_DIM)),
        border: border(1.0, 4.0, Colors::BORDER),
        ..Default::default()
    }
}

// Inputs
pub fn input(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let edge = match status {
        text_input::Status::Focused => Colors::PRIMARY,
        _ => Colors::BORDER,
    };
    text_input::Style {
        background: Background::Color(Colors::SURFACE),
        border: border(1.0, 6.0, edge),
        icon: Color::TRANSPARENT,
        placeholder: Color {
            a: 0.7,
            ..Colors::TEXT_DIM
        },
        value: Colors::TEXT,
        selection: Color {
            a: 0.3,
            ..Colors::PRIMARY
        },
    }
}

// Buttons
pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Disabled => Color {
            a: 0.4,
            ..Colors::PRIMARY
        },
        _ => Colors::PRIMARY,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: border(0.0, 6.0, Color::TRANSPARENT),
        ..Default::default()
    }
}

pub fn secondary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Disabled => Colors::TEXT_DIM,
        _ => Colors::TEXT,
    };
    button::Style {
        background: Some(Background::Color(Colors::SURFACE)),
        text_color,
        border: border(1.0, 6.0, Colors::BORDER),
        ..Default::default()
    }
}

pub fn danger_button(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(Colors::ERROR)),
        text_color: Color::WHITE,
        border: border(0.0, 6.0, Color::TRANSPARENT),
        ..Default::default()
    }
}

pub fn suggestion_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Colors::PRIMARY_SOFT,
        _ => Colors::SURFACE_DIM,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Colors::TEXT,
        border: border(0.0, 14.0, Color::TRANSPARENT),
        ..Default::default()
    }
}
