pub mod analysis;
pub mod auth;
pub mod configure;
pub mod home;
pub mod markdown;
pub mod nav;
pub mod options;
pub mod results;
pub mod table;
pub mod upload;
pub mod wizard;

use dddb_client_core::analysis::AnalysisAction;
use dddb_client_core::session::SessionAction;
use dddb_client_core::wizard::WizardAction;
use dddb_client_core::{Action, Page};
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};

use crate::app::{DddbApp, Message};
use crate::theme;

pub fn wizard_msg(action: WizardAction) -> Message {
    Message::CoreAction(Action::Wizard(action))
}

pub fn analysis_msg(action: AnalysisAction) -> Message {
    Message::CoreAction(Action::Analysis(action))
}

pub fn session_msg(action: SessionAction) -> Message {
    Message::CoreAction(Action::Session(action))
}

pub fn navigate(page: Page) -> Message {
    Message::CoreAction(Action::Navigate(page))
}

pub fn view_app(app: &DddbApp) -> Element<Message> {
    let state = &app.state;

    let body: Element<Message> = match state.page {
        Page::Home => home::view(state),
        Page::Login => auth::view_login(state),
        Page::Register => auth::view_register(state),
        Page::Augmentation => wizard::view(app),
        Page::Analysis => analysis::view(app),
        Page::Options => options::view(state),
    };

    let mut layout = column![nav::view(state)];
    if let Some(notice) = &state.notice {
        layout = layout.push(container(notice_banner(notice)).padding([12, 24]));
    }

    layout
        .push(
            scrollable(container(body).padding([20, 24]).width(Length::Fill))
                .height(Length::Fill)
                .width(Length::Fill),
        )
        .into()
}

fn notice_banner(notice: &str) -> Element<Message> {
    container(
        row![
            text(notice).size(14),
            Space::with_width(Length::Fill),
            button(text("Dismiss").size(13))
                .on_press(Message::CoreAction(Action::DismissNotice))
                .padding([4, 10])
                .style(theme::secondary_button),
        ]
        .align_y(Alignment::Center),
    )
    .padding([10, 14])
    .width(Length::Fill)
    .style(theme::notice)
    .into()
}

/// Inline error with a close button.
pub fn error_banner<'a>(message: &'a str, on_dismiss: Message) -> Element<'a, Message> {
    container(
        row![
            text(message).size(14).color(theme::Colors::ERROR),
            Space::with_width(Length::Fill),
            button(text("×").size(14))
                .on_press(on_dismiss)
                .padding([0, 8])
                .style(theme::secondary_button),
        ]
        .align_y(Alignment::Center),
    )
    .padding([10, 14])
    .width(Length::Fill)
    .style(theme::error_box)
    .into()
}

pub fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(theme::card)
        .into()
}

pub fn heading<'a>(title: &'a str) -> Element<'a, Message> {
    text(title).size(22).color(theme::Colors::TEXT).into()
}

pub fn subheading<'a>(title: impl Into<String>) -> Element<'a, Message> {
    text(title.into()).size(16).color(theme::Colors::TEXT).into()
}

pub fn muted<'a>(content: impl Into<String>) -> Element<'a, Message> {
    text(content.into()).size(13).color(theme::Colors::TEXT_DIM).into()
}

/// A button that is disabled unless `on_press` is given.
pub fn action_button<'a>(label: impl Into<String>, on_press: Option<Message>) -> Element<'a, Message> {
    button(text(label.into()).size(14))
        .on_press_maybe(on_press)
        .padding([8, 16])
        .style(theme::primary_button)
        .into()
}

pub fn secondary_button<'a>(label: impl Into<String>, on_press: Option<Message>) -> Element<'a, Message> {
    button(text(label.into()).size(14))
        .on_press_maybe(on_press)
        .padding([8, 16])
        .style(theme::secondary_button)
        .into()
}
