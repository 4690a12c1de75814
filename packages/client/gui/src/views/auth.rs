use dddb_client_core::session::{LoginField, RegisterField, SessionAction};
use dddb_client_core::{AppState, Page};
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::{action_button, heading, muted, navigate, session_msg};
use crate::app::Message;
use crate::theme;

fn field<'a>(
    label: &'a str,
    value: &'a str,
    secure: bool,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    column![
        text(label).size(13).color(theme::Colors::TEXT_DIM),
        text_input(label, value)
            .on_input(on_input)
            .on_submit(on_submit)
            .secure(secure)
            .padding(10)
            .style(theme::input),
    ]
    .spacing(4)
    .into()
}

fn form<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        container(content)
            .padding(24)
            .width(Length::Fixed(420.0))
            .style(theme::card),
    )
    .center_x(Length::Fill)
    .into()
}

fn error_line(error: Option<&str>) -> Element<Message> {
    match error {
        Some(e) => text(e).size(13).color(theme::Colors::ERROR).into(),
        None => column![].into(),
    }
}

fn switch_link<'a>(prompt: &'a str, label: &'a str, page: Page) -> Element<'a, Message> {
    row![
        muted(prompt),
        button(text(label).size(13))
            .on_press(navigate(page))
            .padding(0)
            .style(theme::nav_button_inactive),
    ]
    .spacing(6)
    .align_y(Alignment::Center)
    .into()
}

pub fn view_login(state: &AppState) -> Element<Message> {
    let login = &state.login;
    let submit = session_msg(SessionAction::SubmitLogin);
    let input = |field: LoginField| move |value| session_msg(SessionAction::LoginInput { field, value });

    let label = if login.submitting { "Logging in…" } else { "Log in" };

    form(
        column![
            heading("Log in"),
            field("Username", &login.username, false, input(LoginField::Username), submit.clone()),
            field("Password", &login.password, true, input(LoginField::Password), submit.clone()),
            error_line(login.error.as_deref()),
            action_button(label, (!login.submitting).then_some(submit)),
            switch_link("No account yet?", "Sign up", Page::Register),
        ]
        .spacing(14),
    )
}

pub fn view_register(state: &AppState) -> Element<Message> {
    let register = &state.register;
    let submit = session_msg(SessionAction::SubmitRegister);
    let input = |field: RegisterField| move |value| session_msg(SessionAction::RegisterInput { field, value });

    let label = if register.submitting { "Creating account…" } else { "Sign up" };

    form(
        column![
            heading("Create an account"),
            field("Username", &register.username, false, input(RegisterField::Username), submit.clone()),
            field("Email", &register.email, false, input(RegisterField::Email), submit.clone()),
            field(
                "Full name (optional)",
                &register.full_name,
                false,
                input(RegisterField::FullName),
                submit.clone(),
            ),
            field("Password", &register.password, true, input(RegisterField::Password), submit.clone()),
            field(
                "Confirm password",
                &register.confirm_password,
                true,
                input(RegisterField::ConfirmPassword),
                submit.clone(),
            ),
            error_line(register.error.as_deref()),
            action_button(label, (!register.submitting).then_some(submit)),
            switch_link("Already registered?", "Log in", Page::Login),
        ]
        .spacing(14),
    )
}
