mod update;

use dddb_client_core::session::SessionAction;
use dddb_client_core::{Action, AppState};
use iced::{time, Element, Subscription, Task as Command};

use crate::api::ApiClient;
use crate::components::Spinner;
use crate::config::Settings;
use crate::views;

pub struct DddbApp {
    pub state: AppState,
    pub spinner: Spinner,
    api: ApiClient,
    settings: Settings,
}

#[derive(Debug, Clone)]
pub enum Message {
    CoreAction(Action),
    /// Redraw for the spinner.
    Tick,
    /// A finished task with nothing to report.
    Idle,
}

impl DddbApp {
    pub fn new(api: ApiClient, settings: Settings) -> (Self, Command<Message>) {
        let mut app = Self {
            state: AppState::default(),
            spinner: Spinner::default(),
            api,
            settings,
        };
        let startup = app.update(Message::CoreAction(Action::Session(SessionAction::Restore)));
        (app, startup)
    }

    pub fn title(&self) -> String {
        format!("DDDB · {}", self.state.page.title())
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.state.is_busy() {
            time::every(Spinner::TICK).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<Message> {
        views::view_app(self)
    }
}
