use crate::{
    actions::Action,
    analysis,
    effects::Effect,
    session::SessionAction,
    state::{AppState, BackendHealth, Page},
    wizard,
};

pub const LOGIN_FAILED: &str = "Login failed.";
pub const REGISTER_FAILED: &str = "Registration failed.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Pure state transition function
/// Returns new state and any effects that need to be performed
pub fn reduce(state: &AppState, action: &Action) -> (AppState, Vec<Effect>) {
    let mut new_state = state.clone();
    let mut effects = Vec::new();

    match action {
        Action::Navigate(page) => navigate(&mut new_state, *page, &mut effects),

        Action::Session(action) => reduce_session(&mut new_state, action, &mut effects),

        Action::Wizard(action) => wizard::apply(&mut new_state.wizard, action, &mut effects),

        Action::Analysis(action) => analysis::apply(&mut new_state.analysis, action, &mut effects),

        Action::CheckBackend => {
            new_state.backend.health = BackendHealth::Checking;
            effects.push(Effect::HealthCheck);
            effects.push(Effect::FetchColumns);
        }

        Action::HealthChecked(Ok(status)) => {
            new_state.backend.health = if status.is_healthy() {
                BackendHealth::Healthy
            } else {
                BackendHealth::Unhealthy(status.status.clone())
            };
        }

        Action::HealthChecked(Err(err)) => {
            new_state.backend.health = BackendHealth::Unhealthy(err.user_message("Backend unreachable"));
        }

        Action::ColumnsLoaded(Ok(columns)) => new_state.backend.columns = Some(columns.clone()),

        // The server answers 400 when no dataset is loaded.
        Action::ColumnsLoaded(Err(_)) => new_state.backend.columns = None,

        Action::DismissNotice => new_state.notice = None,
    }

    // A 401 from any call ends the session, whichever slice issued it.
    if action.api_error().is_some_and(|e| e.is_unauthorized()) {
        expire_session(&mut new_state);
    }

    (new_state, effects)
}

fn navigate(state: &mut AppState, page: Page, effects: &mut Vec<Effect>) {
    if page.requires_auth() && !state.session.is_authenticated() {
        state.pending_page = Some(page);
        state.page = Page::Login;
        return;
    }

    if !matches!(page, Page::Login | Page::Register) {
        state.pending_page = None;
    }
    state.page = page;

    enter(state, page, effects);
}

/// Loads whatever a page shows on arrival.
fn enter(state: &mut AppState, page: Page, effects: &mut Vec<Effect>) {
    match page {
        Page::Options => {
            state.backend.health = BackendHealth::Checking;
            effects.push(Effect::HealthCheck);
            effects.push(Effect::FetchColumns);
        }
        Page::Analysis if !state.analysis.has_file() && !state.analysis.uploading => {
            effects.push(Effect::ResumeAnalysis);
        }
        _ => {}
    }
}

fn after_login(state: &mut AppState, effects: &mut Vec<Effect>) {
    let target = state.pending_page.take().unwrap_or(Page::Home);
    state.page = target;
    state.notice = None;
    enter(state, target, effects);
}

fn reduce_session(state: &mut AppState, action: &SessionAction, effects: &mut Vec<Effect>) {
    match action {
        SessionAction::Restore => {
            state.session.is_loading = true;
            effects.push(Effect::RestoreSession);
        }

        SessionAction::Restored(result) => {
            state.session.is_loading = false;
            state.session.user = match result {
                Ok(user) => user.clone(),
                Err(_) => None,
            };
        }

        SessionAction::LoginInput { field, value } => {
            state.login.set(*field, value.clone());
        }

        SessionAction::SubmitLogin => {
            if state.login.submitting {
                return;
            }
            match state.login.credentials() {
                Ok(credentials) => {
                    state.login.error = None;
                    state.login.submitting = true;
                    state.session.is_loading = true;
                    effects.push(Effect::Login(credentials));
                }
                Err(err) => state.login.error = Some(err.to_string()),
            }
        }

        SessionAction::LoginFinished(result) => {
            state.login.submitting = false;
            state.session.is_loading = false;
            match result {
                Ok(user) => {
                    state.session.user = Some(user.clone());
                    state.login = Default::default();
                    after_login(state, effects);
                }
                Err(err) => {
                    state.session.user = None;
                    state.login.error = Some(err.user_message(LOGIN_FAILED));
                }
            }
        }

        SessionAction::RegisterInput { field, value } => {
            state.register.set(*field, value.clone());
        }

        SessionAction::SubmitRegister => {
            if state.register.submitting {
                return;
            }
            match state.register.to_request() {
                Ok(request) => {
                    state.register.error = None;
                    state.register.submitting = true;
                    state.session.is_loading = true;
                    effects.push(Effect::Register(request));
                }
                Err(err) => state.register.error = Some(err.to_string()),
            }
        }

        SessionAction::RegisterFinished(result) => {
            state.register.submitting = false;
            state.session.is_loading = false;
            match result {
                Ok(user) => {
                    state.session.user = Some(user.clone());
                    state.register = Default::default();
                    after_login(state, effects);
                }
                Err(err) => {
                    state.session.user = None;
                    state.register.error = Some(err.user_message(REGISTER_FAILED));
                }
            }
        }

        SessionAction::Logout => {
            state.session.clear();
            clear_user_data(state);
            state.pending_page = None;
            if state.page.requires_auth() {
                state.page = Page::Home;
            }
            effects.push(Effect::Logout);
        }
    }
}

/// Uploads, results and the chat belong to the signed-in user.
fn clear_user_data(state: &mut AppState) {
    state.wizard = Default::default();
    state.analysis = Default::default();
    state.backend.columns = None;
}

fn expire_session(state: &mut AppState) {
    state.session.clear();
    clear_user_data(state);
    if matches!(state.page, Page::Login | Page::Register) {
        return;
    }
    if state.page.requires_auth() {
        state.pending_page = Some(state.page);
    }
    state.page = Page::Login;
    state.notice = Some(SESSION_EXPIRED.to_string());
}
