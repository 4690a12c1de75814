use crate::analysis::AnalysisState;
use crate::session::{LoginForm, RegisterForm, Session};
use crate::types::ColumnsInfo;
use crate::wizard::WizardState;

/// Top-level pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Augmentation,
    Analysis,
    Options,
    Login,
    Register,
}

impl Page {
    pub const NAV: [Page; 4] = [Page::Home, Page::Augmentation, Page::Analysis, Page::Options];

    /// Data tools talk to per-user backend state and need a session.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Augmentation | Page::Analysis)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Augmentation => "CSV Augmentation",
            Page::Analysis => "Analysis Agent",
            Page::Options => "Options",
            Page::Login => "Log in",
            Page::Register => "Sign up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Checking,
    Healthy,
    Unhealthy(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackendStatus {
    pub health: BackendHealth,
    /// Columns of the dataset currently loaded on the server, if any.
    pub columns: Option<ColumnsInfo>,
}

/// Whole-application state. Owned by the GUI, changed only by `reduce`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub page: Page,
    /// Page to open after a successful login.
    pub pending_page: Option<Page>,

    pub session: Session,
    pub login: LoginForm,
    pub register: RegisterForm,

    pub wizard: WizardState,
    pub analysis: AnalysisState,
    pub backend: BackendStatus,

    /// App-wide banner, e.g. after the session expired.
    pub notice: Option<String>,
}

impl AppState {
    pub fn is_busy(&self) -> bool {
        self.session.is_loading
            || self.login.submitting
            || self.register.submitting
            || self.wizard.uploading
            || self.analysis.uploading
            || self.analysis.phase == crate::analysis::ChatPhase::Analyzing
            || self.wizard.step == crate::wizard::WizardStep::Processing
    }
}
