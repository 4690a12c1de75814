use crate::analysis::AnalysisAction;
use crate::error::ApiError;
use crate::session::SessionAction;
use crate::state::Page;
use crate::types::*;
use crate::wizard::WizardAction;

/// All possible user actions and backend results that can modify the app state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Page),

    Session(SessionAction),
    Wizard(WizardAction),
    Analysis(AnalysisAction),

    // Backend status (Options page)
    CheckBackend,
    HealthChecked(Result<HealthStatus, ApiError>),
    ColumnsLoaded(Result<ColumnsInfo, ApiError>),

    DismissNotice,
}

impl Action {
    /// The backend error carried by this action, if it reports a failed call.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Action::Session(a) => a.api_error(),
            Action::Wizard(a) => a.api_error(),
            Action::Analysis(a) => a.api_error(),
            Action::HealthChecked(Err(e)) | Action::ColumnsLoaded(Err(e)) => Some(e),
            _ => None,
        }
    }
}
