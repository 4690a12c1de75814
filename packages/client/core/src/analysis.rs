use crate::effects::{Effect, FileTarget};
use crate::error::ApiError;
use crate::types::*;
use crate::validation::{validate_csv, ANALYSIS_UPLOAD_LIMIT_MB};

pub const UPLOAD_FAILED: &str = "An error occurred while processing the file.";
pub const ANALYSIS_FAILED: &str = "An error occurred during analysis.";
pub const CLEAR_FAILED: &str = "Could not delete the analysis data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    NoFile,
    Idle,
    Analyzing,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisState {
    pub phase: ChatPhase,
    pub uploading: bool,
    pub file_name: Option<String>,
    pub data_info: Option<DataInfo>,
    pub suggestions: Vec<String>,
    pub transcript: Vec<ChatMessage>,
    pub input: String,
    /// Set while the "delete data" confirmation is showing.
    pub confirm_delete: bool,
    pub deleting: bool,
    pub error: Option<String>,
}

impl AnalysisState {
    pub fn has_file(&self) -> bool {
        self.phase != ChatPhase::NoFile
    }

    pub fn can_submit(&self) -> bool {
        self.phase == ChatPhase::Idle && !self.input.trim().is_empty()
    }

    fn reset_data(&mut self) {
        *self = AnalysisState::default();
    }

    fn submit(&mut self, query: &str, effects: &mut Vec<Effect>) {
        let query = query.trim();
        if self.phase != ChatPhase::Idle || query.is_empty() {
            return;
        }
        self.transcript.push(ChatMessage::new(ChatRole::User, query));
        self.input.clear();
        self.error = None;
        self.phase = ChatPhase::Analyzing;
        effects.push(Effect::AnalyzeQuery(query.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisAction {
    ChooseFile,
    FileChosen(Option<FileCandidate>),
    UploadFinished(Result<AnalysisUpload, ApiError>),
    Resumed(Result<AnalysisSnapshot, ApiError>),

    InputChanged(String),
    Submit,
    UseSuggestion(String),
    QueryFinished(Result<QueryResponse, ApiError>),

    ClearChat,
    RequestDelete,
    CancelDelete,
    ConfirmDelete,
    DataCleared(Result<ClearResponse, ApiError>),

    DismissError,
}

impl AnalysisAction {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AnalysisAction::UploadFinished(Err(e))
            | AnalysisAction::Resumed(Err(e))
            | AnalysisAction::QueryFinished(Err(e))
            | AnalysisAction::DataCleared(Err(e)) => Some(e),
            _ => None,
        }
    }
}

/// Pure chat transition.
pub fn reduce(state: &AnalysisState, action: &AnalysisAction) -> (AnalysisState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();
    apply(&mut next, action, &mut effects);
    (next, effects)
}

pub(crate) fn apply(state: &mut AnalysisState, action: &AnalysisAction, effects: &mut Vec<Effect>) {
    match action {
        AnalysisAction::ChooseFile => {
            if !state.uploading && state.phase != ChatPhase::Analyzing {
                effects.push(Effect::PickFile(FileTarget::Analysis));
            }
        }

        AnalysisAction::FileChosen(None) => {}

        AnalysisAction::FileChosen(Some(file)) => {
            if state.uploading || state.phase == ChatPhase::Analyzing {
                return;
            }
            match validate_csv(file, ANALYSIS_UPLOAD_LIMIT_MB) {
                Ok(()) => {
                    state.uploading = true;
                    state.error = None;
                    state.file_name = Some(file.name.clone());
                    effects.push(Effect::UploadForAnalysis(file.clone()));
                }
                Err(err) => state.error = Some(err.to_string()),
            }
        }

        AnalysisAction::UploadFinished(result) => {
            if !state.uploading {
                return;
            }
            state.uploading = false;
            match result {
                Ok(upload) if upload.success => {
                    // A new file replaces the whole conversation.
                    state.transcript.clear();
                    state.input.clear();
                    state.confirm_delete = false;
                    state.data_info = upload.data_info.clone();
                    state.suggestions = upload.suggested_queries.clone();
                    if let Some(name) = &upload.filename {
                        state.file_name = Some(name.clone());
                    }
                    state.phase = ChatPhase::Idle;
                    state.error = None;
                }
                Ok(upload) => {
                    state.error = Some(upload.error.clone().unwrap_or_else(|| UPLOAD_FAILED.to_string()));
                }
                Err(err) => state.error = Some(err.user_message(UPLOAD_FAILED)),
            }
        }

        AnalysisAction::Resumed(Ok(snapshot)) => {
            if state.phase != ChatPhase::NoFile || state.uploading {
                return;
            }
            state.data_info = Some(snapshot.data_info.clone());
            state.suggestions = snapshot.suggestions.clone();
            state.phase = ChatPhase::Idle;
        }

        // Nothing stored on the server is the common case, not an error.
        AnalysisAction::Resumed(Err(_)) => {}

        AnalysisAction::InputChanged(text) => state.input = text.clone(),

        AnalysisAction::Submit => {
            let query = state.input.clone();
            state.submit(&query, effects);
        }

        AnalysisAction::UseSuggestion(query) => state.submit(query, effects),

        AnalysisAction::QueryFinished(result) => {
            if state.phase != ChatPhase::Analyzing {
                return;
            }
            let message = match result {
                Ok(resp) if resp.success => {
                    ChatMessage::new(ChatRole::Assistant, resp.response.clone().unwrap_or_default())
                        .with_chart(resp.chart_data.clone())
                }
                Ok(resp) => ChatMessage::new(
                    ChatRole::Error,
                    resp.error.clone().unwrap_or_else(|| ANALYSIS_FAILED.to_string()),
                ),
                Err(err) => ChatMessage::new(ChatRole::Error, err.user_message(ANALYSIS_FAILED)),
            };
            state.transcript.push(message);
            state.phase = ChatPhase::Idle;
        }

        AnalysisAction::ClearChat => state.transcript.clear(),

        AnalysisAction::RequestDelete => {
            if state.has_file() && !state.deleting {
                state.confirm_delete = true;
            }
        }

        AnalysisAction::CancelDelete => state.confirm_delete = false,

        AnalysisAction::ConfirmDelete => {
            if state.confirm_delete && !state.deleting {
                state.confirm_delete = false;
                state.deleting = true;
                effects.push(Effect::ClearAnalysisData);
            }
        }

        AnalysisAction::DataCleared(result) => {
            if !state.deleting {
                return;
            }
            state.deleting = false;
            match result {
                Ok(_) => state.reset_data(),
                Err(err) => state.error = Some(err.user_message(CLEAR_FAILED)),
            }
        }

        AnalysisAction::DismissError => state.error = None,
    }
}
