//! Upload → Configure → Processing → Results.
//!
//! The wizard only moves forward, with one exception: a failed processing run
//! drops back to Configure so the user can adjust the options and retry.

use crate::config::{self, ConfigEdit, ConfigForm};
use crate::effects::{Effect, FileTarget};
use crate::error::ApiError;
use crate::types::*;
use crate::validation::{validate_csv, AUGMENTATION_UPLOAD_LIMIT_MB};
use std::path::PathBuf;

pub const UPLOAD_FAILED: &str = "An error occurred while uploading the file.";
pub const PROCESSING_FAILED: &str = "An error occurred while processing the data.";
pub const PAGE_FAILED: &str = "Could not load the requested page.";
pub const INCOMPLETE_CONFIG: &str = "The augmentation settings are incomplete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Upload,
    Configure,
    Processing,
    Results,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Upload,
        WizardStep::Configure,
        WizardStep::Processing,
        WizardStep::Results,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Upload => 0,
            WizardStep::Configure => 1,
            WizardStep::Processing => 2,
            WizardStep::Results => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload",
            WizardStep::Configure => "Configure",
            WizardStep::Processing => "Process",
            WizardStep::Results => "Results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub uploading: bool,
    pub file_name: Option<String>,
    pub upload: Option<UploadResponse>,
    pub form: Option<ConfigForm>,

    pub processing: Option<ProcessingResponse>,
    pub processed: Option<ProcessedPage>,
    pub page_loading: bool,
    pub statistics: Option<Statistics>,
    pub visualization: Option<Visualization>,

    /// Inline, user-visible error for the current step.
    pub error: Option<String>,
    /// Non-blocking status line for downloads.
    pub download_status: Option<String>,
}

impl WizardState {
    pub fn config(&self) -> Option<&ProcessingConfig> {
        self.form.as_ref().map(|f| &f.config)
    }

    pub fn can_process(&self) -> bool {
        self.step == WizardStep::Configure && self.config().is_some_and(ProcessingConfig::is_complete)
    }

    fn first_numeric_column(&self) -> Option<String> {
        self.upload
            .as_ref()
            .and_then(|u| u.summary.numeric_columns.first().cloned())
    }

    fn back_to_configure(&mut self, message: String) {
        self.step = WizardStep::Configure;
        self.error = Some(message);
        self.processing = None;
        self.processed = None;
        self.statistics = None;
        self.visualization = None;
        self.page_loading = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    ChooseFile,
    FileChosen(Option<FileCandidate>),
    UploadFinished(Result<UploadResponse, ApiError>),

    Edit(ConfigEdit),

    StartProcessing,
    ProcessingFinished(Result<ProcessingResponse, ApiError>),
    PageLoaded(Result<ProcessedPage, ApiError>),
    StatisticsLoaded(Result<Statistics, ApiError>),
    VisualizationLoaded(Result<Visualization, ApiError>),

    ChangePage { page: u32, page_size: u32 },
    Download(DownloadEncoding),
    DownloadFinished {
        encoding: DownloadEncoding,
        result: Result<PathBuf, ApiError>,
    },

    StartOver,
    DismissError,
}

impl WizardAction {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            WizardAction::UploadFinished(Err(e))
            | WizardAction::ProcessingFinished(Err(e))
            | WizardAction::PageLoaded(Err(e))
            | WizardAction::StatisticsLoaded(Err(e))
            | WizardAction::VisualizationLoaded(Err(e)) => Some(e),
            WizardAction::DownloadFinished { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }
}

/// Pure wizard transition.
pub fn reduce(state: &WizardState, action: &WizardAction) -> (WizardState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();
    apply(&mut next, action, &mut effects);
    (next, effects)
}

pub(crate) fn apply(state: &mut WizardState, action: &WizardAction, effects: &mut Vec<Effect>) {
    match action {
        WizardAction::ChooseFile => {
            if state.step == WizardStep::Upload && !state.uploading {
                effects.push(Effect::PickFile(FileTarget::Augmentation));
            }
        }

        WizardAction::FileChosen(None) => {}

        WizardAction::FileChosen(Some(file)) => {
            if state.step != WizardStep::Upload || state.uploading {
                return;
            }
            match validate_csv(file, AUGMENTATION_UPLOAD_LIMIT_MB) {
                Ok(()) => {
                    state.uploading = true;
                    state.error = None;
                    state.file_name = Some(file.name.clone());
                    effects.push(Effect::UploadFile(file.clone()));
                }
                Err(err) => {
                    state.error = Some(err.to_string());
                }
            }
        }

        WizardAction::UploadFinished(result) => {
            if !state.uploading {
                return;
            }
            state.uploading = false;
            match result {
                Ok(upload) => {
                    state.form = Some(ConfigForm::from_upload(upload));
                    state.upload = Some(upload.clone());
                    state.error = None;
                    state.step = WizardStep::Configure;
                }
                Err(err) => {
                    state.error = Some(err.user_message(UPLOAD_FAILED));
                }
            }
        }

        WizardAction::Edit(edit) => {
            if state.step != WizardStep::Configure {
                return;
            }
            if let Some(form) = &state.form {
                state.form = Some(config::reduce(form, edit));
            }
        }

        WizardAction::StartProcessing => {
            if state.step != WizardStep::Configure {
                return;
            }
            if let Some(form) = &state.form {
                state.form = Some(form.commit_typed());
            }
            match state.config() {
                Some(cfg) if cfg.is_complete() => {
                    effects.push(Effect::ProcessData(cfg.clone()));
                    state.step = WizardStep::Processing;
                    state.error = None;
                    state.processing = None;
                    state.processed = None;
                    state.statistics = None;
                    state.visualization = None;
                    state.download_status = None;
                }
                _ => state.error = Some(INCOMPLETE_CONFIG.to_string()),
            }
        }

        WizardAction::ProcessingFinished(result) => {
            if state.step != WizardStep::Processing {
                return;
            }
            match result {
                Ok(response) => {
                    state.processing = Some(response.clone());
                    effects.push(Effect::FetchProcessedPage {
                        page: 0,
                        page_size: ProcessedPage::DEFAULT_PAGE_SIZE,
                    });
                }
                Err(err) => state.back_to_configure(err.user_message(PROCESSING_FAILED)),
            }
        }

        WizardAction::PageLoaded(result) => match state.step {
            WizardStep::Processing => match result {
                Ok(page) => {
                    state.processed = Some(page.clone());
                    effects.push(Effect::FetchStatistics);
                }
                Err(err) => state.back_to_configure(err.user_message(PROCESSING_FAILED)),
            },
            WizardStep::Results => {
                state.page_loading = false;
                match result {
                    Ok(page) => state.processed = Some(page.clone()),
                    Err(err) => state.error = Some(err.user_message(PAGE_FAILED)),
                }
            }
            _ => {}
        },

        WizardAction::StatisticsLoaded(result) => {
            if state.step != WizardStep::Processing {
                return;
            }
            match result {
                Ok(stats) => {
                    state.statistics = Some(stats.clone());
                    match state.first_numeric_column() {
                        Some(column) => effects.push(Effect::CreateVisualization {
                            column,
                            chart_type: ChartType::Distribution,
                        }),
                        None => state.step = WizardStep::Results,
                    }
                }
                Err(err) => state.back_to_configure(err.user_message(PROCESSING_FAILED)),
            }
        }

        WizardAction::VisualizationLoaded(result) => {
            if state.step != WizardStep::Processing {
                return;
            }
            // A missing chart never blocks the results.
            state.visualization = result.as_ref().ok().cloned();
            state.step = WizardStep::Results;
        }

        WizardAction::ChangePage { page, page_size } => {
            if state.step != WizardStep::Results || state.page_loading {
                return;
            }
            let page_size = (*page_size).max(1);
            if let Some(current) = &state.processed {
                let unchanged = current.page == *page && current.page_size == page_size;
                let out_of_range = current.page_size == page_size
                    && current.total_pages > 0
                    && *page >= current.total_pages;
                if unchanged || out_of_range {
                    return;
                }
            }
            state.page_loading = true;
            state.error = None;
            effects.push(Effect::FetchProcessedPage {
                page: *page,
                page_size,
            });
        }

        WizardAction::Download(encoding) => {
            if state.step == WizardStep::Results {
                state.download_status = Some(format!("Downloading {}…", encoding.file_name()));
                effects.push(Effect::Download(*encoding));
            }
        }

        WizardAction::DownloadFinished { encoding, result } => {
            state.download_status = Some(match result {
                Ok(path) => format!("Saved {}", path.display()),
                Err(_) => format!("Download of {} failed.", encoding.file_name()),
            });
        }

        WizardAction::StartOver => {
            if matches!(state.step, WizardStep::Configure | WizardStep::Results) {
                *state = WizardState::default();
            }
        }

        WizardAction::DismissError => state.error = None,
    }
}
