use crate::types::*;

/// Which flow a picked file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileTarget {
    Augmentation,
    Analysis,
}

/// Side effects that need to be performed (API calls, dialogs, disk writes)
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the user for a stored token, if there is one.
    RestoreSession,
    /// Log in, then fetch the current user.
    Login(UserLogin),
    /// Register, then log in with the same credentials.
    Register(UserCreate),
    /// Best-effort server logout; the stored token is removed either way.
    Logout,

    /// Open a file dialog for a CSV file.
    PickFile(FileTarget),

    UploadFile(FileCandidate),
    ProcessData(ProcessingConfig),
    FetchProcessedPage { page: u32, page_size: u32 },
    FetchStatistics,
    CreateVisualization { column: String, chart_type: ChartType },
    /// Fetch the augmented file and save it under its encoding's file name.
    Download(DownloadEncoding),

    UploadForAnalysis(FileCandidate),
    /// Pick up data the server still holds from an earlier upload.
    ResumeAnalysis,
    AnalyzeQuery(String),
    ClearAnalysisData,

    HealthCheck,
    FetchColumns,
}
