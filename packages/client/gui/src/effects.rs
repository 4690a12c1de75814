use dddb_client_core::analysis::AnalysisAction;
use dddb_client_core::session::SessionAction;
use dddb_client_core::types::{DownloadEncoding, FileCandidate};
use dddb_client_core::wizard::WizardAction;
use dddb_client_core::{Action, ApiError, ApiResult, Effect, FileTarget};
use iced::Task as Command;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::app::Message;
use crate::session;

/// Runs core effects and feeds their outcomes back in as actions.
pub fn handle_effects(api: &ApiClient, download_dir: &Path, effects: Vec<Effect>) -> Command<Message> {
    if effects.is_empty() {
        return Command::none();
    }
    Command::batch(
        effects
            .into_iter()
            .map(|effect| handle_effect(api.clone(), download_dir.to_path_buf(), effect)),
    )
}

fn perform<T, F>(future: F, to_action: impl Fn(T) -> Action + Send + 'static) -> Command<Message>
where
    T: Send + 'static,
    F: std::future::Future<Output = T> + Send + 'static,
{
    Command::perform(future, move |out| Message::CoreAction(to_action(out)))
}

fn handle_effect(api: ApiClient, download_dir: PathBuf, effect: Effect) -> Command<Message> {
    debug!(?effect, "running effect");
    match effect {
        Effect::RestoreSession => perform(
            async move { session::restore(&api).await },
            |r| Action::Session(SessionAction::Restored(r)),
        ),

        Effect::Login(credentials) => perform(
            async move { session::login(&api, &credentials).await },
            |r| Action::Session(SessionAction::LoginFinished(r)),
        ),

        Effect::Register(request) => perform(
            async move { session::register(&api, &request).await },
            |r| Action::Session(SessionAction::RegisterFinished(r)),
        ),

        Effect::Logout => Command::perform(async move { session::logout(&api).await }, |_| Message::Idle),

        Effect::PickFile(target) => perform(pick_csv(), move |file| match target {
            FileTarget::Augmentation => Action::Wizard(WizardAction::FileChosen(file)),
            FileTarget::Analysis => Action::Analysis(AnalysisAction::FileChosen(file)),
        }),

        Effect::UploadFile(file) => perform(
            async move { api.upload_file(&file).await },
            |r| Action::Wizard(WizardAction::UploadFinished(r)),
        ),

        Effect::ProcessData(config) => perform(
            async move { api.process_data(&config).await },
            |r| Action::Wizard(WizardAction::ProcessingFinished(r)),
        ),

        Effect::FetchProcessedPage { page, page_size } => perform(
            async move { api.get_processed_data(page, page_size).await },
            |r| Action::Wizard(WizardAction::PageLoaded(r)),
        ),

        Effect::FetchStatistics => perform(
            async move { api.get_statistics().await },
            |r| Action::Wizard(WizardAction::StatisticsLoaded(r)),
        ),

        Effect::CreateVisualization { column, chart_type } => perform(
            async move { api.create_visualization(&column, chart_type).await },
            |r| Action::Wizard(WizardAction::VisualizationLoaded(r)),
        ),

        Effect::Download(encoding) => perform(
            async move { save_download(&api, &download_dir, encoding).await },
            move |result| Action::Wizard(WizardAction::DownloadFinished { encoding, result }),
        ),

        Effect::UploadForAnalysis(file) => perform(
            async move { api.upload_for_analysis(&file).await },
            |r| Action::Analysis(AnalysisAction::UploadFinished(r)),
        ),

        Effect::ResumeAnalysis => perform(
            async move { session::resume_analysis(&api).await },
            |r| Action::Analysis(AnalysisAction::Resumed(r)),
        ),

        Effect::AnalyzeQuery(query) => perform(
            async move { api.analyze_query(&query).await },
            |r| Action::Analysis(AnalysisAction::QueryFinished(r)),
        ),

        Effect::ClearAnalysisData => perform(
            async move { api.clear_analysis_data().await },
            |r| Action::Analysis(AnalysisAction::DataCleared(r)),
        ),

        Effect::HealthCheck => perform(async move { api.health_check().await }, Action::HealthChecked),

        Effect::FetchColumns => perform(async move { api.get_columns().await }, Action::ColumnsLoaded),
    }
}

async fn pick_csv() -> Option<FileCandidate> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Choose a CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file()
        .await?;
    describe_file(handle.path()).await
}

/// Name, size and MIME type of a picked file. Validation happens in core.
pub async fn describe_file(path: &Path) -> Option<FileCandidate> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    let name = path.file_name()?.to_string_lossy().into_owned();
    let mime = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string());
    Some(FileCandidate {
        path: path.to_path_buf(),
        name,
        size: metadata.len(),
        mime,
    })
}

/// Downloads the augmented data and writes it under the encoding's file name.
pub async fn save_download(api: &ApiClient, dir: &Path, encoding: DownloadEncoding) -> ApiResult<PathBuf> {
    let bytes = api.download_data(encoding).await?;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Io(e.to_string()))?;
    let path = dir.join(encoding.file_name());
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| ApiError::Io(e.to_string()))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved download");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::TokenStore;
    use mockito::{Matcher, Server};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn describes_picked_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        tokio::fs::write(&path, "a,b\n1,2\n").await.unwrap();

        let file = describe_file(&path).await.unwrap();

        assert_eq!(file.name, "sample.csv");
        assert_eq!(file.size, 8);
        assert_eq!(file.mime.as_deref(), Some("text/csv"));
    }

    #[tokio::test]
    async fn missing_file_is_no_candidate() {
        let dir = tempdir().unwrap();
        assert!(describe_file(&dir.path().join("gone.csv")).await.is_none());
    }

    #[tokio::test]
    async fn download_lands_under_encoding_name() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/data/download")
            .match_query(Matcher::UrlEncoded("encoding".into(), "cp949".into()))
            .with_status(200)
            .with_body("a,b\n1,2\n")
            .create_async()
            .await;
        let api = ApiClient::new(server.url(), Duration::from_secs(5), Arc::new(TokenStore::in_memory())).unwrap();
        let dir = tempdir().unwrap();

        let path = save_download(&api, &dir.path().join("out"), DownloadEncoding::Cp949)
            .await
            .unwrap();

        assert!(path.ends_with("augmented_data_excel.csv"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "a,b\n1,2\n");
    }

    #[tokio::test]
    async fn failed_download_writes_nothing() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/data/download")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"detail": "No processed data"}"#)
            .create_async()
            .await;
        let api = ApiClient::new(server.url(), Duration::from_secs(5), Arc::new(TokenStore::in_memory())).unwrap();
        let dir = tempdir().unwrap();

        let err = save_download(&api, dir.path(), DownloadEncoding::Utf8).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(!dir.path().join("augmented_data.csv").exists());
    }
}
