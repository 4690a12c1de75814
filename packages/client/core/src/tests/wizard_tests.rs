use super::fixtures::*;
use crate::config::ConfigEdit;
use crate::effects::{Effect, FileTarget};
use crate::error::ApiError;
use crate::types::*;
use crate::wizard::*;
use std::path::PathBuf;

fn run(state: &WizardState, actions: Vec<WizardAction>) -> (WizardState, Vec<Effect>) {
    let mut current = state.clone();
    let mut all = Vec::new();
    for action in actions {
        let (next, effects) = reduce(&current, &action);
        current = next;
        all.extend(effects);
    }
    (current, all)
}

fn configured() -> WizardState {
    let (state, _) = run(
        &WizardState::default(),
        vec![
            WizardAction::FileChosen(Some(csv_file("sample.csv", 2048))),
            WizardAction::UploadFinished(Ok(sample_upload())),
        ],
    );
    state
}

fn processing() -> WizardState {
    reduce(&configured(), &WizardAction::StartProcessing).0
}

fn at_results() -> WizardState {
    let (state, _) = run(
        &processing(),
        vec![
            WizardAction::ProcessingFinished(Ok(processing_response())),
            WizardAction::PageLoaded(Ok(page(0, 100, 200))),
            WizardAction::StatisticsLoaded(Ok(statistics())),
            WizardAction::VisualizationLoaded(Ok(visualization())),
        ],
    );
    state
}

mod upload {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_choose_file_opens_picker() {
        let (_, effects) = reduce(&WizardState::default(), &WizardAction::ChooseFile);

        assert_eq!(effects, vec![Effect::PickFile(FileTarget::Augmentation)]);
    }

    #[test]
    fn test_cancelled_picker_changes_nothing() {
        let (state, effects) = reduce(&WizardState::default(), &WizardAction::FileChosen(None));

        assert_eq!(state, WizardState::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_valid_csv_starts_upload() {
        let file = csv_file("sample.csv", 2048);
        let (state, effects) = reduce(&WizardState::default(), &WizardAction::FileChosen(Some(file.clone())));

        assert!(state.uploading);
        assert_eq!(state.file_name.as_deref(), Some("sample.csv"));
        assert_eq!(effects, vec![Effect::UploadFile(file)]);
    }

    #[test]
    fn test_non_csv_is_rejected_before_upload() {
        let mut file = csv_file("report.xlsx", 2048);
        file.mime = None;
        let (state, effects) = reduce(&WizardState::default(), &WizardAction::FileChosen(Some(file)));

        assert!(!state.uploading);
        assert_eq!(state.error.as_deref(), Some("Only CSV files can be uploaded."));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let file = csv_file("big.csv", 10 * 1024 * 1024);
        let (state, effects) = reduce(&WizardState::default(), &WizardAction::FileChosen(Some(file)));

        assert_eq!(state.error.as_deref(), Some("File size cannot exceed 10MB."));
        assert_eq!(state.step, WizardStep::Upload);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_sample_csv_summary() {
        let state = configured();
        let upload = state.upload.as_ref().unwrap();

        assert_eq!(state.step, WizardStep::Configure);
        assert_eq!(upload.summary.total_rows, 100);
        assert_eq!(upload.summary.total_columns, 3);
        assert_eq!(upload.summary.missing_values.get("age"), Some(&1));
    }

    #[test]
    fn test_configure_shows_server_columns_once() {
        let mut upload = sample_upload();
        upload.columns.push("age".to_string());
        let (state, _) = run(
            &WizardState::default(),
            vec![
                WizardAction::FileChosen(Some(csv_file("sample.csv", 10))),
                WizardAction::UploadFinished(Ok(upload)),
            ],
        );

        let form = state.form.unwrap();
        assert_eq!(form.columns, vec!["age", "income", "city"]);
    }

    #[test]
    fn test_upload_failure_stays_on_upload() {
        let (state, _) = run(
            &WizardState::default(),
            vec![
                WizardAction::FileChosen(Some(csv_file("sample.csv", 10))),
                WizardAction::UploadFinished(Err(server_error("File is empty"))),
            ],
        );

        assert_eq!(state.step, WizardStep::Upload);
        assert!(!state.uploading);
        assert_eq!(state.error.as_deref(), Some("File is empty"));
    }

    #[test]
    fn test_network_failure_uses_generic_message() {
        let (state, _) = run(
            &WizardState::default(),
            vec![
                WizardAction::FileChosen(Some(csv_file("sample.csv", 10))),
                WizardAction::UploadFinished(Err(ApiError::Network("connection refused".into()))),
            ],
        );

        assert_eq!(state.error.as_deref(), Some(UPLOAD_FAILED));
    }

    #[test]
    fn test_stray_upload_result_is_ignored() {
        let (state, _) = reduce(&WizardState::default(), &WizardAction::UploadFinished(Ok(sample_upload())));

        assert_eq!(state.step, WizardStep::Upload);
        assert!(state.upload.is_none());
    }
}

mod configure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_edits_apply_only_while_configuring() {
        let start = WizardState::default();
        let (state, _) = reduce(&start, &WizardAction::Edit(ConfigEdit::SetRatio(2.0)));
        assert_eq!(state, start);

        let (state, _) = reduce(&configured(), &WizardAction::Edit(ConfigEdit::SetRatio(2.0)));
        assert_eq!(state.config().unwrap().augmentation_config.augmentation_ratio, Some(2.0));
    }

    #[test]
    fn test_start_processing_submits_config() {
        let (configured, _) = run(
            &configured(),
            vec![
                WizardAction::Edit(ConfigEdit::SetMethod(AugmentationMethod::GaussianCopula)),
                WizardAction::Edit(ConfigEdit::SetRatio(2.0)),
            ],
        );
        let (state, effects) = reduce(&configured, &WizardAction::StartProcessing);

        assert_eq!(state.step, WizardStep::Processing);
        let Effect::ProcessData(cfg) = &effects[0] else {
            panic!("expected ProcessData, got {:?}", effects);
        };
        assert_eq!(cfg.augmentation_config.augmentation_ratio, Some(2.0));
        assert_eq!(cfg.augmentation_config.target_rows, None);
    }

    #[test]
    fn test_unsubmitted_target_rows_are_used() {
        let (configured, _) = run(
            &configured(),
            vec![
                WizardAction::Edit(ConfigEdit::SetAmountMode(crate::config::AmountMode::TargetRows)),
                WizardAction::Edit(ConfigEdit::TargetRowsInput("2500".to_string())),
            ],
        );
        let (_, effects) = reduce(&configured, &WizardAction::StartProcessing);

        let Effect::ProcessData(cfg) = &effects[0] else {
            panic!("expected ProcessData, got {:?}", effects);
        };
        assert_eq!(cfg.augmentation_config.target_rows, Some(2500));
        assert_eq!(cfg.augmentation_config.augmentation_ratio, None);
    }

    #[test]
    fn test_incomplete_config_is_not_submitted() {
        let mut state = configured();
        if let Some(form) = state.form.as_mut() {
            form.config.augmentation_config.target_rows = Some(500);
        }
        let (state, effects) = reduce(&state, &WizardAction::StartProcessing);

        assert_eq!(state.step, WizardStep::Configure);
        assert_eq!(state.error.as_deref(), Some(INCOMPLETE_CONFIG));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_start_over_from_configure() {
        let (state, _) = reduce(&configured(), &WizardAction::StartOver);

        assert_eq!(state, WizardState::default());
    }
}

mod processing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_error_returns_to_configure_with_detail() {
        let (state, effects) = reduce(
            &processing(),
            &WizardAction::ProcessingFinished(Err(ApiError::Server {
                status: 400,
                detail: Some("invalid column type".to_string()),
            })),
        );

        assert_eq!(state.step, WizardStep::Configure);
        assert_eq!(state.error.as_deref(), Some("invalid column type"));
        assert!(state.processing.is_none());
        assert!(effects.is_empty());
        // The form survives so the user can adjust and retry.
        assert!(state.can_process());
    }

    #[test]
    fn test_full_chain_in_order() {
        let state = processing();

        let (state, effects) = reduce(&state, &WizardAction::ProcessingFinished(Ok(processing_response())));
        assert_eq!(
            effects,
            vec![Effect::FetchProcessedPage {
                page: 0,
                page_size: 100
            }]
        );
        assert_eq!(state.step, WizardStep::Processing);

        let (state, effects) = reduce(&state, &WizardAction::PageLoaded(Ok(page(0, 100, 200))));
        assert_eq!(effects, vec![Effect::FetchStatistics]);

        let (state, effects) = reduce(&state, &WizardAction::StatisticsLoaded(Ok(statistics())));
        assert_eq!(
            effects,
            vec![Effect::CreateVisualization {
                column: "age".to_string(),
                chart_type: ChartType::Distribution
            }]
        );
        assert_eq!(state.step, WizardStep::Processing);

        let (state, effects) = reduce(&state, &WizardAction::VisualizationLoaded(Ok(visualization())));
        assert!(effects.is_empty());
        assert_eq!(state.step, WizardStep::Results);
        assert!(state.processing.is_some());
        assert!(state.processed.is_some());
        assert!(state.statistics.is_some());
        assert!(state.visualization.is_some());
    }

    #[test]
    fn test_no_numeric_columns_skips_chart() {
        let (state, effects) = run(
            &WizardState::default(),
            vec![
                WizardAction::FileChosen(Some(csv_file("cities.csv", 10))),
                WizardAction::UploadFinished(Ok(categorical_upload())),
                WizardAction::StartProcessing,
                WizardAction::ProcessingFinished(Ok(processing_response())),
                WizardAction::PageLoaded(Ok(page(0, 100, 200))),
                WizardAction::StatisticsLoaded(Ok(statistics())),
            ],
        );

        assert_eq!(state.step, WizardStep::Results);
        assert!(state.visualization.is_none());
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::CreateVisualization { .. })));
    }

    #[test]
    fn test_chart_failure_still_shows_results() {
        let (state, _) = run(
            &processing(),
            vec![
                WizardAction::ProcessingFinished(Ok(processing_response())),
                WizardAction::PageLoaded(Ok(page(0, 100, 200))),
                WizardAction::StatisticsLoaded(Ok(statistics())),
                WizardAction::VisualizationLoaded(Err(server_error("plot failed"))),
            ],
        );

        assert_eq!(state.step, WizardStep::Results);
        assert!(state.visualization.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_row_fetch_failure_returns_to_configure() {
        let (state, _) = run(
            &processing(),
            vec![
                WizardAction::ProcessingFinished(Ok(processing_response())),
                WizardAction::PageLoaded(Err(server_error("No processed data"))),
            ],
        );

        assert_eq!(state.step, WizardStep::Configure);
        assert_eq!(state.error.as_deref(), Some("No processed data"));
    }

    #[test]
    fn test_statistics_failure_returns_to_configure() {
        let (state, _) = run(
            &processing(),
            vec![
                WizardAction::ProcessingFinished(Ok(processing_response())),
                WizardAction::PageLoaded(Ok(page(0, 100, 200))),
                WizardAction::StatisticsLoaded(Err(ApiError::Timeout)),
            ],
        );

        assert_eq!(state.step, WizardStep::Configure);
        assert_eq!(state.error.as_deref(), Some(PROCESSING_FAILED));
        assert!(state.processed.is_none());
    }

    #[test]
    fn test_stray_results_outside_processing_are_ignored() {
        let start = configured();
        let (state, effects) = run(
            &start,
            vec![
                WizardAction::ProcessingFinished(Ok(processing_response())),
                WizardAction::StatisticsLoaded(Ok(statistics())),
                WizardAction::VisualizationLoaded(Ok(visualization())),
            ],
        );

        assert_eq!(state, start);
        assert!(effects.is_empty());
    }
}

mod results {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_change_page_requests_server_page() {
        let (state, effects) = reduce(
            &at_results(),
            &WizardAction::ChangePage {
                page: 1,
                page_size: 100,
            },
        );

        assert!(state.page_loading);
        assert_eq!(
            effects,
            vec![Effect::FetchProcessedPage {
                page: 1,
                page_size: 100
            }]
        );

        let (state, _) = reduce(&state, &WizardAction::PageLoaded(Ok(page(1, 100, 200))));
        assert!(!state.page_loading);
        assert_eq!(state.processed.as_ref().map(|p| p.page), Some(1));
        assert_eq!(state.step, WizardStep::Results);
    }

    #[test]
    fn test_same_or_out_of_range_page_is_ignored() {
        let state = at_results();

        let (_, effects) = reduce(
            &state,
            &WizardAction::ChangePage {
                page: 0,
                page_size: 100,
            },
        );
        assert!(effects.is_empty());

        let (_, effects) = reduce(
            &state,
            &WizardAction::ChangePage {
                page: 2,
                page_size: 100,
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_page_size_change_fetches() {
        let (_, effects) = reduce(
            &at_results(),
            &WizardAction::ChangePage {
                page: 0,
                page_size: 10,
            },
        );

        assert_eq!(
            effects,
            vec![Effect::FetchProcessedPage {
                page: 0,
                page_size: 10
            }]
        );
    }

    #[test]
    fn test_page_failure_keeps_results() {
        let (state, _) = run(
            &at_results(),
            vec![
                WizardAction::ChangePage {
                    page: 1,
                    page_size: 100,
                },
                WizardAction::PageLoaded(Err(ApiError::Network("reset".into()))),
            ],
        );

        assert_eq!(state.step, WizardStep::Results);
        assert_eq!(state.error.as_deref(), Some(PAGE_FAILED));
        assert_eq!(state.processed.as_ref().map(|p| p.page), Some(0));
    }

    #[test]
    fn test_cp949_download() {
        let (state, effects) = reduce(&at_results(), &WizardAction::Download(DownloadEncoding::Cp949));

        assert_eq!(effects, vec![Effect::Download(DownloadEncoding::Cp949)]);
        assert_eq!(DownloadEncoding::Cp949.file_name(), "augmented_data_excel.csv");
        assert!(state.download_status.unwrap().contains("augmented_data_excel.csv"));
    }

    #[test]
    fn test_download_failure_is_not_blocking() {
        let (state, _) = reduce(
            &at_results(),
            &WizardAction::DownloadFinished {
                encoding: DownloadEncoding::Utf8Bom,
                result: Err(ApiError::Io("disk full".into())),
            },
        );

        assert_eq!(state.step, WizardStep::Results);
        assert!(state.error.is_none());
        assert_eq!(
            state.download_status.as_deref(),
            Some("Download of augmented_data_excel_utf8.csv failed.")
        );
    }

    #[test]
    fn test_download_success_reports_path() {
        let (state, _) = reduce(
            &at_results(),
            &WizardAction::DownloadFinished {
                encoding: DownloadEncoding::Utf8,
                result: Ok(PathBuf::from("/tmp/augmented_data.csv")),
            },
        );

        assert_eq!(state.download_status.as_deref(), Some("Saved /tmp/augmented_data.csv"));
    }

    #[test]
    fn test_start_over_from_results() {
        let (state, _) = reduce(&at_results(), &WizardAction::StartOver);

        assert_eq!(state.step, WizardStep::Upload);
        assert!(state.upload.is_none());
    }

    #[test]
    fn test_start_over_ignored_while_processing() {
        let state = processing();
        let (next, _) = reduce(&state, &WizardAction::StartOver);

        assert_eq!(next, state);
    }
}
