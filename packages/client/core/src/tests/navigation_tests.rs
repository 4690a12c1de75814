use super::fixtures::user;
use crate::session::SessionAction;
use crate::state::BackendHealth;
use crate::types::{ColumnsInfo, HealthStatus};
use crate::{reduce, Action, ApiError, AppState, Effect, Page};

#[cfg(test)]
mod navigation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn signed_in() -> AppState {
        reduce(
            &AppState::default(),
            &Action::Session(SessionAction::LoginFinished(Ok(user("alice")))),
        )
        .0
    }

    #[test]
    fn test_public_pages_open_without_session() {
        for page in [Page::Home, Page::Login, Page::Register] {
            let (state, effects) = reduce(&AppState::default(), &Action::Navigate(page));
            assert_eq!(state.page, page);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_protected_pages_redirect_to_login() {
        for page in [Page::Augmentation, Page::Analysis] {
            let (state, effects) = reduce(&AppState::default(), &Action::Navigate(page));
            assert_eq!(state.page, Page::Login);
            assert_eq!(state.pending_page, Some(page));
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_protected_pages_open_with_session() {
        let (state, _) = reduce(&signed_in(), &Action::Navigate(Page::Analysis));

        assert_eq!(state.page, Page::Analysis);
        assert!(state.pending_page.is_none());
    }

    #[test]
    fn test_analysis_page_looks_for_earlier_data() {
        let (state, effects) = reduce(&signed_in(), &Action::Navigate(Page::Analysis));
        assert_eq!(effects, vec![Effect::ResumeAnalysis]);

        let mut with_file = state.clone();
        with_file.analysis.phase = crate::analysis::ChatPhase::Idle;
        let (_, effects) = reduce(&with_file, &Action::Navigate(Page::Analysis));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_login_into_analysis_looks_for_earlier_data() {
        let (state, _) = reduce(&AppState::default(), &Action::Navigate(Page::Analysis));
        let (state, effects) = reduce(
            &state,
            &Action::Session(SessionAction::LoginFinished(Ok(user("alice")))),
        );

        assert_eq!(state.page, Page::Analysis);
        assert_eq!(effects, vec![Effect::ResumeAnalysis]);
    }

    #[test]
    fn test_login_resumes_pending_page() {
        let (state, _) = reduce(&AppState::default(), &Action::Navigate(Page::Augmentation));
        let (state, _) = reduce(&state, &Action::Navigate(Page::Register));
        assert_eq!(state.pending_page, Some(Page::Augmentation));

        let (state, _) = reduce(
            &state,
            &Action::Session(SessionAction::RegisterFinished(Ok(user("bob")))),
        );
        assert_eq!(state.page, Page::Augmentation);
    }

    #[test]
    fn test_leaving_auth_pages_drops_pending_page() {
        let (state, _) = reduce(&AppState::default(), &Action::Navigate(Page::Analysis));
        let (state, _) = reduce(&state, &Action::Navigate(Page::Home));

        assert!(state.pending_page.is_none());
    }

    #[test]
    fn test_options_checks_backend() {
        let (state, effects) = reduce(&AppState::default(), &Action::Navigate(Page::Options));

        assert_eq!(state.page, Page::Options);
        assert_eq!(state.backend.health, BackendHealth::Checking);
        assert_eq!(effects, vec![Effect::HealthCheck, Effect::FetchColumns]);
    }

    #[test]
    fn test_health_results() {
        let healthy = HealthStatus {
            status: "healthy".into(),
        };
        let (state, _) = reduce(&AppState::default(), &Action::HealthChecked(Ok(healthy)));
        assert_eq!(state.backend.health, BackendHealth::Healthy);

        let degraded = HealthStatus {
            status: "degraded".into(),
        };
        let (state, _) = reduce(&AppState::default(), &Action::HealthChecked(Ok(degraded)));
        assert_eq!(state.backend.health, BackendHealth::Unhealthy("degraded".into()));

        let (state, _) = reduce(
            &AppState::default(),
            &Action::HealthChecked(Err(ApiError::Network("refused".into()))),
        );
        assert_eq!(
            state.backend.health,
            BackendHealth::Unhealthy("Backend unreachable".into())
        );
    }

    #[test]
    fn test_columns_cleared_when_no_dataset() {
        let columns = ColumnsInfo {
            all_columns: vec!["age".into()],
            numeric_columns: vec!["age".into()],
            categorical_columns: vec![],
        };
        let (state, _) = reduce(&AppState::default(), &Action::ColumnsLoaded(Ok(columns.clone())));
        assert_eq!(state.backend.columns, Some(columns));

        let (state, _) = reduce(
            &state,
            &Action::ColumnsLoaded(Err(ApiError::Server {
                status: 400,
                detail: Some("No data".into()),
            })),
        );
        assert!(state.backend.columns.is_none());
    }

    #[test]
    fn test_dismiss_notice() {
        let mut start = AppState::default();
        start.notice = Some("hello".into());
        let (state, _) = reduce(&start, &Action::DismissNotice);

        assert!(state.notice.is_none());
    }

    #[test]
    fn test_nav_titles() {
        let titles: Vec<&str> = Page::NAV.iter().map(Page::title).collect();
        assert_eq!(titles, vec!["Home", "CSV Augmentation", "Analysis Agent", "Options"]);
    }
}
