use super::fixtures::*;
use crate::analysis::AnalysisAction;
use crate::reducer::{LOGIN_FAILED, SESSION_EXPIRED};
use crate::session::*;
use crate::types::{UserCreate, UserLogin};
use crate::wizard::WizardAction;
use crate::*;

fn apply(state: &AppState, actions: Vec<Action>) -> (AppState, Vec<Effect>) {
    let mut current = state.clone();
    let mut all = Vec::new();
    for action in actions {
        let (next, effects) = reduce(&current, &action);
        current = next;
        all.extend(effects);
    }
    (current, all)
}

fn login_input(field: LoginField, value: &str) -> Action {
    Action::Session(SessionAction::LoginInput {
        field,
        value: value.to_string(),
    })
}

fn register_input(field: RegisterField, value: &str) -> Action {
    Action::Session(SessionAction::RegisterInput {
        field,
        value: value.to_string(),
    })
}

fn logged_in() -> AppState {
    apply(
        &AppState::default(),
        vec![Action::Session(SessionAction::LoginFinished(Ok(user("alice"))))],
    )
    .0
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized { detail: None }
}

mod restore {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_restore_requests_stored_session() {
        let (state, effects) = reduce(&AppState::default(), &Action::Session(SessionAction::Restore));

        assert!(state.session.is_loading);
        assert_eq!(effects, vec![Effect::RestoreSession]);
    }

    #[test]
    fn test_restored_user_is_authenticated() {
        let (state, _) = apply(
            &AppState::default(),
            vec![
                Action::Session(SessionAction::Restore),
                Action::Session(SessionAction::Restored(Ok(Some(user("alice"))))),
            ],
        );

        assert!(state.session.is_authenticated());
        assert!(!state.session.is_loading);
        assert_eq!(state.session.username(), Some("alice"));
    }

    #[test]
    fn test_no_stored_token_stays_anonymous() {
        let (state, _) = apply(
            &AppState::default(),
            vec![
                Action::Session(SessionAction::Restore),
                Action::Session(SessionAction::Restored(Ok(None))),
            ],
        );

        assert!(!state.session.is_authenticated());
        assert_eq!(state.page, Page::Home);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_rejected_token_goes_to_login() {
        let (state, _) = apply(
            &AppState::default(),
            vec![
                Action::Session(SessionAction::Restore),
                Action::Session(SessionAction::Restored(Err(unauthorized()))),
            ],
        );

        assert!(!state.session.is_authenticated());
        assert_eq!(state.page, Page::Login);
    }
}

mod login {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submit_emits_login_effect() {
        let (state, effects) = apply(
            &AppState::default(),
            vec![
                login_input(LoginField::Username, " alice "),
                login_input(LoginField::Password, "secret"),
                Action::Session(SessionAction::SubmitLogin),
            ],
        );

        assert!(state.login.submitting);
        assert_eq!(
            effects,
            vec![Effect::Login(UserLogin {
                username: "alice".into(),
                password: "secret".into()
            })]
        );
    }

    #[test]
    fn test_missing_password_is_caught_locally() {
        let (state, effects) = apply(
            &AppState::default(),
            vec![
                login_input(LoginField::Username, "alice"),
                Action::Session(SessionAction::SubmitLogin),
            ],
        );

        assert!(effects.is_empty());
        assert!(!state.login.submitting);
        assert_eq!(state.login.error.as_deref(), Some("Please enter your password."));
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let (_, effects) = apply(
            &AppState::default(),
            vec![
                login_input(LoginField::Username, "alice"),
                login_input(LoginField::Password, "secret"),
                Action::Session(SessionAction::SubmitLogin),
                Action::Session(SessionAction::SubmitLogin),
            ],
        );

        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_success_authenticates_and_clears_form() {
        let (state, _) = apply(
            &AppState::default(),
            vec![
                Action::Navigate(Page::Login),
                login_input(LoginField::Username, "alice"),
                login_input(LoginField::Password, "secret"),
                Action::Session(SessionAction::SubmitLogin),
                Action::Session(SessionAction::LoginFinished(Ok(user("alice")))),
            ],
        );

        assert!(state.session.is_authenticated());
        assert_eq!(state.login, LoginForm::default());
        assert_eq!(state.page, Page::Home);
    }

    #[test]
    fn test_bad_credentials_show_server_detail() {
        let (state, _) = apply(
            &AppState::default(),
            vec![
                Action::Navigate(Page::Login),
                login_input(LoginField::Username, "alice"),
                login_input(LoginField::Password, "wrong"),
                Action::Session(SessionAction::SubmitLogin),
                Action::Session(SessionAction::LoginFinished(Err(ApiError::Unauthorized {
                    detail: Some("Incorrect username or password".into()),
                }))),
            ],
        );

        assert!(!state.session.is_authenticated());
        assert_eq!(state.page, Page::Login);
        assert_eq!(state.login.error.as_deref(), Some("Incorrect username or password"));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_network_failure_uses_generic_message() {
        let (state, _) = apply(
            &AppState::default(),
            vec![
                login_input(LoginField::Username, "alice"),
                login_input(LoginField::Password, "secret"),
                Action::Session(SessionAction::SubmitLogin),
                Action::Session(SessionAction::LoginFinished(Err(ApiError::Network("refused".into())))),
            ],
        );

        assert_eq!(state.login.error.as_deref(), Some(LOGIN_FAILED));
        assert!(!state.login.submitting);
    }
}

mod register {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(confirm: &str) -> Vec<Action> {
        vec![
            register_input(RegisterField::Username, "bob"),
            register_input(RegisterField::Email, "bob@example.com"),
            register_input(RegisterField::Password, "hunter2"),
            register_input(RegisterField::ConfirmPassword, confirm),
            Action::Session(SessionAction::SubmitRegister),
        ]
    }

    #[test]
    fn test_password_mismatch_blocks_request() {
        let (state, effects) = apply(&AppState::default(), filled("hunter3"));

        assert!(effects.is_empty());
        assert_eq!(state.register.error.as_deref(), Some("Passwords do not match."));
    }

    #[test]
    fn test_valid_form_emits_register() {
        let (_, effects) = apply(&AppState::default(), filled("hunter2"));

        assert_eq!(
            effects,
            vec![Effect::Register(UserCreate {
                email: "bob@example.com".into(),
                username: "bob".into(),
                password: "hunter2".into(),
                full_name: None,
            })]
        );
    }

    #[test]
    fn test_invalid_email_blocks_request() {
        let (state, effects) = apply(
            &AppState::default(),
            vec![
                register_input(RegisterField::Username, "bob"),
                register_input(RegisterField::Email, "bob"),
                Action::Session(SessionAction::SubmitRegister),
            ],
        );

        assert!(effects.is_empty());
        assert_eq!(state.register.error.as_deref(), Some("Please enter a valid email address."));
    }

    #[test]
    fn test_duplicate_user_shows_detail() {
        let mut actions = filled("hunter2");
        actions.push(Action::Session(SessionAction::RegisterFinished(Err(
            ApiError::Server {
                status: 400,
                detail: Some("Username already registered".into()),
            },
        ))));
        let (state, _) = apply(&AppState::default(), actions);

        assert!(!state.session.is_authenticated());
        assert_eq!(state.register.error.as_deref(), Some("Username already registered"));
    }

    #[test]
    fn test_success_signs_in() {
        let mut actions = filled("hunter2");
        actions.push(Action::Session(SessionAction::RegisterFinished(Ok(user("bob")))));
        let (state, _) = apply(&AppState::default(), actions);

        assert_eq!(state.session.username(), Some("bob"));
        assert_eq!(state.register, RegisterForm::default());
    }
}

mod logout {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logout_clears_user_and_flag_together() {
        let (state, effects) = reduce(&logged_in(), &Action::Session(SessionAction::Logout));

        assert!(state.session.user.is_none());
        assert!(!state.session.is_authenticated());
        assert_eq!(effects, vec![Effect::Logout]);
    }

    #[test]
    fn test_logout_leaves_protected_page() {
        let (state, _) = apply(
            &logged_in(),
            vec![
                Action::Navigate(Page::Augmentation),
                Action::Session(SessionAction::Logout),
            ],
        );

        assert_eq!(state.page, Page::Home);
    }

    #[test]
    fn test_next_user_starts_without_previous_uploads() {
        let (start, _) = apply(
            &logged_in(),
            vec![
                Action::Navigate(Page::Augmentation),
                Action::Wizard(WizardAction::FileChosen(Some(csv_file("alice.csv", 1024)))),
                Action::Wizard(WizardAction::UploadFinished(Ok(sample_upload()))),
                Action::Navigate(Page::Analysis),
                Action::Analysis(AnalysisAction::FileChosen(Some(csv_file("alice.csv", 1024)))),
                Action::Analysis(AnalysisAction::UploadFinished(Ok(analysis_upload()))),
            ],
        );
        assert!(start.analysis.has_file());

        let (state, effects) = apply(
            &start,
            vec![
                Action::Session(SessionAction::Logout),
                Action::Session(SessionAction::LoginFinished(Ok(user("bob")))),
                Action::Navigate(Page::Analysis),
            ],
        );

        assert_eq!(state.wizard, crate::wizard::WizardState::default());
        assert_eq!(state.analysis, crate::analysis::AnalysisState::default());
        assert_eq!(state.analysis.phase, crate::analysis::ChatPhase::NoFile);
        assert_eq!(effects.last(), Some(&Effect::ResumeAnalysis));
    }

    #[test]
    fn test_authenticated_iff_user_held() {
        let states = [
            AppState::default(),
            logged_in(),
            reduce(&logged_in(), &Action::Session(SessionAction::Logout)).0,
        ];
        for state in states {
            assert_eq!(state.session.is_authenticated(), state.session.user.is_some());
        }
    }
}

mod expiry {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expiring_actions() -> Vec<Action> {
        vec![
            Action::Wizard(WizardAction::UploadFinished(Err(unauthorized()))),
            Action::Wizard(WizardAction::ProcessingFinished(Err(unauthorized()))),
            Action::Wizard(WizardAction::PageLoaded(Err(unauthorized()))),
            Action::Wizard(WizardAction::StatisticsLoaded(Err(unauthorized()))),
            Action::Wizard(WizardAction::VisualizationLoaded(Err(unauthorized()))),
            Action::Wizard(WizardAction::DownloadFinished {
                encoding: types::DownloadEncoding::Utf8,
                result: Err(unauthorized()),
            }),
            Action::Analysis(AnalysisAction::UploadFinished(Err(unauthorized()))),
            Action::Analysis(AnalysisAction::QueryFinished(Err(unauthorized()))),
            Action::Analysis(AnalysisAction::DataCleared(Err(unauthorized()))),
            Action::HealthChecked(Err(unauthorized())),
            Action::ColumnsLoaded(Err(unauthorized())),
        ]
    }

    #[test]
    fn test_any_401_ends_session_and_shows_login() {
        for action in expiring_actions() {
            let (start, _) = reduce(&logged_in(), &Action::Navigate(Page::Augmentation));
            let (state, _) = reduce(&start, &action);

            assert!(!state.session.is_authenticated(), "{:?}", action);
            assert_eq!(state.page, Page::Login, "{:?}", action);
            assert_eq!(state.pending_page, Some(Page::Augmentation), "{:?}", action);
            assert_eq!(state.notice.as_deref(), Some(SESSION_EXPIRED), "{:?}", action);
        }
    }

    #[test]
    fn test_expiry_drops_uploaded_data() {
        let (start, _) = apply(
            &logged_in(),
            vec![
                Action::Navigate(Page::Augmentation),
                Action::Wizard(WizardAction::FileChosen(Some(csv_file("a.csv", 1024)))),
                Action::Wizard(WizardAction::UploadFinished(Ok(sample_upload()))),
            ],
        );
        let (state, _) = reduce(
            &start,
            &Action::Analysis(AnalysisAction::QueryFinished(Err(unauthorized()))),
        );

        assert_eq!(state.wizard.step, crate::wizard::WizardStep::Upload);
        assert!(state.wizard.upload.is_none());
        assert!(state.backend.columns.is_none());
    }

    #[test]
    fn test_other_errors_keep_session() {
        let (state, _) = reduce(
            &logged_in(),
            &Action::Wizard(WizardAction::ProcessingFinished(Err(server_error("boom")))),
        );

        assert!(state.session.is_authenticated());
        assert_eq!(state.page, Page::Home);
    }

    #[test]
    fn test_login_after_expiry_returns_to_page() {
        let (start, _) = reduce(&logged_in(), &Action::Navigate(Page::Analysis));
        let (state, _) = apply(
            &start,
            vec![
                Action::Analysis(AnalysisAction::QueryFinished(Err(unauthorized()))),
                Action::Session(SessionAction::LoginFinished(Ok(user("alice")))),
            ],
        );

        assert_eq!(state.page, Page::Analysis);
        assert!(state.notice.is_none());
        assert!(state.pending_page.is_none());
    }
}
