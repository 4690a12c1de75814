//! Multi-request flows behind the auth and analysis-resume effects.

use dddb_client_core::types::{AnalysisSnapshot, User, UserCreate, UserLogin};
use dddb_client_core::ApiResult;
use tracing::{info, warn};

use crate::api::ApiClient;

/// Logs in and loads the user behind the new token.
pub async fn login(api: &ApiClient, credentials: &UserLogin) -> ApiResult<User> {
    api.login(credentials).await?;
    let user = api.get_current_user().await?;
    info!(username = %user.username, "logged in");
    Ok(user)
}

/// Registers, then logs in with the same credentials.
pub async fn register(api: &ApiClient, request: &UserCreate) -> ApiResult<User> {
    api.register(request).await?;
    let credentials = UserLogin {
        username: request.username.clone(),
        password: request.password.clone(),
    };
    login(api, &credentials).await
}

pub async fn logout(api: &ApiClient) {
    if let Err(err) = api.logout().await {
        warn!(error = %err, "server logout failed, token removed locally");
    }
}

/// The user for a token saved by an earlier run. `Ok(None)` when there is no
/// token to try.
pub async fn restore(api: &ApiClient) -> ApiResult<Option<User>> {
    if !api.tokens().is_present() {
        return Ok(None);
    }
    let user = api.get_current_user().await?;
    info!(username = %user.username, "restored session");
    Ok(Some(user))
}

/// Data and suggestions the server kept from an earlier analysis upload.
pub async fn resume_analysis(api: &ApiClient) -> ApiResult<AnalysisSnapshot> {
    let data_info = api.get_data_info().await?;
    let suggestions = match api.get_suggestions().await {
        Ok(s) => s.suggestions,
        Err(err) if err.is_unauthorized() => return Err(err),
        Err(err) => {
            warn!(error = %err, "no suggestions for resumed analysis data");
            Vec::new()
        }
    };
    Ok(AnalysisSnapshot {
        data_info,
        suggestions,
    })
}
