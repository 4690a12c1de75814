use dddb_client_core::types::*;
use dddb_client_core::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::token_store::TokenStore;

/// One method per backend operation. No retries; every failure is returned
/// to the caller as an `ApiError`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    pub base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, tokens: Arc<TokenStore>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let resp = builder.send().await.map_err(transport_error)?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let err = failure(resp).await;
        if err.is_unauthorized() {
            warn!("request rejected as unauthorized, clearing token");
            self.tokens.clear();
        }
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let resp = self.send(builder).await?;
        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Decode(e.to_string())
            }
        })
    }

    // Auth

    pub async fn register(&self, user: &UserCreate) -> ApiResult<User> {
        self.json(self.request(Method::POST, "/api/auth/register").json(user))
            .await
    }

    /// Exchanges credentials for a token and stores it for later requests.
    pub async fn login(&self, credentials: &UserLogin) -> ApiResult<Token> {
        let token: Token = self
            .json(self.request(Method::POST, "/api/auth/login").json(credentials))
            .await?;
        self.tokens.set(&token.access_token);
        Ok(token)
    }

    /// Forgets the token before the server answers; the reply never touches the store.
    pub async fn logout(&self) -> ApiResult<()> {
        let request = self.request(Method::POST, "/api/auth/logout");
        self.tokens.clear();
        let resp = request.send().await.map_err(transport_error)?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(failure(resp).await)
        }
    }

    pub async fn get_current_user(&self) -> ApiResult<User> {
        self.json(self.request(Method::GET, "/api/auth/me")).await
    }

    // Augmentation

    pub async fn upload_file(&self, file: &FileCandidate) -> ApiResult<UploadResponse> {
        let form = file_form(file).await?;
        self.json(self.request(Method::POST, "/api/data/upload").multipart(form))
            .await
    }

    pub async fn process_data(&self, config: &ProcessingConfig) -> ApiResult<ProcessingResponse> {
        self.json(self.request(Method::POST, "/api/data/process").json(config))
            .await
    }

    pub async fn get_processed_data(&self, page: u32, page_size: u32) -> ApiResult<ProcessedPage> {
        self.json(
            self.request(Method::GET, "/api/data/processed")
                .query(&[("page", page), ("page_size", page_size)]),
        )
        .await
    }

    pub async fn get_statistics(&self) -> ApiResult<Statistics> {
        self.json(self.request(Method::GET, "/api/data/statistics")).await
    }

    pub async fn create_visualization(&self, column: &str, chart_type: ChartType) -> ApiResult<Visualization> {
        let body = VisualizationRequest {
            column_name: column.to_string(),
            chart_type,
        };
        self.json(self.request(Method::POST, "/api/data/visualize").json(&body))
            .await
    }

    /// Raw bytes of the augmented CSV in the requested encoding.
    pub async fn download_data(&self, encoding: DownloadEncoding) -> ApiResult<Vec<u8>> {
        let resp = self
            .send(
                self.request(Method::GET, "/api/data/download")
                    .query(&[("encoding", encoding.as_query())]),
            )
            .await?;
        let bytes = resp.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }

    pub async fn get_columns(&self) -> ApiResult<ColumnsInfo> {
        self.json(self.request(Method::GET, "/api/data/columns")).await
    }

    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.json(self.request(Method::GET, "/health")).await
    }

    // Analysis

    pub async fn upload_for_analysis(&self, file: &FileCandidate) -> ApiResult<AnalysisUpload> {
        let form = file_form(file).await?;
        self.json(self.request(Method::POST, "/api/analysis/upload").multipart(form))
            .await
    }

    pub async fn analyze_query(&self, query: &str) -> ApiResult<QueryResponse> {
        self.json(
            self.request(Method::POST, "/api/analysis/query")
                .form(&[("query", query)]),
        )
        .await
    }

    pub async fn get_suggestions(&self) -> ApiResult<Suggestions> {
        self.json(self.request(Method::GET, "/api/analysis/suggestions"))
            .await
    }

    /// 404 when nothing has been uploaded for this user.
    pub async fn get_data_info(&self) -> ApiResult<DataInfo> {
        self.json(self.request(Method::GET, "/api/analysis/data-info"))
            .await
    }

    pub async fn clear_analysis_data(&self) -> ApiResult<ClearResponse> {
        self.json(self.request(Method::DELETE, "/api/analysis/clear"))
            .await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

async fn failure(resp: Response) -> ApiError {
    let status = resp.status();
    let url = resp.url().path().to_string();
    let body = resp.text().await.unwrap_or_default();
    let detail = error_detail(&body);

    debug!(%url, status = status.as_u16(), ?detail, "request failed");
    if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized { detail }
    } else {
        ApiError::Server {
            status: status.as_u16(),
            detail,
        }
    }
}

async fn file_form(file: &FileCandidate) -> ApiResult<Form> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ApiError::Io(e.to_string()))?;
    let mime = file.mime.as_deref().unwrap_or("text/csv");
    let part = Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(mime)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(Form::new().part("file", part))
}

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// (`{"detail": [{"msg": "..."}]}`) and `{"message": "..."}`.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
