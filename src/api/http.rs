use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

use crate::models::{ListQuery, SessionPage, SessionPayload};

use super::{ApiError, ApiResult, SessionApi};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// `reqwest` client for the `/sessions` endpoints. No request timeout is set:
/// a call waits for the transport to either answer or fail.
#[derive(Clone)]
pub struct HttpSessionApi {
    http: Client,
    base: String,
}

impl HttpSessionApi {
    pub fn new(base: &Url) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Probes `GET /health`. Only used to warn early about an unreachable API.
    pub async fn health(&self) -> ApiResult<()> {
        let response = send(self.http.get(self.url("/health"))).await?;
        expect_success(response).map(|_| ())
    }
}

async fn send(request: RequestBuilder) -> ApiResult<Response> {
    request
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))
}

fn expect_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log_warn!("{} answered {}", response.url(), status);
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn list_sessions(&self, query: &ListQuery) -> ApiResult<SessionPage> {
        log_debug!("GET /sessions {:?}", query);
        let request = self
            .http
            .get(self.url("/sessions"))
            .query(&query.to_pairs())
            .header("Accept", "application/json");

        let response = expect_success(send(request).await?)?;
        response
            .json::<SessionPage>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn create_session(&self, payload: &SessionPayload) -> ApiResult<()> {
        log_debug!("POST /sessions '{}'", payload.title);
        let request = self.http.post(self.url("/sessions")).json(payload);
        expect_success(send(request).await?).map(|_| ())
    }

    async fn update_session(&self, id: i64, payload: &SessionPayload) -> ApiResult<()> {
        log_debug!("PATCH /sessions/{}", id);
        let request = self
            .http
            .patch(self.url(&format!("/sessions/{id}")))
            .json(payload);
        expect_success(send(request).await?).map(|_| ())
    }

    async fn delete_session(&self, id: i64) -> ApiResult<()> {
        log_debug!("DELETE /sessions/{}", id);
        let request = self.http.delete(self.url(&format!("/sessions/{id}")));
        expect_success(send(request).await?).map(|_| ())
    }
}
