//! HTTP access to the chat backend.

mod error;

pub use error::{ServiceError, ServiceErrorKind};

use copilot_core::{BackendStatus, Conversation, ConversationPath, ServiceInfo};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub fn default_http_client() -> Result<Client, ServiceError> {
    let client = Client::builder()
        .timeout(copilot_config::DEFAULT_REQUEST_TIMEOUT)
        .user_agent(concat!("copilot/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentSafetyStatus {
    #[serde(default)]
    is_enabled: bool,
}

#[derive(Debug, Serialize)]
struct CreateChatRequest<'a> {
    title: &'a str,
    path: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateChatResponse {
    chat_session: Conversation,
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl ServiceClient {
    pub fn new(
        client: Client,
        base_url: &str,
        access_token: Option<String>,
    ) -> Result<Self, ServiceError> {
        // `Url::join` drops the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ServiceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ServiceError::InvalidUrl(format!(
                "{base_url}: unsupported scheme"
            )));
        }
        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ServiceError> {
        let url = self.endpoint(path)?;
        debug!(%url, %method, "request");
        let mut req = self.client.request(method, url);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ServiceError> {
        Ok(self.request(Method::GET, path)?.send().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self.get(path).await?;
        read_json(resp).await
    }

    /// One health probe. 503 means the backend is up but in maintenance.
    pub async fn health(&self) -> Result<BackendStatus, ServiceError> {
        let resp = self.get("healthz").await?;
        match resp.status() {
            s if s.is_success() => Ok(BackendStatus::Available),
            StatusCode::SERVICE_UNAVAILABLE => Ok(BackendStatus::Maintenance),
            status => Err(ServiceError::Status {
                status,
                url: resp.url().to_string(),
            }),
        }
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>, ServiceError> {
        self.get_json("chats").await
    }

    /// `None` when the backend has nothing to report (204 or a `null` body).
    pub async fn service_info(&self) -> Result<Option<ServiceInfo>, ServiceError> {
        let resp = self.get("info").await?;
        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::Status {
                status,
                url: resp.url().to_string(),
            });
        }
        let body = resp.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn content_safety_enabled(&self) -> Result<bool, ServiceError> {
        let status: ContentSafetyStatus = self.get_json("contentSafety/status").await?;
        Ok(status.is_enabled)
    }

    /// `POST /chats`: starts a conversation in `path`, titled after the path.
    pub async fn create_conversation(
        &self,
        path: ConversationPath,
    ) -> Result<Conversation, ServiceError> {
        let body = serde_json::to_vec(&CreateChatRequest {
            title: path.title(),
            path: path.key(),
        })?;
        let resp = self
            .request(Method::POST, "chats")?
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let created: CreateChatResponse = read_json(resp).await?;
        Ok(created.chat_session)
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ServiceError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ServiceError::Status {
            status,
            url: resp.url().to_string(),
        });
    }
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
