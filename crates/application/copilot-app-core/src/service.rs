use anyhow::Context;
use async_trait::async_trait;
use copilot_core::{BackendStatus, Conversation, ConversationPath, ServiceInfo};
use copilot_infra::{default_http_client, ServiceClient};

use crate::ports::{BackendProbePort, ChatServicePort, ContentSafetyPort};

/// Serves all three backend ports from one HTTP client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: ServiceClient,
}

impl HttpBackend {
    pub fn new(base_url: &str, access_token: Option<String>) -> anyhow::Result<Self> {
        let http = default_http_client().context("Failed to build HTTP client")?;
        let client = ServiceClient::new(http, base_url, access_token)
            .with_context(|| format!("Invalid backend URL '{base_url}'"))?;
        Ok(Self { client })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url().as_str()
    }
}

#[async_trait]
impl BackendProbePort for HttpBackend {
    async fn probe(&self) -> anyhow::Result<BackendStatus> {
        self.client
            .health()
            .await
            .context("Backend health check failed")
    }
}

#[async_trait]
impl ChatServicePort for HttpBackend {
    async fn load_conversations(&self) -> anyhow::Result<Vec<Conversation>> {
        self.client
            .conversations()
            .await
            .context("Failed to load conversations")
    }

    async fn service_info(&self) -> anyhow::Result<Option<ServiceInfo>> {
        self.client
            .service_info()
            .await
            .context("Failed to fetch service info")
    }

    async fn create_conversation(&self, path: ConversationPath) -> anyhow::Result<Conversation> {
        self.client
            .create_conversation(path)
            .await
            .with_context(|| format!("Failed to start a {path} conversation"))
    }
}

#[async_trait]
impl ContentSafetyPort for HttpBackend {
    async fn content_safety_status(&self) -> anyhow::Result<bool> {
        self.client
            .content_safety_enabled()
            .await
            .context("Failed to fetch content safety status")
    }
}
