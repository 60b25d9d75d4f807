use async_trait::async_trait;
use copilot_core::{ActiveAccount, BackendStatus, Conversation, ConversationPath, ServiceInfo};

/// The identity provider as seen by the bootstrap core.
///
/// The kernel reads these answers only while evaluating, which happens after a
/// command or a task result. Whoever changes the sign-in status outside the
/// kernel must follow up with `AppCommand::AuthStatusChanged`.
pub trait IdentityPort: Send + Sync + 'static {
    /// Whether this deployment requires a signed-in user at all.
    fn requires_identity(&self) -> bool;
    fn is_authenticated(&self) -> bool;
    fn active_account(&self) -> Option<ActiveAccount>;
    /// Fire-and-forget.
    fn sign_out(&self);
}

#[async_trait]
pub trait BackendProbePort: Send + Sync + 'static {
    async fn probe(&self) -> anyhow::Result<BackendStatus>;
}

#[async_trait]
pub trait ChatServicePort: Send + Sync + 'static {
    async fn load_conversations(&self) -> anyhow::Result<Vec<Conversation>>;
    async fn service_info(&self) -> anyhow::Result<Option<ServiceInfo>>;
    async fn create_conversation(&self, path: ConversationPath) -> anyhow::Result<Conversation>;
}

#[async_trait]
pub trait ContentSafetyPort: Send + Sync + 'static {
    async fn content_safety_status(&self) -> anyhow::Result<bool>;
}
