use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app_core::DomainEvent;
use copilot_core::ConversationPath;

use crate::domain::{GenerationId, Lookup};
use crate::ports::{ChatServicePort, ContentSafetyPort};

/// Launches the three readiness tasks that follow authentication.
///
/// Conversations, content-safety status and service info load concurrently.
/// Only the conversation branch reports failure; the other two are best-effort
/// and merely report that they gave up.
pub struct ConversationLoader<C, S> {
    chat: Arc<C>,
    safety: Arc<S>,
    tx: mpsc::Sender<DomainEvent>,
}

impl<C, S> ConversationLoader<C, S>
where
    C: ChatServicePort,
    S: ContentSafetyPort,
{
    pub fn new(chat: Arc<C>, safety: Arc<S>, tx: mpsc::Sender<DomainEvent>) -> Self {
        Self { chat, safety, tx }
    }

    pub fn start(&self, load_id: GenerationId) -> anyhow::Result<()> {
        let handle = crate::async_runtime::handle()?;

        let chat = self.chat.clone();
        let tx = self.tx.clone();
        handle.spawn(async move {
            let ev = match chat.load_conversations().await {
                Ok(conversations) => {
                    debug!(%load_id, count = conversations.len(), "conversations loaded");
                    DomainEvent::ConversationsLoaded {
                        load_id,
                        conversations,
                    }
                }
                Err(e) => {
                    warn!(%load_id, "failed to load conversations: {e:#}");
                    DomainEvent::ConversationsFailed {
                        load_id,
                        message: format!("{e:#}"),
                    }
                }
            };
            let _ = tx.send(ev).await;
        });

        let safety = self.safety.clone();
        let tx = self.tx.clone();
        handle.spawn(async move {
            match safety.content_safety_status().await {
                Ok(enabled) => {
                    let _ = tx
                        .send(DomainEvent::ContentSafetyStatus { load_id, enabled })
                        .await;
                }
                Err(e) => {
                    debug!(%load_id, "content safety status unavailable: {e:#}");
                    let _ = tx
                        .send(DomainEvent::LookupUnavailable {
                            load_id,
                            lookup: Lookup::ContentSafety,
                        })
                        .await;
                }
            }
        });

        let chat = self.chat.clone();
        let tx = self.tx.clone();
        handle.spawn(async move {
            let ev = match chat.service_info().await {
                Ok(Some(info)) => DomainEvent::ServiceInfoLoaded { load_id, info },
                Ok(None) => {
                    debug!(%load_id, "backend returned no service info");
                    DomainEvent::LookupUnavailable {
                        load_id,
                        lookup: Lookup::ServiceInfo,
                    }
                }
                Err(e) => {
                    debug!(%load_id, "service info unavailable: {e:#}");
                    DomainEvent::LookupUnavailable {
                        load_id,
                        lookup: Lookup::ServiceInfo,
                    }
                }
            };
            let _ = tx.send(ev).await;
        });

        Ok(())
    }

    /// Starts a conversation in `path` on behalf of the load `load_id`.
    pub fn create(&self, load_id: GenerationId, path: ConversationPath) -> anyhow::Result<()> {
        let handle = crate::async_runtime::handle()?;
        let chat = self.chat.clone();
        let tx = self.tx.clone();
        handle.spawn(async move {
            match chat.create_conversation(path).await {
                Ok(conversation) => {
                    debug!(%load_id, id = %conversation.id, %path, "conversation created");
                    let _ = tx
                        .send(DomainEvent::ConversationCreated {
                            load_id,
                            conversation,
                        })
                        .await;
                }
                Err(e) => warn!(%load_id, %path, "failed to create conversation: {e:#}"),
            }
        });
        Ok(())
    }
}
