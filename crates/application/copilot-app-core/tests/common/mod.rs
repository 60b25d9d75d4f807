#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use copilot_app_core::{
    AppKernel, AppState, AppStore, BackendProbePort, ChatServicePort, ContentSafetyPort,
    IdentityPort, KernelConfig,
};
use copilot_core::{ActiveAccount, BackendStatus, Conversation, ConversationPath, ServiceInfo};
use tokio::sync::Notify;

pub const WAIT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct MockIdentity {
    pub requires: bool,
    pub authenticated: Arc<AtomicBool>,
    pub account: Arc<Mutex<Option<ActiveAccount>>>,
    pub sign_outs: Arc<AtomicUsize>,
}

impl MockIdentity {
    pub fn signed_in(account: Option<ActiveAccount>) -> Self {
        Self {
            requires: true,
            authenticated: Arc::new(AtomicBool::new(true)),
            account: Arc::new(Mutex::new(account)),
            sign_outs: Arc::default(),
        }
    }

    pub fn signed_out() -> Self {
        let me = Self::signed_in(Some(account()));
        me.authenticated.store(false, Ordering::SeqCst);
        me
    }

    pub fn no_auth() -> Self {
        Self {
            requires: false,
            ..Self::signed_out()
        }
    }
}

impl IdentityPort for MockIdentity {
    fn requires_identity(&self) -> bool {
        self.requires
    }
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
    fn active_account(&self) -> Option<ActiveAccount> {
        self.account.lock().unwrap().clone()
    }
    fn sign_out(&self) {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.authenticated.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct MockProbe {
    pub maintenance: Arc<AtomicBool>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl BackendProbePort for MockProbe {
    async fn probe(&self) -> anyhow::Result<BackendStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.maintenance.load(Ordering::SeqCst) {
            Ok(BackendStatus::Maintenance)
        } else {
            Ok(BackendStatus::Available)
        }
    }
}

#[derive(Clone)]
pub struct MockChat {
    pub conversations: Result<Vec<Conversation>, String>,
    pub service_info: Option<ServiceInfo>,
    /// When set, each conversation load waits for one `notify_one`.
    pub gate: Option<Arc<Notify>>,
    pub loads: Arc<AtomicUsize>,
    pub creates: Arc<AtomicUsize>,
}

impl Default for MockChat {
    fn default() -> Self {
        Self {
            conversations: Ok(vec![
                conversation("c1", "careerPlan", 1),
                conversation("c2", "findRole", 2),
            ]),
            service_info: Some(ServiceInfo {
                version: "1.0.0".into(),
                ..Default::default()
            }),
            gate: None,
            loads: Arc::default(),
            creates: Arc::default(),
        }
    }
}

impl MockChat {
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                gate: Some(gate.clone()),
                ..Self::default()
            },
            gate,
        )
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatServicePort for MockChat {
    async fn load_conversations(&self) -> anyhow::Result<Vec<Conversation>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.conversations.clone().map_err(anyhow::Error::msg)
    }

    async fn service_info(&self) -> anyhow::Result<Option<ServiceInfo>> {
        Ok(self.service_info.clone())
    }

    async fn create_conversation(&self, path: ConversationPath) -> anyhow::Result<Conversation> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(conversation(&format!("new-{}", path.key()), path.key(), 20))
    }
}

#[derive(Clone)]
pub struct MockSafety {
    pub result: Result<bool, String>,
}

#[async_trait]
impl ContentSafetyPort for MockSafety {
    async fn content_safety_status(&self) -> anyhow::Result<bool> {
        self.result.clone().map_err(anyhow::Error::msg)
    }
}

pub type TestKernel = AppKernel<MockIdentity, MockProbe, MockChat, MockSafety>;

pub fn kernel(identity: MockIdentity, probe: MockProbe, chat: MockChat) -> TestKernel {
    kernel_with(AppState::default(), identity, probe, chat, MockSafety { result: Ok(true) })
}

pub fn kernel_with(
    state: AppState,
    identity: MockIdentity,
    probe: MockProbe,
    chat: MockChat,
    safety: MockSafety,
) -> TestKernel {
    AppKernel::new(
        AppStore::new(state),
        identity,
        probe,
        chat,
        safety,
        KernelConfig {
            probe_interval: Duration::from_millis(10),
        },
    )
}

pub fn account() -> ActiveAccount {
    ActiveAccount {
        local_account_id: "local-1".into(),
        tenant_id: "tenant-9".into(),
        username: "ada@example.com".into(),
        name: Some("Ada".into()),
    }
}

pub fn conversation(id: &str, path: &str, day: u32) -> Conversation {
    Conversation {
        id: id.into(),
        title: format!("Chat {id}"),
        path: path.into(),
        created_on: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
    }
}

/// Lets spawned tasks run, then applies whatever they produced.
pub async fn settle(kernel: &mut TestKernel) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    kernel.tick();
}
