use std::collections::{BTreeMap, BTreeSet};

use copilot_core::{
    AccountIdentity, Conversation, ConversationId, FeatureFlags, ServiceInfo,
};

/// Identifies one launch of the backend probe or the conversation loader.
/// Results tagged with an older id are dropped.
pub type GenerationId = uuid::Uuid;

/// Bootstrap progress from cold start to the interactive chat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadinessState {
    ProbingBackend,
    ResolvingUserInfo,
    UserInfoError,
    LoadingConversations,
    ConversationsError,
    Ready,
    SigningOut,
}

impl ReadinessState {
    pub const ALL: [ReadinessState; 7] = [
        ReadinessState::ProbingBackend,
        ReadinessState::ResolvingUserInfo,
        ReadinessState::UserInfoError,
        ReadinessState::LoadingConversations,
        ReadinessState::ConversationsError,
        ReadinessState::Ready,
        ReadinessState::SigningOut,
    ];

    /// No rule moves the machine out of these on its own.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReadinessState::UserInfoError
                | ReadinessState::ConversationsError
                | ReadinessState::Ready
                | ReadinessState::SigningOut
        )
    }

    /// Terminal states the user cannot leave without signing out or reloading.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            ReadinessState::UserInfoError | ReadinessState::ConversationsError
        )
    }
}

/// Best-effort lookups that run next to the conversation load. Readiness
/// never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookup {
    ContentSafety,
    ServiceInfo,
}

impl Lookup {
    pub const ALL: [Lookup; 2] = [Lookup::ContentSafety, Lookup::ServiceInfo];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootFailure {
    #[error("Unable to load user info. Please try signing out and signing back in.")]
    UserInfoResolution,
    #[error("Unable to load chats. Please try refreshing the page.")]
    ConversationLoad { reason: String },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub readiness: ReadinessState,
    pub last_failure: Option<BootFailure>,

    pub active_user: Option<AccountIdentity>,
    pub service_info: Option<ServiceInfo>,
    pub content_safety_enabled: bool,

    pub conversations: BTreeMap<ConversationId, Conversation>,
    pub selected_conversation_id: Option<ConversationId>,

    pub features: FeatureFlags,
    pub is_maintenance: bool,

    pub probe_id: Option<GenerationId>,
    pub load_id: Option<GenerationId>,
    /// Lookups of the current load that have neither answered nor given up.
    pub pending_lookups: BTreeSet<Lookup>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            readiness: ReadinessState::ProbingBackend,
            last_failure: None,
            active_user: None,
            service_info: None,
            content_safety_enabled: false,
            conversations: BTreeMap::new(),
            selected_conversation_id: None,
            features: FeatureFlags::default(),
            is_maintenance: false,
            probe_id: None,
            load_id: None,
            pending_lookups: BTreeSet::new(),
        }
    }
}

impl AppState {
    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.selected_conversation_id
            .as_ref()
            .and_then(|id| self.conversations.get(id))
    }

    pub fn lookups_settled(&self) -> bool {
        self.pending_lookups.is_empty()
    }
}
