use copilot_core::{
    AccountIdentity, BackendStatus, Conversation, ConversationId, FeatureKey, ServiceInfo,
};

use crate::domain::{GenerationId, Lookup, ReadinessState};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Readiness
    ReadinessChanged(ReadinessState),
    UserInfoFailed,
    MaintenanceChanged(bool),

    // Backend probe
    ProbeStarted {
        probe_id: GenerationId,
    },
    ProbeStopped {
        probe_id: GenerationId,
    },
    ProbeReported {
        probe_id: GenerationId,
        status: BackendStatus,
    },

    // Conversation/service loader
    LoadStarted {
        load_id: GenerationId,
    },
    ConversationsLoaded {
        load_id: GenerationId,
        conversations: Vec<Conversation>,
    },
    ConversationsFailed {
        load_id: GenerationId,
        message: String,
    },
    ContentSafetyStatus {
        load_id: GenerationId,
        enabled: bool,
    },
    ServiceInfoLoaded {
        load_id: GenerationId,
        info: ServiceInfo,
    },
    /// A best-effort lookup failed or had nothing to report.
    LookupUnavailable {
        load_id: GenerationId,
        lookup: Lookup,
    },
    ConversationCreated {
        load_id: GenerationId,
        conversation: Conversation,
    },

    // Store actions
    ActiveUserSet(AccountIdentity),
    ConversationSelected(ConversationId),
    FeatureToggled {
        key: FeatureKey,
        enabled: bool,
    },
}
