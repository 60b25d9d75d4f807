use copilot_core::{ConversationId, ConversationPath, FeatureKey};

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Boot
    Start,
    AuthStatusChanged,
    SetMaintenance(bool),
    BackendFound,

    // Session
    BeginSignOut,

    // Conversations
    /// Starts a new conversation in `path` and selects it. Only honoured once
    /// the shell is `Ready`.
    CreateConversation(ConversationPath),
    SelectConversation(ConversationId),

    // Flags
    SetFeature { key: FeatureKey, enabled: bool },
}
