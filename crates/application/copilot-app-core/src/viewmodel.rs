use copilot_core::{select_theme, ConversationPath, FeatureKey, Rgb, Theme, HEADER_BACKGROUND, HEADER_TEXT};

use crate::domain::{AppState, BootFailure, ReadinessState};

pub const SIGNING_OUT_TEXT: &str = "Signing you out...";
pub const RESOLVING_USER_TEXT: &str = "Hang tight while we fetch your information...";
pub const LOADING_CHATS_TEXT: &str = "Loading chats...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatBody {
    BackendProbe,
    Loading { text: &'static str },
    Error { text: String },
    ChatView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderVm {
    pub title: &'static str,
    /// The header bar keeps its own colours regardless of the conversation theme.
    pub background: Rgb,
    pub foreground: Rgb,
    /// Settings menu and friends; hidden until user info is resolved.
    pub show_corner_items: bool,
    pub show_plugin_gallery: bool,
    pub user_display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatShellVm {
    pub header: HeaderVm,
    pub body: ChatBody,
}

/// The top-level view to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView {
    SignIn { title: &'static str },
    SigningOut { text: &'static str },
    Chat(ChatShellVm),
}

pub fn shell_vm(requires_identity: bool, authenticated: bool, state: &AppState) -> ShellView {
    if requires_identity && !authenticated {
        return match state.readiness {
            ReadinessState::SigningOut => ShellView::SigningOut {
                text: SIGNING_OUT_TEXT,
            },
            _ => ShellView::SignIn {
                title: copilot_config::APP_TITLE,
            },
        };
    }

    ShellView::Chat(ChatShellVm {
        header: header_vm(state),
        body: chat_body(state.readiness),
    })
}

pub fn chat_body(readiness: ReadinessState) -> ChatBody {
    match readiness {
        ReadinessState::ProbingBackend => ChatBody::BackendProbe,
        ReadinessState::ResolvingUserInfo => ChatBody::Loading {
            text: RESOLVING_USER_TEXT,
        },
        ReadinessState::UserInfoError => ChatBody::Error {
            text: BootFailure::UserInfoResolution.to_string(),
        },
        ReadinessState::LoadingConversations => ChatBody::Loading {
            text: LOADING_CHATS_TEXT,
        },
        ReadinessState::ConversationsError => ChatBody::Error {
            text: BootFailure::ConversationLoad {
                reason: String::new(),
            }
            .to_string(),
        },
        ReadinessState::Ready => ChatBody::ChatView,
        ReadinessState::SigningOut => ChatBody::Loading {
            text: SIGNING_OUT_TEXT,
        },
    }
}

fn header_vm(state: &AppState) -> HeaderVm {
    let show_corner_items = !matches!(
        state.readiness,
        ReadinessState::ProbingBackend | ReadinessState::ResolvingUserInfo
    );
    HeaderVm {
        title: copilot_config::APP_TITLE,
        background: HEADER_BACKGROUND,
        foreground: HEADER_TEXT,
        show_corner_items,
        show_plugin_gallery: show_corner_items
            && state
                .features
                .is_enabled(FeatureKey::PluginsPlannersAndPersonas),
        user_display_name: state.active_user.as_ref().map(|u| u.display_name.clone()),
    }
}

/// Theme for the selected conversation, or the default path when there is none.
pub fn theme_vm(state: &AppState) -> Theme {
    let path = state
        .selected_conversation()
        .map(|c| c.path.as_str())
        .unwrap_or(ConversationPath::DEFAULT.key());
    select_theme(path, state.features.is_enabled(FeatureKey::DarkMode))
}
