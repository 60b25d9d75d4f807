use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod account;
pub mod features;
pub mod path;
pub mod theme;

pub use account::{AccountIdentity, ActiveAccount};
pub use features::{FeatureFlags, FeatureKey};
pub use path::ConversationPath;
pub use theme::{
    select_theme, BrandRamp, Rgb, Theme, ThemeTokens, ThemeVariant, HEADER_BACKGROUND, HEADER_TEXT,
};

pub type ConversationId = String;

fn default_path() -> String {
    ConversationPath::DEFAULT.key().to_string()
}

/// A persisted conversation as returned by the chat service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub title: String,
    // Older backends still send the mode as `botPath`.
    #[serde(alias = "botPath", default = "default_path")]
    pub path: String,
    pub created_on: DateTime<Utc>,
}

impl Conversation {
    /// The known path this conversation runs in, if any.
    pub fn known_path(&self) -> Option<ConversationPath> {
        ConversationPath::from_key(&self.path)
    }
}

/// Result of a single backend health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Available,
    Maintenance,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStoreInfo {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub selected_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub name: String,
    #[serde(default)]
    pub manifest_domain: String,
}

/// Backend metadata fetched once conversations start loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(default)]
    pub memory_store: MemoryStoreInfo,
    #[serde(default)]
    pub available_plugins: Vec<PluginInfo>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub is_content_safety_enabled: bool,
}
