use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureKey {
    DarkMode,
    PluginsPlannersAndPersonas,
    SimplifiedExperience,
    AzureContentSafety,
    ExportChatSessions,
    DeleteChats,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 6] = [
        FeatureKey::DarkMode,
        FeatureKey::PluginsPlannersAndPersonas,
        FeatureKey::SimplifiedExperience,
        FeatureKey::AzureContentSafety,
        FeatureKey::ExportChatSessions,
        FeatureKey::DeleteChats,
    ];
}

/// Feature toggles owned outside the bootstrap core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    enabled: BTreeMap<FeatureKey, bool>,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enabled: FeatureKey::ALL.into_iter().map(|k| (k, false)).collect(),
        }
    }
}

impl FeatureFlags {
    pub fn is_enabled(&self, key: FeatureKey) -> bool {
        self.enabled.get(&key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: FeatureKey, enabled: bool) {
        self.enabled.insert(key, enabled);
    }
}
