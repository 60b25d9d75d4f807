use serde::{Deserialize, Serialize};

use crate::Rgb;

/// The named conversation modes a user can start a chat in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConversationPath {
    CareerPlan,
    FindRole,
    AssessStrengths,
    ForgeBrand,
}

impl ConversationPath {
    pub const DEFAULT: ConversationPath = ConversationPath::CareerPlan;

    pub const ALL: [ConversationPath; 4] = [
        ConversationPath::CareerPlan,
        ConversationPath::FindRole,
        ConversationPath::AssessStrengths,
        ConversationPath::ForgeBrand,
    ];

    /// Wire key, e.g. `"careerPlan"`.
    pub fn key(self) -> &'static str {
        match self {
            ConversationPath::CareerPlan => "careerPlan",
            ConversationPath::FindRole => "findRole",
            ConversationPath::AssessStrengths => "assessStrengths",
            ConversationPath::ForgeBrand => "forgeBrand",
        }
    }

    /// Exact, case-sensitive lookup. Unknown keys are not an error.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            ConversationPath::CareerPlan => "Build my career plan",
            ConversationPath::FindRole => "Find my next role",
            ConversationPath::AssessStrengths => "Assess my strengths",
            ConversationPath::ForgeBrand => "Forge my brand",
        }
    }

    pub fn key_color(self) -> Rgb {
        match self {
            ConversationPath::CareerPlan => Rgb::from_hex(0xe77037),
            ConversationPath::FindRole => Rgb::from_hex(0x24a0d7),
            ConversationPath::AssessStrengths => Rgb::from_hex(0xa33a96),
            ConversationPath::ForgeBrand => Rgb::from_hex(0x52a836),
        }
    }
}

impl Default for ConversationPath {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ConversationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
