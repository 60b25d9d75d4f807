use serde::{Deserialize, Serialize};

/// The identity provider's view of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAccount {
    pub local_account_id: String,
    pub tenant_id: String,
    /// The provider's username field; this is the email address.
    pub username: String,
    pub name: Option<String>,
}

/// The signed-in user as projected into shared application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

impl From<&ActiveAccount> for AccountIdentity {
    fn from(a: &ActiveAccount) -> Self {
        Self {
            id: format!("{}.{}", a.local_account_id, a.tenant_id),
            email: a.username.clone(),
            display_name: a.name.clone().unwrap_or_else(|| a.username.clone()),
        }
    }
}
