use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use copilot_core::ActiveAccount;
use tracing::info;

use crate::ports::IdentityPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Anyone reaching the backend may chat.
    None,
    /// A signed-in account is required before conversations load.
    Required,
}

/// Identity provider backed by a fixed, locally configured account.
///
/// Starts signed out. Clones share the sign-in flag.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    mode: AuthMode,
    account: Option<ActiveAccount>,
    signed_in: Arc<AtomicBool>,
}

impl StaticIdentity {
    pub fn new(mode: AuthMode, account: Option<ActiveAccount>) -> Self {
        Self {
            mode,
            account,
            signed_in: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(AuthMode::None, None)
    }

    /// Completes a sign-in. The kernel notices on the next
    /// `AppCommand::AuthStatusChanged`.
    pub fn sign_in(&self) {
        if !self.signed_in.swap(true, Ordering::SeqCst) {
            info!("signed in");
        }
    }
}

impl IdentityPort for StaticIdentity {
    fn requires_identity(&self) -> bool {
        self.mode == AuthMode::Required
    }

    fn is_authenticated(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }

    fn active_account(&self) -> Option<ActiveAccount> {
        if self.is_authenticated() {
            self.account.clone()
        } else {
            None
        }
    }

    fn sign_out(&self) {
        if self.signed_in.swap(false, Ordering::SeqCst) {
            info!("signed out");
        }
    }
}
