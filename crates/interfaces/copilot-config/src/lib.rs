//! Central configuration constants for the client shell.

use std::time::Duration;

/// Title shown in the shell header and on the sign-in screen.
pub const APP_TITLE: &str = "Career Copilot";

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:40443";

/// Conversation path used when no conversation is selected.
pub const DEFAULT_CONVERSATION_PATH: &str = "careerPlan";

/// Default delay between backend probe attempts.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(3);

/// Minimum allowed delay between backend probe attempts.
pub const MIN_PROBE_INTERVAL: Duration = Duration::from_millis(10);

/// Maximum allowed delay between backend probe attempts.
pub const MAX_PROBE_INTERVAL: Duration = Duration::from_secs(60);

/// Per-request timeout for backend HTTP calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How long `copilot-cli boot` waits for a terminal readiness state.
pub const DEFAULT_BOOT_TIMEOUT: Duration = Duration::from_secs(120);

/// How long `copilot-cli boot` keeps listening for best-effort lookups
/// (content safety, service info) after readiness settles.
pub const LOOKUP_GRACE: Duration = Duration::from_secs(5);

/// Convenience function to clamp a probe interval into the allowed range.
pub fn clamp_probe_interval(v: Duration) -> Duration {
    v.clamp(MIN_PROBE_INTERVAL, MAX_PROBE_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_interval_is_clamped_on_both_ends() {
        assert_eq!(clamp_probe_interval(Duration::ZERO), MIN_PROBE_INTERVAL);
        assert_eq!(
            clamp_probe_interval(Duration::from_secs(3600)),
            MAX_PROBE_INTERVAL
        );
        assert_eq!(
            clamp_probe_interval(DEFAULT_PROBE_INTERVAL),
            DEFAULT_PROBE_INTERVAL
        );
    }
}
