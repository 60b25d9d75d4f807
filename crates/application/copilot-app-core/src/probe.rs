use std::sync::Arc;
use std::time::Duration;

use copilot_core::BackendStatus;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::app_core::DomainEvent;
use crate::domain::GenerationId;
use crate::ports::BackendProbePort;

/// Polls the backend until it answers `Available`.
///
/// `Maintenance` answers are reported and polling continues; errors are logged
/// and retried. A new `start` or `cancel` stops the previous poller.
pub struct BackendProber<P> {
    port: Arc<P>,
    tx: mpsc::Sender<DomainEvent>,
    interval: Duration,
    cancel: Option<CancellationToken>,
}

impl<P: BackendProbePort> BackendProber<P> {
    pub fn new(port: Arc<P>, tx: mpsc::Sender<DomainEvent>, interval: Duration) -> Self {
        Self {
            port,
            tx,
            interval: copilot_config::clamp_probe_interval(interval),
            cancel: None,
        }
    }

    pub fn start(&mut self, probe_id: GenerationId) -> anyhow::Result<()> {
        self.cancel();
        let handle = crate::async_runtime::handle()?;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let port = self.port.clone();
        let tx = self.tx.clone();
        let interval = self.interval;

        handle.spawn(async move {
            let mut attempt: u32 = 0;
            loop {
                attempt += 1;
                let res = tokio::select! {
                    _ = token.cancelled() => break,
                    res = port.probe() => res,
                };

                match res {
                    Ok(status) => {
                        debug!(%probe_id, attempt, ?status, "backend probe answered");
                        if tx
                            .send(DomainEvent::ProbeReported { probe_id, status })
                            .await
                            .is_err()
                        {
                            break;
                        }
                        if status == BackendStatus::Available {
                            break;
                        }
                    }
                    Err(e) => warn!(%probe_id, attempt, "backend probe failed: {e:#}"),
                }

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });
        Ok(())
    }
}

impl<P> BackendProber<P> {
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

impl<P> Drop for BackendProber<P> {
    fn drop(&mut self) {
        self.cancel();
    }
}
