use std::sync::Arc;
use std::time::Duration;

use copilot_core::{AccountIdentity, BackendStatus, ConversationPath, Theme};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::domain::{AppState, GenerationId, ReadinessState};
use crate::loader::ConversationLoader;
use crate::ports::{BackendProbePort, ChatServicePort, ContentSafetyPort, IdentityPort};
use crate::probe::BackendProber;
use crate::viewmodel::{self, ShellView};

#[derive(Debug, Clone)]
pub struct KernelConfig {
    pub probe_interval: Duration,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            probe_interval: copilot_config::DEFAULT_PROBE_INTERVAL,
        }
    }
}

/// Drives the readiness state machine.
///
/// The kernel is the only writer of readiness. Commands and completed task
/// results are applied one at a time, and every applied change re-runs the
/// transition rules against freshly read inputs.
pub struct AppKernel<I, P, C, S> {
    pub store: AppStore,
    identity: Arc<I>,
    prober: BackendProber<P>,
    loader: ConversationLoader<C, S>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<I, P, C, S> AppKernel<I, P, C, S>
where
    I: IdentityPort,
    P: BackendProbePort,
    C: ChatServicePort,
    S: ContentSafetyPort,
{
    pub fn new(
        store: AppStore,
        identity: I,
        probe: P,
        chat: C,
        safety: S,
        config: KernelConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            store,
            identity: Arc::new(identity),
            prober: BackendProber::new(Arc::new(probe), tx.clone(), config.probe_interval),
            loader: ConversationLoader::new(Arc::new(chat), Arc::new(safety), tx.clone()),
            tx,
            rx,
        }
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::Start | AppCommand::AuthStatusChanged => {}

            AppCommand::SetMaintenance(on) => {
                self.store.apply(DomainEvent::MaintenanceChanged(on));
            }

            AppCommand::BackendFound => self.backend_found(),

            AppCommand::BeginSignOut => {
                self.prober.cancel();
                self.transition(ReadinessState::SigningOut);
                self.identity.sign_out();
            }

            AppCommand::CreateConversation(path) => self.create_conversation(path),

            AppCommand::SelectConversation(id) => {
                self.store.apply(DomainEvent::ConversationSelected(id));
            }

            AppCommand::SetFeature { key, enabled } => {
                self.store
                    .apply(DomainEvent::FeatureToggled { key, enabled });
            }
        }
        self.evaluate();
    }

    /// Re-runs the transition rules until readiness stops changing.
    pub fn evaluate(&mut self) {
        loop {
            let before = self.store.readiness();
            self.evaluate_once();
            if self.store.readiness() == before {
                break;
            }
        }
    }

    fn evaluate_once(&mut self) {
        let state = self.store.state();

        if state.readiness == ReadinessState::SigningOut {
            return;
        }

        if state.is_maintenance && state.readiness != ReadinessState::ProbingBackend {
            info!(from = ?state.readiness, "maintenance mode, returning to backend probe");
            self.transition(ReadinessState::ProbingBackend);
            return;
        }

        let authenticated = self.identity.is_authenticated();
        let requires_identity = self.identity.requires_identity();

        match state.readiness {
            ReadinessState::ProbingBackend => {
                if state.probe_id.is_none() {
                    self.start_probe();
                }
            }

            ReadinessState::ResolvingUserInfo if authenticated => {
                match self.identity.active_account() {
                    Some(account) => {
                        self.store
                            .apply(DomainEvent::ActiveUserSet(AccountIdentity::from(&account)));
                        self.transition(ReadinessState::LoadingConversations);
                    }
                    None => {
                        warn!("authenticated but no active account");
                        self.store.apply(DomainEvent::UserInfoFailed);
                    }
                }
            }

            ReadinessState::LoadingConversations
                if (authenticated || !requires_identity) && state.load_id.is_none() =>
            {
                self.start_load();
            }

            ReadinessState::ResolvingUserInfo
            | ReadinessState::LoadingConversations
            | ReadinessState::UserInfoError
            | ReadinessState::ConversationsError
            | ReadinessState::Ready
            | ReadinessState::SigningOut => {}
        }
    }

    fn transition(&mut self, next: ReadinessState) {
        let current = self.store.readiness();
        if current == next {
            return;
        }
        if current == ReadinessState::ProbingBackend {
            self.prober.cancel();
        }
        info!(from = ?current, to = ?next, "readiness changed");
        self.store.apply(DomainEvent::ReadinessChanged(next));
    }

    fn backend_found(&mut self) {
        let state = self.store.state();
        if state.readiness != ReadinessState::ProbingBackend || state.is_maintenance {
            debug!(readiness = ?state.readiness, "ignoring backend found");
            return;
        }
        let next = if self.identity.requires_identity() {
            ReadinessState::ResolvingUserInfo
        } else {
            ReadinessState::LoadingConversations
        };
        self.transition(next);
    }

    fn start_probe(&mut self) {
        let probe_id: GenerationId = uuid::Uuid::new_v4();
        self.store.apply(DomainEvent::ProbeStarted { probe_id });
        if let Err(e) = self.prober.start(probe_id) {
            error!("failed to start backend probe: {e:#}");
            self.store.apply(DomainEvent::ProbeStopped { probe_id });
        }
    }

    fn start_load(&mut self) {
        let load_id: GenerationId = uuid::Uuid::new_v4();
        self.store.apply(DomainEvent::LoadStarted { load_id });
        if let Err(e) = self.loader.start(load_id) {
            error!("failed to start conversation loader: {e:#}");
            self.store.apply(DomainEvent::ConversationsFailed {
                load_id,
                message: format!("{e:#}"),
            });
        }
    }

    fn create_conversation(&mut self, path: ConversationPath) {
        let state = self.store.state();
        let (ReadinessState::Ready, Some(load_id)) = (state.readiness, state.load_id) else {
            debug!(readiness = ?state.readiness, %path, "ignoring new conversation request");
            return;
        };
        if let Err(e) = self.loader.create(load_id, path) {
            error!("failed to start conversation creation: {e:#}");
        }
    }

    /// Whether a task result still belongs to the current attempt.
    fn is_current(state: &AppState, ev: &DomainEvent) -> bool {
        match ev {
            DomainEvent::ProbeReported { probe_id, .. } => {
                state.readiness == ReadinessState::ProbingBackend
                    && state.probe_id == Some(*probe_id)
            }
            DomainEvent::ConversationsLoaded { load_id, .. }
            | DomainEvent::ConversationsFailed { load_id, .. } => {
                state.readiness == ReadinessState::LoadingConversations
                    && state.load_id == Some(*load_id)
            }
            DomainEvent::ConversationCreated { load_id, .. } => {
                state.readiness == ReadinessState::Ready && state.load_id == Some(*load_id)
            }
            DomainEvent::ContentSafetyStatus { load_id, .. }
            | DomainEvent::ServiceInfoLoaded { load_id, .. }
            | DomainEvent::LookupUnavailable { load_id, .. } => state.load_id == Some(*load_id),
            _ => true,
        }
    }

    fn accept(&mut self, ev: DomainEvent) {
        if !Self::is_current(&self.store.state(), &ev) {
            debug!(?ev, "discarding stale task result");
            return;
        }
        let found = matches!(
            ev,
            DomainEvent::ProbeReported {
                status: BackendStatus::Available,
                ..
            }
        );
        let before = self.store.readiness();
        self.store.apply(ev);
        let after = self.store.readiness();
        if before != after {
            info!(from = ?before, to = ?after, "readiness changed");
        }
        if found {
            self.backend_found();
        }
        self.evaluate();
    }

    /// Applies every task result that has already arrived, without waiting.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.accept(ev);
        }
    }

    /// Waits for the next task result, then drains anything else pending.
    pub async fn next_event(&mut self) {
        if let Some(ev) = self.rx.recv().await {
            self.accept(ev);
        }
        self.tick();
    }

    /// Drives the kernel until `done` holds or `timeout` elapses.
    pub async fn run_until(
        &mut self,
        timeout: Duration,
        mut done: impl FnMut(&AppState) -> bool,
    ) -> anyhow::Result<AppState> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let state = self.store.state();
            if done(&state) {
                return Ok(state);
            }
            if tokio::time::timeout_at(deadline, self.next_event())
                .await
                .is_err()
            {
                anyhow::bail!(
                    "timed out after {timeout:?} waiting on readiness {:?}",
                    state.readiness
                );
            }
        }
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }

    pub fn shell(&self) -> ShellView {
        viewmodel::shell_vm(
            self.identity.requires_identity(),
            self.identity.is_authenticated(),
            &self.store.state(),
        )
    }

    pub fn theme(&self) -> Theme {
        viewmodel::theme_vm(&self.store.state())
    }
}
