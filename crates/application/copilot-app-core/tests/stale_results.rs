mod common;

use std::sync::atomic::Ordering;

use common::*;
use copilot_app_core::{AppCommand, DomainEvent, ReadinessState};
use copilot_core::{BackendStatus, ServiceInfo};

#[tokio::test]
async fn conversations_arriving_after_sign_out_are_dropped() {
    let (chat, gate) = MockChat::gated();
    let mut kernel = kernel(
        MockIdentity::signed_in(Some(account())),
        MockProbe::default(),
        chat,
    );

    kernel.dispatch(AppCommand::Start);
    kernel
        .run_until(WAIT, |s| s.readiness == ReadinessState::LoadingConversations)
        .await
        .unwrap();
    settle(&mut kernel).await;

    kernel.dispatch(AppCommand::BeginSignOut);
    gate.notify_one();
    settle(&mut kernel).await;

    let state = kernel.store.state();
    assert_eq!(state.readiness, ReadinessState::SigningOut);
    assert!(state.conversations.is_empty());
    assert!(state.selected_conversation_id.is_none());
}

#[tokio::test]
async fn conversations_arriving_after_maintenance_are_dropped() {
    let (chat, gate) = MockChat::gated();
    let probe = MockProbe::default();
    let mut kernel = kernel(
        MockIdentity::signed_in(Some(account())),
        probe.clone(),
        chat.clone(),
    );

    kernel.dispatch(AppCommand::Start);
    kernel
        .run_until(WAIT, |s| s.readiness == ReadinessState::LoadingConversations)
        .await
        .unwrap();
    settle(&mut kernel).await;

    probe.maintenance.store(true, Ordering::SeqCst);
    kernel.dispatch(AppCommand::SetMaintenance(true));
    gate.notify_one();
    settle(&mut kernel).await;

    let state = kernel.store.state();
    assert_eq!(state.readiness, ReadinessState::ProbingBackend);
    assert!(state.conversations.is_empty());

    probe.maintenance.store(false, Ordering::SeqCst);
    kernel
        .run_until(WAIT, |s| s.readiness == ReadinessState::LoadingConversations)
        .await
        .unwrap();
    gate.notify_one();
    let state = kernel
        .run_until(WAIT, |s| s.readiness == ReadinessState::Ready)
        .await
        .unwrap();
    assert_eq!(state.conversations.len(), 2);
    assert_eq!(chat.loads(), 2);
}

#[tokio::test]
async fn results_with_foreign_generation_ids_are_ignored() {
    let (chat, gate) = MockChat::gated();
    let mut kernel = kernel(
        MockIdentity::signed_in(Some(account())),
        MockProbe::default(),
        chat,
    );

    kernel.dispatch(AppCommand::Start);
    kernel
        .run_until(WAIT, |s| s.readiness == ReadinessState::LoadingConversations)
        .await
        .unwrap();
    settle(&mut kernel).await;

    let stale = uuid::Uuid::new_v4();
    let tx = kernel.sender();
    tx.send(DomainEvent::ConversationsFailed {
        load_id: stale,
        message: "old attempt".into(),
    })
    .await
    .unwrap();
    tx.send(DomainEvent::ServiceInfoLoaded {
        load_id: stale,
        info: ServiceInfo {
            version: "stale".into(),
            ..Default::default()
        },
    })
    .await
    .unwrap();
    tx.send(DomainEvent::ProbeReported {
        probe_id: stale,
        status: BackendStatus::Maintenance,
    })
    .await
    .unwrap();
    kernel.tick();

    let state = kernel.store.state();
    assert_eq!(state.readiness, ReadinessState::LoadingConversations);
    assert!(state.last_failure.is_none());
    assert!(!state.is_maintenance);
    assert_ne!(
        state.service_info.map(|i| i.version).as_deref(),
        Some("stale")
    );

    gate.notify_one();
    kernel
        .run_until(WAIT, |s| s.readiness == ReadinessState::Ready)
        .await
        .unwrap();
}
