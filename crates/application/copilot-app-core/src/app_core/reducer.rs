use copilot_core::{BackendStatus, Conversation};

use crate::domain::{AppState, BootFailure, Lookup, ReadinessState};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::ReadinessChanged(next) => enter(&mut state, next),

        DomainEvent::UserInfoFailed => {
            state.last_failure = Some(BootFailure::UserInfoResolution);
            enter(&mut state, ReadinessState::UserInfoError);
        }

        DomainEvent::MaintenanceChanged(on) => state.is_maintenance = on,

        DomainEvent::ProbeStarted { probe_id } => state.probe_id = Some(probe_id),
        DomainEvent::ProbeStopped { probe_id } => {
            if state.probe_id == Some(probe_id) {
                state.probe_id = None;
            }
        }
        DomainEvent::ProbeReported { status, .. } => match status {
            BackendStatus::Maintenance => state.is_maintenance = true,
            BackendStatus::Available => {
                state.is_maintenance = false;
                state.probe_id = None;
            }
        },

        DomainEvent::LoadStarted { load_id } => {
            state.load_id = Some(load_id);
            state.pending_lookups = Lookup::ALL.into_iter().collect();
        }

        DomainEvent::ConversationsLoaded { conversations, .. } => {
            state.conversations = conversations
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect();
            if state.selected_conversation().is_none() {
                state.selected_conversation_id = most_recent(state.conversations.values());
            }
            state.last_failure = None;
            enter(&mut state, ReadinessState::Ready);
        }

        DomainEvent::ConversationsFailed { message, .. } => {
            state.last_failure = Some(BootFailure::ConversationLoad { reason: message });
            enter(&mut state, ReadinessState::ConversationsError);
        }

        DomainEvent::ContentSafetyStatus { enabled, .. } => {
            state.content_safety_enabled = enabled;
            state.pending_lookups.remove(&Lookup::ContentSafety);
        }

        DomainEvent::ServiceInfoLoaded { info, .. } => {
            state.service_info = Some(info);
            state.pending_lookups.remove(&Lookup::ServiceInfo);
        }

        DomainEvent::LookupUnavailable { lookup, .. } => {
            state.pending_lookups.remove(&lookup);
        }

        DomainEvent::ConversationCreated { conversation, .. } => {
            let id = conversation.id.clone();
            state.conversations.insert(id.clone(), conversation);
            state.selected_conversation_id = Some(id);
        }

        DomainEvent::ActiveUserSet(user) => state.active_user = Some(user),

        DomainEvent::ConversationSelected(id) => {
            if state.conversations.contains_key(&id) {
                state.selected_conversation_id = Some(id);
            }
        }

        DomainEvent::FeatureToggled { key, enabled } => state.features.set(key, enabled),
    }
    state
}

fn enter(state: &mut AppState, next: ReadinessState) {
    state.readiness = next;
    match next {
        // Anything still in flight belongs to an earlier attempt.
        ReadinessState::ProbingBackend
        | ReadinessState::LoadingConversations
        | ReadinessState::SigningOut => {
            state.probe_id = None;
            state.load_id = None;
            state.pending_lookups.clear();
        }
        ReadinessState::ResolvingUserInfo
        | ReadinessState::UserInfoError
        | ReadinessState::ConversationsError
        | ReadinessState::Ready => state.probe_id = None,
    }
}

fn most_recent<'a>(conversations: impl Iterator<Item = &'a Conversation>) -> Option<String> {
    conversations
        .max_by(|a, b| {
            a.created_on
                .cmp(&b.created_on)
                .then_with(|| b.id.cmp(&a.id))
        })
        .map(|c| c.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn conv(id: &str, day: u32) -> Conversation {
        Conversation {
            id: id.into(),
            title: id.into(),
            path: "careerPlan".into(),
            created_on: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn loaded_conversations_select_the_newest_when_nothing_is_selected() {
        let state = reduce(
            AppState {
                readiness: ReadinessState::LoadingConversations,
                ..Default::default()
            },
            DomainEvent::ConversationsLoaded {
                load_id: uuid::Uuid::new_v4(),
                conversations: vec![conv("old", 1), conv("new", 9), conv("mid", 5)],
            },
        );
        assert_eq!(state.readiness, ReadinessState::Ready);
        assert_eq!(state.selected_conversation_id.as_deref(), Some("new"));
        assert_eq!(state.conversations.len(), 3);
    }

    #[test]
    fn existing_valid_selection_survives_reload() {
        let mut state = AppState {
            readiness: ReadinessState::LoadingConversations,
            selected_conversation_id: Some("old".into()),
            ..Default::default()
        };
        state = reduce(
            state,
            DomainEvent::ConversationsLoaded {
                load_id: uuid::Uuid::new_v4(),
                conversations: vec![conv("old", 1), conv("new", 9)],
            },
        );
        assert_eq!(state.selected_conversation_id.as_deref(), Some("old"));
    }

    #[test]
    fn selecting_an_unknown_conversation_is_ignored() {
        let state = reduce(
            AppState::default(),
            DomainEvent::ConversationSelected("ghost".into()),
        );
        assert_eq!(state.selected_conversation_id, None);
    }

    #[test]
    fn entering_probing_clears_generations() {
        let load_id = uuid::Uuid::new_v4();
        let state = reduce(
            AppState {
                readiness: ReadinessState::LoadingConversations,
                ..Default::default()
            },
            DomainEvent::LoadStarted { load_id },
        );
        assert!(!state.lookups_settled());

        let state = reduce(
            state,
            DomainEvent::ReadinessChanged(ReadinessState::ProbingBackend),
        );
        assert_eq!(state.load_id, None);
        assert_eq!(state.probe_id, None);
        assert!(state.lookups_settled());
    }

    #[test]
    fn lookups_settle_on_answer_or_give_up() {
        let load_id = uuid::Uuid::new_v4();
        let mut state = reduce(AppState::default(), DomainEvent::LoadStarted { load_id });
        assert_eq!(state.pending_lookups.len(), 2);

        state = reduce(
            state,
            DomainEvent::ContentSafetyStatus {
                load_id,
                enabled: true,
            },
        );
        assert!(!state.lookups_settled());

        state = reduce(
            state,
            DomainEvent::LookupUnavailable {
                load_id,
                lookup: Lookup::ServiceInfo,
            },
        );
        assert!(state.lookups_settled());
        assert!(state.content_safety_enabled);
        assert!(state.service_info.is_none());
    }

    #[test]
    fn created_conversation_is_selected() {
        let mut state = reduce(
            AppState {
                readiness: ReadinessState::LoadingConversations,
                ..Default::default()
            },
            DomainEvent::ConversationsLoaded {
                load_id: uuid::Uuid::new_v4(),
                conversations: vec![conv("old", 1), conv("new", 9)],
            },
        );
        let mut created = conv("fresh", 2);
        created.path = "forgeBrand".into();
        state = reduce(
            state,
            DomainEvent::ConversationCreated {
                load_id: uuid::Uuid::new_v4(),
                conversation: created,
            },
        );
        assert_eq!(state.conversations.len(), 3);
        assert_eq!(state.selected_conversation_id.as_deref(), Some("fresh"));
        assert_eq!(state.readiness, ReadinessState::Ready);
    }
}
