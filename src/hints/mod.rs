//! Info desk hints.
//!
//! Asking the info desk opens a dialogue right away and sends a request to
//! the configured [`HintProvider`] on the async compute pool. The game keeps
//! running; when the reply (or an error, or the timeout) arrives it replaces
//! the dialogue text, but only if that same dialogue is still on screen.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use crate::config::GameConfig;
use crate::modal::{DialogueId, Modal};
use crate::shared::*;

pub mod offline;

pub const INFO_DESK_SPEAKER: &str = "Info Desk";
pub const HINT_WAITING: &str = "Asking the mall guide...";
pub const HINT_FALLBACK: &str = "Error 404: AI is currently judging your outfit. Try again later.";
pub const HINT_EMPTY: &str = "Just keep walking, kid. I'm on my lunch break.";

// ═══════════════════════════════════════════════════════════════════════
// PROVIDER SEAM
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum HintError {
    #[error("hint provider failed: {0}")]
    Provider(String),
    #[error("no hint after {0:.1}s")]
    TimedOut(f32),
}

/// What the guide gets to know about the player.
#[derive(Debug, Clone, PartialEq)]
pub struct HintRequest {
    pub floor: Floor,
    pub inventory: Vec<ItemDef>,
    pub cash: u32,
}

impl HintRequest {
    pub fn from_session(session: &Session, catalog: &WorldCatalog) -> Self {
        Self {
            floor: session.floor,
            inventory: session
                .inventory
                .items
                .iter()
                .filter_map(|id| catalog.item(id).cloned())
                .collect(),
            cash: session.cash,
        }
    }

    pub fn holds(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|item| item.id == item_id)
    }
}

pub type HintFuture = Pin<Box<dyn Future<Output = Result<String, HintError>> + Send + 'static>>;

/// Anything that can come up with a hint, local or remote.
pub trait HintProvider: Send + Sync + 'static {
    fn request_hint(&self, request: HintRequest) -> HintFuture;
}

#[derive(Resource, Clone)]
pub struct HintService(pub Arc<dyn HintProvider>);

impl Default for HintService {
    fn default() -> Self {
        Self(Arc::new(offline::OfflineGuide))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the interaction dispatcher after the info desk dialogue opened.
#[derive(Event, Debug, Clone)]
pub struct HintRequestEvent {
    pub dialogue_id: DialogueId,
    pub request: HintRequest,
}

struct PendingHint {
    dialogue_id: DialogueId,
    task: Task<Result<String, HintError>>,
    started: f32,
}

#[derive(Resource, Default)]
pub struct PendingHints(Vec<PendingHint>);

impl PendingHints {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct HintPlugin;

impl Plugin for HintPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HintService>()
            .init_resource::<PendingHints>()
            .add_event::<HintRequestEvent>()
            // Polling runs in every state so a reply for a dismissed
            // dialogue is still drained.
            .add_systems(Update, (start_hint_requests, poll_hint_requests).chain());
    }
}

/// Dialogue shown while the guide is thinking.
pub fn info_desk_outcome() -> Outcome {
    Outcome::dialogue(INFO_DESK_SPEAKER, HINT_WAITING)
}

/// Turns a provider result into what the player reads.
pub fn hint_text(reply: Result<String, HintError>) -> String {
    match reply {
        Ok(text) if text.trim().is_empty() => HINT_EMPTY.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            warn!("[Hints] {err}");
            HINT_FALLBACK.to_string()
        }
    }
}

/// Applies a finished request. Returns false when the reply was discarded
/// because its dialogue is gone.
pub fn apply_hint_reply(
    modal: &mut Modal,
    dialogue_id: DialogueId,
    reply: Result<String, HintError>,
) -> bool {
    let text = hint_text(reply);
    if !modal.replace_dialogue_text(dialogue_id, text) {
        debug!("[Hints] Dialogue {:?} closed, reply discarded", dialogue_id);
        return false;
    }
    info!("[Hints] Hint delivered to dialogue {:?}", dialogue_id);
    true
}

fn start_hint_requests(
    mut requests: EventReader<HintRequestEvent>,
    service: Res<HintService>,
    time: Res<Time>,
    mut pending: ResMut<PendingHints>,
) {
    for ev in requests.read() {
        let future = service.0.request_hint(ev.request.clone());
        let task = AsyncComputeTaskPool::get().spawn(future);
        debug!("[Hints] Request sent for dialogue {:?}", ev.dialogue_id);
        pending.0.push(PendingHint {
            dialogue_id: ev.dialogue_id,
            task,
            started: time.elapsed_secs(),
        });
    }
}

fn poll_hint_requests(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut pending: ResMut<PendingHints>,
    mut modal: ResMut<Modal>,
) {
    if pending.0.is_empty() {
        return;
    }
    let now = time.elapsed_secs();
    let timeout = config.hint_timeout_secs;

    pending.0.retain_mut(|hint| {
        let reply = match block_on(future::poll_once(&mut hint.task)) {
            Some(reply) => reply,
            None if now - hint.started >= timeout => Err(HintError::TimedOut(timeout)),
            None => return true,
        };
        apply_hint_reply(&mut modal, hint.dialogue_id, reply);
        false
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_dialogue(modal: &mut Modal) -> DialogueId {
        crate::modal::apply_outcome(info_desk_outcome(), GameState::FreeRoam, modal)
            .unwrap()
            .dialogue
            .unwrap()
    }

    #[test]
    fn test_reply_replaces_waiting_text() {
        let mut modal = Modal::default();
        let id = open_dialogue(&mut modal);

        assert!(apply_hint_reply(&mut modal, id, Ok("  Try the escalator.  ".into())));
        assert_eq!(modal.dialogue.unwrap().line.text, "Try the escalator.");
    }

    #[test]
    fn test_failure_and_empty_reply_use_fixed_lines() {
        assert_eq!(hint_text(Err(HintError::Provider("503".into()))), HINT_FALLBACK);
        assert_eq!(hint_text(Err(HintError::TimedOut(8.0))), HINT_FALLBACK);
        assert_eq!(hint_text(Ok("   ".into())), HINT_EMPTY);
    }

    #[test]
    fn test_late_reply_is_discarded() {
        let mut modal = Modal::default();
        let id = open_dialogue(&mut modal);
        modal.close_all();
        assert!(!apply_hint_reply(&mut modal, id, Ok("late".into())));
        assert!(modal.dialogue.is_none());

        // A newer dialogue must not receive an older reply.
        let newer = open_dialogue(&mut modal);
        assert!(!apply_hint_reply(&mut modal, id, Ok("late".into())));
        assert_eq!(modal.dialogue.as_ref().unwrap().id, newer);
        assert_eq!(modal.dialogue.unwrap().line.text, HINT_WAITING);
    }

    #[test]
    fn test_request_carries_item_definitions() {
        let catalog = crate::data::build_catalog();
        let mut session = Session::default();
        session.inventory.try_add("COFFEE").unwrap();
        let request = HintRequest::from_session(&session, &catalog);
        assert_eq!(request.floor, Floor::Ground);
        assert_eq!(request.cash, 100);
        assert!(request.holds("COFFEE"));
        assert_eq!(request.inventory[0].name, "Timothy's Coffee");
    }
}
