//! Modal layer — the only place that changes `GameState`.
//!
//! Handlers describe what should happen next with an [`Outcome`]. The
//! modal layer checks the requested edge against the modal graph, keeps
//! whatever the new mode needs (dialogue text, shop stock, a pending
//! choice), forwards toasts, and schedules the state change. At most one
//! transition is scheduled per frame.

use bevy::prelude::*;
use thiserror::Error;

use crate::config::GameConfig;
use crate::shared::*;

pub struct ModalPlugin;

impl Plugin for ModalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Modal>()
            .add_systems(
                Update,
                (
                    choose_appearance.run_if(in_state(GameState::Start)),
                    acknowledge_dialogue.run_if(in_state(GameState::Dialogue)),
                    close_panel
                        .run_if(in_state(GameState::Shop).or(in_state(GameState::Inventory))),
                    open_inventory.run_if(in_state(GameState::FreeRoam)),
                    resolve_choice.run_if(in_state(GameState::Choice)),
                    request_restart.run_if(in_state(GameState::GameOver)),
                    reset_session,
                )
                    .chain()
                    .in_set(ModalSet),
            );
    }
}

/// Systems that consume input to leave a modal state. Gameplay systems
/// that may open a mode run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModalSet;

// ═══════════════════════════════════════════════════════════════════════
// MODAL STATE
// ═══════════════════════════════════════════════════════════════════════

/// Identifies one opening of the dialogue box. Async work that wants to
/// update a dialogue must present the id it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogueId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDialogue {
    pub id: DialogueId,
    pub line: DialogueLine,
}

#[derive(Resource, Debug, Default)]
pub struct Modal {
    pub dialogue: Option<ActiveDialogue>,
    pub choice: Option<ChoicePrompt>,
    pub shop: Option<ShopDef>,
    /// Highlighted row of whichever panel is open.
    pub cursor: usize,
    last_dialogue_id: u64,
}

impl Modal {
    pub fn close_all(&mut self) {
        self.dialogue = None;
        self.choice = None;
        self.shop = None;
        self.cursor = 0;
    }

    /// Keeps what `next` needs and drops everything else.
    fn open(&mut self, next: NextMode) -> Option<DialogueId> {
        self.close_all();
        match next {
            NextMode::FreeRoam | NextMode::GameOver => None,
            NextMode::Dialogue(line) => {
                self.last_dialogue_id += 1;
                let id = DialogueId(self.last_dialogue_id);
                self.dialogue = Some(ActiveDialogue { id, line });
                Some(id)
            }
            NextMode::Shop(shop) => {
                self.shop = Some(shop);
                None
            }
            NextMode::Choice(prompt) => {
                self.choice = Some(prompt);
                None
            }
        }
    }

    /// Swaps the text of dialogue `id` if it is still the one on screen.
    pub fn replace_dialogue_text(&mut self, id: DialogueId, text: impl Into<String>) -> bool {
        match self.dialogue.as_mut() {
            Some(active) if active.id == id => {
                active.line.text = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn move_cursor(&mut self, up: bool, down: bool, rows: usize) {
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        if up {
            self.cursor = self.cursor.saturating_sub(1);
        }
        if down {
            self.cursor += 1;
        }
        self.cursor = self.cursor.min(rows - 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ROUTING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("no edge from {from:?} to {to:?}")]
    IllegalTransition { from: GameState, to: GameState },
    #[error("a transition to {0:?} is already scheduled this frame")]
    AlreadyScheduled(GameState),
}

/// What the ECS side must do after an outcome was accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Routed {
    pub state: GameState,
    pub dialogue: Option<DialogueId>,
    pub toast: Option<String>,
}

/// Validates `outcome` against the modal graph and stores its payload.
/// A refused outcome leaves `modal` untouched.
pub fn apply_outcome(
    outcome: Outcome,
    current: GameState,
    modal: &mut Modal,
) -> Result<Routed, ModalError> {
    let to = outcome.next.state();
    if to != current && !current.can_transition_to(to) {
        return Err(ModalError::IllegalTransition { from: current, to });
    }
    let dialogue = modal.open(outcome.next);
    Ok(Routed {
        state: to,
        dialogue,
        toast: outcome.toast,
    })
}

/// Schedules `to` unless it is illegal or another change already won
/// this frame.
pub fn request_state(
    current: GameState,
    to: GameState,
    next_state: &mut NextState<GameState>,
) -> Result<(), ModalError> {
    if let NextState::Pending(pending) = next_state {
        return Err(ModalError::AlreadyScheduled(*pending));
    }
    if to == current {
        return Ok(());
    }
    if !current.can_transition_to(to) {
        return Err(ModalError::IllegalTransition { from: current, to });
    }
    debug!("[Modal] {:?} -> {:?}", current, to);
    next_state.set(to);
    Ok(())
}

pub fn transition_pending(next_state: &NextState<GameState>) -> bool {
    matches!(next_state, NextState::Pending(_))
}

/// Applies a handler outcome end to end: payload, toast, state change.
/// Returns the id of a dialogue it opened.
pub fn route(
    outcome: Outcome,
    current: GameState,
    modal: &mut Modal,
    next_state: &mut NextState<GameState>,
    toasts: &mut EventWriter<ToastEvent>,
) -> Option<DialogueId> {
    if transition_pending(next_state) {
        debug!("[Modal] Dropping outcome, a transition is already scheduled");
        return None;
    }
    let routed = match apply_outcome(outcome, current, modal) {
        Ok(routed) => routed,
        Err(err) => {
            warn!("[Modal] Refused outcome: {err}");
            return None;
        }
    };
    if let Some(message) = routed.toast {
        toasts.send(ToastEvent::new(message));
    }
    if let Err(err) = request_state(current, routed.state, next_state) {
        warn!("[Modal] {err}");
    }
    routed.dialogue
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn choose_appearance(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut session: ResMut<Session>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let appearance = match input.choose {
        Some(0) => Appearance::Boy,
        Some(1) => Appearance::Girl,
        _ => return,
    };
    if !session.choose_appearance(appearance) {
        return;
    }
    info!("[Modal] Playing as {:?}", appearance);
    route(
        Outcome::free_roam(),
        *state.get(),
        &mut modal,
        &mut next_state,
        &mut toasts,
    );
}

fn acknowledge_dialogue(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !(input.interact || input.acknowledge || input.cancel) {
        return;
    }
    route(
        Outcome::free_roam(),
        *state.get(),
        &mut modal,
        &mut next_state,
        &mut toasts,
    );
}

fn close_panel(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let current = *state.get();
    let toggled = current == GameState::Inventory && input.toggle_inventory;
    if !(input.acknowledge || input.cancel || toggled) {
        return;
    }
    route(
        Outcome::free_roam(),
        current,
        &mut modal,
        &mut next_state,
        &mut toasts,
    );
}

fn open_inventory(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.toggle_inventory {
        return;
    }
    match request_state(*state.get(), GameState::Inventory, &mut next_state) {
        Ok(()) => modal.close_all(),
        Err(err) => debug!("[Modal] Inventory not opened: {err}"),
    }
}

fn resolve_choice(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut session: ResMut<Session>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let current = *state.get();
    let Some(rows) = modal.choice.as_ref().map(|c| c.options.len()) else {
        warn!("[Modal] In Choice with no prompt, returning to free roam");
        route(Outcome::free_roam(), current, &mut modal, &mut next_state, &mut toasts);
        return;
    };

    if input.cancel {
        debug!("[Modal] Choice cancelled");
        route(Outcome::free_roam(), current, &mut modal, &mut next_state, &mut toasts);
        return;
    }

    modal.move_cursor(input.menu_up, input.menu_down, rows);
    let picked = input
        .choose
        .filter(|&row| row < rows)
        .or_else(|| input.interact.then_some(modal.cursor));
    let Some(row) = picked else {
        return;
    };
    if transition_pending(&next_state) {
        return;
    }
    if let Some(prompt) = modal.choice.take() {
        debug!("[Modal] '{}' -> option {}", prompt.title, row);
        let outcome = prompt.resolve(row, &mut session);
        route(outcome, current, &mut modal, &mut next_state, &mut toasts);
    }
}

fn request_restart(input: Res<PlayerInput>, mut resets: EventWriter<ResetSessionEvent>) {
    if input.interact || input.choose == Some(0) {
        resets.send(ResetSessionEvent);
    }
}

fn reset_session(
    mut resets: EventReader<ResetSessionEvent>,
    state: Res<State<GameState>>,
    config: Res<GameConfig>,
    mut session: ResMut<Session>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if resets.read().count() == 0 {
        return;
    }
    match request_state(*state.get(), GameState::Start, &mut next_state) {
        Ok(()) => {
            *session = Session::from_config(&config);
            modal.close_all();
            info!("[Modal] Session reset");
        }
        Err(err) => warn!("[Modal] Reset refused: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop() -> ShopDef {
        ShopDef {
            name: "7-Eleven".into(),
            item_ids: vec!["WATER".into()],
        }
    }

    #[test]
    fn test_illegal_outcome_is_refused_without_side_effects() {
        let mut modal = Modal::default();
        let err = apply_outcome(Outcome::game_over(), GameState::FreeRoam, &mut modal)
            .unwrap_err();
        assert_eq!(
            err,
            ModalError::IllegalTransition {
                from: GameState::FreeRoam,
                to: GameState::GameOver
            }
        );

        modal.shop = Some(shop());
        assert!(apply_outcome(Outcome::shop(shop()), GameState::Dialogue, &mut modal).is_err());
        assert_eq!(modal.shop, Some(shop()));
    }

    #[test]
    fn test_each_dialogue_gets_a_fresh_id() {
        let mut modal = Modal::default();
        let first = apply_outcome(Outcome::dialogue("A", "one"), GameState::FreeRoam, &mut modal)
            .unwrap()
            .dialogue
            .unwrap();
        let second = apply_outcome(Outcome::dialogue("B", "two"), GameState::Choice, &mut modal)
            .unwrap()
            .dialogue
            .unwrap();
        assert_ne!(first, second);

        assert!(!modal.replace_dialogue_text(first, "stale"));
        assert!(modal.replace_dialogue_text(second, "fresh"));
        assert_eq!(modal.dialogue.as_ref().unwrap().line.text, "fresh");
    }

    #[test]
    fn test_toast_travels_with_the_outcome() {
        let mut modal = Modal::default();
        let routed = apply_outcome(
            Outcome::free_roam().with_toast("Incorrect PIN."),
            GameState::Choice,
            &mut modal,
        )
        .unwrap();
        assert_eq!(routed.state, GameState::FreeRoam);
        assert_eq!(routed.toast.as_deref(), Some("Incorrect PIN."));
    }

    #[test]
    fn test_only_one_transition_per_frame() {
        let mut next = NextState::<GameState>::default();
        assert_eq!(request_state(GameState::FreeRoam, GameState::Inventory, &mut next), Ok(()));
        assert_eq!(
            request_state(GameState::FreeRoam, GameState::Dialogue, &mut next),
            Err(ModalError::AlreadyScheduled(GameState::Inventory))
        );
    }

    #[test]
    fn test_cursor_stays_within_rows() {
        let mut modal = Modal::default();
        modal.move_cursor(true, false, 3);
        assert_eq!(modal.cursor, 0);
        modal.move_cursor(false, true, 3);
        modal.move_cursor(false, true, 3);
        modal.move_cursor(false, true, 3);
        assert_eq!(modal.cursor, 2);
        modal.move_cursor(false, false, 0);
        assert_eq!(modal.cursor, 0);
    }
}
