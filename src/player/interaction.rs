use bevy::prelude::*;
use crate::economy::atm::use_cash_machine;
use crate::hints::{info_desk_outcome, HintRequest, HintRequestEvent};
use crate::modal::{route, transition_pending, Modal};
use crate::npcs::talk_to;
use crate::shared::*;
use crate::world::bins::search_bin;
use crate::world::transitions::{offer_exit, take_floor_transition};

/// Nearest interactable object on the player's floor whose interaction
/// radius reaches the player's center. Distance is measured center to
/// center and must be strictly below the radius; on a tie the earlier
/// catalog entry wins. Decorations are never candidates.
pub fn find_target<'a>(session: &Session, catalog: &'a WorldCatalog) -> Option<&'a WorldObject> {
    let center = session.center();
    let mut best: Option<(f32, &WorldObject)> = None;
    for obj in catalog.objects_on(session.floor) {
        if obj.kind == ObjectKind::Decoration {
            continue;
        }
        let distance = center.distance(obj.rect.center());
        if distance >= obj.interact_range {
            continue;
        }
        if best.map_or(true, |(nearest, _)| distance < nearest) {
            best = Some((distance, obj));
        }
    }
    best.map(|(_, obj)| obj)
}

/// Runs the handler for `obj`. `None` means there is nothing to do.
pub fn interact_with(
    obj: &WorldObject,
    session: &mut Session,
    catalog: &WorldCatalog,
) -> Option<Outcome> {
    match obj.kind {
        ObjectKind::Shop => match catalog.shop_by_name(&obj.name) {
            Some(shop) => Some(Outcome::shop(shop.clone())),
            None => {
                warn!("[Player] '{}' has no shop stock", obj.name);
                None
            }
        },
        ObjectKind::CashMachine => Some(use_cash_machine(session)),
        ObjectKind::Bin => Some(search_bin(session, catalog, &obj.id)),
        ObjectKind::InfoPoint => Some(info_desk_outcome()),
        ObjectKind::Npc => Some(talk_to(session, catalog, &obj.id)),
        ObjectKind::FloorTransition { to } => Some(take_floor_transition(session, obj, to)),
        ObjectKind::Exit { cost, method } => Some(offer_exit(obj, cost, method)),
        ObjectKind::Decoration => None,
    }
}

/// Interact key in free roam: find the target, run its handler, route the
/// outcome. The info desk additionally starts a hint request tied to the
/// dialogue it just opened.
pub fn dispatch_interaction(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    catalog: Res<WorldCatalog>,
    mut session: ResMut<Session>,
    mut modal: ResMut<Modal>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toast_events: EventWriter<ToastEvent>,
    mut hint_events: EventWriter<HintRequestEvent>,
) {
    if !input.interact || transition_pending(&next_state) {
        return;
    }
    let Some(target) = find_target(&session, &catalog) else {
        return;
    };
    info!("[Player] Interacting with {} ({})", target.name, target.id);

    let Some(outcome) = interact_with(target, &mut session, &catalog) else {
        return;
    };
    let dialogue = route(
        outcome,
        *state.get(),
        &mut modal,
        &mut next_state,
        &mut toast_events,
    );

    if target.kind == ObjectKind::InfoPoint {
        if let Some(dialogue_id) = dialogue {
            hint_events.send(HintRequestEvent {
                dialogue_id,
                request: HintRequest::from_session(&session, &catalog),
            });
        }
    }
}
