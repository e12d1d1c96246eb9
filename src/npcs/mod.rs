//! NPC domain — the guard and Mr. Timothy.
//!
//! NPCs stand still; talking to one either plays their line or checks their
//! fetch quest.

use bevy::prelude::*;
use crate::shared::*;

pub mod quests;

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnExit(GameState::Loading), check_npc_placements);
    }
}

/// Talks to the NPC behind object `npc_id`.
pub fn talk_to(session: &mut Session, catalog: &WorldCatalog, npc_id: &str) -> Outcome {
    let Some(npc) = catalog.npc(npc_id) else {
        warn!("[Npc] No definition for '{}'", npc_id);
        return Outcome::free_roam();
    };
    let text = match &npc.quest {
        None => npc.line.clone(),
        Some(quest) => match quests::try_complete_quest(session, catalog, quest) {
            Ok(line) | Err(line) => line,
        },
    };
    Outcome::dialogue(npc.name.clone(), text)
}

/// Every NPC object must have someone to talk to.
fn check_npc_placements(catalog: Res<WorldCatalog>) {
    for obj in catalog
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Npc)
    {
        if catalog.npc(&obj.id).is_none() {
            warn!("[Npc] Object '{}' on {} has no NPC definition", obj.id, obj.floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    #[test]
    fn test_guard_plays_flavor_line() {
        let catalog = build_catalog();
        let mut session = Session::default();
        match talk_to(&mut session, &catalog, "guard_1f").next {
            NextMode::Dialogue(line) => {
                assert_eq!(line.speaker, "Guard");
                assert!(line.text.starts_with("Keep the mall clean"));
            }
            other => panic!("expected dialogue, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_npc_is_a_no_op() {
        let catalog = build_catalog();
        let mut session = Session::default();
        assert!(matches!(
            talk_to(&mut session, &catalog, "ghost").next,
            NextMode::FreeRoam
        ));
    }
}
