//! Data layer — populates the world catalog at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the
//! `WorldCatalog` from the hard-coded mall data defined in submodules,
//! then transitions the game into GameState::Start.
//!
//! Every other domain reads the catalog and never writes it.

mod items;
mod npcs;
mod objects;
mod shops;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Builds the full catalog without touching the ECS. Tests use this directly.
pub fn build_catalog() -> WorldCatalog {
    let mut catalog = WorldCatalog::default();
    items::populate_items(&mut catalog);
    shops::populate_shops(&mut catalog);
    npcs::populate_npcs(&mut catalog);
    objects::populate_objects(&mut catalog);
    catalog
}

fn load_all_data(
    mut catalog: ResMut<WorldCatalog>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating catalog…");

    *catalog = build_catalog();

    info!("  Items loaded: {}", catalog.items.len());
    info!("  Shops loaded: {}", catalog.shops.len());
    info!("  NPCs loaded: {}", catalog.npcs.len());
    info!(
        "  Objects placed: {} ({} bins hide code digits)",
        catalog.objects.len(),
        catalog.bin_secrets.len()
    );

    info!("DataPlugin: catalog populated. Transitioning to Start.");
    next_state.set(GameState::Start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shop_item_exists() {
        let catalog = build_catalog();
        for shop in &catalog.shops {
            for id in &shop.item_ids {
                assert!(catalog.item(id).is_some(), "{} sells unknown item {}", shop.name, id);
            }
        }
    }

    #[test]
    fn test_every_shop_object_has_a_shop() {
        let catalog = build_catalog();
        for obj in catalog.objects.iter().filter(|o| o.kind == ObjectKind::Shop) {
            assert!(
                catalog.shop_by_name(&obj.name).is_some(),
                "shop object {} has no shop definition",
                obj.id
            );
        }
    }

    #[test]
    fn test_every_npc_object_has_a_definition() {
        let catalog = build_catalog();
        for obj in catalog.objects.iter().filter(|o| o.kind == ObjectKind::Npc) {
            assert!(catalog.npc(&obj.id).is_some(), "npc {} has no definition", obj.id);
        }
    }

    #[test]
    fn test_bin_secrets_cover_all_code_slots_once() {
        let catalog = build_catalog();
        let mut slots: Vec<usize> = catalog.bin_secrets.values().map(|s| s.slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, (0..SECRET_CODE_LEN).collect::<Vec<_>>());
        for bin_id in catalog.bin_secrets.keys() {
            let obj = catalog.object(bin_id).expect("secret bin must be placed");
            assert_eq!(obj.kind, ObjectKind::Bin);
        }
    }

    #[test]
    fn test_every_interactive_object_has_a_free_spot_in_reach() {
        use crate::player::interaction::find_target;
        use crate::world::collision::first_obstacle;

        let catalog = build_catalog();
        for floor in [Floor::Ground, Floor::First, Floor::Second] {
            let mut reached = std::collections::HashSet::new();
            // Walking moves in PLAYER_SPEED steps from a grid-aligned start.
            for gx in 0..=((WORLD_WIDTH - SPRITE_WIDTH) / PLAYER_SPEED) as u32 {
                for gy in 0..=((WORLD_HEIGHT - SPRITE_HEIGHT) / PLAYER_SPEED) as u32 {
                    let position = Vec2::new(gx as f32, gy as f32) * PLAYER_SPEED;
                    if first_obstacle(&catalog, floor, position).is_some() {
                        continue;
                    }
                    let session = Session {
                        position,
                        floor,
                        ..Session::default()
                    };
                    if let Some(target) = find_target(&session, &catalog) {
                        reached.insert(target.id.clone());
                    }
                }
            }
            for obj in catalog.objects_on(floor) {
                if obj.kind == ObjectKind::Decoration || obj.interact_range <= 0.0 {
                    continue;
                }
                assert!(reached.contains(&obj.id), "{} on {} cannot be reached", obj.id, floor);
            }
        }
    }

    #[test]
    fn test_start_position_is_clear_of_ground_floor_objects() {
        let catalog = build_catalog();
        let session = Session::default();
        let body = crate::world::collision::player_collision_box(session.position);
        assert!(catalog.objects_on(Floor::Ground).all(|o| !o.rect.overlaps(&body)));
    }
}
