pub mod interaction;
pub mod item_use;
pub mod movement;

use bevy::prelude::*;
use crate::modal::ModalSet;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Walking and interacting, only while roaming --
        app.add_systems(
            Update,
            (movement::player_movement, interaction::dispatch_interaction)
                .chain()
                .after(ModalSet)
                .run_if(in_state(GameState::FreeRoam)),
        );

        // -- Inventory screen --
        app.add_systems(
            Update,
            item_use::inventory_navigation
                .after(ModalSet)
                .run_if(in_state(GameState::Inventory)),
        );
    }
}
