//! World domain plugin for Mall Quest.
//!
//! Responsible for:
//! - Collision between the player and placed objects
//! - Bins and the hidden PIN digits
//! - Escalators, elevators and exits
//! - Drawing the current floor (see [`render::WorldRenderPlugin`])

use bevy::prelude::*;

use crate::shared::*;

pub mod bins;
pub mod collision;
pub mod render;
pub mod transitions;

pub use transitions::Ending;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::GameOver), transitions::record_ending)
            .add_systems(OnExit(GameState::GameOver), forget_ending);
    }
}

fn forget_ending(mut commands: Commands) {
    commands.remove_resource::<Ending>();
}
