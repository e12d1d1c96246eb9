mod shared;
mod config;
mod input;
mod modal;
mod player;
mod world;
mod npcs;
mod economy;
mod hints;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use std::path::Path;

use config::{GameConfig, CONFIG_PATH};
use shared::*;

fn main() {
    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH));

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Mall Quest".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.16)))
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .insert_resource(Session::from_config(&config))
        .insert_resource(config)
        .init_resource::<WorldCatalog>()
        .init_resource::<PlayerInput>()
        // Events
        .add_event::<ToastEvent>()
        .add_event::<ResetSessionEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(modal::ModalPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(world::render::WorldRenderPlugin)
        .add_plugins(npcs::NpcPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(hints::HintPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
