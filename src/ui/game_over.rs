use bevy::prelude::*;
use crate::world::Ending;
use super::menu_kit::{spawn_menu_panel, spawn_menu_row, spawn_menu_title, text_font, PANEL_BORDER, TEXT_COLOR};
use super::UiFontHandle;

#[derive(Component)]
pub struct GameOverRoot;

pub fn spawn_game_over_screen(
    mut commands: Commands,
    ending: Option<Res<Ending>>,
    font_handle: Res<UiFontHandle>,
) {
    let Some(ending) = ending.map(|e| *e) else {
        warn!("[UI] Game over without a recorded ending");
        return;
    };
    let font = font_handle.0.clone();
    let title = if ending.success { "MISSION COMPLETE" } else { "GAME OVER" };

    spawn_menu_panel(&mut commands, GameOverRoot, 460.0, |panel| {
        spawn_menu_title(panel, title, &font);
        panel.spawn((
            Text::new(ending.narrative()),
            text_font(&font, 15.0),
            TextColor(TEXT_COLOR),
        ));
        panel.spawn((
            Text::new(format!("SCORE {}", ending.score)),
            text_font(&font, 20.0),
            TextColor(PANEL_BORDER),
        ));
        spawn_menu_row(panel, 0, "PLAY AGAIN", &font);
    });
}

pub fn despawn_game_over_screen(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
