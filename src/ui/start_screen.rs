use bevy::prelude::*;
use super::menu_kit::{spawn_menu_footer, spawn_menu_panel, spawn_menu_row, spawn_menu_title, text_font, TEXT_COLOR};
use super::UiFontHandle;

#[derive(Component)]
pub struct StartScreenRoot;

const INTRO: &str = "Grandma is sick and needs her medicine from Mannings.\n\
Find it, pay for it, and leave the mall with it.\n\
Rumour has it the bins hide more than rubbish.";

pub fn spawn_start_screen(mut commands: Commands, font_handle: Res<UiFontHandle>) {
    let font = font_handle.0.clone();
    spawn_menu_panel(&mut commands, StartScreenRoot, 460.0, |panel| {
        spawn_menu_title(panel, "MALL QUEST", &font);
        panel.spawn((
            Text::new(INTRO),
            text_font(&font, 14.0),
            TextColor(TEXT_COLOR),
        ));
        spawn_menu_row(panel, 0, "Play as Boy", &font);
        spawn_menu_row(panel, 1, "Play as Girl", &font);
        spawn_menu_footer(panel, "Press 1 or 2, or click a row", &font);
    });
}

pub fn despawn_start_screen(mut commands: Commands, query: Query<Entity, With<StartScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
