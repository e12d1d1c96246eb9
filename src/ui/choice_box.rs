use bevy::prelude::*;
use crate::modal::Modal;
use super::menu_kit::{spawn_menu_footer, spawn_menu_panel, spawn_menu_row, spawn_menu_title};
use super::UiFontHandle;

#[derive(Component)]
pub struct ChoiceBoxRoot;

pub fn spawn_choice_box(mut commands: Commands, modal: Res<Modal>, font_handle: Res<UiFontHandle>) {
    let Some(prompt) = modal.choice.as_ref() else {
        return;
    };
    let font = font_handle.0.clone();
    let title = prompt.title.clone();
    let options = prompt.options.clone();

    spawn_menu_panel(&mut commands, ChoiceBoxRoot, 420.0, |panel| {
        spawn_menu_title(panel, &title, &font);
        for (index, option) in options.iter().enumerate() {
            spawn_menu_row(panel, index, option, &font);
        }
        spawn_menu_footer(panel, "Number or E to pick, Esc to cancel", &font);
    });
}

pub fn despawn_choice_box(mut commands: Commands, query: Query<Entity, With<ChoiceBoxRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
