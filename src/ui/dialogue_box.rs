use bevy::prelude::*;
use crate::modal::Modal;
use super::menu_kit::{text_font, PANEL_BG, PANEL_BORDER, TEXT_COLOR, TEXT_DIM};
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct DialogueBoxRoot;

#[derive(Component)]
pub struct DialogueSpeaker;

#[derive(Component)]
pub struct DialogueText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_dialogue_box(
    mut commands: Commands,
    modal: Res<Modal>,
    font_handle: Res<UiFontHandle>,
) {
    let (speaker, text) = modal
        .dialogue
        .as_ref()
        .map(|d| (d.line.speaker.clone(), d.line.text.clone()))
        .unwrap_or_else(|| (String::new(), "...".to_string()));
    let font = &font_handle.0;

    commands
        .spawn((
            DialogueBoxRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                right: Val::Px(20.0),
                bottom: Val::Px(20.0),
                min_height: Val::Px(130.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(14.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            BorderColor(PANEL_BORDER),
            GlobalZIndex(10),
        ))
        .with_children(|panel| {
            panel.spawn((
                DialogueSpeaker,
                Text::new(speaker),
                text_font(font, 18.0),
                TextColor(PANEL_BORDER),
            ));
            panel.spawn((
                DialogueText,
                Text::new(text),
                text_font(font, 16.0),
                TextColor(TEXT_COLOR),
            ));
            panel.spawn((
                Text::new("E / Enter / Space to continue"),
                text_font(font, 11.0),
                TextColor(TEXT_DIM),
            ));
        });
}

pub fn despawn_dialogue_box(mut commands: Commands, query: Query<Entity, With<DialogueBoxRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Picks up text replaced while the box is open (the info desk hint).
pub fn update_dialogue_text(
    modal: Res<Modal>,
    mut texts: Query<&mut Text, With<DialogueText>>,
) {
    let Some(active) = modal.dialogue.as_ref() else {
        return;
    };
    for mut text in &mut texts {
        if text.0 != active.line.text {
            text.0 = active.line.text.clone();
        }
    }
}
