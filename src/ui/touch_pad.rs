//! On-screen d-pad plus BAG and ACT buttons for pointer and touch play.
//! The input plugin reads their `Interaction` each frame.

use bevy::prelude::*;
use crate::shared::*;
use super::menu_kit::text_font;
use super::UiFontHandle;

const PAD_BUTTON: f32 = 44.0;
const PAD_MARGIN: f32 = 16.0;
const PAD_BG: Color = Color::srgba(0.1, 0.1, 0.1, 0.35);

#[derive(Component)]
pub struct TouchPadRoot;

fn pad_label(button: TouchButton) -> &'static str {
    match button {
        TouchButton::Up => "^",
        TouchButton::Down => "v",
        TouchButton::Left => "<",
        TouchButton::Right => ">",
        TouchButton::Bag => "BAG",
        TouchButton::Act => "ACT",
    }
}

fn spawn_pad_button(
    parent: &mut ChildBuilder,
    button: TouchButton,
    left: f32,
    bottom: f32,
    width: f32,
    font: &Handle<Font>,
) {
    parent
        .spawn((
            button,
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(left),
                bottom: Val::Px(bottom),
                width: Val::Px(width),
                height: Val::Px(PAD_BUTTON),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(PAD_BG),
        ))
        .with_children(|b| {
            b.spawn((
                Text::new(pad_label(button)),
                text_font(font, 16.0),
                TextColor(Color::WHITE),
            ));
        });
}

pub fn spawn_touch_pad(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    existing: Query<Entity, With<TouchPadRoot>>,
) {
    if !existing.is_empty() {
        return;
    }
    let font = &font_handle.0;
    let step = PAD_BUTTON + 4.0;
    let right_column = SCREEN_WIDTH - PAD_MARGIN - 2.0 * step;

    commands
        .spawn((
            TouchPadRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .with_children(|root| {
            spawn_pad_button(root, TouchButton::Up, PAD_MARGIN + step, PAD_MARGIN + 2.0 * step, PAD_BUTTON, font);
            spawn_pad_button(root, TouchButton::Left, PAD_MARGIN, PAD_MARGIN + step, PAD_BUTTON, font);
            spawn_pad_button(root, TouchButton::Right, PAD_MARGIN + 2.0 * step, PAD_MARGIN + step, PAD_BUTTON, font);
            spawn_pad_button(root, TouchButton::Down, PAD_MARGIN + step, PAD_MARGIN, PAD_BUTTON, font);
            spawn_pad_button(root, TouchButton::Bag, right_column, PAD_MARGIN + step, 2.0 * PAD_BUTTON, font);
            spawn_pad_button(root, TouchButton::Act, right_column, PAD_MARGIN, 2.0 * PAD_BUTTON, font);
        });
}

pub fn despawn_touch_pad(mut commands: Commands, query: Query<Entity, With<TouchPadRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
