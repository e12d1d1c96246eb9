//! Shared menu builder helpers.
//!
//! Every menu in the game is a centered panel with a title, a column of
//! clickable rows tagged [`MenuOption`], and a footer line. Rows are
//! highlighted from the modal cursor or from pointer hover.

use bevy::prelude::*;
use crate::modal::Modal;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════

pub const PANEL_BG: Color = Color::srgba(0.08, 0.08, 0.12, 0.94);
pub const PANEL_BORDER: Color = Color::srgb(0.85, 0.7, 0.3);
pub const ROW_BG: Color = Color::srgba(1.0, 1.0, 1.0, 0.06);
pub const ROW_BG_SELECTED: Color = Color::srgba(0.85, 0.7, 0.3, 0.45);
pub const TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
pub const TEXT_DIM: Color = Color::srgb(0.65, 0.65, 0.7);
pub const TITLE_SIZE: f32 = 22.0;
pub const ROW_SIZE: f32 = 16.0;
pub const FOOTER_SIZE: f32 = 12.0;

pub fn text_font(font: &Handle<Font>, size: f32) -> TextFont {
    TextFont {
        font: font.clone(),
        font_size: size,
        ..default()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// BUILDERS
// ═══════════════════════════════════════════════════════════════════════

/// Full-window dimmer holding one centered panel. `marker` goes on the
/// root so the whole menu despawns together.
pub fn spawn_menu_panel(
    commands: &mut Commands,
    marker: impl Bundle,
    width: f32,
    build: impl FnOnce(&mut ChildBuilder),
) -> Entity {
    commands
        .spawn((
            marker,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            GlobalZIndex(10),
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    width: Val::Px(width),
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(16.0)),
                    row_gap: Val::Px(8.0),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(PANEL_BG),
                BorderColor(PANEL_BORDER),
            ))
            .with_children(build);
        })
        .id()
}

pub fn spawn_menu_title(parent: &mut ChildBuilder, text: &str, font: &Handle<Font>) {
    parent.spawn((
        Text::new(text),
        text_font(font, TITLE_SIZE),
        TextColor(PANEL_BORDER),
    ));
}

pub fn spawn_menu_footer(parent: &mut ChildBuilder, text: &str, font: &Handle<Font>) {
    parent.spawn((
        Text::new(text),
        text_font(font, FOOTER_SIZE),
        TextColor(TEXT_DIM),
    ));
}

/// A clickable row. Clicking it picks `index` through `PlayerInput::choose`.
pub fn spawn_menu_row(parent: &mut ChildBuilder, index: usize, label: &str, font: &Handle<Font>) {
    parent
        .spawn((
            MenuOption(index),
            Button,
            Node {
                width: Val::Percent(100.0),
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(ROW_BG),
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(format!("{}. {}", index + 1, label)),
                text_font(font, ROW_SIZE),
                TextColor(TEXT_COLOR),
            ));
        });
}

// ═══════════════════════════════════════════════════════════════════════
// HIGHLIGHT
// ═══════════════════════════════════════════════════════════════════════

pub fn highlight_menu_rows(
    modal: Res<Modal>,
    mut rows: Query<(&MenuOption, &Interaction, &mut BackgroundColor)>,
) {
    for (option, interaction, mut bg) in &mut rows {
        let selected = option.0 == modal.cursor || *interaction != Interaction::None;
        bg.0 = if selected { ROW_BG_SELECTED } else { ROW_BG };
    }
}
