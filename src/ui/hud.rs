use bevy::prelude::*;
use crate::shared::*;
use super::menu_kit::{text_font, PANEL_BORDER, TEXT_COLOR};
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Floor,
    Goal,
    Money,
    Score,
}

// ═══════════════════════════════════════════════════════════════════════
// TEXT
// ═══════════════════════════════════════════════════════════════════════

pub fn goal_line(session: &Session) -> &'static str {
    if session.inventory.contains(DELIVERY_ITEM) {
        "DELIVER MEDICINE"
    } else {
        "FIND MEDICINE"
    }
}

pub fn money_line(session: &Session) -> String {
    format!(
        "CASH ${}   BANK ${}   OCT ${}",
        session.cash, session.bank_balance, session.card_balance
    )
}

fn field_text(field: HudField, session: &Session) -> String {
    match field {
        HudField::Floor => session.floor.label().to_string(),
        HudField::Goal => goal_line(session).to_string(),
        HudField::Money => money_line(session),
        HudField::Score => format!("SCORE {}", session.score),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    session: Res<Session>,
    existing: Query<Entity, With<HudRoot>>,
) {
    // Coming back from a dialogue or menu: already there.
    if !existing.is_empty() {
        return;
    }
    let font = &font_handle.0;

    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(HUD_HEIGHT),
                padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.12, 0.12, 0.16)),
        ))
        .with_children(|bar| {
            bar.spawn(Node {
                flex_direction: FlexDirection::Column,
                ..default()
            })
            .with_children(|left| {
                left.spawn((
                    HudField::Floor,
                    Text::new(field_text(HudField::Floor, &session)),
                    text_font(font, 20.0),
                    TextColor(PANEL_BORDER),
                ));
                left.spawn((
                    HudField::Goal,
                    Text::new(field_text(HudField::Goal, &session)),
                    text_font(font, 12.0),
                    TextColor(TEXT_COLOR),
                ));
            });
            bar.spawn((
                HudField::Money,
                Text::new(field_text(HudField::Money, &session)),
                text_font(font, 14.0),
                TextColor(TEXT_COLOR),
            ));
            bar.spawn((
                HudField::Score,
                Text::new(field_text(HudField::Score, &session)),
                text_font(font, 14.0),
                TextColor(PANEL_BORDER),
            ));
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_hud(session: Res<Session>, mut fields: Query<(&HudField, &mut Text)>) {
    for (field, mut text) in &mut fields {
        let value = field_text(*field, &session);
        if text.0 != value {
            text.0 = value;
        }
    }
}
