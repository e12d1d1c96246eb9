use bevy::prelude::*;
use crate::shared::*;
use super::menu_kit::text_font;
use super::UiFontHandle;

const MAX_VISIBLE: usize = 3;
const FADE_SECS: f32 = 0.4;
const TOAST_ALPHA: f32 = 0.8;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for the toast column (top-center, just under the HUD).
#[derive(Component)]
pub struct ToastContainer;

#[derive(Component)]
pub struct ToastItem {
    pub timer: Timer,
    pub fade_timer: Option<Timer>,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN CONTAINER
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastContainer,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_HEIGHT + 10.0),
            left: Val::Percent(50.0),
            width: Val::Px(360.0),
            margin: UiRect {
                left: Val::Px(-180.0),
                ..default()
            },
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            align_items: AlignItems::Center,
            ..default()
        },
        GlobalZIndex(20),
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// HANDLE TOAST EVENTS — one child node per event
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_toast_events(
    mut commands: Commands,
    mut events: EventReader<ToastEvent>,
    font_handle: Res<UiFontHandle>,
    container_query: Query<Entity, With<ToastContainer>>,
    existing_toasts: Query<Entity, With<ToastItem>>,
) {
    let Ok(container) = container_query.get_single() else {
        return;
    };

    let mut visible: Vec<Entity> = existing_toasts.iter().collect();
    for event in events.read() {
        info!("[UI] Toast: {}", event.message);
        if visible.len() >= MAX_VISIBLE {
            let oldest = visible.remove(0);
            commands.entity(oldest).despawn_recursive();
        }

        let toast = commands
            .spawn((
                ToastItem {
                    timer: Timer::from_seconds(event.duration_secs, TimerMode::Once),
                    fade_timer: None,
                },
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(5.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, TOAST_ALPHA)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(event.message.clone()),
                    text_font(&font_handle.0, 14.0),
                    TextColor(Color::WHITE),
                ));
            })
            .id();

        commands.entity(container).add_child(toast);
        visible.push(toast);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE TOASTS — tick, fade, despawn
// ═══════════════════════════════════════════════════════════════════════

pub fn update_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toast_query: Query<(Entity, &mut ToastItem, &mut BackgroundColor, &Children)>,
    mut text_color_query: Query<&mut TextColor>,
) {
    for (entity, mut toast, mut bg_color, children) in &mut toast_query {
        if toast.fade_timer.is_none() {
            toast.timer.tick(time.delta());
            if toast.timer.just_finished() {
                toast.fade_timer = Some(Timer::from_seconds(FADE_SECS, TimerMode::Once));
            }
            continue;
        }
        let Some(fade) = toast.fade_timer.as_mut() else {
            continue;
        };

        fade.tick(time.delta());
        if fade.finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let alpha = 1.0 - fade.fraction();
        bg_color.0 = Color::srgba(0.0, 0.0, 0.0, TOAST_ALPHA * alpha);
        for &child in children.iter() {
            if let Ok(mut text_color) = text_color_query.get_mut(child) {
                text_color.0 = Color::srgba(1.0, 1.0, 1.0, alpha);
            }
        }
    }
}
