mod choice_box;
mod dialogue_box;
mod game_over;
mod hud;
mod inventory_screen;
pub mod menu_kit;
mod shop_screen;
mod start_screen;
mod toast;
mod touch_pad;

use bevy::prelude::*;
use crate::shared::*;

/// Font used by every UI text node. The default handle is Bevy's built-in
/// font.
#[derive(Resource, Default, Clone)]
pub struct UiFontHandle(pub Handle<Font>);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFontHandle>();

        // ─── TOASTS — always present ───
        app.add_systems(Startup, toast::spawn_toast_container);
        app.add_systems(Update, (toast::handle_toast_events, toast::update_toasts).chain());

        // ─── START SCREEN ───
        app.add_systems(OnEnter(GameState::Start), start_screen::spawn_start_screen);
        app.add_systems(OnExit(GameState::Start), start_screen::despawn_start_screen);

        // ─── HUD + ON-SCREEN PAD — from the first step into the mall until game over ───
        app.add_systems(
            OnEnter(GameState::FreeRoam),
            (hud::spawn_hud, touch_pad::spawn_touch_pad),
        );
        app.add_systems(
            OnEnter(GameState::GameOver),
            (hud::despawn_hud, touch_pad::despawn_touch_pad),
        );
        app.add_systems(
            Update,
            hud::update_hud.run_if(resource_changed::<Session>),
        );

        // ─── DIALOGUE BOX ───
        app.add_systems(OnEnter(GameState::Dialogue), dialogue_box::spawn_dialogue_box);
        app.add_systems(OnExit(GameState::Dialogue), dialogue_box::despawn_dialogue_box);
        app.add_systems(
            Update,
            dialogue_box::update_dialogue_text
                .run_if(in_state(GameState::Dialogue).and(resource_changed::<crate::modal::Modal>)),
        );

        // ─── CHOICE BOX ───
        app.add_systems(OnEnter(GameState::Choice), choice_box::spawn_choice_box);
        app.add_systems(OnExit(GameState::Choice), choice_box::despawn_choice_box);

        // ─── SHOP SCREEN ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(
            Update,
            shop_screen::update_shop_cash.run_if(in_state(GameState::Shop)),
        );

        // ─── INVENTORY SCREEN ───
        app.add_systems(OnEnter(GameState::Inventory), inventory_screen::spawn_inventory_screen);
        app.add_systems(OnExit(GameState::Inventory), inventory_screen::despawn_inventory_screen);
        app.add_systems(
            Update,
            inventory_screen::refresh_inventory_rows
                .run_if(in_state(GameState::Inventory).and(resource_changed::<Session>)),
        );

        // ─── GAME OVER ───
        app.add_systems(
            OnEnter(GameState::GameOver),
            game_over::spawn_game_over_screen.after(crate::world::transitions::record_ending),
        );
        app.add_systems(OnExit(GameState::GameOver), game_over::despawn_game_over_screen);

        // ─── ROW HIGHLIGHT — every menu with a cursor ───
        app.add_systems(
            Update,
            menu_kit::highlight_menu_rows.run_if(
                in_state(GameState::Choice)
                    .or(in_state(GameState::Shop))
                    .or(in_state(GameState::Inventory))
                    .or(in_state(GameState::Start))
                    .or(in_state(GameState::GameOver)),
            ),
        );
    }
}
