//! Economy domain — shop purchases and the cash machine.
//!
//! Money only moves through the functions here. Every rejected transaction
//! is a `TransactionError` whose text is shown to the player as is.

use bevy::prelude::*;
use crate::modal::ModalSet;
use crate::shared::*;

pub mod atm;
pub mod shop;

use shop::{handle_buy, shop_navigation, BuyRequestEvent};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BuyRequestEvent>();

        app.add_systems(
            Update,
            (shop_navigation, handle_buy)
                .chain()
                .after(ModalSet)
                .run_if(in_state(GameState::Shop)),
        );
    }
}
