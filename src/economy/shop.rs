use bevy::prelude::*;
use crate::modal::Modal;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Fired when the player picks a row on the shop screen.
#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub item_id: ItemId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Buys one `item_id` with cash. Either both the debit and the new item
/// happen, or neither does.
pub fn purchase<'a>(
    session: &mut Session,
    catalog: &'a WorldCatalog,
    item_id: &str,
) -> Result<&'a ItemDef, TransactionError> {
    let item = catalog
        .item(item_id)
        .ok_or_else(|| TransactionError::UnknownItem(item_id.to_string()))?;
    if session.inventory.is_full() {
        return Err(TransactionError::InventoryFull);
    }
    if session.cash < item.price {
        return Err(TransactionError::InsufficientCash);
    }
    session.inventory.try_add(&item.id)?;
    session.cash -= item.price;
    Ok(item)
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Cursor movement and row picks while the shop screen is open.
pub fn shop_navigation(
    input: Res<PlayerInput>,
    mut modal: ResMut<Modal>,
    mut buy_events: EventWriter<BuyRequestEvent>,
) {
    let Some(rows) = modal.shop.as_ref().map(|s| s.item_ids.len()) else {
        return;
    };
    modal.move_cursor(input.menu_up, input.menu_down, rows);

    let picked = input
        .choose
        .filter(|&row| row < rows)
        .or_else(|| input.select.then_some(modal.cursor));
    let Some(row) = picked else {
        return;
    };
    if let Some(item_id) = modal.shop.as_ref().and_then(|s| s.item_ids.get(row)) {
        buy_events.send(BuyRequestEvent {
            item_id: item_id.clone(),
        });
    }
}

pub fn handle_buy(
    mut buy_events: EventReader<BuyRequestEvent>,
    catalog: Res<WorldCatalog>,
    mut session: ResMut<Session>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    for ev in buy_events.read() {
        match purchase(&mut session, &catalog, &ev.item_id) {
            Ok(item) => {
                info!(
                    "[Economy] Bought {} for ${}, cash left ${}",
                    item.name, item.price, session.cash
                );
                toast_events.send(ToastEvent::new(format!("Bought {}!", item.name)));
            }
            Err(err) => {
                info!("[Economy] Purchase of {} refused: {}", ev.item_id, err);
                toast_events.send(ToastEvent::new(err.to_string()));
            }
        }
    }
}
