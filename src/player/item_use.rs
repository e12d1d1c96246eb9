//! Eating and drinking from the inventory screen.

use bevy::prelude::*;
use crate::modal::Modal;
use crate::shared::*;

/// Consumes the item at `slot`. Returns the consumed item's id, or `None`
/// if the slot is empty or the item is not consumable.
///
/// Consuming something that leaves residue puts it back in the same
/// backpack: an empty bottle after water, rubbish after anything else.
pub fn consume_item(session: &mut Session, catalog: &WorldCatalog, slot: usize) -> Option<ItemId> {
    let def = session.inventory.get(slot).and_then(|id| catalog.item(id))?;
    if !def.consumable {
        return None;
    }
    let leaves_residue = def.leaves_residue;
    let item_id = session.inventory.remove_at(slot)?;

    if leaves_residue {
        let residue = if item_id == "WATER" { BOTTLE_ITEM } else { TRASH_ITEM };
        // A slot was just freed, so this cannot overflow.
        if let Err(err) = session.inventory.try_add(residue) {
            warn!("[Player] Could not keep {}: {}", residue, err);
        }
    }
    Some(item_id)
}

/// Cursor and row picks while the inventory screen is open.
pub fn inventory_navigation(
    input: Res<PlayerInput>,
    catalog: Res<WorldCatalog>,
    mut session: ResMut<Session>,
    mut modal: ResMut<Modal>,
    mut toast_events: EventWriter<ToastEvent>,
) {
    let rows = session.inventory.len();
    modal.move_cursor(input.menu_up, input.menu_down, rows);

    let picked = input
        .choose
        .filter(|&row| row < rows)
        .or_else(|| input.select.then_some(modal.cursor));
    let Some(slot) = picked else {
        return;
    };

    if let Some(item_id) = consume_item(&mut session, &catalog, slot) {
        let name = catalog.item_name(&item_id);
        info!("[Player] Consumed {}", name);
        toast_events.send(ToastEvent::new(format!("Used {}.", name)));
        let rows = session.inventory.len();
        modal.move_cursor(false, false, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    fn session_with(items: &[&str]) -> Session {
        let mut session = Session::default();
        for id in items {
            session.inventory.try_add(id).unwrap();
        }
        session
    }

    #[test]
    fn test_water_leaves_a_bottle() {
        let catalog = build_catalog();
        let mut session = session_with(&["WATER", "LEGO"]);

        assert_eq!(consume_item(&mut session, &catalog, 0).as_deref(), Some("WATER"));
        assert_eq!(session.inventory.items, vec!["LEGO".to_string(), BOTTLE_ITEM.to_string()]);
    }

    #[test]
    fn test_snack_leaves_rubbish() {
        let catalog = build_catalog();
        let mut session = session_with(&["CHIPS"]);
        consume_item(&mut session, &catalog, 0);
        assert_eq!(session.inventory.items, vec![TRASH_ITEM.to_string()]);
    }

    #[test]
    fn test_clean_food_leaves_nothing() {
        let catalog = build_catalog();
        let mut session = session_with(&["DIMSUM"]);
        consume_item(&mut session, &catalog, 0);
        assert!(session.inventory.is_empty());
    }

    #[test]
    fn test_non_consumable_is_untouched() {
        let catalog = build_catalog();
        let mut session = session_with(&["MEDICINE", TRASH_ITEM]);
        assert_eq!(consume_item(&mut session, &catalog, 0), None);
        assert_eq!(consume_item(&mut session, &catalog, 1), None);
        assert_eq!(consume_item(&mut session, &catalog, 7), None);
        assert_eq!(session.inventory.len(), 2);
    }

    #[test]
    fn test_full_backpack_can_still_drink() {
        let catalog = build_catalog();
        let mut session = session_with(&["WATER"; INVENTORY_CAPACITY]);
        consume_item(&mut session, &catalog, 3);
        assert_eq!(session.inventory.len(), INVENTORY_CAPACITY);
        assert_eq!(session.inventory.items.last().map(String::as_str), Some(BOTTLE_ITEM));
    }
}
