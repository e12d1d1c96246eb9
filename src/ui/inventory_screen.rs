use bevy::prelude::*;
use crate::shared::*;
use super::menu_kit::{spawn_menu_footer, spawn_menu_panel, spawn_menu_row, spawn_menu_title, text_font, TEXT_COLOR, TEXT_DIM};
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct InventoryScreenRoot;

/// Column the item rows live in; rebuilt whenever the backpack changes.
#[derive(Component)]
pub struct InventoryRows;

#[derive(Component)]
pub struct InventoryCount;

// ═══════════════════════════════════════════════════════════════════════
// TEXT
// ═══════════════════════════════════════════════════════════════════════

pub fn count_line(session: &Session) -> String {
    format!("{} / {}", session.inventory.len(), INVENTORY_CAPACITY)
}

pub fn code_line(session: &Session) -> String {
    format!("PIN digits found: {}", session.secret_code.display())
}

/// Row labels in backpack order; consumables get a USE tag.
pub fn row_labels(session: &Session, catalog: &WorldCatalog) -> Vec<String> {
    session
        .inventory
        .items
        .iter()
        .map(|id| match catalog.item(id) {
            Some(item) if item.consumable => format!("{}  [USE]", item.name),
            Some(item) => item.name.clone(),
            None => id.clone(),
        })
        .collect()
}

fn spawn_rows(parent: &mut ChildBuilder, labels: &[String], font: &Handle<Font>) {
    if labels.is_empty() {
        parent.spawn((
            Text::new("Your backpack is empty."),
            text_font(font, 14.0),
            TextColor(TEXT_DIM),
        ));
    }
    for (index, label) in labels.iter().enumerate() {
        spawn_menu_row(parent, index, label, font);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN / REFRESH
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_inventory_screen(
    mut commands: Commands,
    session: Res<Session>,
    catalog: Res<WorldCatalog>,
    font_handle: Res<UiFontHandle>,
) {
    let font = font_handle.0.clone();
    let labels = row_labels(&session, &catalog);
    let count = count_line(&session);
    let code = code_line(&session);

    spawn_menu_panel(&mut commands, InventoryScreenRoot, 420.0, |panel| {
        spawn_menu_title(panel, "Backpack", &font);
        panel.spawn((
            InventoryCount,
            Text::new(count),
            text_font(&font, 14.0),
            TextColor(TEXT_COLOR),
        ));
        panel
            .spawn((
                InventoryRows,
                Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
            ))
            .with_children(|rows| spawn_rows(rows, &labels, &font));
        panel.spawn((
            Text::new(code),
            text_font(&font, 14.0),
            TextColor(TEXT_DIM),
        ));
        spawn_menu_footer(panel, "Space or number to use, I / E / Esc to close", &font);
    });
}

pub fn despawn_inventory_screen(
    mut commands: Commands,
    query: Query<Entity, With<InventoryScreenRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn refresh_inventory_rows(
    mut commands: Commands,
    session: Res<Session>,
    catalog: Res<WorldCatalog>,
    font_handle: Res<UiFontHandle>,
    containers: Query<Entity, With<InventoryRows>>,
    mut counts: Query<&mut Text, With<InventoryCount>>,
) {
    let labels = row_labels(&session, &catalog);
    let font = font_handle.0.clone();
    for container in &containers {
        commands
            .entity(container)
            .despawn_descendants()
            .with_children(|rows| spawn_rows(rows, &labels, &font));
    }
    for mut text in &mut counts {
        text.0 = count_line(&session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    #[test]
    fn test_rows_mark_consumables() {
        let catalog = build_catalog();
        let mut session = Session::default();
        session.inventory.try_add("WATER").unwrap();
        session.inventory.try_add("MEDICINE").unwrap();

        assert_eq!(
            row_labels(&session, &catalog),
            vec!["Bonaqua Water  [USE]".to_string(), "Grandma Medicine".to_string()]
        );
        assert_eq!(count_line(&session), "2 / 10");
        assert_eq!(code_line(&session), "PIN digits found: ????");
    }
}
