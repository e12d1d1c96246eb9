use bevy::prelude::*;
use crate::modal::Modal;
use crate::shared::*;
use super::menu_kit::{spawn_menu_footer, spawn_menu_panel, spawn_menu_row, spawn_menu_title, text_font, TEXT_DIM};
use super::UiFontHandle;

#[derive(Component)]
pub struct ShopScreenRoot;

#[derive(Component)]
pub struct ShopCashText;

pub fn listing_label(item: &ItemDef) -> String {
    format!("{} - ${}", item.name, item.price)
}

pub fn spawn_shop_screen(
    mut commands: Commands,
    modal: Res<Modal>,
    catalog: Res<WorldCatalog>,
    session: Res<Session>,
    font_handle: Res<UiFontHandle>,
) {
    let Some(shop) = modal.shop.as_ref() else {
        return;
    };
    let font = font_handle.0.clone();
    let labels: Vec<String> = shop
        .item_ids
        .iter()
        .map(|id| match catalog.item(id) {
            Some(item) => listing_label(item),
            None => id.clone(),
        })
        .collect();
    let title = shop.name.clone();
    let cash = session.cash;

    spawn_menu_panel(&mut commands, ShopScreenRoot, 440.0, |panel| {
        spawn_menu_title(panel, &title, &font);
        panel.spawn((
            ShopCashText,
            Text::new(format!("Cash: ${}", cash)),
            text_font(&font, 14.0),
            TextColor(TEXT_DIM),
        ));
        for (index, label) in labels.iter().enumerate() {
            spawn_menu_row(panel, index, label, &font);
        }
        spawn_menu_footer(panel, "Space or number to buy, E / Esc to leave", &font);
    });
}

pub fn despawn_shop_screen(mut commands: Commands, query: Query<Entity, With<ShopScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn update_shop_cash(session: Res<Session>, mut texts: Query<&mut Text, With<ShopCashText>>) {
    if !session.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = format!("Cash: ${}", session.cash);
    }
}
