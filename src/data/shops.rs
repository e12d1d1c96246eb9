use crate::shared::*;

/// Populate the catalog's shops. Shops are looked up by the display name
/// of the storefront object that opens them.
pub fn populate_shops(catalog: &mut WorldCatalog) {
    let shops: &[(&str, &[&str])] = &[
        ("McDonald's", &["CHIPS", "WATER"]),
        ("7-Eleven", &["WATER", "CHIPS", "COFFEE", "LEGO"]),
        ("Yamazaki Bakery", &["DONUT"]),
        ("Mannings", &["MEDICINE"]),
        ("Dim Sum Palace", &["DIMSUM"]),
        ("Tai Hing", &["ROAST_GOOSE"]),
    ];

    catalog.shops = shops
        .iter()
        .map(|(name, items)| ShopDef {
            name: name.to_string(),
            item_ids: items.iter().map(|id| id.to_string()).collect(),
        })
        .collect();
}
