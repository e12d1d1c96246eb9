use crate::shared::*;

struct ItemRow {
    id: &'static str,
    name: &'static str,
    price: u32,
    description: &'static str,
    consumable: bool,
    leaves_residue: bool,
}

const ITEMS: &[ItemRow] = &[
    ItemRow { id: "WATER", name: "Bonaqua Water", price: 10, description: "Cool and refreshing.", consumable: true, leaves_residue: true },
    ItemRow { id: "CHIPS", name: "Calbee Chips", price: 15, description: "Salty hot & spicy chips.", consumable: true, leaves_residue: true },
    ItemRow { id: "MEDICINE", name: "Grandma Medicine", price: 200, description: "Essential prescription from Mannings.", consumable: false, leaves_residue: false },
    ItemRow { id: "COFFEE", name: "Timothy's Coffee", price: 45, description: "Double shot espresso.", consumable: true, leaves_residue: true },
    ItemRow { id: "DONUT", name: "Chocolate Doughnut", price: 25, description: "Glazed with sprinkles.", consumable: true, leaves_residue: true },
    ItemRow { id: "LEGO", name: "Lego Star Wars Set (Advanced)", price: 499, description: "Ultimate Collector Series.", consumable: false, leaves_residue: false },
    // Residue: never sold, only produced by eating and drinking.
    ItemRow { id: TRASH_ITEM, name: "Rubbish", price: 0, description: "Needs a bin.", consumable: false, leaves_residue: false },
    ItemRow { id: BOTTLE_ITEM, name: "Empty Bottle", price: 0, description: "Recyclable plastic.", consumable: false, leaves_residue: false },
    ItemRow { id: "DIMSUM", name: "Har Gow", price: 38, description: "Crystal shrimp dumplings.", consumable: true, leaves_residue: false },
    ItemRow { id: "ROAST_GOOSE", name: "Roast Goose Rice", price: 65, description: "Tai Hing classic.", consumable: true, leaves_residue: false },
];

pub fn populate_items(catalog: &mut WorldCatalog) {
    for row in ITEMS {
        catalog.items.insert(
            row.id.to_string(),
            ItemDef {
                id: row.id.to_string(),
                name: row.name.to_string(),
                price: row.price,
                description: row.description.to_string(),
                consumable: row.consumable,
                leaves_residue: row.leaves_residue,
            },
        );
    }
}
