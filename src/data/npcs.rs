use crate::shared::*;

/// Populate the catalog with the mall's NPCs.
///
///   guard_1f — security guard on 1/F, flavor line only
///   timothy  — Mr. Timothy on 2/F, wants coffee, a doughnut and a Lego set
pub fn populate_npcs(catalog: &mut WorldCatalog) {
    catalog.npcs.insert(
        "guard_1f".into(),
        NpcDef {
            id: "guard_1f".into(),
            name: "Guard".into(),
            line: "Keep the mall clean, kid. Loitering is not permitted.".into(),
            quest: None,
        },
    );

    catalog.npcs.insert(
        "timothy".into(),
        NpcDef {
            id: "timothy".into(),
            name: "Mr. Timothy".into(),
            line: "Hrumph.".into(),
            quest: Some(QuestDef {
                required: vec!["COFFEE".into(), "DONUT".into(), "LEGO".into()],
                bonus: 1000,
                success_line: "Brilliant! You found everything. My collection is complete! Here's a bonus!".into(),
                reminder_line: "Hrumph... I need my Morning Coffee, a Chocolate Donut, and that Star Wars Lego set before I talk.".into(),
            }),
        },
    );
}
