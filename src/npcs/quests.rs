use bevy::prelude::*;
use crate::shared::*;

/// Hands in a fetch quest if every required item is in the backpack.
///
/// On success the items are removed (one of each), the bonus is added to
/// the score and the success line is returned. Otherwise nothing changes
/// and the reminder names what is still missing.
pub fn try_complete_quest(
    session: &mut Session,
    catalog: &WorldCatalog,
    quest: &QuestDef,
) -> Result<String, String> {
    let missing: Vec<&str> = quest
        .required
        .iter()
        .filter(|id| !session.inventory.contains(id))
        .map(|id| catalog.item_name(id))
        .collect();

    if !missing.is_empty() {
        return Err(format!(
            "{}\n\nStill missing: {}.",
            quest.reminder_line,
            missing.join(", ")
        ));
    }

    for id in &quest.required {
        if let Some(slot) = session.inventory.items.iter().position(|held| held == id) {
            session.inventory.remove_at(slot);
        }
    }
    session.add_score(quest.bonus);
    info!("[Npc] Quest complete, +{} score (now {})", quest.bonus, session.score);
    Ok(quest.success_line.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    fn timothy_quest(catalog: &WorldCatalog) -> QuestDef {
        catalog
            .npc("timothy")
            .and_then(|npc| npc.quest.clone())
            .expect("timothy has a quest")
    }

    #[test]
    fn test_quest_completes_once() {
        let catalog = build_catalog();
        let quest = timothy_quest(&catalog);
        let mut session = Session::default();
        for id in ["COFFEE", "WATER", "DONUT", "LEGO"] {
            session.inventory.try_add(id).unwrap();
        }

        let line = try_complete_quest(&mut session, &catalog, &quest).unwrap();
        assert!(line.starts_with("Brilliant!"));
        assert_eq!(session.score, 1000);
        assert_eq!(session.inventory.items, vec!["WATER".to_string()]);

        assert!(try_complete_quest(&mut session, &catalog, &quest).is_err());
        assert_eq!(session.score, 1000, "bonus is paid once");
    }

    #[test]
    fn test_reminder_lists_missing_items() {
        let catalog = build_catalog();
        let quest = timothy_quest(&catalog);
        let mut session = Session::default();
        session.inventory.try_add("COFFEE").unwrap();

        let reminder = try_complete_quest(&mut session, &catalog, &quest).unwrap_err();
        assert!(reminder.contains("Chocolate Doughnut, Lego Star Wars Set (Advanced)"));
        assert!(!reminder.ends_with("Timothy's Coffee."));
        assert_eq!(session.inventory.items, vec!["COFFEE".to_string()]);
        assert_eq!(session.score, 0);
    }
}
