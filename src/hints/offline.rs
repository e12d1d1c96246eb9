//! A guide that needs no network: a handful of canned, mildly rude hints
//! picked to fit the player's situation.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{HintFuture, HintProvider, HintRequest};
use crate::shared::*;

const MEDICINE_PRICE_HINT: u32 = 200;

pub struct OfflineGuide;

impl HintProvider for OfflineGuide {
    fn request_hint(&self, request: HintRequest) -> HintFuture {
        let hint = compose_hint(&request, &mut rand::thread_rng());
        Box::pin(async move { Ok(hint) })
    }
}

/// Candidate hints for this situation. Never empty.
pub fn candidate_hints(request: &HintRequest) -> Vec<String> {
    let mut hints = Vec::new();

    if request.holds(DELIVERY_ITEM) {
        hints.push("You have the medicine. Exits are on G/F. Go be a hero.".to_string());
        hints.push("Grandma is waiting. The Main Entrance is free, the MTR is not.".to_string());
    } else {
        if request.floor == Floor::First {
            hints.push("Mannings is right here. Medicine. Buy it. Today.".to_string());
        } else {
            hints.push(
                "Grandma's medicine is at Mannings on 1/F. The escalator still works, I checked."
                    .to_string(),
            );
        }
        if request.cash < MEDICINE_PRICE_HINT {
            hints.push(format!(
                "Medicine costs ${} and you have ${}. The ATM wants a PIN. Bins know things.",
                MEDICINE_PRICE_HINT, request.cash
            ));
        }
    }

    if request.inventory.iter().any(|item| is_residue(&item.id)) {
        hints.push("You are carrying rubbish. There are bins. Connect the dots.".to_string());
    }
    if request.inventory.len() >= INVENTORY_CAPACITY {
        hints.push("Your backpack is full. Maybe stop buying snacks.".to_string());
    }
    if request.floor == Floor::Second {
        hints.push("Mr. Timothy is hungry and grumpy. Coffee, a doughnut and Lego, apparently.".to_string());
    }

    hints
}

pub fn compose_hint(request: &HintRequest, rng: &mut impl Rng) -> String {
    let hints = candidate_hints(request);
    hints
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| super::HINT_EMPTY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::tasks::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(floor: Floor, items: &[&str], cash: u32) -> HintRequest {
        let catalog = crate::data::build_catalog();
        HintRequest {
            floor,
            inventory: items
                .iter()
                .filter_map(|id| catalog.item(id).cloned())
                .collect(),
            cash,
        }
    }

    #[test]
    fn test_broke_player_is_pointed_at_the_atm() {
        let hints = candidate_hints(&request(Floor::Ground, &[], 100));
        assert!(hints.iter().any(|h| h.contains("ATM")));
        assert!(hints.iter().any(|h| h.contains("Mannings")));
    }

    #[test]
    fn test_medicine_holder_is_sent_home() {
        let hints = candidate_hints(&request(Floor::First, &["MEDICINE"], 0));
        assert!(hints.iter().all(|h| !h.contains("Buy it")));
        assert!(hints.iter().any(|h| h.contains("Exits")));
    }

    #[test]
    fn test_pick_is_one_of_the_candidates() {
        let req = request(Floor::Second, &["TRASH"], 300);
        let mut rng = StdRng::seed_from_u64(7);
        let hint = compose_hint(&req, &mut rng);
        assert!(candidate_hints(&req).contains(&hint));
    }

    #[test]
    fn test_provider_future_resolves() {
        let reply = block_on(OfflineGuide.request_hint(request(Floor::Ground, &[], 100)));
        assert!(!reply.unwrap().is_empty());
    }
}
