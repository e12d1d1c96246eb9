//! Rubbish bins: the hiding places of the cash machine PIN, and the only
//! place to get rid of empty bottles and wrappers.

use bevy::prelude::*;
use crate::shared::*;

const NOTHING_FOUND: &str = "Just some old newspapers and a half-eaten sandwich.";

/// Searches `bin_id`. Reveals its code digit (if it hides one) and
/// disposes of every residue item the player carries.
pub fn search_bin(session: &mut Session, catalog: &WorldCatalog, bin_id: &str) -> Outcome {
    let mut text = match catalog.bin_secret(bin_id) {
        Some(secret) => {
            if session.secret_code.reveal(secret.slot, secret.digit) {
                info!(
                    "[World] Bin {} revealed digit {} for slot {}",
                    bin_id, secret.digit, secret.slot
                );
            }
            format!(
                "You found a secret digit: {} at Position {}!",
                secret.digit,
                secret.slot + 1
            )
        }
        None => NOTHING_FOUND.to_string(),
    };

    let disposed = session.inventory.remove_where(is_residue);
    if disposed > 0 {
        session.add_score(BIN_DISPOSAL_SCORE);
        info!("[World] Disposed of {} residue items, score {}", disposed, session.score);
        text.push_str(&format!(
            "\n\nYou disposed of your trash. Score +{}!",
            BIN_DISPOSAL_SCORE
        ));
    }

    Outcome::dialogue("Bin", text)
}
