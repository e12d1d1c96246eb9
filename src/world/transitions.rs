//! Escalators, elevators and the ways out of the mall.

use bevy::prelude::*;
use crate::shared::*;

use super::collision::clamp_to_world;

/// Vertical gap between a transition object and the arrival point.
const ARRIVAL_GAP_BELOW: f32 = 70.0;
const ARRIVAL_GAP_ABOVE: f32 = 100.0;

/// Where the player lands after taking `obj`, and which way they face.
/// Arrival is below the object unless that would push the sprite off the
/// floor, in which case it is above.
pub fn arrival_point(obj: &WorldObject) -> (Vec2, Facing) {
    let x = obj.rect.x + obj.rect.w / 2.0 - SPRITE_WIDTH / 2.0;
    let below = obj.rect.y + obj.rect.h + ARRIVAL_GAP_BELOW;
    let (y, facing) = if below > WORLD_HEIGHT - SPRITE_HEIGHT {
        (obj.rect.y - ARRIVAL_GAP_ABOVE, Facing::Up)
    } else {
        (below, Facing::Down)
    };
    (clamp_to_world(Vec2::new(x, y)), facing)
}

pub fn take_floor_transition(session: &mut Session, obj: &WorldObject, to: Floor) -> Outcome {
    let (position, facing) = arrival_point(obj);
    info!("[World] {} via {} -> {}", session.floor, obj.name, to);
    session.floor = to;
    session.position = position;
    session.facing = facing;
    session.anim_phase = 0.0;
    Outcome::dialogue("System", format!("Transitioning to {}...", to))
}

/// Asks before leaving. Confirming pays the fare and ends the run.
pub fn offer_exit(obj: &WorldObject, cost: u32, method: PaymentMethod) -> Outcome {
    let name = obj.name.clone();
    let title = format!("Leave Mall via {}? Cost: ${} ({})", name, cost, method);
    Outcome::choice(ChoicePrompt::new(
        title,
        vec!["Confirm".into(), "Cancel".into()],
        move |index, session| {
            if index != 0 {
                return Outcome::free_roam();
            }
            match settle_fare(session, cost, method) {
                Ok(()) => {
                    info!("[World] Left the mall via {}", name);
                    Outcome::game_over()
                }
                Err(err) => {
                    info!("[World] Exit via {} refused: {}", name, err);
                    Outcome::free_roam().with_toast(err.to_string())
                }
            }
        },
    ))
}

/// Charges an exit fare. Free exits always succeed.
pub fn settle_fare(
    session: &mut Session,
    cost: u32,
    method: PaymentMethod,
) -> Result<(), TransactionError> {
    if cost == 0 {
        return Ok(());
    }
    match method {
        PaymentMethod::Octopus if session.card_balance >= cost => {
            session.card_balance -= cost;
            Ok(())
        }
        _ => Err(TransactionError::InsufficientCard),
    }
}

/// How the run ended. Captured the moment the player leaves.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ending {
    pub success: bool,
    pub score: u32,
}

impl Ending {
    pub fn from_session(session: &Session) -> Self {
        Self {
            success: session.inventory.contains(DELIVERY_ITEM),
            score: session.score,
        }
    }

    pub fn narrative(&self) -> &'static str {
        if self.success {
            "You made it home with Grandma's medicine. She is already feeling better."
        } else {
            "You went home empty-handed. Grandma is still waiting for her medicine."
        }
    }
}

pub fn record_ending(mut commands: Commands, session: Res<Session>) {
    let ending = Ending::from_session(&session);
    info!(
        "[World] Game over: success={} score={}",
        ending.success, ending.score
    );
    commands.insert_resource(ending);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    fn object(id: &str) -> WorldObject {
        build_catalog().object(id).cloned().expect("object exists")
    }

    fn confirm(outcome: Outcome, session: &mut Session) -> Outcome {
        match outcome.next {
            NextMode::Choice(prompt) => prompt.resolve(0, session),
            other => panic!("expected a choice, got {:?}", other),
        }
    }

    #[test]
    fn test_escalator_arrives_below() {
        let esc = object("esc_gf_up");
        let mut session = Session::default();
        let outcome = take_floor_transition(&mut session, &esc, Floor::First);

        assert_eq!(session.floor, Floor::First);
        assert_eq!(session.position, Vec2::new(346.0, 410.0));
        assert_eq!(session.facing, Facing::Down);
        match outcome.next {
            NextMode::Dialogue(line) => assert_eq!(line.text, "Transitioning to 1/F..."),
            other => panic!("expected dialogue, got {:?}", other),
        }
    }

    #[test]
    fn test_low_transition_arrives_above() {
        let low = WorldObject {
            id: "lift".into(),
            name: "Lift".into(),
            kind: ObjectKind::FloorTransition { to: Floor::Roof },
            rect: WorldRect::new(200.0, 480.0, 60.0, 80.0),
            floor: Floor::Ground,
            interact_range: 60.0,
            sprite_key: "lift".into(),
        };
        let (pos, facing) = arrival_point(&low);
        assert_eq!(pos, Vec2::new(206.0, 380.0));
        assert_eq!(facing, Facing::Up);
    }

    #[test]
    fn test_free_exit_ends_the_game() {
        let exit = object("exit_main");
        let mut session = Session::default();
        let outcome = confirm(offer_exit(&exit, 0, PaymentMethod::Free), &mut session);
        assert!(matches!(outcome.next, NextMode::GameOver));
        assert_eq!(session.card_balance, 50);
    }

    #[test]
    fn test_unaffordable_exit_stays_in_the_mall() {
        let exit = object("exit_mtr");
        let mut session = Session::default();
        session.card_balance = 5;

        let outcome = confirm(offer_exit(&exit, 12, PaymentMethod::Octopus), &mut session);
        assert!(matches!(outcome.next, NextMode::FreeRoam));
        assert_eq!(
            outcome.toast.as_deref(),
            Some("Insufficient Octopus Card Balance!")
        );
        assert_eq!(session.card_balance, 5);
    }

    #[test]
    fn test_card_exit_debits_fare() {
        let mut session = Session::default();
        assert_eq!(settle_fare(&mut session, 6, PaymentMethod::Octopus), Ok(()));
        assert_eq!(session.card_balance, 44);
    }

    #[test]
    fn test_cancelling_exit_changes_nothing() {
        let exit = object("exit_bus");
        let mut session = Session::default();
        let outcome = match offer_exit(&exit, 6, PaymentMethod::Octopus).next {
            NextMode::Choice(prompt) => {
                assert_eq!(prompt.title, "Leave Mall via Bus Station? Cost: $6 (Octopus)");
                prompt.resolve(1, &mut session)
            }
            other => panic!("expected a choice, got {:?}", other),
        };
        assert!(matches!(outcome.next, NextMode::FreeRoam));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_ending_depends_on_medicine() {
        let mut session = Session::default();
        assert!(!Ending::from_session(&session).success);
        session.inventory.try_add(DELIVERY_ITEM).unwrap();
        assert!(Ending::from_session(&session).success);
    }
}
