use bevy::prelude::*;
use crate::config::GameConfig;
use crate::shared::*;
use crate::world::collision::{clamp_to_world, first_obstacle};

/// Result of one movement tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No direction held (or opposite directions cancelled out).
    Idle,
    Moved,
    /// The body would overlap an object; nothing changed.
    Blocked,
}

/// Advances the player by one tick.
///
/// Every held direction adds `speed` along its axis, so diagonals cover
/// more ground than straight lines. The proposed position is clamped to
/// the floor, and if the feet would overlap any object on the current
/// floor the whole move is dropped: position, facing and walk phase stay
/// as they were. There is no sliding along walls.
pub fn step_player(
    session: &mut Session,
    catalog: &WorldCatalog,
    held: HeldDirections,
    speed: f32,
) -> Step {
    let mut delta = Vec2::ZERO;
    if held.up {
        delta.y -= speed;
    }
    if held.down {
        delta.y += speed;
    }
    if held.left {
        delta.x -= speed;
    }
    if held.right {
        delta.x += speed;
    }

    if delta == Vec2::ZERO {
        session.anim_phase = 0.0;
        return Step::Idle;
    }

    let facing = if delta.y < 0.0 {
        Facing::Up
    } else if delta.y > 0.0 {
        Facing::Down
    } else if delta.x < 0.0 {
        Facing::Left
    } else {
        Facing::Right
    };

    let proposed = clamp_to_world(session.position + delta);
    if let Some(obstacle) = first_obstacle(catalog, session.floor, proposed) {
        trace!("[Player] Blocked by {}", obstacle.id);
        return Step::Blocked;
    }

    session.position = proposed;
    session.facing = facing;
    session.anim_phase = (session.anim_phase + ANIMATION_STEP) % ANIMATION_FRAMES;
    Step::Moved
}

/// Movement runs once per frame; speed is per tick, not per second.
pub fn player_movement(
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    catalog: Res<WorldCatalog>,
    mut session: ResMut<Session>,
) {
    step_player(&mut session, &catalog, input.held, config.player_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    fn held(up: bool, down: bool, left: bool, right: bool) -> HeldDirections {
        HeldDirections {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_open_floor_move_advances_phase() {
        let catalog = build_catalog();
        let mut session = Session::default();
        let start = session.position;

        let step = step_player(&mut session, &catalog, held(false, false, false, true), 4.0);
        assert_eq!(step, Step::Moved);
        assert_eq!(session.position, start + Vec2::new(4.0, 0.0));
        assert_eq!(session.facing, Facing::Right);
        assert!((session.anim_phase - ANIMATION_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_is_not_normalized_and_faces_vertically() {
        let catalog = build_catalog();
        let mut session = Session::default();
        let start = session.position;

        step_player(&mut session, &catalog, held(true, false, true, false), 4.0);
        assert_eq!(session.position, start + Vec2::new(-4.0, -4.0));
        assert_eq!(session.facing, Facing::Up);
    }

    #[test]
    fn test_blocked_move_changes_nothing() {
        let catalog = build_catalog();
        let mut session = Session::default();
        // Feet just above the G/F bench (top edge at y = 540).
        session.position = Vec2::new(230.0, 540.0 - 44.0 - 20.0);
        session.facing = Facing::Left;
        session.anim_phase = 1.5;
        let before = session.clone();

        let step = step_player(&mut session, &catalog, held(false, true, false, false), 4.0);
        assert_eq!(step, Step::Blocked);
        assert_eq!(session, before);
    }

    #[test]
    fn test_position_is_clamped_to_floor() {
        let catalog = build_catalog();
        let mut session = Session::default();
        // Open strip along the left wall of G/F between the bakery and MTR exit.
        session.position = Vec2::new(2.0, 320.0);

        step_player(&mut session, &catalog, held(false, false, true, false), 4.0);
        assert_eq!(session.position.x, 0.0);
    }

    #[test]
    fn test_no_input_resets_phase() {
        let catalog = build_catalog();
        let mut session = Session::default();
        session.anim_phase = 2.4;

        assert_eq!(step_player(&mut session, &catalog, HeldDirections::default(), 4.0), Step::Idle);
        assert_eq!(session.anim_phase, 0.0);

        session.anim_phase = 2.4;
        step_player(&mut session, &catalog, held(true, true, false, false), 4.0);
        assert_eq!(session.anim_phase, 0.0, "opposite keys cancel out");
    }

    #[test]
    fn test_phase_wraps() {
        let catalog = build_catalog();
        let mut session = Session::default();
        session.anim_phase = 3.95;
        step_player(&mut session, &catalog, held(false, false, false, true), 4.0);
        assert!(session.anim_phase < ANIMATION_STEP);
    }
}
