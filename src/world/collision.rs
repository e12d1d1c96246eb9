//! Axis-aligned collision between the player's feet and placed objects.
//!
//! Only the lower part of the sprite collides, so the player can stand
//! with their head overlapping a counter or sign.

use bevy::prelude::*;
use crate::shared::*;

/// Inset of the collision box inside the 48×64 sprite.
const BODY_OFFSET_X: f32 = 12.0;
const BODY_OFFSET_Y: f32 = 44.0;
const BODY_WIDTH: f32 = 24.0;
const BODY_HEIGHT: f32 = 20.0;

/// Collision box for a sprite whose top-left corner is at `position`.
pub fn player_collision_box(position: Vec2) -> WorldRect {
    WorldRect::new(
        position.x + BODY_OFFSET_X,
        position.y + BODY_OFFSET_Y,
        BODY_WIDTH,
        BODY_HEIGHT,
    )
}

/// Keeps the whole sprite inside the floor.
pub fn clamp_to_world(position: Vec2) -> Vec2 {
    Vec2::new(
        position.x.clamp(0.0, WORLD_WIDTH - SPRITE_WIDTH),
        position.y.clamp(0.0, WORLD_HEIGHT - SPRITE_HEIGHT),
    )
}

/// First object on `floor` that the body at `position` would overlap.
/// Every placed object is solid, whether or not it can be interacted with.
pub fn first_obstacle<'a>(
    catalog: &'a WorldCatalog,
    floor: Floor,
    position: Vec2,
) -> Option<&'a WorldObject> {
    let body = player_collision_box(position);
    catalog.objects_on(floor).find(|obj| obj.rect.overlaps(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_box_is_inside_sprite_and_smaller() {
        let pos = Vec2::new(100.0, 200.0);
        let body = player_collision_box(pos);
        assert!(body.x > pos.x && body.x + body.w < pos.x + SPRITE_WIDTH);
        assert!(body.y > pos.y && body.y + body.h <= pos.y + SPRITE_HEIGHT);
        assert!(body.w < SPRITE_WIDTH && body.h < SPRITE_HEIGHT);
    }

    #[test]
    fn test_clamp_keeps_sprite_on_floor() {
        assert_eq!(clamp_to_world(Vec2::new(-5.0, -1.0)), Vec2::ZERO);
        assert_eq!(
            clamp_to_world(Vec2::new(900.0, 900.0)),
            Vec2::new(WORLD_WIDTH - SPRITE_WIDTH, WORLD_HEIGHT - SPRITE_HEIGHT)
        );
    }

    #[test]
    fn test_zero_range_decoration_still_blocks() {
        let catalog = crate::data::build_catalog();
        // Feet land on the G/F bench at (215, 540).
        let pos = Vec2::new(220.0, 500.0);
        let hit = first_obstacle(&catalog, Floor::Ground, pos).expect("bench should block");
        assert_eq!(hit.id, "bench_gf_1");
        assert_eq!(hit.interact_range, 0.0);
    }

    #[test]
    fn test_objects_on_other_floors_do_not_block() {
        let catalog = crate::data::build_catalog();
        // Same spot as the 1/F bench, but on G/F nothing is there.
        let pos = Vec2::new(110.0, 270.0);
        assert!(first_obstacle(&catalog, Floor::First, pos).is_some());
        assert!(first_obstacle(&catalog, Floor::Ground, pos).is_none());
    }
}
