//! Drawing the current floor and the player.
//!
//! Each frame is described by a flat draw list built from the session and
//! the catalog. The ECS side only turns that list into sprites.

use bevy::prelude::*;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::shared::*;

const FLOOR_COLOR: Color = Color::srgb(0.898, 0.898, 0.898);
const GRID_COLOR: Color = Color::srgb(0.82, 0.82, 0.82);
const GRID_LINE: f32 = 1.0;
const GRID_Z: f32 = 0.1;
const OBJECT_Z: f32 = 1.0;
const PLAYER_Z: f32 = 10.0;
const SHEET_COLUMNS: u32 = 4;
const SHEET_ROWS: u32 = 4;

// ═══════════════════════════════════════════════════════════════════════
// DRAW LIST
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Object {
        sprite_key: String,
        rect: WorldRect,
        label: String,
        kind: ObjectKind,
    },
    Player {
        sprite_key: String,
        column: usize,
        row: usize,
        position: Vec2,
    },
}

/// Everything visible this frame, back to front.
pub fn frame_draw_list(session: &Session, catalog: &WorldCatalog) -> Vec<DrawCommand> {
    let mut list = vec![DrawCommand::Clear { color: FLOOR_COLOR }];
    list.extend(catalog.objects_on(session.floor).map(|obj| DrawCommand::Object {
        sprite_key: obj.sprite_key.clone(),
        rect: obj.rect,
        label: obj.name.clone(),
        kind: obj.kind,
    }));
    list.push(player_draw(session));
    list
}

pub fn player_draw(session: &Session) -> DrawCommand {
    let appearance = session.appearance.unwrap_or(Appearance::Boy);
    DrawCommand::Player {
        sprite_key: appearance.sprite_key().to_string(),
        column: (session.anim_phase.floor() as usize).min(SHEET_COLUMNS as usize - 1),
        row: session.facing.sheet_row(),
        position: session.position,
    }
}

/// Floor tile lines, one every `TILE_SIZE` across and down.
pub fn floor_grid() -> Vec<WorldRect> {
    let columns = (0..)
        .map(|i| i as f32 * TILE_SIZE)
        .take_while(|x| *x < WORLD_WIDTH)
        .map(|x| WorldRect::new(x, 0.0, GRID_LINE, WORLD_HEIGHT));
    let rows = (0..)
        .map(|i| i as f32 * TILE_SIZE)
        .take_while(|y| *y < WORLD_HEIGHT)
        .map(|y| WorldRect::new(0.0, y, WORLD_WIDTH, GRID_LINE));
    columns.chain(rows).collect()
}

/// Screen translation of a world rectangle's center. The camera sits at the
/// window center and the HUD strip takes the top of the window.
pub fn world_to_screen(rect: &WorldRect, z: f32) -> Vec3 {
    let c = rect.center();
    Vec3::new(
        c.x - WORLD_WIDTH / 2.0,
        SCREEN_HEIGHT / 2.0 - HUD_HEIGHT - c.y,
        z,
    )
}

/// Flat color drawn when an object has no sprite image.
pub fn fallback_color(kind: &ObjectKind) -> Color {
    match kind {
        ObjectKind::Shop => Color::srgb(0.85, 0.55, 0.25),
        ObjectKind::Npc => Color::srgb(0.3, 0.4, 0.8),
        ObjectKind::Bin => Color::srgb(0.35, 0.35, 0.35),
        ObjectKind::CashMachine => Color::srgb(0.8, 0.1, 0.1),
        ObjectKind::InfoPoint => Color::srgb(0.2, 0.6, 0.8),
        ObjectKind::FloorTransition { .. } => Color::srgb(0.6, 0.6, 0.7),
        ObjectKind::Exit { .. } => Color::srgb(0.2, 0.7, 0.3),
        ObjectKind::Decoration => Color::srgb(0.4, 0.6, 0.3),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPRITE LIBRARY
// ═══════════════════════════════════════════════════════════════════════

/// Images keyed by sprite key. A key that resolved to nothing stays
/// absent, and its objects are drawn as colored rectangles.
#[derive(Resource, Default)]
pub struct SpriteLibrary {
    images: HashMap<String, Option<Handle<Image>>>,
    character_layout: Option<Handle<TextureAtlasLayout>>,
}

impl SpriteLibrary {
    pub fn get(&self, key: &str) -> Option<Handle<Image>> {
        self.images.get(key).cloned().flatten()
    }

    /// Looks `key` up, loading `sprites/{key}.png` the first time it is
    /// asked for if that file ships with the game.
    fn resolve(&mut self, key: &str, asset_server: &AssetServer) -> Option<Handle<Image>> {
        if self.images.contains_key(key) {
            return self.get(key);
        }
        let loaded = load_if_present(key, asset_server);
        if loaded.is_none() {
            debug!("[Render] No sprite for '{}', using a flat rectangle", key);
        }
        self.images.insert(key.to_string(), loaded.clone());
        loaded
    }

    fn character_layout(
        &mut self,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) -> Handle<TextureAtlasLayout> {
        self.character_layout
            .get_or_insert_with(|| {
                layouts.add(TextureAtlasLayout::from_grid(
                    UVec2::new(SPRITE_WIDTH as u32, SPRITE_HEIGHT as u32),
                    SHEET_COLUMNS,
                    SHEET_ROWS,
                    None,
                    None,
                ))
            })
            .clone()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_if_present(key: &str, asset_server: &AssetServer) -> Option<Handle<Image>> {
    let relative = format!("sprites/{key}.png");
    Path::new("assets")
        .join(&relative)
        .exists()
        .then(|| asset_server.load(relative))
}

#[cfg(target_arch = "wasm32")]
fn load_if_present(_key: &str, _asset_server: &AssetServer) -> Option<Handle<Image>> {
    None
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN & SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Needs the asset and render plugins, so headless apps leave it out.
pub struct WorldRenderPlugin;

impl Plugin for WorldRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteLibrary>().add_systems(
            Update,
            (redraw_floor, sync_player_sprite).run_if(not(in_state(GameState::Loading))),
        );
    }
}

/// Marks everything spawned for the current floor.
#[derive(Component)]
pub struct FloorSprite;

/// Sprite key the player entity was built with.
#[derive(Component)]
struct PlayerLook(String);

fn redraw_floor(
    mut commands: Commands,
    session: Res<Session>,
    catalog: Res<WorldCatalog>,
    asset_server: Res<AssetServer>,
    mut library: ResMut<SpriteLibrary>,
    mut drawn: Local<Option<Floor>>,
    existing: Query<Entity, With<FloorSprite>>,
) {
    if *drawn == Some(session.floor) && !catalog.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for command in frame_draw_list(&session, &catalog) {
        match command {
            DrawCommand::Clear { color } => {
                commands.spawn((
                    FloorSprite,
                    Sprite::from_color(color, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
                    Transform::from_translation(world_to_screen(
                        &WorldRect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT),
                        0.0,
                    )),
                ));
                for line in floor_grid() {
                    commands.spawn((
                        FloorSprite,
                        Sprite::from_color(GRID_COLOR, Vec2::new(line.w, line.h)),
                        Transform::from_translation(world_to_screen(&line, GRID_Z)),
                    ));
                }
            }
            DrawCommand::Object {
                sprite_key,
                rect,
                label,
                kind,
            } => {
                let size = Vec2::new(rect.w, rect.h);
                let sprite = match library.resolve(&sprite_key, &asset_server) {
                    Some(image) => Sprite {
                        image,
                        custom_size: Some(size),
                        ..default()
                    },
                    None => Sprite::from_color(fallback_color(&kind), size),
                };
                commands
                    .spawn((
                        FloorSprite,
                        sprite,
                        Transform::from_translation(world_to_screen(&rect, OBJECT_Z)),
                    ))
                    .with_children(|parent| {
                        parent.spawn((
                            Text2d::new(label),
                            TextFont {
                                font_size: 11.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.1, 0.1, 0.1)),
                            Transform::from_xyz(0.0, 0.0, 0.5),
                        ));
                    });
            }
            DrawCommand::Player { .. } => {}
        }
    }

    debug!("[Render] Drew floor {}", session.floor);
    *drawn = Some(session.floor);
}

fn sync_player_sprite(
    mut commands: Commands,
    session: Res<Session>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut library: ResMut<SpriteLibrary>,
    mut players: Query<(Entity, &PlayerLook, &mut Transform, &mut Sprite), With<Player>>,
) {
    let DrawCommand::Player {
        sprite_key,
        column,
        row,
        position,
    } = player_draw(&session)
    else {
        return;
    };
    let rect = WorldRect::new(position.x, position.y, SPRITE_WIDTH, SPRITE_HEIGHT);
    let translation = world_to_screen(&rect, PLAYER_Z);
    let index = row * SHEET_COLUMNS as usize + column;

    if let Ok((entity, look, mut transform, mut sprite)) = players.get_single_mut() {
        if look.0 == sprite_key {
            transform.translation = translation;
            if let Some(atlas) = sprite.texture_atlas.as_mut() {
                atlas.index = index;
            }
            return;
        }
        // Appearance changed after a reset.
        commands.entity(entity).despawn_recursive();
    }

    let size = Vec2::new(SPRITE_WIDTH, SPRITE_HEIGHT);
    let sprite = match library.resolve(&sprite_key, &asset_server) {
        Some(image) => Sprite {
            image,
            texture_atlas: Some(TextureAtlas {
                layout: library.character_layout(&mut layouts),
                index,
            }),
            custom_size: Some(size),
            ..default()
        },
        None => Sprite::from_color(Color::srgb(0.95, 0.75, 0.2), size),
    };
    commands.spawn((
        Player,
        PlayerLook(sprite_key),
        sprite,
        Transform::from_translation(translation),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_catalog;

    #[test]
    fn test_draw_list_is_clear_objects_then_player() {
        let catalog = build_catalog();
        let session = Session::default();
        let list = frame_draw_list(&session, &catalog);

        assert!(matches!(list.first(), Some(DrawCommand::Clear { .. })));
        assert!(matches!(list.last(), Some(DrawCommand::Player { .. })));
        let objects = list
            .iter()
            .filter(|c| matches!(c, DrawCommand::Object { .. }))
            .count();
        assert_eq!(objects, catalog.objects_on(Floor::Ground).count());
    }

    #[test]
    fn test_every_object_is_captioned_with_its_name() {
        let catalog = build_catalog();
        for floor in [Floor::Ground, Floor::First, Floor::Second] {
            let session = Session {
                floor,
                ..Session::default()
            };
            let labels: Vec<String> = frame_draw_list(&session, &catalog)
                .into_iter()
                .filter_map(|c| match c {
                    DrawCommand::Object { label, .. } => Some(label),
                    _ => None,
                })
                .collect();
            let names: Vec<String> = catalog.objects_on(floor).map(|o| o.name.clone()).collect();
            assert_eq!(labels, names, "captions on {floor}");
        }
    }

    #[test]
    fn test_floor_grid_spans_the_floor() {
        let grid = floor_grid();
        let columns = grid.iter().filter(|r| r.h == WORLD_HEIGHT).count();
        let rows = grid.iter().filter(|r| r.w == WORLD_WIDTH).count();
        assert_eq!(columns, 20);
        assert_eq!(rows, 15);
        assert!(grid.iter().all(|r| r.x < WORLD_WIDTH && r.y < WORLD_HEIGHT));
    }

    #[test]
    fn test_player_frame_follows_phase_and_facing() {
        let mut session = Session::default();
        session.anim_phase = 2.7;
        session.facing = Facing::Left;
        session.appearance = Some(Appearance::Girl);

        match player_draw(&session) {
            DrawCommand::Player {
                sprite_key,
                column,
                row,
                ..
            } => {
                assert_eq!(sprite_key, "girl");
                assert_eq!(column, 2);
                assert_eq!(row, 1);
            }
            other => panic!("expected player, got {:?}", other),
        }
    }

    #[test]
    fn test_world_origin_sits_below_hud() {
        let top_left = world_to_screen(&WorldRect::new(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(top_left.x, -WORLD_WIDTH / 2.0);
        assert_eq!(top_left.y, SCREEN_HEIGHT / 2.0 - HUD_HEIGHT);
    }

    #[test]
    fn test_missing_sprite_is_absent() {
        let library = SpriteLibrary::default();
        assert!(library.get("shop_mcd_detailed").is_none());
    }
}
