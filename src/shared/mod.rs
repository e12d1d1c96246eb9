//! Shared components, resources, events, and states for Mall Quest.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Interaction handlers return an [`Outcome`]; only the modal layer turns
//! an outcome into a state change.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::config::GameConfig;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level modal state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Start,
    FreeRoam,
    Dialogue,
    Shop,
    Inventory,
    Choice,
    GameOver,
}

impl GameState {
    /// Legal edges of the modal graph. Staying in the same state is not a
    /// transition and is always allowed by the router.
    pub fn can_transition_to(self, to: GameState) -> bool {
        use GameState::*;
        matches!(
            (self, to),
            (Loading, Start)
                | (Start, FreeRoam)
                | (FreeRoam, Dialogue | Shop | Choice | Inventory)
                | (Dialogue, FreeRoam)
                | (Shop, FreeRoam)
                | (Inventory, FreeRoam)
                | (Choice, Dialogue | FreeRoam | GameOver)
                | (GameOver, Start)
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Row of the character sheet for this facing (down, left, right, up).
    pub fn sheet_row(self) -> usize {
        match self {
            Facing::Down => 0,
            Facing::Left => 1,
            Facing::Right => 2,
            Facing::Up => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appearance {
    Boy,
    Girl,
}

impl Appearance {
    pub fn sprite_key(self) -> &'static str {
        match self {
            Appearance::Boy => "boy",
            Appearance::Girl => "girl",
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

// ═══════════════════════════════════════════════════════════════════════
// FLOORS & GEOMETRY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Floor {
    #[default]
    Ground,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Roof,
}

impl Floor {
    pub fn label(self) -> &'static str {
        match self {
            Floor::Ground => "G/F",
            Floor::First => "1/F",
            Floor::Second => "2/F",
            Floor::Third => "3/F",
            Floor::Fourth => "4/F",
            Floor::Fifth => "5/F",
            Floor::Roof => "ROOF",
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axis-aligned rectangle in world pixels. Origin is the top-left corner of
/// the mall floor, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl WorldRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &WorldRect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

pub type ItemId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub price: u32,
    pub description: String,
    pub consumable: bool,
    pub leaves_residue: bool,
}

/// The player's backpack. Order is acquisition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemId>,
}

impl Inventory {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= INVENTORY_CAPACITY
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|id| id == item_id)
    }

    pub fn get(&self, slot: usize) -> Option<&ItemId> {
        self.items.get(slot)
    }

    /// Appends an item, refusing when the backpack is at capacity.
    pub fn try_add(&mut self, item_id: &str) -> Result<(), TransactionError> {
        if self.is_full() {
            return Err(TransactionError::InventoryFull);
        }
        self.items.push(item_id.to_string());
        Ok(())
    }

    pub fn remove_at(&mut self, slot: usize) -> Option<ItemId> {
        if slot < self.items.len() {
            Some(self.items.remove(slot))
        } else {
            None
        }
    }

    /// Removes every item matching `pred`. Returns how many were removed.
    pub fn remove_where(&mut self, pred: impl Fn(&str) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|id| !pred(id));
        before - self.items.len()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD OBJECTS & CATALOG
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Free,
    Octopus,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Free => f.write_str("Free"),
            PaymentMethod::Octopus => f.write_str("Octopus"),
        }
    }
}

/// What an object does when the player interacts with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Shop,
    Npc,
    Bin,
    CashMachine,
    InfoPoint,
    FloorTransition { to: Floor },
    Exit { cost: u32, method: PaymentMethod },
    Decoration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: String,
    pub name: String,
    pub kind: ObjectKind,
    pub rect: WorldRect,
    pub floor: Floor,
    pub interact_range: f32,
    pub sprite_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDef {
    pub name: String,
    pub item_ids: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDef {
    pub required: Vec<ItemId>,
    pub bonus: u32,
    pub success_line: String,
    pub reminder_line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcDef {
    pub id: String,
    pub name: String,
    pub line: String,
    pub quest: Option<QuestDef>,
}

/// Which code slot a bin reveals, and the digit it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinSecret {
    pub slot: usize,
    pub digit: u8,
}

/// Read-only world data. Populated once by the data plugin.
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldCatalog {
    pub objects: Vec<WorldObject>,
    pub items: HashMap<ItemId, ItemDef>,
    pub shops: Vec<ShopDef>,
    pub npcs: HashMap<String, NpcDef>,
    pub bin_secrets: HashMap<String, BinSecret>,
}

impl WorldCatalog {
    /// Objects placed on `floor`, in catalog order.
    pub fn objects_on(&self, floor: Floor) -> impl Iterator<Item = &WorldObject> + '_ {
        self.objects.iter().filter(move |o| o.floor == floor)
    }

    pub fn object(&self, id: &str) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.item(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    pub fn shop_by_name(&self, name: &str) -> Option<&ShopDef> {
        self.shops.iter().find(|s| s.name == name)
    }

    pub fn npc(&self, id: &str) -> Option<&NpcDef> {
        self.npcs.get(id)
    }

    pub fn bin_secret(&self, bin_id: &str) -> Option<BinSecret> {
        self.bin_secrets.get(bin_id).copied()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION — the single mutable game state
// ═══════════════════════════════════════════════════════════════════════

/// Four positional PIN digits, each revealed at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCode(pub [Option<u8>; SECRET_CODE_LEN]);

impl SecretCode {
    /// Fills `slot` if it is still unknown. A filled slot is never touched.
    /// Returns true when the slot holds `digit` afterwards.
    pub fn reveal(&mut self, slot: usize, digit: u8) -> bool {
        let Some(cell) = self.0.get_mut(slot) else {
            return false;
        };
        match *cell {
            None => {
                *cell = Some(digit);
                true
            }
            Some(existing) => existing == digit,
        }
    }

    pub fn digit(&self, slot: usize) -> Option<u8> {
        self.0.get(slot).copied().flatten()
    }

    /// Digits as shown to the player, `?` for unknown slots.
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(|d| d.map(|v| char::from(b'0' + v)).unwrap_or('?'))
            .collect()
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Session {
    /// Top-left of the player sprite in world pixels.
    pub position: Vec2,
    pub facing: Facing,
    /// Walk-cycle phase in `[0, ANIMATION_FRAMES)`; 0 is the rest frame.
    pub anim_phase: f32,
    pub floor: Floor,
    pub appearance: Option<Appearance>,
    pub cash: u32,
    pub bank_balance: u32,
    pub card_balance: u32,
    pub inventory: Inventory,
    pub score: u32,
    pub secret_code: SecretCode,
    pub atm_unlocked: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Session {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            position: Vec2::new(config.start_x, config.start_y),
            facing: Facing::Down,
            anim_phase: 0.0,
            floor: Floor::Ground,
            appearance: None,
            cash: config.starting_cash,
            bank_balance: config.starting_bank,
            card_balance: config.starting_card,
            inventory: Inventory::default(),
            score: 0,
            secret_code: SecretCode::default(),
            atm_unlocked: false,
        }
    }

    /// The appearance is picked once; later calls are refused.
    pub fn choose_appearance(&mut self, appearance: Appearance) -> bool {
        if self.appearance.is_some() {
            return false;
        }
        self.appearance = Some(appearance);
        true
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(SPRITE_WIDTH / 2.0, SPRITE_HEIGHT / 2.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// A rejected transaction. The message is what the player sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("Your backpack is full!")]
    InventoryFull,
    #[error("Not enough cash! Visit an ATM.")]
    InsufficientCash,
    #[error("Insufficient Bank Balance.")]
    InsufficientBank,
    #[error("Insufficient Octopus Card Balance!")]
    InsufficientCard,
    #[error("Incorrect PIN.")]
    IncorrectPin,
    #[error("Unknown item '{0}'.")]
    UnknownItem(ItemId),
}

// ═══════════════════════════════════════════════════════════════════════
// HANDLER OUTCOMES — what a handler asks the modal layer to do next
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

pub type ChoiceContinuation = Box<dyn FnOnce(usize, &mut Session) -> Outcome + Send + Sync>;

/// A pending question. The continuation runs exactly once, when the player
/// picks an option; cancelling drops it unrun.
pub struct ChoicePrompt {
    pub title: String,
    pub options: Vec<String>,
    continuation: ChoiceContinuation,
}

impl ChoicePrompt {
    pub fn new(
        title: impl Into<String>,
        options: Vec<String>,
        continuation: impl FnOnce(usize, &mut Session) -> Outcome + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            options,
            continuation: Box::new(continuation),
        }
    }

    pub fn resolve(self, index: usize, session: &mut Session) -> Outcome {
        (self.continuation)(index, session)
    }
}

impl fmt::Debug for ChoicePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoicePrompt")
            .field("title", &self.title)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum NextMode {
    FreeRoam,
    Dialogue(DialogueLine),
    Shop(ShopDef),
    Choice(ChoicePrompt),
    GameOver,
}

impl NextMode {
    pub fn state(&self) -> GameState {
        match self {
            NextMode::FreeRoam => GameState::FreeRoam,
            NextMode::Dialogue(_) => GameState::Dialogue,
            NextMode::Shop(_) => GameState::Shop,
            NextMode::Choice(_) => GameState::Choice,
            NextMode::GameOver => GameState::GameOver,
        }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub next: NextMode,
    pub toast: Option<String>,
}

impl Outcome {
    pub fn free_roam() -> Self {
        Self {
            next: NextMode::FreeRoam,
            toast: None,
        }
    }

    pub fn dialogue(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            next: NextMode::Dialogue(DialogueLine {
                speaker: speaker.into(),
                text: text.into(),
            }),
            toast: None,
        }
    }

    pub fn shop(shop: ShopDef) -> Self {
        Self {
            next: NextMode::Shop(shop),
            toast: None,
        }
    }

    pub fn choice(prompt: ChoicePrompt) -> Self {
        Self {
            next: NextMode::Choice(prompt),
            toast: None,
        }
    }

    pub fn game_over() -> Self {
        Self {
            next: NextMode::GameOver,
            toast: None,
        }
    }

    pub fn with_toast(mut self, message: impl Into<String>) -> Self {
        self.toast = Some(message.into());
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT — sampled once per frame
// ═══════════════════════════════════════════════════════════════════════

/// Directions currently held down, from keys or the on-screen pad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub held: HeldDirections,
    /// E / Enter / Space / ACT: interact in free roam, advance elsewhere.
    pub interact: bool,
    /// E / Enter / ACT: acknowledge or close a panel.
    pub acknowledge: bool,
    /// Space: buy / use / pick the highlighted row.
    pub select: bool,
    pub cancel: bool,
    pub toggle_inventory: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    /// A row picked directly by number key or pointer.
    pub choose: Option<usize>,
}

/// On-screen control buttons for pointer and touch play.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Up,
    Down,
    Left,
    Right,
    Bag,
    Act,
}

/// A clickable row in any menu panel.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption(pub usize);

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Short non-modal feedback message.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

impl ToastEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: TOAST_SECS,
        }
    }
}

/// Throws the session away and returns to the start screen.
#[derive(Event, Debug, Clone)]
pub struct ResetSessionEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const HUD_HEIGHT: f32 = 60.0;
pub const SCREEN_WIDTH: f32 = WORLD_WIDTH;
pub const SCREEN_HEIGHT: f32 = WORLD_HEIGHT + HUD_HEIGHT;
pub const TILE_SIZE: f32 = 40.0;

pub const SPRITE_WIDTH: f32 = 48.0;
pub const SPRITE_HEIGHT: f32 = 64.0;
pub const PLAYER_SPEED: f32 = 4.0;
pub const ANIMATION_STEP: f32 = 0.12;
pub const ANIMATION_FRAMES: f32 = 4.0;

pub const INVENTORY_CAPACITY: usize = 10;
pub const SECRET_CODE_LEN: usize = 4;
pub const ATM_PIN: [u8; SECRET_CODE_LEN] = [0, 0, 0, 0];
pub const ATM_WITHDRAW_AMOUNT: u32 = 100;
pub const BIN_DISPOSAL_SCORE: u32 = 50;
pub const TOAST_SECS: f32 = 2.5;

pub const DELIVERY_ITEM: &str = "MEDICINE";
pub const TRASH_ITEM: &str = "TRASH";
pub const BOTTLE_ITEM: &str = "BOTTLE";

/// Leftovers that only a bin will take.
pub fn is_residue(item_id: &str) -> bool {
    item_id == TRASH_ITEM || item_id == BOTTLE_ITEM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_code_slot_is_write_once() {
        let mut code = SecretCode::default();
        assert!(code.reveal(1, 0));
        assert_eq!(code.digit(1), Some(0));
        assert!(!code.reveal(1, 7));
        assert_eq!(code.digit(1), Some(0), "filled slot must not change");
        assert!(code.reveal(1, 0), "same digit again is a no-op success");
        assert_eq!(code.display(), "?0??");
    }

    #[test]
    fn test_secret_code_out_of_range_slot() {
        let mut code = SecretCode::default();
        assert!(!code.reveal(SECRET_CODE_LEN, 3));
        assert_eq!(code, SecretCode::default());
    }

    #[test]
    fn test_inventory_rejects_eleventh_item() {
        let mut inv = Inventory::default();
        for _ in 0..INVENTORY_CAPACITY {
            inv.try_add("WATER").unwrap();
        }
        assert_eq!(inv.try_add("CHIPS"), Err(TransactionError::InventoryFull));
        assert_eq!(inv.len(), INVENTORY_CAPACITY);
        assert!(!inv.contains("CHIPS"));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = WorldRect::new(0.0, 0.0, 10.0, 10.0);
        let b = WorldRect::new(10.0, 0.0, 10.0, 10.0);
        let c = WorldRect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_modal_graph_edges() {
        assert!(GameState::Start.can_transition_to(GameState::FreeRoam));
        assert!(GameState::Choice.can_transition_to(GameState::GameOver));
        assert!(!GameState::FreeRoam.can_transition_to(GameState::GameOver));
        assert!(!GameState::Dialogue.can_transition_to(GameState::Shop));
        assert!(!GameState::GameOver.can_transition_to(GameState::FreeRoam));
    }

    #[test]
    fn test_appearance_is_chosen_once() {
        let mut session = Session::default();
        assert!(session.choose_appearance(Appearance::Girl));
        assert!(!session.choose_appearance(Appearance::Boy));
        assert_eq!(session.appearance, Some(Appearance::Girl));
    }
}
