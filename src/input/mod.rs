use bevy::prelude::*;
use bevy::ui::UiSystem;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>().add_systems(
            PreUpdate,
            (reset_and_read_input, read_touch_controls)
                .chain()
                .after(UiSystem::Focus),
        );
    }
}

/// Keyboard layout. Arrow keys always move in addition to these.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub confirm: KeyCode,
    pub select: KeyCode,
    pub open_inventory: KeyCode,
    pub cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::KeyE,
            confirm: KeyCode::Enter,
            select: KeyCode::Space,
            open_inventory: KeyCode::KeyI,
            cancel: KeyCode::Escape,
        }
    }
}

const CHOICE_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// The single point where keyboard input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    input.held = HeldDirections {
        up: keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp),
        down: keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown),
        left: keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight),
    };

    let interact = keys.just_pressed(bindings.interact);
    let confirm = keys.just_pressed(bindings.confirm);
    input.select = keys.just_pressed(bindings.select);
    input.acknowledge = interact || confirm;
    input.interact = interact || confirm || input.select;
    input.cancel = keys.just_pressed(bindings.cancel);
    input.toggle_inventory = keys.just_pressed(bindings.open_inventory);

    input.menu_up = keys.just_pressed(bindings.move_up) || keys.just_pressed(KeyCode::ArrowUp);
    input.menu_down =
        keys.just_pressed(bindings.move_down) || keys.just_pressed(KeyCode::ArrowDown);

    input.choose = CHOICE_KEYS.iter().position(|key| keys.just_pressed(*key));
}

/// On-screen pad and clickable menu rows. Directions count while held;
/// BAG, ACT and rows fire once per press.
fn read_touch_controls(
    buttons: Query<(&Interaction, &TouchButton)>,
    changed_buttons: Query<(&Interaction, &TouchButton), Changed<Interaction>>,
    options: Query<(&Interaction, &MenuOption), Changed<Interaction>>,
    mut input: ResMut<PlayerInput>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            TouchButton::Up => input.held.up = true,
            TouchButton::Down => input.held.down = true,
            TouchButton::Left => input.held.left = true,
            TouchButton::Right => input.held.right = true,
            TouchButton::Bag | TouchButton::Act => {}
        }
    }

    for (interaction, button) in &changed_buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            TouchButton::Bag => input.toggle_inventory = true,
            TouchButton::Act => {
                input.interact = true;
                input.acknowledge = true;
            }
            _ => {}
        }
    }

    for (interaction, option) in &options {
        if *interaction == Interaction::Pressed {
            input.choose = Some(option.0);
        }
    }
}
