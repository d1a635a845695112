// Per-step player input state

use super::action::{Action, Axis};
use crate::core::math::clamp;
use std::collections::HashSet;

/// Axis values smaller than this count as no input
const AXIS_DEAD_ZONE: f32 = 0.1;

/// Input state for the local player during one simulation step
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this step
    just_pressed: HashSet<Action>,

    /// Actions that were just released this step
    just_released: HashSet<Action>,

    /// Forward/backward axis
    forward: f32,

    /// Left/right axis
    right: f32,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this step
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this step
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Set an axis value, clamped to -1..=1
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        let value = if value.is_finite() {
            clamp(value, -1.0, 1.0)
        } else {
            0.0
        };
        match axis {
            Axis::MoveForward => self.forward = value,
            Axis::MoveRight => self.right = value,
        }
    }

    /// Read an axis value
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::MoveForward => self.forward,
            Axis::MoveRight => self.right,
        }
    }

    /// Whether either movement axis is outside the dead zone
    pub fn is_moving(&self) -> bool {
        self.forward.abs() > AXIS_DEAD_ZONE || self.right.abs() > AXIS_DEAD_ZONE
    }

    /// Whether sprint is held
    pub fn sprint_requested(&self) -> bool {
        self.is_pressed(Action::Sprint)
    }

    /// Whether any attack button is held (queues a combo follow-up)
    pub fn attack_held(&self) -> bool {
        self.is_pressed(Action::AttackPrimary) || self.is_pressed(Action::AttackSecondary)
    }

    /// Update input state for a new step
    /// Call this once per step after the character consumed the input
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.forward = 0.0;
        self.right = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Sprint);
        assert!(input.is_pressed(Action::Sprint));
        assert!(input.just_pressed(Action::Sprint));
        assert!(input.sprint_requested());
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Interact);
        input.update();
        input.release(Action::Interact);
        assert!(!input.is_pressed(Action::Interact));
        assert!(input.just_released(Action::Interact));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new();
        input.press(Action::AttackPrimary);
        input.update();
        assert!(input.is_pressed(Action::AttackPrimary));
        assert!(!input.just_pressed(Action::AttackPrimary));
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::Interact);
        input.update();
        input.press(Action::Interact);
        assert!(!input.just_pressed(Action::Interact));
    }

    #[test]
    fn test_axis_dead_zone() {
        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 0.05);
        assert!(!input.is_moving());

        input.set_axis(Axis::MoveRight, -0.5);
        assert!(input.is_moving());
    }

    #[test]
    fn test_axis_clamped() {
        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 3.0);
        assert_eq!(input.axis(Axis::MoveForward), 1.0);

        input.set_axis(Axis::MoveForward, f32::NAN);
        assert_eq!(input.axis(Axis::MoveForward), 0.0);
    }

    #[test]
    fn test_attack_held() {
        let mut input = PlayerInput::new();
        assert!(!input.attack_held());
        input.press(Action::AttackSecondary);
        assert!(input.attack_held());
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Sprint);
        input.set_axis(Axis::MoveForward, 1.0);
        input.reset();
        assert!(!input.sprint_requested());
        assert!(!input.is_moving());
    }
}
