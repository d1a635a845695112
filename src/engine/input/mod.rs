// Input state for the simulated player
//
// Device binding lives with the host. This module only tracks which game
// actions are held this step and the two movement axes, which is all the
// character core needs.
//
// - `action`: game actions and axes
// - `player`: per-step input snapshot with press/release edges

pub mod action;
pub mod player;

pub use action::{Action, Axis};
pub use player::PlayerInput;
