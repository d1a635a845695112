// Character system
//
// This module contains everything related to the player character:
// - Stats and tuning
// - Movement and stamina state machines
// - The state controller tying them to the vitals
// - The character entity wiring the controller to host-side delegates
// - Combat targeting and animation section selection

pub mod animation;
pub mod character;
pub mod combat;
pub mod controller;
pub mod motion;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationDelegate, LoggingAnimator, MontageSection};
pub use character::Character;
pub use combat::CombatTarget;
pub use controller::{CharacterStateController, ControllerError, Vitals};
pub use motion::{KinematicMotion, MotionDelegate};
pub use state::{MovementState, StaminaState};
pub use stats::CharacterStats;
