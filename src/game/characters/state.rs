// Character state machines: locomotion mode and stamina band

use crate::core::math::clamp;

/// Coarse locomotion mode, governs the published max speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    /// Running at normal speed (or standing still)
    #[default]
    Normal,
    /// Sprinting, drains stamina
    Sprint,
    /// Character is dead. Terminal
    Dead,
}

impl MovementState {
    /// Check if the character is alive
    pub fn is_alive(&self) -> bool {
        !matches!(self, Self::Dead)
    }

    /// Get the display name for this state
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Sprint => "Sprinting",
            Self::Dead => "Dead",
        }
    }
}

/// Stamina band with hysteresis around the sprint threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StaminaState {
    /// Above the sprint threshold
    #[default]
    Normal,
    /// At or under the threshold, still allowed to sprint
    BelowMin,
    /// Ran dry while sprinting, stamina pinned at zero while sprint is held
    Exhausted,
    /// Regenerating after exhaustion, no sprinting until back to Normal
    RecoveringExhausted,
}

impl StaminaState {
    /// Check if sprinting is allowed in this band
    pub fn permits_sprint(&self) -> bool {
        matches!(self, Self::Normal | Self::BelowMin)
    }

    /// Get the display name for this state
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::BelowMin => "BelowMinimum",
            Self::Exhausted => "Exhausted",
            Self::RecoveringExhausted => "Recovering",
        }
    }
}

/// Thresholds the stamina machine runs against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaminaLimits {
    pub max: f32,
    pub min_sprint: f32,
}

/// State machine for the stamina band
#[derive(Debug, Default)]
pub struct StaminaMachine {
    current_state: StaminaState,
    state_time: f32,
}

impl StaminaMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine already in the given state
    pub fn starting_in(state: StaminaState) -> Self {
        Self {
            current_state: state,
            state_time: 0.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> StaminaState {
        self.current_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Transition to a new state
    pub fn transition(&mut self, new_state: StaminaState) {
        if self.current_state != new_state {
            log::debug!(
                "Stamina {} -> {}",
                self.current_state.display_name(),
                new_state.display_name()
            );
            self.current_state = new_state;
            self.state_time = 0.0;
        }
    }

    /// Advance one step and return the new stamina value
    ///
    /// `drain` is the stamina moved this step (rate * dt). The result is always
    /// clamped to `0..=limits.max`.
    pub fn step(
        &mut self,
        stamina: f32,
        drain: f32,
        sprint_requested: bool,
        limits: StaminaLimits,
        dt: f32,
    ) -> f32 {
        self.state_time += dt;

        let next = match (self.current_state, sprint_requested) {
            (StaminaState::Normal, true) => {
                let next = stamina - drain;
                if next <= 0.0 {
                    self.transition(StaminaState::Exhausted);
                    0.0
                } else {
                    if next <= limits.min_sprint {
                        self.transition(StaminaState::BelowMin);
                    }
                    next
                }
            }
            (StaminaState::Normal, false) => stamina + drain,
            (StaminaState::BelowMin, true) => {
                let next = stamina - drain;
                if next <= 0.0 {
                    self.transition(StaminaState::Exhausted);
                    0.0
                } else {
                    next
                }
            }
            (StaminaState::BelowMin, false) => {
                let next = stamina + drain;
                if next >= limits.min_sprint {
                    self.transition(StaminaState::Normal);
                }
                next
            }
            (StaminaState::Exhausted, true) => 0.0,
            (StaminaState::Exhausted, false) => {
                self.transition(StaminaState::RecoveringExhausted);
                stamina + drain
            }
            // Sprint input has no say here, regen continues either way
            (StaminaState::RecoveringExhausted, _) => {
                let next = stamina + drain;
                if next >= limits.min_sprint {
                    self.transition(StaminaState::Normal);
                }
                next
            }
        };

        clamp(next, 0.0, limits.max)
    }
}
