// Character stats - tuning values for the player knight

use super::controller::ControllerError;

/// Tuning values fixed for a character's lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    // Vitals
    /// Health ceiling
    pub max_health: f32,
    /// Stamina ceiling
    pub max_stamina: f32,

    // Stamina
    /// Stamina drained (or regenerated) per second
    pub stamina_drain_rate: f32,
    /// Stamina needed to leave the below-minimum / recovering band
    pub min_sprint_stamina: f32,

    // Movement
    /// Max speed while not sprinting (units/second)
    pub run_speed: f32,
    /// Max speed while sprinting (units/second)
    pub sprint_speed: f32,

    // Combat
    /// How fast the character turns toward its combat target while attacking
    pub interp_speed: f32,
    /// Playback rate for attack montage sections
    pub attack_play_rate: f32,
}

/// Default knight tuning
pub const BASE_STATS: CharacterStats = CharacterStats {
    max_health: 100.0,
    max_stamina: 300.0,

    stamina_drain_rate: 20.0,
    min_sprint_stamina: 25.0,

    run_speed: 500.0,
    sprint_speed: 700.0,

    interp_speed: 10.0,
    attack_play_rate: 1.6,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard knight stats
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Reject tuning that would break the controller's invariants
    pub fn validate(&self) -> Result<(), ControllerError> {
        let positive = [
            ("max_health", self.max_health),
            ("max_stamina", self.max_stamina),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ControllerError::InvalidStats(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("stamina_drain_rate", self.stamina_drain_rate),
            ("min_sprint_stamina", self.min_sprint_stamina),
            ("run_speed", self.run_speed),
            ("sprint_speed", self.sprint_speed),
            ("interp_speed", self.interp_speed),
            ("attack_play_rate", self.attack_play_rate),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ControllerError::InvalidStats(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.min_sprint_stamina > self.max_stamina {
            return Err(ControllerError::InvalidStats(format!(
                "min_sprint_stamina {} exceeds max_stamina {}",
                self.min_sprint_stamina, self.max_stamina
            )));
        }

        Ok(())
    }
}
