// Character state controller
//
// Owns the movement and stamina state machines plus the vitals they act on.
// Everything outside (motion integration, animation, persistence, attackers)
// reads the published values and goes through the mutators below.

use super::state::{MovementState, StaminaLimits, StaminaMachine, StaminaState};
use super::stats::CharacterStats;
use crate::core::math::clamp;
use crate::game::entity::DamageSource;
use log::{info, warn};

/// Errors raised at the controller boundary
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("Invalid argument {name}: {value} (must be finite and non-negative)")]
    InvalidArgument { name: &'static str, value: f32 },

    #[error("Invalid stats: {0}")]
    InvalidStats(String),
}

/// Persisted vitals
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub coins: u32,
}

fn check_argument(name: &'static str, value: f32) -> Result<f32, ControllerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        warn!("Rejected {name} = {value}");
        Err(ControllerError::InvalidArgument { name, value })
    }
}

/// Movement, stamina and combat state for one character
#[derive(Debug)]
pub struct CharacterStateController {
    stats: CharacterStats,
    movement_state: MovementState,
    stamina_machine: StaminaMachine,
    health: f32,
    stamina: f32,
    coins: u32,
    sprint_requested: bool,
    is_attacking: bool,
}

impl CharacterStateController {
    /// Create a controller at full health and stamina
    pub fn new(stats: CharacterStats) -> Result<Self, ControllerError> {
        stats.validate()?;
        Ok(Self::spawn(stats))
    }

    /// Create a controller with the standard knight stats
    pub fn standard() -> Self {
        Self::spawn(CharacterStats::standard())
    }

    fn spawn(stats: CharacterStats) -> Self {
        Self {
            health: stats.max_health,
            stamina: stats.max_stamina,
            stats,
            movement_state: MovementState::Normal,
            stamina_machine: StaminaMachine::new(),
            coins: 0,
            sprint_requested: false,
            is_attacking: false,
        }
    }

    /// Advance one simulation step
    ///
    /// Runs the stamina machine, then picks Sprint or Normal. Does nothing once
    /// the character is dead. Movement is ignored while an attack is playing.
    pub fn update(
        &mut self,
        dt: f32,
        sprint_requested: bool,
        is_moving: bool,
    ) -> Result<(), ControllerError> {
        let dt = check_argument("delta_time", dt)?;
        if !self.is_alive() {
            return Ok(());
        }

        self.sprint_requested = sprint_requested;

        let drain = self.stats.stamina_drain_rate * dt;
        let limits = StaminaLimits {
            max: self.stats.max_stamina,
            min_sprint: self.stats.min_sprint_stamina,
        };
        let band_before = self.stamina_machine.state();
        let time_in_band = self.stamina_machine.state_time() + dt;
        self.stamina = self
            .stamina_machine
            .step(self.stamina, drain, sprint_requested, limits, dt);

        match (band_before, self.stamina_machine.state()) {
            (before, StaminaState::Exhausted) if before != StaminaState::Exhausted => {
                info!("Stamina exhausted, sprint locked until recovered");
            }
            (StaminaState::RecoveringExhausted, StaminaState::Normal) => {
                info!("Stamina recovered after {:.1}s", time_in_band);
            }
            _ => {}
        }

        let moving = is_moving && !self.is_attacking;
        let sprinting =
            sprint_requested && moving && self.stamina_machine.state().permits_sprint();
        self.set_movement_state(if sprinting {
            MovementState::Sprint
        } else {
            MovementState::Normal
        });

        Ok(())
    }

    fn set_movement_state(&mut self, state: MovementState) {
        if self.movement_state != state {
            log::debug!(
                "Movement {} -> {}",
                self.movement_state.display_name(),
                state.display_name()
            );
            self.movement_state = state;
        }
    }

    /// Apply damage, returns the amount applied
    ///
    /// The step that takes health to zero kills the character and tells the
    /// attacker to drop its target lock. Health is clamped at zero; the
    /// returned amount carries any overshoot. Zero is returned once dead.
    pub fn apply_damage(
        &mut self,
        amount: f32,
        source: Option<&mut dyn DamageSource>,
    ) -> Result<f32, ControllerError> {
        let amount = check_argument("damage", amount)?;
        if !self.is_alive() {
            return Ok(0.0);
        }

        if self.health - amount <= 0.0 {
            self.health = 0.0;
            self.die();
            if let Some(source) = source {
                source.clear_target_lock();
            }
        } else {
            self.health -= amount;
        }

        Ok(amount)
    }

    fn die(&mut self) {
        info!("Character died");
        self.set_movement_state(MovementState::Dead);
        self.is_attacking = false;
        self.sprint_requested = false;
    }

    /// Restore health, saturating at max
    pub fn heal(&mut self, amount: f32) -> Result<(), ControllerError> {
        let amount = check_argument("heal", amount)?;
        if self.is_alive() {
            self.health = (self.health + amount).min(self.stats.max_health);
        }
        Ok(())
    }

    /// Add picked-up coins
    pub fn gain_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Restore stamina directly, saturating at max
    pub fn restore_stamina(&mut self, amount: f32) -> Result<(), ControllerError> {
        let amount = check_argument("stamina", amount)?;
        if self.is_alive() {
            self.stamina = (self.stamina + amount).min(self.stats.max_stamina);
        }
        Ok(())
    }

    /// Spend stamina directly, saturating at zero
    pub fn spend_stamina(&mut self, amount: f32) -> Result<(), ControllerError> {
        let amount = check_argument("stamina", amount)?;
        if self.is_alive() {
            self.stamina = (self.stamina - amount).max(0.0);
        }
        Ok(())
    }

    /// Open an attack window
    ///
    /// Returns false if one is already open or the character is dead. On true
    /// the caller starts the attack animation; movement stays locked until
    /// `end_attack`.
    pub fn begin_attack(&mut self) -> bool {
        if self.is_attacking || !self.is_alive() {
            return false;
        }
        self.is_attacking = true;
        true
    }

    /// Close the attack window
    ///
    /// With `queued_followup` (an attack button still held) the next attack of
    /// the combo starts immediately. Returns whether it did.
    pub fn end_attack(&mut self, queued_followup: bool) -> bool {
        self.is_attacking = false;
        queued_followup && self.begin_attack()
    }

    /// Current vitals for persistence
    pub fn vitals(&self) -> Vitals {
        Vitals {
            health: self.health,
            max_health: self.stats.max_health,
            stamina: self.stamina,
            max_stamina: self.stats.max_stamina,
            coins: self.coins,
        }
    }

    /// Overwrite vitals from a save
    ///
    /// Loading puts the character back on its feet: movement returns to Normal
    /// unless the saved health is zero. The stamina band is derived from the
    /// restored stamina.
    pub fn restore_vitals(&mut self, vitals: &Vitals) -> Result<(), ControllerError> {
        let stats = CharacterStats {
            max_health: vitals.max_health,
            max_stamina: vitals.max_stamina,
            ..self.stats.clone()
        };
        stats.validate()?;
        check_argument("health", vitals.health)?;
        check_argument("stamina", vitals.stamina)?;

        self.stats = stats;
        self.health = clamp(vitals.health, 0.0, self.stats.max_health);
        self.stamina = clamp(vitals.stamina, 0.0, self.stats.max_stamina);
        self.coins = vitals.coins;
        self.is_attacking = false;
        self.sprint_requested = false;

        self.stamina_machine = StaminaMachine::starting_in(
            if self.stamina > self.stats.min_sprint_stamina {
                StaminaState::Normal
            } else {
                StaminaState::BelowMin
            },
        );

        if self.health > 0.0 {
            self.set_movement_state(MovementState::Normal);
        } else {
            self.die();
        }

        Ok(())
    }

    /// Max speed for the motion integrator
    pub fn max_speed(&self) -> f32 {
        match self.movement_state {
            MovementState::Sprint => self.stats.sprint_speed,
            MovementState::Normal | MovementState::Dead => self.stats.run_speed,
        }
    }

    /// Check whether movement input should be applied
    pub fn can_move(&self) -> bool {
        self.is_alive() && !self.is_attacking
    }

    pub fn is_alive(&self) -> bool {
        self.movement_state.is_alive()
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    pub fn sprint_requested(&self) -> bool {
        self.sprint_requested
    }

    pub fn movement_state(&self) -> MovementState {
        self.movement_state
    }

    pub fn stamina_state(&self) -> StaminaState {
        self.stamina_machine.state()
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> f32 {
        self.stats.max_stamina
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }
}

impl Default for CharacterStateController {
    fn default() -> Self {
        Self::standard()
    }
}
