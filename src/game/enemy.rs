// Hostile creatures

use super::characters::controller::ControllerError;
use super::entity::{DamageSource, Damageable, EntityId, Overlappable, Role};
use glam::Vec3;
use log::info;

/// A creature that fights the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec3,
    health: f32,
    max_health: f32,
    /// Whether the enemy is locked onto a live target
    has_valid_target: bool,
    alive: bool,
}

impl Enemy {
    pub fn new(id: EntityId, position: Vec3, max_health: f32) -> Self {
        Self {
            id,
            position,
            health: max_health,
            max_health,
            has_valid_target: false,
            alive: true,
        }
    }

    /// Lock onto a target (the player walked into aggro range)
    pub fn acquire_target(&mut self) {
        if self.alive {
            self.has_valid_target = true;
        }
    }

    pub fn has_valid_target(&self) -> bool {
        self.has_valid_target
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Hit the locked target, returns the damage applied
    pub fn attack(
        &mut self,
        target: &mut dyn Damageable,
        damage: f32,
    ) -> Result<f32, ControllerError> {
        if !self.alive || !self.has_valid_target || !target.is_alive() {
            return Ok(0.0);
        }
        target.take_damage(damage, Some(self))
    }
}

impl DamageSource for Enemy {
    fn clear_target_lock(&mut self) {
        self.has_valid_target = false;
    }
}

impl Damageable for Enemy {
    fn take_damage(
        &mut self,
        amount: f32,
        source: Option<&mut dyn DamageSource>,
    ) -> Result<f32, ControllerError> {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(ControllerError::InvalidArgument {
                name: "damage",
                value: amount,
            });
        }
        if !self.alive {
            return Ok(0.0);
        }

        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            info!("Enemy {} died", self.id);
            self.alive = false;
            self.has_valid_target = false;
            if let Some(source) = source {
                source.clear_target_lock();
            }
        }
        Ok(amount)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Overlappable for Enemy {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn role(&self) -> Role {
        Role::Enemy
    }

    fn as_damageable(&mut self) -> Option<&mut dyn Damageable> {
        Some(self)
    }
}
