// Entity roles and capabilities
//
// Overlap handlers never ask "what concrete type is this?". They ask for a
// role and for a capability (`as_damageable`, `as_collector`) and act on
// whatever answers.

use super::characters::controller::ControllerError;
use super::items::Weapon;

/// Unique identifier for an entity in the level
pub type EntityId = u32;

/// What part an entity plays in overlap dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The player character
    Player,
    /// Hostile creature
    Enemy,
    /// Collectable item (coins, potions, weapons)
    Pickup,
    /// Something that hurts on contact (explosives)
    Hazard,
}

impl Role {
    /// Check if this role takes part in combat
    pub fn is_combatant(&self) -> bool {
        matches!(self, Self::Player | Self::Enemy)
    }
}

/// Anything that deals damage and may hold a target lock on its victim
pub trait DamageSource {
    /// Called when the victim dies so the attacker stops tracking it
    fn clear_target_lock(&mut self);
}

/// Anything that can take damage
pub trait Damageable {
    /// Apply damage, returns the amount applied
    fn take_damage(
        &mut self,
        amount: f32,
        source: Option<&mut dyn DamageSource>,
    ) -> Result<f32, ControllerError>;

    fn is_alive(&self) -> bool;
}

/// Anything that can pick items up
pub trait Collector {
    fn gain_coins(&mut self, amount: u32);

    fn heal(&mut self, amount: f32) -> Result<(), ControllerError>;

    /// Offer a weapon for equipping (None when walking away from it)
    fn set_overlapping_weapon(&mut self, weapon: Option<Weapon>);
}

/// Anything that takes part in overlap events
pub trait Overlappable {
    fn entity_id(&self) -> EntityId;

    fn role(&self) -> Role;

    fn as_damageable(&mut self) -> Option<&mut dyn Damageable> {
        None
    }

    fn as_collector(&mut self) -> Option<&mut dyn Collector> {
        None
    }
}
