// Level items: pickups, explosives and weapons

use super::characters::controller::ControllerError;
use super::entity::{EntityId, Overlappable, Role};
use glam::Vec3;
use log::info;
use std::collections::HashMap;

/// Damage dealt by an explosive unless configured otherwise
pub const EXPLOSIVE_DAMAGE: f32 = 15.0;

/// An equippable weapon
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    /// Name used to find the weapon again when loading a save
    pub name: String,
    /// Damage per hit
    pub damage: f32,
}

impl Weapon {
    pub fn new(name: &str, damage: f32) -> Self {
        Self {
            name: name.to_string(),
            damage,
        }
    }
}

/// Catalogue of weapons by name, used to re-equip after loading
#[derive(Debug, Clone, Default)]
pub struct WeaponStorage {
    weapons: HashMap<String, Weapon>,
}

impl WeaponStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The weapons placed in the shipped levels
    pub fn standard() -> Self {
        let mut storage = Self::new();
        storage.register(Weapon::new("Sword", 25.0));
        storage.register(Weapon::new("Axe", 35.0));
        storage.register(Weapon::new("Mace", 30.0));
        storage
    }

    pub fn register(&mut self, weapon: Weapon) {
        self.weapons.insert(weapon.name.clone(), weapon);
    }

    /// Get a fresh copy of a weapon by name
    pub fn get(&self, name: &str) -> Option<Weapon> {
        self.weapons.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

/// What an item does on contact
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Coin { amount: u32 },
    HealthPotion { amount: f32 },
    Explosive { damage: f32 },
    WeaponPickup(Weapon),
}

impl ItemKind {
    pub fn explosive() -> Self {
        Self::Explosive {
            damage: EXPLOSIVE_DAMAGE,
        }
    }
}

/// Result of an overlap, for the host to play effects and clean up
#[derive(Debug, Clone, PartialEq)]
pub enum OverlapEffect {
    /// Wrong role, already consumed, or nothing to do
    Ignored,
    CoinsCollected(u32),
    Healed(f32),
    Exploded { damage_applied: f32 },
    WeaponOffered(String),
}

/// An item placed in the level
#[derive(Debug, Clone)]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
    pub position: Vec3,
    consumed: bool,
}

impl Item {
    pub fn new(id: EntityId, kind: ItemKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            consumed: false,
        }
    }

    /// Check if the item has been used up and should be removed
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Mark the item as used up (e.g. a weapon that was equipped)
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Handle something starting to overlap this item
    pub fn on_overlap(
        &mut self,
        other: &mut dyn Overlappable,
    ) -> Result<OverlapEffect, ControllerError> {
        if self.consumed {
            return Ok(OverlapEffect::Ignored);
        }

        let role = other.role();
        let other_id = other.entity_id();
        let effect = match &self.kind {
            ItemKind::Coin { amount } if role == Role::Player => {
                match other.as_collector() {
                    Some(collector) => {
                        collector.gain_coins(*amount);
                        self.consumed = true;
                        OverlapEffect::CoinsCollected(*amount)
                    }
                    None => OverlapEffect::Ignored,
                }
            }
            ItemKind::HealthPotion { amount } if role == Role::Player => {
                // Left in place for a dead player, healing would be a no-op
                let alive = other.as_damageable().map_or(true, |target| target.is_alive());
                match other.as_collector().filter(|_| alive) {
                    Some(collector) => {
                        collector.heal(*amount)?;
                        self.consumed = true;
                        OverlapEffect::Healed(*amount)
                    }
                    None => OverlapEffect::Ignored,
                }
            }
            ItemKind::Explosive { damage } if role.is_combatant() => {
                match other.as_damageable() {
                    Some(target) => {
                        let damage_applied = target.take_damage(*damage, None)?;
                        self.consumed = true;
                        info!(
                            "Explosive {} hit entity {} for {}",
                            self.id, other_id, damage_applied
                        );
                        OverlapEffect::Exploded { damage_applied }
                    }
                    None => OverlapEffect::Ignored,
                }
            }
            ItemKind::WeaponPickup(weapon) if role == Role::Player => {
                match other.as_collector() {
                    Some(collector) => {
                        collector.set_overlapping_weapon(Some(weapon.clone()));
                        OverlapEffect::WeaponOffered(weapon.name.clone())
                    }
                    None => OverlapEffect::Ignored,
                }
            }
            _ => OverlapEffect::Ignored,
        };

        Ok(effect)
    }

    /// Handle something leaving this item
    pub fn on_overlap_end(&mut self, other: &mut dyn Overlappable) {
        if self.consumed || other.role() != Role::Player {
            return;
        }
        if let ItemKind::WeaponPickup(_) = self.kind {
            if let Some(collector) = other.as_collector() {
                collector.set_overlapping_weapon(None);
            }
        }
    }
}

impl Overlappable for Item {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn role(&self) -> Role {
        match self.kind {
            ItemKind::Explosive { .. } => Role::Hazard,
            _ => Role::Pickup,
        }
    }
}
