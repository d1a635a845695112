// Save data and the persistence port
//
// The character hands a `SaveSnapshot` to whatever `SaveStore` it was built
// with. How a store writes it to disk is the host's business.

use super::characters::controller::Vitals;
use glam::Vec3;
use log::info;

/// Save/load errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("No saved game in slot")]
    NoSave,

    #[error("Saved game is corrupt: {0}")]
    Corrupt(String),

    #[error("Saved weapon not found in storage: {0}")]
    UnknownWeapon(String),
}

/// Everything needed to put the player back where they were
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSnapshot {
    pub vitals: Vitals,
    /// Name of the equipped weapon, looked up in `WeaponStorage` on load
    pub weapon_name: Option<String>,
    pub position: Vec3,
    /// Pitch, yaw, roll in degrees
    pub rotation: Vec3,
    /// Level the save was made in, empty when unknown
    pub level_name: String,
}

/// Persistence port injected into the character
pub trait SaveStore {
    fn save(&mut self, snapshot: SaveSnapshot) -> Result<(), SaveError>;

    fn load(&self) -> Result<SaveSnapshot, SaveError>;
}

/// Single-slot store kept in memory
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    slot: Option<SaveSnapshot>,
    save_count: u32,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a save
    pub fn with_snapshot(snapshot: SaveSnapshot) -> Self {
        Self {
            slot: Some(snapshot),
            save_count: 0,
        }
    }

    /// Number of saves written since creation
    pub fn save_count(&self) -> u32 {
        self.save_count
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, snapshot: SaveSnapshot) -> Result<(), SaveError> {
        info!("Saving game in level '{}'", snapshot.level_name);
        self.slot = Some(snapshot);
        self.save_count += 1;
        Ok(())
    }

    fn load(&self) -> Result<SaveSnapshot, SaveError> {
        self.slot.clone().ok_or(SaveError::NoSave)
    }
}
