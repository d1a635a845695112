// Game action definitions

/// Digital in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    Sprint,

    // Interaction
    Interact,

    // Combat
    AttackPrimary,
    AttackSecondary,
}

impl Action {
    /// Whether this action starts an attack
    pub fn is_attack(&self) -> bool {
        matches!(self, Self::AttackPrimary | Self::AttackSecondary)
    }
}

/// Analog movement axes, each in -1.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    MoveForward,
    MoveRight,
}
