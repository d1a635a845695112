// Animation dispatch for the character
//
// Montage playback lives with the host. The character only decides which
// section to play and tells its `AnimationDelegate`.

use log::info;
use rand::Rng;

/// Sections of the combat montage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MontageSection {
    AttackPrimary,
    AttackPrimaryAlt,
    AttackSecondary,
    Death,
}

impl MontageSection {
    /// Section name as authored in the montage asset
    pub fn section_name(&self) -> &'static str {
        match self {
            Self::AttackPrimary => "Attack_Primary",
            Self::AttackPrimaryAlt => "Attack_Primary_Alt",
            Self::AttackSecondary => "Attack_Secondary",
            Self::Death => "Death",
        }
    }

    /// Check if this section is an attack swing
    pub fn is_attack(&self) -> bool {
        !matches!(self, Self::Death)
    }
}

/// Pick the attack section for the held buttons
///
/// Primary wins when both are held and alternates randomly between its two
/// swings. Returns None when no attack button is held.
pub fn choose_attack_section<R: Rng>(
    primary_held: bool,
    secondary_held: bool,
    rng: &mut R,
) -> Option<MontageSection> {
    if primary_held {
        Some(if rng.gen_bool(0.5) {
            MontageSection::AttackPrimary
        } else {
            MontageSection::AttackPrimaryAlt
        })
    } else if secondary_held {
        Some(MontageSection::AttackSecondary)
    } else {
        None
    }
}

/// Host-side animation player
pub trait AnimationDelegate {
    /// Play a montage section at the given rate
    fn play_section(&mut self, section: MontageSection, play_rate: f32);

    /// Freeze or unfreeze the skeleton (death pose, load)
    fn set_frozen(&mut self, frozen: bool);
}

/// Animation delegate that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LoggingAnimator {
    last_section: Option<MontageSection>,
    frozen: bool,
}

impl LoggingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_section(&self) -> Option<MontageSection> {
        self.last_section
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

impl AnimationDelegate for LoggingAnimator {
    fn play_section(&mut self, section: MontageSection, play_rate: f32) {
        info!("Montage section {} at {}x", section.section_name(), play_rate);
        self.last_section = Some(section);
    }

    fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }
}
