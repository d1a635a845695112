// Player character: the state controller wired to its host-side delegates

use glam::{Quat, Vec3};
use log::info;
use rand::Rng;

use super::animation::{choose_attack_section, AnimationDelegate, MontageSection};
use super::combat::{closest_target, interp_yaw, look_at_yaw, CombatTarget};
use super::controller::{CharacterStateController, ControllerError};
use super::motion::MotionDelegate;
use super::state::{MovementState, StaminaState};
use super::stats::CharacterStats;
use crate::engine::input::{Action, Axis, PlayerInput};
use crate::game::entity::{
    Collector, DamageSource, Damageable, EntityId, Overlappable, Role,
};
use crate::game::items::{Weapon, WeaponStorage};
use crate::game::save::{SaveError, SaveSnapshot, SaveStore};

/// The player-controlled knight
pub struct Character {
    /// Unique identifier
    pub id: EntityId,
    /// Character name (for display)
    pub name: String,

    /// Movement, stamina and combat state
    controller: CharacterStateController,

    // Host-side collaborators
    motion: Box<dyn MotionDelegate>,
    animation: Box<dyn AnimationDelegate>,
    store: Box<dyn SaveStore>,

    // Items
    /// Catalogue used to re-equip the saved weapon
    weapons: WeaponStorage,
    equipped_weapon: Option<Weapon>,
    /// Weapon the character is standing on, equipped on interact
    overlapping_weapon: Option<Weapon>,

    // Orientation
    /// Pitch, yaw, roll in degrees
    rotation: Vec3,
    /// Camera yaw movement input is relative to
    camera_yaw: f32,

    // Combat
    combat_target: Option<CombatTarget>,
    /// Turn toward the combat target (set for the length of an attack)
    interp_to_target: bool,
}

impl Character {
    /// Create a new character at full health and stamina
    pub fn new(
        id: EntityId,
        name: &str,
        stats: CharacterStats,
        motion: Box<dyn MotionDelegate>,
        animation: Box<dyn AnimationDelegate>,
        store: Box<dyn SaveStore>,
        weapons: WeaponStorage,
    ) -> Result<Self, ControllerError> {
        let controller = CharacterStateController::new(stats)?;
        let mut character = Self {
            id,
            name: name.to_string(),
            controller,
            motion,
            animation,
            store,
            weapons,
            equipped_weapon: None,
            overlapping_weapon: None,
            rotation: Vec3::ZERO,
            camera_yaw: 0.0,
            combat_target: None,
            interp_to_target: false,
        };
        character
            .motion
            .set_max_speed(character.controller.max_speed());
        Ok(character)
    }

    /// Advance one simulation step
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) -> Result<(), ControllerError> {
        let is_moving = self.controller.can_move() && input.is_moving();
        self.controller
            .update(dt, input.sprint_requested(), is_moving)?;

        if is_moving {
            let direction = self.movement_direction(input);
            self.motion.add_input(direction);
            if !self.interp_to_target {
                self.rotation.y = look_at_yaw(Vec3::ZERO, direction);
            }
        }

        self.motion.set_max_speed(self.controller.max_speed());
        self.motion.step(dt);

        if self.interp_to_target {
            if let Some(target) = self.combat_target {
                let wanted = look_at_yaw(self.motion.position(), target.location);
                self.rotation.y = interp_yaw(
                    self.rotation.y,
                    wanted,
                    dt,
                    self.controller.stats().interp_speed,
                );
            }
        }

        Ok(())
    }

    /// World-space direction for the movement axes, relative to the camera
    fn movement_direction(&self, input: &PlayerInput) -> Vec3 {
        let local = Vec3::new(
            input.axis(Axis::MoveForward),
            input.axis(Axis::MoveRight),
            0.0,
        );
        Quat::from_rotation_z(self.camera_yaw.to_radians()) * local
    }

    /// React to button presses for this step
    ///
    /// Returns the attack section started, if any.
    pub fn handle_input<R: Rng>(
        &mut self,
        input: &PlayerInput,
        rng: &mut R,
    ) -> Option<MontageSection> {
        if input.just_pressed(Action::Interact) {
            self.interact();
        }

        let attack_pressed = input.just_pressed(Action::AttackPrimary)
            || input.just_pressed(Action::AttackSecondary);
        if attack_pressed {
            self.attack(input, rng)
        } else {
            None
        }
    }

    /// Start an attack if a weapon is equipped and no swing is playing
    pub fn attack<R: Rng>(&mut self, input: &PlayerInput, rng: &mut R) -> Option<MontageSection> {
        if self.equipped_weapon.is_none() {
            return None;
        }
        let section = choose_attack_section(
            input.is_pressed(Action::AttackPrimary),
            input.is_pressed(Action::AttackSecondary),
            rng,
        )?;
        if !self.controller.begin_attack() {
            return None;
        }
        self.play_attack(section);
        Some(section)
    }

    fn play_attack(&mut self, section: MontageSection) {
        self.interp_to_target = true;
        self.animation
            .play_section(section, self.controller.stats().attack_play_rate);
    }

    /// Animation notify at the end of a swing; chains the combo if a button is held
    pub fn on_attack_end<R: Rng>(
        &mut self,
        input: &PlayerInput,
        rng: &mut R,
    ) -> Option<MontageSection> {
        self.interp_to_target = false;

        if !self.controller.end_attack(input.attack_held()) {
            return None;
        }
        let section = choose_attack_section(
            input.is_pressed(Action::AttackPrimary),
            input.is_pressed(Action::AttackSecondary),
            rng,
        )?;
        self.play_attack(section);
        Some(section)
    }

    /// Equip the weapon the character is standing on
    ///
    /// Returns the name of the weapon equipped.
    pub fn interact(&mut self) -> Option<String> {
        if !self.controller.is_alive() {
            return None;
        }
        let weapon = self.overlapping_weapon.take()?;
        let name = weapon.name.clone();
        self.set_equipped_weapon(Some(weapon));
        Some(name)
    }

    /// Replace the equipped weapon
    pub fn set_equipped_weapon(&mut self, weapon: Option<Weapon>) {
        if let Some(old) = &self.equipped_weapon {
            info!("{} drops {}", self.name, old.name);
        }
        if let Some(new) = &weapon {
            info!("{} equips {}", self.name, new.name);
        }
        self.equipped_weapon = weapon;
    }

    /// Take a hit, returns the damage applied
    pub fn receive_damage(
        &mut self,
        amount: f32,
        source: Option<&mut dyn DamageSource>,
    ) -> Result<f32, ControllerError> {
        let was_alive = self.controller.is_alive();
        let applied = self.controller.apply_damage(amount, source)?;

        if was_alive && !self.controller.is_alive() {
            info!("{} was slain", self.name);
            self.interp_to_target = false;
            self.animation.play_section(MontageSection::Death, 1.0);
        }

        Ok(applied)
    }

    /// Animation notify at the end of the death section
    pub fn on_death_end(&mut self) {
        self.animation.set_frozen(true);
    }

    /// Lock onto the closest of the overlapping enemies, or clear the lock
    pub fn update_combat_target(&mut self, candidates: &[CombatTarget]) -> Option<EntityId> {
        self.combat_target = closest_target(self.motion.position(), candidates);
        self.combat_target.map(|target| target.id)
    }

    /// Write the current state to the persistence port
    pub fn save(&mut self, level_name: &str) -> Result<(), SaveError> {
        let snapshot = SaveSnapshot {
            vitals: self.controller.vitals(),
            weapon_name: self.equipped_weapon.as_ref().map(|w| w.name.clone()),
            position: self.motion.position(),
            rotation: self.rotation,
            level_name: level_name.to_string(),
        };
        self.store.save(snapshot)
    }

    /// Restore state from the persistence port
    ///
    /// Returns the saved level name so the host can switch to it. Nothing is
    /// changed if the save cannot be applied.
    pub fn load(&mut self, set_position: bool) -> Result<Option<String>, SaveError> {
        let snapshot = self.store.load()?;

        let weapon = match &snapshot.weapon_name {
            Some(name) => Some(
                self.weapons
                    .get(name)
                    .ok_or_else(|| SaveError::UnknownWeapon(name.clone()))?,
            ),
            None => None,
        };

        self.controller
            .restore_vitals(&snapshot.vitals)
            .map_err(|e| SaveError::Corrupt(e.to_string()))?;

        if weapon.is_some() {
            self.set_equipped_weapon(weapon);
        }

        if set_position {
            self.motion.teleport(snapshot.position);
            self.rotation = snapshot.rotation;
        }

        self.interp_to_target = false;
        self.motion.set_max_speed(self.controller.max_speed());
        self.animation.set_frozen(false);
        info!("{} loaded from '{}'", self.name, snapshot.level_name);

        if snapshot.level_name.is_empty() {
            Ok(None)
        } else {
            Ok(Some(snapshot.level_name))
        }
    }

    /// Set the camera yaw (degrees) that movement input is relative to
    pub fn set_camera_yaw(&mut self, yaw: f32) {
        self.camera_yaw = yaw;
    }

    pub fn controller(&self) -> &CharacterStateController {
        &self.controller
    }

    pub fn store(&self) -> &dyn SaveStore {
        self.store.as_ref()
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position()
    }

    /// Current yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.equipped_weapon.as_ref()
    }

    pub fn overlapping_weapon(&self) -> Option<&Weapon> {
        self.overlapping_weapon.as_ref()
    }

    pub fn combat_target(&self) -> Option<CombatTarget> {
        self.combat_target
    }

    pub fn is_alive(&self) -> bool {
        self.controller.is_alive()
    }

    pub fn movement_state(&self) -> MovementState {
        self.controller.movement_state()
    }

    pub fn stamina_state(&self) -> StaminaState {
        self.controller.stamina_state()
    }
}

impl DamageSource for Character {
    fn clear_target_lock(&mut self) {
        self.combat_target = None;
        self.interp_to_target = false;
    }
}

impl Damageable for Character {
    fn take_damage(
        &mut self,
        amount: f32,
        source: Option<&mut dyn DamageSource>,
    ) -> Result<f32, ControllerError> {
        self.receive_damage(amount, source)
    }

    fn is_alive(&self) -> bool {
        self.controller.is_alive()
    }
}

impl Collector for Character {
    fn gain_coins(&mut self, amount: u32) {
        self.controller.gain_coins(amount);
    }

    fn heal(&mut self, amount: f32) -> Result<(), ControllerError> {
        self.controller.heal(amount)
    }

    fn set_overlapping_weapon(&mut self, weapon: Option<Weapon>) {
        self.overlapping_weapon = weapon;
    }
}

impl Overlappable for Character {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn role(&self) -> Role {
        Role::Player
    }

    fn as_damageable(&mut self) -> Option<&mut dyn Damageable> {
        Some(self)
    }

    fn as_collector(&mut self) -> Option<&mut dyn Collector> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::motion::KinematicMotion;
    use crate::game::enemy::Enemy;
    use crate::game::items::{Item, ItemKind, OverlapEffect};
    use crate::game::save::MemorySaveStore;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Animation delegate that shares what it was asked to play with the test
    #[derive(Default)]
    struct Recorded {
        sections: Vec<MontageSection>,
        frozen: bool,
    }

    struct RecordingAnimator(Rc<RefCell<Recorded>>);

    impl AnimationDelegate for RecordingAnimator {
        fn play_section(&mut self, section: MontageSection, _play_rate: f32) {
            self.0.borrow_mut().sections.push(section);
        }

        fn set_frozen(&mut self, frozen: bool) {
            self.0.borrow_mut().frozen = frozen;
        }
    }

    fn character() -> (Character, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let character = Character::new(
            0,
            "Knight",
            CharacterStats::standard(),
            Box::new(KinematicMotion::new(Vec3::ZERO)),
            Box::new(RecordingAnimator(Rc::clone(&recorded))),
            Box::new(MemorySaveStore::new()),
            WeaponStorage::standard(),
        )
        .unwrap();
        (character, recorded)
    }

    fn armed() -> (Character, Rc<RefCell<Recorded>>) {
        let (mut character, recorded) = character();
        character.set_overlapping_weapon(WeaponStorage::standard().get("Sword"));
        character.interact();
        (character, recorded)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_walks_at_run_speed() {
        let (mut character, _) = character();
        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 1.0);

        character.tick(1.0, &input).unwrap();
        assert_relative_eq!(character.position().x, 500.0, epsilon = 1e-3);
        assert_eq!(character.movement_state(), MovementState::Normal);
    }

    #[test]
    fn test_sprints_when_moving() {
        let (mut character, _) = character();
        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 1.0);
        input.press(Action::Sprint);

        character.tick(1.0, &input).unwrap();
        assert_eq!(character.movement_state(), MovementState::Sprint);
        assert_relative_eq!(character.position().x, 700.0, epsilon = 1e-3);
        assert_relative_eq!(character.controller().stamina(), 280.0);
    }

    #[test]
    fn test_movement_relative_to_camera() {
        let (mut character, _) = character();
        character.set_camera_yaw(90.0);
        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 1.0);

        character.tick(0.1, &input).unwrap();
        assert_relative_eq!(character.position().y, 50.0, epsilon = 1e-3);
        assert_relative_eq!(character.position().x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(character.yaw(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_attack_requires_weapon() {
        let (mut character, recorded) = character();
        let mut input = PlayerInput::new();
        input.press(Action::AttackPrimary);

        assert_eq!(character.handle_input(&input, &mut rng()), None);
        assert!(!character.controller().is_attacking());
        assert!(recorded.borrow().sections.is_empty());
    }

    #[test]
    fn test_attack_locks_movement() {
        let (mut character, recorded) = armed();
        let mut input = PlayerInput::new();
        input.press(Action::AttackSecondary);

        assert_eq!(
            character.handle_input(&input, &mut rng()),
            Some(MontageSection::AttackSecondary)
        );
        assert_eq!(recorded.borrow().sections, vec![MontageSection::AttackSecondary]);

        input.set_axis(Axis::MoveForward, 1.0);
        character.tick(1.0, &input).unwrap();
        assert_eq!(character.position(), Vec3::ZERO);
    }

    #[test]
    fn test_second_press_during_swing_ignored() {
        let (mut character, recorded) = armed();
        let mut input = PlayerInput::new();
        input.press(Action::AttackPrimary);
        character.handle_input(&input, &mut rng());

        input.release(Action::AttackPrimary);
        input.update();
        input.press(Action::AttackPrimary);
        assert_eq!(character.handle_input(&input, &mut rng()), None);
        assert_eq!(recorded.borrow().sections.len(), 1);
    }

    #[test]
    fn test_combo_chains_while_held() {
        let (mut character, recorded) = armed();
        let mut input = PlayerInput::new();
        input.press(Action::AttackPrimary);
        character.handle_input(&input, &mut rng());

        let next = character.on_attack_end(&input, &mut rng());
        assert!(matches!(
            next,
            Some(MontageSection::AttackPrimary | MontageSection::AttackPrimaryAlt)
        ));
        assert!(character.controller().is_attacking());
        assert_eq!(recorded.borrow().sections.len(), 2);

        input.release(Action::AttackPrimary);
        assert_eq!(character.on_attack_end(&input, &mut rng()), None);
        assert!(!character.controller().is_attacking());
    }

    #[test]
    fn test_combo_switches_to_secondary() {
        let (mut character, recorded) = armed();
        let mut input = PlayerInput::new();
        input.press(Action::AttackPrimary);
        character.handle_input(&input, &mut rng());

        input.release(Action::AttackPrimary);
        input.press(Action::AttackSecondary);
        assert_eq!(
            character.on_attack_end(&input, &mut rng()),
            Some(MontageSection::AttackSecondary)
        );
        assert!(character.controller().is_attacking());
        assert_eq!(
            recorded.borrow().sections.last(),
            Some(&MontageSection::AttackSecondary)
        );
    }

    #[test]
    fn test_faces_target_while_attacking() {
        let (mut character, _) = armed();
        let target = CombatTarget {
            id: 4,
            location: Vec3::new(0.0, 100.0, 0.0),
        };
        assert_eq!(character.update_combat_target(&[target]), Some(4));

        let mut input = PlayerInput::new();
        input.press(Action::AttackPrimary);
        character.handle_input(&input, &mut rng());

        // interp_speed 10 with dt 1 covers the whole arc
        character.tick(1.0, &input).unwrap();
        assert_relative_eq!(character.yaw(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_combat_target_cleared_without_candidates() {
        let (mut character, _) = character();
        let target = CombatTarget {
            id: 4,
            location: Vec3::X,
        };
        character.update_combat_target(&[target]);
        assert_eq!(character.update_combat_target(&[]), None);
        assert!(character.combat_target().is_none());
    }

    #[test]
    fn test_killing_enemy_clears_combat_target() {
        let (mut character, _) = armed();
        let mut enemy = Enemy::new(1, Vec3::X, 20.0);
        character.update_combat_target(&[CombatTarget {
            id: enemy.id,
            location: enemy.position,
        }]);

        enemy.take_damage(25.0, Some(&mut character)).unwrap();
        assert!(!enemy.is_alive());
        assert!(character.combat_target().is_none());
    }

    #[test]
    fn test_death_plays_once_and_clears_enemy_lock() {
        let (mut character, recorded) = character();
        let mut enemy = Enemy::new(1, Vec3::X, 50.0);
        enemy.acquire_target();

        enemy.attack(&mut character, 150.0).unwrap();
        assert!(!character.is_alive());
        assert!(!enemy.has_valid_target());
        assert_eq!(recorded.borrow().sections, vec![MontageSection::Death]);

        assert_eq!(character.receive_damage(10.0, None).unwrap(), 0.0);
        assert_eq!(recorded.borrow().sections.len(), 1);

        character.on_death_end();
        assert!(recorded.borrow().frozen);
    }

    #[test]
    fn test_dead_character_does_not_move_or_interact() {
        let (mut character, _) = character();
        character.receive_damage(100.0, None).unwrap();
        character.set_overlapping_weapon(WeaponStorage::standard().get("Axe"));
        assert_eq!(character.interact(), None);

        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveRight, 1.0);
        input.press(Action::Sprint);
        character.tick(1.0, &input).unwrap();
        assert_eq!(character.position(), Vec3::ZERO);
        assert_eq!(character.movement_state(), MovementState::Dead);
    }

    #[test]
    fn test_item_overlaps() {
        let (mut character, _) = character();
        let mut coin = Item::new(10, ItemKind::Coin { amount: 3 }, Vec3::ZERO);
        let mut bomb = Item::new(11, ItemKind::explosive(), Vec3::ZERO);
        let mut potion = Item::new(12, ItemKind::HealthPotion { amount: 10.0 }, Vec3::ZERO);

        coin.on_overlap(&mut character).unwrap();
        assert_eq!(character.controller().coins(), 3);

        bomb.on_overlap(&mut character).unwrap();
        assert_eq!(character.controller().health(), 85.0);

        assert_eq!(
            potion.on_overlap(&mut character).unwrap(),
            OverlapEffect::Healed(10.0)
        );
        assert_eq!(character.controller().health(), 95.0);
    }

    #[test]
    fn test_weapon_pickup_and_equip() {
        let (mut character, _) = character();
        let mut pickup = Item::new(
            20,
            ItemKind::WeaponPickup(Weapon::new("Axe", 35.0)),
            Vec3::ZERO,
        );
        pickup.on_overlap(&mut character).unwrap();

        let mut input = PlayerInput::new();
        input.press(Action::Interact);
        character.handle_input(&input, &mut rng());

        assert_eq!(character.equipped_weapon().map(|w| w.name.as_str()), Some("Axe"));
        assert!(character.overlapping_weapon().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (mut character, recorded) = armed();
        character.gain_coins(7);
        character.receive_damage(30.0, None).unwrap();

        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 1.0);
        character.tick(0.2, &input).unwrap();
        let saved_position = character.position();

        character.save("Castle").unwrap();
        let snapshot = character.store().load().unwrap();
        assert_eq!(snapshot.weapon_name.as_deref(), Some("Sword"));
        assert_eq!(snapshot.vitals.coins, 7);
        assert_eq!(snapshot.level_name, "Castle");

        character.receive_damage(500.0, None).unwrap();
        character.on_death_end();
        character.tick(0.2, &input).unwrap();

        let level = character.load(true).unwrap();
        assert_eq!(level.as_deref(), Some("Castle"));
        assert!(character.is_alive());
        assert_eq!(character.controller().health(), 70.0);
        assert_eq!(character.position(), saved_position);
        assert!(!recorded.borrow().frozen);
    }

    #[test]
    fn test_load_without_position() {
        let (mut character, _) = character();
        character.save("").unwrap();

        let mut input = PlayerInput::new();
        input.set_axis(Axis::MoveForward, 1.0);
        character.tick(0.1, &input).unwrap();
        let moved_to = character.position();

        assert_eq!(character.load(false).unwrap(), None);
        assert_eq!(character.position(), moved_to);
    }

    #[test]
    fn test_load_empty_store() {
        let (mut character, _) = character();
        assert_eq!(character.load(true), Err(SaveError::NoSave));
    }

    #[test]
    fn test_load_unknown_weapon_changes_nothing() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut snapshot = SaveSnapshot {
            vitals: CharacterStateController::standard().vitals(),
            weapon_name: Some("Spoon".to_string()),
            position: Vec3::ONE,
            rotation: Vec3::ZERO,
            level_name: String::new(),
        };
        snapshot.vitals.coins = 99;

        let mut character = Character::new(
            0,
            "Knight",
            CharacterStats::standard(),
            Box::new(KinematicMotion::new(Vec3::ZERO)),
            Box::new(RecordingAnimator(recorded)),
            Box::new(MemorySaveStore::with_snapshot(snapshot)),
            WeaponStorage::standard(),
        )
        .unwrap();

        assert_eq!(
            character.load(true),
            Err(SaveError::UnknownWeapon("Spoon".to_string()))
        );
        assert_eq!(character.controller().coins(), 0);
        assert_eq!(character.position(), Vec3::ZERO);
    }

    #[test]
    fn test_negative_delta_propagates() {
        let (mut character, _) = character();
        let input = PlayerInput::new();
        assert!(character.tick(-1.0, &input).is_err());
    }
}
