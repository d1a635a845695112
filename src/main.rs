use anyhow::Result;
use glam::Vec3;
use log::info;
use std::time::Duration;

use knights_escape::engine::clock::{Clock, ManualClock};
use knights_escape::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use knights_escape::engine::input::{Action, Axis, PlayerInput};
use knights_escape::game::characters::{
    Character, CharacterStats, CombatTarget, KinematicMotion, LoggingAnimator,
};
use knights_escape::game::enemy::Enemy;
use knights_escape::game::entity::Damageable;
use knights_escape::game::items::{Item, ItemKind, WeaponStorage};
use knights_escape::game::platform::FloatingPlatform;
use knights_escape::game::save::MemorySaveStore;

/// Length of the scripted session
const SESSION_SECONDS: f32 = 24.0;

/// Wall time between host frames
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Simulation step index for a point in the script
fn step_at(seconds: f32) -> u64 {
    (seconds / FIXED_TIMESTEP).round() as u64
}

/// Drive the held buttons for the scripted run
fn script_input(step: u64, input: &mut PlayerInput) {
    match step {
        s if s == step_at(0.1) => input.press(Action::Interact),
        s if s == step_at(0.2) => {
            input.release(Action::Interact);
            input.set_axis(Axis::MoveForward, 1.0);
            input.press(Action::Sprint);
        }
        s if s == step_at(16.0) => input.release(Action::Sprint),
        s if s == step_at(18.0) => input.set_axis(Axis::MoveForward, 0.0),
        s if s == step_at(19.0) => input.press(Action::AttackPrimary),
        s if s == step_at(19.5) => input.release(Action::AttackPrimary),
        _ => {}
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Knights Escape (headless session)...");

    let mut knight = Character::new(
        0,
        "Knight",
        CharacterStats::standard(),
        Box::new(KinematicMotion::new(Vec3::ZERO)),
        Box::new(LoggingAnimator::new()),
        Box::new(MemorySaveStore::new()),
        WeaponStorage::standard(),
    )?;

    let storage = WeaponStorage::standard();
    let mut sword = Item::new(
        10,
        ItemKind::WeaponPickup(
            storage
                .get("Sword")
                .ok_or_else(|| anyhow::anyhow!("Sword missing from weapon storage"))?,
        ),
        Vec3::ZERO,
    );
    let mut coins = Item::new(11, ItemKind::Coin { amount: 25 }, Vec3::ZERO);
    let mut potion = Item::new(12, ItemKind::HealthPotion { amount: 40.0 }, Vec3::ZERO);
    let mut bomb = Item::new(13, ItemKind::explosive(), Vec3::ZERO);
    let mut enemy = Enemy::new(1, Vec3::new(9000.0, 300.0, 0.0), 60.0);

    sword.on_overlap(&mut knight)?;

    let clock = ManualClock::new();
    let mut game_loop = GameLoop::with_clock(&clock);
    let mut input = PlayerInput::new();
    let mut lift = FloatingPlatform::new(
        20,
        Vec3::new(400.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 300.0),
        clock.now(),
    );
    let mut lift_trips = 0;
    let mut rng = rand::thread_rng();
    let mut step: u64 = 0;
    let last_step = step_at(SESSION_SECONDS);

    while step < last_step {
        clock.advance(FRAME_TIME);

        for _ in 0..game_loop.begin_frame() {
            script_input(step, &mut input);

            if input.just_pressed(Action::Interact) && knight.overlapping_weapon().is_some() {
                sword.consume();
            }
            knight.handle_input(&input, &mut rng);
            knight.tick(FIXED_TIMESTEP, &input)?;
            if lift.tick(FIXED_TIMESTEP, clock.now()) {
                lift_trips += 1;
            }

            match step {
                s if s == step_at(17.0) => {
                    coins.on_overlap(&mut knight)?;
                    bomb.on_overlap(&mut knight)?;
                    potion.on_overlap(&mut knight)?;
                }
                s if s == step_at(18.5) => {
                    let target = CombatTarget {
                        id: enemy.id,
                        location: enemy.position,
                    };
                    knight.update_combat_target(&[target]);
                    enemy.acquire_target();
                }
                s if s == step_at(19.4) => {
                    // Swing lands, then the montage notifies its end
                    let damage = knight.equipped_weapon().map(|weapon| weapon.damage);
                    if let Some(damage) = damage {
                        enemy.take_damage(damage, Some(&mut knight))?;
                    }
                    knight.on_attack_end(&input, &mut rng);
                }
                s if s == step_at(20.0) => knight.save("Dungeon")?,
                s if s == step_at(21.0) => {
                    enemy.attack(&mut knight, 150.0)?;
                }
                s if s == step_at(21.5) => knight.on_death_end(),
                s if s == step_at(22.0) => {
                    if let Some(level) = knight.load(true)? {
                        info!("Host would switch to level '{}'", level);
                    }
                }
                _ => {}
            }

            input.update();
            step += 1;
        }
    }

    let controller = knight.controller();
    info!(
        "Session over after {} steps: health {:.1}/{:.1}, stamina {:.1}/{:.1} ({}), coins {}, at {:?}",
        game_loop.update_count(),
        controller.health(),
        controller.max_health(),
        controller.stamina(),
        controller.max_stamina(),
        controller.stamina_state().display_name(),
        controller.coins(),
        knight.position()
    );
    info!("Lift {} made {} trips", lift.id, lift_trips);

    Ok(())
}
