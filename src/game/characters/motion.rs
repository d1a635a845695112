// Motion integration seam
//
// Collision sweeping and sliding belong to the host's integrator. The
// character only publishes a max speed and a desired direction each step.

use glam::Vec3;

/// Host-side motion integrator
pub trait MotionDelegate {
    /// Cap the speed used for the next integration
    fn set_max_speed(&mut self, speed: f32);

    /// Queue movement input for this step, length is clamped to 1
    fn add_input(&mut self, direction: Vec3);

    /// Consume queued input and move
    fn step(&mut self, dt: f32);

    fn position(&self) -> Vec3;

    /// Place the character without moving through the world
    fn teleport(&mut self, position: Vec3);
}

/// Straight-line integrator with no collision, for headless runs
#[derive(Debug, Default)]
pub struct KinematicMotion {
    position: Vec3,
    pending_input: Vec3,
    max_speed: f32,
    velocity: Vec3,
}

impl KinematicMotion {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Velocity applied during the last step
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
}

impl MotionDelegate for KinematicMotion {
    fn set_max_speed(&mut self, speed: f32) {
        self.max_speed = speed;
    }

    fn add_input(&mut self, direction: Vec3) {
        self.pending_input += direction;
    }

    fn step(&mut self, dt: f32) {
        let input = std::mem::take(&mut self.pending_input).clamp_length_max(1.0);
        self.velocity = input * self.max_speed;
        self.position += self.velocity * dt;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.pending_input = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
    }
}
