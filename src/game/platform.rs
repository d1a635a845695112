// Floating platforms that shuttle between two points

use super::entity::EntityId;
use crate::core::math::interp_to;
use glam::Vec3;
use log::debug;
use std::time::Duration;

/// Fraction of the remaining gap covered per second
pub const PLATFORM_INTERP_SPEED: f32 = 4.0;

/// Rest at each end before heading back
pub const PLATFORM_PAUSE: Duration = Duration::from_secs(1);

/// Distance from the far end that counts as arrived
const ARRIVAL_TOLERANCE: f32 = 1.0;

/// A platform easing back and forth between its spawn point and an offset
#[derive(Debug, Clone)]
pub struct FloatingPlatform {
    pub id: EntityId,
    position: Vec3,
    start: Vec3,
    end: Vec3,
    distance: f32,
    interp_speed: f32,
    pause: Duration,
    interpolating: bool,
    /// Clock time at which the platform sets off again
    resume_at: Option<Duration>,
}

impl FloatingPlatform {
    /// Spawn at `position`; the far end sits at `position + offset`
    ///
    /// The platform waits one pause from `now` before its first trip.
    pub fn new(id: EntityId, position: Vec3, offset: Vec3, now: Duration) -> Self {
        Self::with_timing(id, position, offset, now, PLATFORM_INTERP_SPEED, PLATFORM_PAUSE)
    }

    pub fn with_timing(
        id: EntityId,
        position: Vec3,
        offset: Vec3,
        now: Duration,
        interp_speed: f32,
        pause: Duration,
    ) -> Self {
        let end = position + offset;
        Self {
            id,
            position,
            start: position,
            end,
            distance: position.distance(end),
            interp_speed,
            pause,
            interpolating: false,
            resume_at: Some(now + pause),
        }
    }

    /// Advance one step
    ///
    /// Returns true on the step the platform reaches an end. It then rests
    /// for the pause and heads back the other way.
    pub fn tick(&mut self, dt: f32, now: Duration) -> bool {
        if let Some(at) = self.resume_at {
            if now < at {
                return false;
            }
            self.resume_at = None;
            self.interpolating = true;
        }
        if !self.interpolating {
            return false;
        }

        self.position = interp_to(self.position, self.end, dt, self.interp_speed);

        let travelled = self.position.distance(self.start);
        if self.distance - travelled > ARRIVAL_TOLERANCE {
            return false;
        }

        self.interpolating = false;
        self.resume_at = Some(now + self.pause);
        std::mem::swap(&mut self.start, &mut self.end);
        debug!("Platform {} arrived at {:?}", self.id, self.position);
        true
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the current (or next) trip heads for
    pub fn destination(&self) -> Vec3 {
        self.end
    }

    pub fn is_moving(&self) -> bool {
        self.interpolating
    }
}
