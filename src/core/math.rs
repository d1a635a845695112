// Math utilities and helper functions

use glam::Vec3;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Wrap an angle in degrees into the (-180, 180] range
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Move `current` toward `target` by a fraction `dt * speed` of the gap
///
/// The step fraction is clamped to 1 so a long frame lands on the target
/// instead of overshooting. A non-positive speed jumps straight to the target.
pub fn interp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }
    let gap = target - current;
    if gap.length_squared() < 1e-8 {
        return target;
    }
    current + gap * clamp(dt * speed, 0.0, 1.0)
}
