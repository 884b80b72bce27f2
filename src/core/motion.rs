use super::config::{MotionConfig, NearField};
use super::geometry::{PointerState, Region};
use glam::Vec2;

/// Position of the entity center and its estimated velocity (px/s).
///
/// Velocity is not integrated: each tracked step derives it from the
/// displacement the flee curve asked for, and untracked steps only decay it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl EntityState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }
}

/// Flee speed for a pointer at distance `dist`.
///
/// Inverse-power falloff `max * (min_distance / dist)^c`, capped at `max_speed`.
/// Inside `min_distance` the near-field policy decides; `dist == min_distance`
/// always takes the curve.
pub fn flee_speed(dist: f32, cfg: &MotionConfig) -> f32 {
    if dist < cfg.min_distance {
        return match cfg.near_field {
            NearField::Rest => 0.0,
            NearField::Flee => cfg.max_speed,
        };
    }
    // ratio is at most 1 here, so large exponents underflow to 0 instead of overflowing
    let falloff = (cfg.min_distance / dist).powf(cfg.curve_exponent);
    (cfg.max_speed * falloff).min(cfg.max_speed)
}

/// Unit vector pointing from the pointer to the entity, with the distance used
/// by the speed curve, never below `epsilon`. Only a coincident pointer has
/// no direction of its own and flees along +x.
#[inline]
pub fn flee_direction(position: Vec2, pointer: Vec2, epsilon: f32) -> (Vec2, f32) {
    let away = position - pointer;
    let len = away.length();
    if len > 0.0 && len.is_finite() {
        (away / len, len.max(epsilon))
    } else {
        (Vec2::X, epsilon)
    }
}

/// Advance the entity by `dt` seconds.
pub fn step(
    state: &EntityState,
    pointer: PointerState,
    region: &Region,
    dt: f32,
    cfg: &MotionConfig,
) -> EntityState {
    let pointer = match pointer {
        Some(p) if region.has_area() => p,
        _ => {
            return EntityState {
                position: state.position,
                velocity: state.velocity * cfg.damping,
            }
        }
    };

    let (direction, dist) = flee_direction(state.position, pointer, cfg.epsilon);
    let speed = flee_speed(dist, cfg);

    let (proposed, velocity) = if dt > 0.0 {
        let proposed = state.position + direction * speed * dt;
        (proposed, (proposed - state.position) / dt)
    } else {
        (state.position, direction * speed)
    };

    // Velocity is the pre-clamp rate, also while the clamp pins the entity to a wall.
    EntityState {
        position: region.movable(cfg.margin()).clamp(proposed),
        velocity,
    }
}
