//! Multi-body gravitational acceleration for free flight.
//!
//! Sums the pull of every body in level order so the result is bit-identical
//! for identical inputs.

use bevy::math::DVec2;

use crate::types::GravityBody;

/// Compute gravitational acceleration at `pos` from all bodies.
///
/// Each body contributes `GM / d²` along the unit vector toward its centre.
/// Bodies whose surface the point is at or inside contribute nothing: that
/// distance is a collision signal for the caller, not a force to integrate,
/// and it keeps the sum away from the singularity at `d = 0`.
///
/// # Returns
/// Unscaled acceleration; the integrator applies its own step factor.
#[inline]
pub fn compute_acceleration(pos: DVec2, bodies: &[GravityBody]) -> DVec2 {
    let mut acc = DVec2::ZERO;

    for body in bodies {
        let delta = body.pos - pos;
        let distance = delta.length();

        if distance > body.radius {
            // a = GM/d² toward the body; delta/d is the unit vector
            acc += (delta / distance) * (body.gm() / (distance * distance));
        }
    }

    acc
}

/// Index and distance of the body nearest to `pos`, measured centre to point.
///
/// Ties go to the earlier body.
pub fn find_closest_body(pos: DVec2, bodies: &[GravityBody]) -> Option<(usize, f64)> {
    let mut closest: Option<(usize, f64)> = None;

    for (index, body) in bodies.iter().enumerate() {
        let distance = body.distance_to(pos);
        match closest {
            Some((_, best)) if best <= distance => {}
            _ => closest = Some((index, distance)),
        }
    }

    closest
}
