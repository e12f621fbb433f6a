//! Physics for the orbital game.
//!
//! Pure functions only: orbit thresholds, multi-body gravity and capture
//! resolution. The per-tick state machine that uses them lives in
//! [`crate::orbiter`].

pub mod capture;
mod gravity;
pub mod orbit;

#[cfg(test)]
mod proptest_physics;

pub use capture::{resolve_capture, Capture, CaptureOrbit};
pub use gravity::{compute_acceleration, find_closest_body};
pub use orbit::{
    can_orbit, first_cosmic_velocity, ideal_orbit_radius_for_velocity, second_cosmic_velocity, OrbitError,
    OrbitHealth,
};
