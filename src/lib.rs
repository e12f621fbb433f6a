//! Orbital Journey - a small orbital mechanics game
//!
//! A library crate providing the orbit simulation, level generation and the
//! Bevy plugins that present them, for testing and integration purposes.

pub mod camera;
pub mod input;
pub mod level;
pub mod orbiter;
pub mod physics;
pub mod policy;
pub mod render;
pub mod session;
pub mod simulation;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
