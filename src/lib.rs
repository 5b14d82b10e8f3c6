//! Neon Sprawl - procedural cyberpunk city skyline
//!
//! Generates a jittered grid of glowing towers split by road bands, fills
//! the air with rising dust, flying cars and neon rings, and animates all of
//! it every frame from elapsed time plus pointer and scroll input.

pub mod camera;
pub mod game_state;
pub mod input;
pub mod procgen;
pub mod render;
pub mod simulation;
pub mod ui;
pub mod world;
