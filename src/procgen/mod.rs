//! Procedural generation of the city.
//!
//! - Range-bounded random draws and the neon palette
//! - Lattice scan with road carving for tower placement
//! - Particle, flying car and neon ring pools

pub mod layout;
pub mod population;
pub mod sampler;
