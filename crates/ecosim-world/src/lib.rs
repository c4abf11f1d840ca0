//! Predator-prey world engine.
//!
//! This crate implements the bounded 2D grid where producers, herbivores, and
//! carnivores compete for space, food, and breeding opportunities, and the
//! turn engine that resolves one discrete simulation step at a time.

pub mod grid;
pub mod organism;
pub mod world;

pub use grid::Grid;
pub use organism::Organism;
pub use world::{Statistics, World};
