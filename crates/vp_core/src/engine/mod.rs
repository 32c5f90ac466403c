//! Simulation engine: deterministic RNG, probability model, match loop.

pub mod probability;
pub mod rng;
pub mod simulator;

#[cfg(test)]
mod contract_tests;

pub use rng::{validate_seed, SeededGenerator};
pub use simulator::simulate;
