//! Discrete hex momentum model used by dashes, throws and pushes.
mod kinetic;

pub use kinetic::{KineticPulse, process_kinetic_pulse};
