//! Randomness and the confetti particle engine.

pub mod confetti;
pub mod rng;

pub use confetti::{ConfettiPiece, ConfettiState};
pub use rng::Rng;
