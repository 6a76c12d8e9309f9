// extensions/mod.rs
//
// Pure-math helpers decoupled from the sequencer.

pub mod easing;

pub use easing::{ease, lerp, Easing};
