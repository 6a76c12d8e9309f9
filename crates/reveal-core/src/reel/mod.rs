pub mod spin;
pub mod strip;

pub use spin::SpinTween;
pub use strip::ReelStrip;
