pub mod api;
pub mod core;
pub mod effects;
pub mod extensions;
pub mod reel;

// Re-export key types at crate root for convenience
pub use crate::api::config::WidgetConfig;
pub use crate::api::data::RevealData;
pub use crate::api::events::{SpinError, WidgetEvent};
pub use crate::core::audio::AudioFade;
pub use crate::core::sequencer::{Phase, RevealSequencer};
pub use crate::core::timer::{Delay, IntervalTicker};
pub use crate::effects::confetti::{ConfettiPiece, ConfettiState};
pub use crate::effects::rng::Rng;
pub use crate::extensions::{ease, lerp, Easing};
pub use crate::reel::spin::SpinTween;
pub use crate::reel::strip::ReelStrip;
