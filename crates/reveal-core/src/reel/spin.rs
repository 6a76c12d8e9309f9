// reel/spin.rs
//
// Scalar tween driving the strip's translateY offset. One continuous
// eased transform from the resting offset to the slot-aligned target.

use crate::extensions::{ease, Easing};

/// One-shot tween over the strip offset. Runs forward once and clamps at
/// the destination.
#[derive(Debug, Clone)]
pub struct SpinTween {
    from: f32,
    to: f32,
    /// Duration in seconds.
    duration: f32,
    /// Elapsed time.
    elapsed: f32,
    /// Easing function.
    easing: Easing,
}

impl SpinTween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the current offset.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }

    /// Current offset at the elapsed time.
    pub fn value(&self) -> f32 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        ease(self.from, self.to, t, self.easing)
    }

    /// Whether the tween has reached its destination.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}
