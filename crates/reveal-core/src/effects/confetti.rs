//! Confetti particle engine for the celebration burst.

use glam::Vec2;

use crate::effects::rng::Rng;

/// Frame rate the original per-frame rates were tuned against; sampled
/// speeds are scaled by it so the simulation is dt-driven.
const REF_FPS: f32 = 60.0;
/// Horizontal drift amplitude, pixels per second.
const DRIFT_RATE: f32 = 2.0 * REF_FPS;
/// Pieces wrap once they fall this far past the bottom edge.
const WRAP_MARGIN: f32 = 20.0;
/// Vertical position a wrapped piece reappears at.
const WRAP_RESET_Y: f32 = -10.0;

/// A single confetti piece. Transient: recreated on every burst.
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub pos: Vec2,
    /// Major radius of the drawn ellipse, in pixels.
    pub radius: f32,
    /// Hue of the `hsl(h, 80%, 60%)` fill color.
    pub hue: u16,
    /// Ellipse rotation, also the phase of the horizontal drift.
    pub tilt: f32,
    /// Tilt advance in radians per second.
    pub tilt_rate: f32,
    /// Fall speed in pixels per second.
    pub fall_speed: f32,
}

/// Particle engine: idle → bursting → idle. A burst spawns a fixed count
/// of pieces sized to the viewport; ticking advances them until `stop`.
pub struct ConfettiState {
    pieces: Vec<ConfettiPiece>,
    bounds: Vec2,
    active: bool,
    rng: Rng,
}

impl ConfettiState {
    /// Create an idle engine with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            pieces: Vec::new(),
            bounds: Vec2::ZERO,
            active: false,
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Size the simulation to the viewport and spawn a fresh burst,
    /// replacing any previous pieces.
    pub fn burst(&mut self, count: usize, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        self.pieces.clear();
        for _ in 0..count {
            let pos = Vec2::new(self.rng.range(0.0, width), -self.rng.range(0.0, height));
            self.pieces.push(ConfettiPiece {
                pos,
                radius: self.rng.range(4.0, 10.0),
                hue: self.rng.next_int(360) as u16,
                tilt: self.rng.range(-10.0, 0.0),
                tilt_rate: self.rng.range(0.05, 0.12) * REF_FPS,
                fall_speed: self.rng.range(2.0, 5.0) * REF_FPS,
            });
        }
        self.active = true;
    }

    /// Advance the simulation by `dt` seconds. Pieces fall, drift on a sine
    /// of their tilt, and wrap back above the top once past the bottom.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        for p in &mut self.pieces {
            p.pos.y += p.fall_speed * dt;
            p.pos.x += p.tilt.sin() * DRIFT_RATE * dt;
            p.tilt += p.tilt_rate * dt;
            if p.pos.y > self.bounds.y + WRAP_MARGIN {
                p.pos.y = WRAP_RESET_Y;
            }
        }
    }

    /// Freeze the simulation, keeping pieces for a final draw.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Drop all pieces and return to idle.
    pub fn clear(&mut self) {
        self.pieces.clear();
        self.active = false;
    }

    /// Re-apply viewport bounds. Valid in any state.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_exact_count() {
        let mut confetti = ConfettiState::new(42);
        confetti.burst(120, 800.0, 600.0);
        assert_eq!(confetti.pieces().len(), 120);
        assert!(confetti.is_active());
    }

    #[test]
    fn pieces_spawn_above_viewport() {
        let mut confetti = ConfettiState::new(42);
        confetti.burst(120, 800.0, 600.0);
        for p in confetti.pieces() {
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!(p.pos.y <= 0.0 && p.pos.y > -600.0);
        }
    }

    #[test]
    fn fallen_pieces_wrap_above_top() {
        let mut confetti = ConfettiState::new(7);
        confetti.burst(120, 800.0, 600.0);
        // Run well past several full falls; no piece may grow unbounded.
        for _ in 0..(60 * 30) {
            confetti.tick(1.0 / 60.0);
            for p in confetti.pieces() {
                assert!(
                    p.pos.y <= 600.0 + WRAP_MARGIN,
                    "piece escaped: y={}",
                    p.pos.y
                );
            }
        }
    }

    #[test]
    fn stop_freezes_pieces_in_place() {
        let mut confetti = ConfettiState::new(7);
        confetti.burst(10, 800.0, 600.0);
        confetti.stop();
        let before: Vec<f32> = confetti.pieces().iter().map(|p| p.pos.y).collect();
        confetti.tick(1.0);
        let after: Vec<f32> = confetti.pieces().iter().map(|p| p.pos.y).collect();
        assert_eq!(before, after);
        assert_eq!(confetti.pieces().len(), 10);
    }

    #[test]
    fn clear_empties_engine() {
        let mut confetti = ConfettiState::new(7);
        confetti.burst(10, 800.0, 600.0);
        confetti.clear();
        assert!(confetti.pieces().is_empty());
        assert!(!confetti.is_active());
    }

    #[test]
    fn resize_applies_in_any_state() {
        let mut confetti = ConfettiState::new(7);
        confetti.resize(100.0, 100.0);
        confetti.burst(5, 800.0, 600.0);
        confetti.resize(400.0, 50.0);
        // Pieces now wrap against the new, shorter bottom edge.
        for _ in 0..(60 * 10) {
            confetti.tick(1.0 / 60.0);
        }
        for p in confetti.pieces() {
            assert!(p.pos.y <= 50.0 + WRAP_MARGIN);
        }
    }
}
