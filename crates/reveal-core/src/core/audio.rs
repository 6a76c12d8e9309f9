// core/audio.rs
//
// Background-audio fade timeline. Playback itself lives in the bridge;
// this drives only the schedule: wait out the delay from the trigger,
// then step the volume down on a fixed interval until the floor is
// reached and playback stops.

use crate::api::config::WidgetConfig;
use crate::api::events::WidgetEvent;
use crate::core::timer::{Delay, IntervalTicker};

#[derive(Debug)]
enum FadeState {
    /// Not armed; nothing is playing.
    Idle,
    /// Playing at full volume, waiting for the fade to start.
    Waiting { delay: Delay, volume: f32 },
    /// Stepping the volume down.
    Fading { ticker: IntervalTicker, volume: f32 },
    /// Playback has been stopped.
    Stopped,
}

/// Phase-independent fade-out schedule, armed once when the trigger is
/// accepted and ticked alongside the sequencer until it stops playback.
#[derive(Debug)]
pub struct AudioFade {
    state: FadeState,
    interval: f32,
    step: f32,
    floor: f32,
}

impl AudioFade {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            state: FadeState::Idle,
            interval: config.audio_fade_interval,
            step: config.audio_fade_step,
            floor: config.audio_fade_floor,
        }
    }

    /// Arm the timeline at the moment playback starts.
    pub fn arm(&mut self, delay: f32, volume: f32) {
        self.state = FadeState::Waiting {
            delay: Delay::new(delay),
            volume,
        };
    }

    /// Whether playback is still live (waiting or fading).
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            FadeState::Waiting { .. } | FadeState::Fading { .. }
        )
    }

    /// Force-stop the timeline. Returns true when playback was live and
    /// the caller owes an `AudioStopped` side effect.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = FadeState::Stopped;
        was_active
    }

    /// Advance the timeline, pushing volume changes and the final stop.
    pub fn tick(&mut self, dt: f32, events: &mut Vec<WidgetEvent>) {
        match &mut self.state {
            FadeState::Idle | FadeState::Stopped => {}
            FadeState::Waiting { delay, volume } => {
                if delay.tick(dt) {
                    self.state = FadeState::Fading {
                        ticker: IntervalTicker::new(self.interval),
                        volume: *volume,
                    };
                }
            }
            FadeState::Fading { ticker, volume } => {
                let fires = ticker.tick(dt);
                for _ in 0..fires {
                    // Small tolerance so accumulated rounding can't sneak in
                    // an extra step below the floor.
                    if *volume > self.floor + 1e-4 {
                        *volume = (*volume - self.step).max(0.0);
                        events.push(WidgetEvent::AudioVolume { volume: *volume });
                    } else {
                        events.push(WidgetEvent::AudioStopped);
                        self.state = FadeState::Stopped;
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fade: &mut AudioFade, secs: f32) -> Vec<WidgetEvent> {
        let mut events = Vec::new();
        let steps = (secs * 60.0) as usize;
        for _ in 0..steps {
            fade.tick(1.0 / 60.0, &mut events);
        }
        events
    }

    #[test]
    fn silent_until_delay_elapses() {
        let mut fade = AudioFade::new(&WidgetConfig::default());
        fade.arm(10.0, 0.4);
        let events = run(&mut fade, 9.9);
        assert!(events.is_empty());
        assert!(fade.is_active());
    }

    #[test]
    fn fades_to_floor_then_stops() {
        let mut fade = AudioFade::new(&WidgetConfig::default());
        fade.arm(10.0, 0.4);
        let events = run(&mut fade, 12.0);

        let volumes: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                WidgetEvent::AudioVolume { volume } => Some(*volume),
                _ => None,
            })
            .collect();
        // 0.4 steps down by 0.05 until the 0.05 floor
        assert_eq!(volumes.len(), 7);
        assert!((volumes[0] - 0.35).abs() < 1e-6);
        assert!((volumes[6] - 0.05).abs() < 1e-6);
        assert!(volumes.windows(2).all(|w| w[1] < w[0]));

        let stops = events
            .iter()
            .filter(|e| **e == WidgetEvent::AudioStopped)
            .count();
        assert_eq!(stops, 1);
        assert!(!fade.is_active());
    }

    #[test]
    fn unarmed_timeline_stays_silent() {
        let mut fade = AudioFade::new(&WidgetConfig::default());
        let events = run(&mut fade, 15.0);
        assert!(events.is_empty());
    }

    #[test]
    fn cancel_reports_live_playback() {
        let mut fade = AudioFade::new(&WidgetConfig::default());
        fade.arm(10.0, 0.4);
        assert!(fade.cancel());
        assert!(!fade.cancel());
        let events = run(&mut fade, 15.0);
        assert!(events.is_empty());
    }
}
