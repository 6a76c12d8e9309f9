// core/sequencer.rs
//
// Orchestrates the full reveal: countdown → spin → result → confetti →
// audio fade-out. Owns every piece of mutable widget state; the bridge
// layer ticks it each frame, reads its continuous state, and applies the
// events it emits.

use crate::api::config::WidgetConfig;
use crate::api::data::RevealData;
use crate::api::events::{SpinError, WidgetEvent};
use crate::core::audio::AudioFade;
use crate::core::timer::{Delay, IntervalTicker};
use crate::effects::confetti::ConfettiState;
use crate::effects::rng::Rng;
use crate::reel::spin::SpinTween;
use crate::reel::strip::ReelStrip;

/// Where the reveal sequence currently is. Transitions happen only inside
/// `spin()` and `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the trigger.
    Idle,
    /// Counting down the warning overlay.
    Countdown,
    /// The strip transform is running.
    Spinning,
    /// Short hold between the transform and the reveal.
    Settling,
    /// Result shown, confetti falling.
    Celebrating,
    /// Sequence finished; only the audio fade may still be draining.
    Done,
}

/// The reveal sequencer. Single-use: one accepted trigger per instance.
pub struct RevealSequencer {
    config: WidgetConfig,
    phase: Phase,
    loaded: bool,
    data: RevealData,
    /// Resolved at the accepted trigger; displayed at the center slot.
    final_name: Option<String>,
    strip: ReelStrip,
    strip_offset: f32,
    tween: Option<SpinTween>,
    countdown_value: u32,
    countdown_ticker: IntervalTicker,
    countdown_fade: Option<Delay>,
    settle: Option<Delay>,
    confetti: ConfettiState,
    confetti_timer: Option<Delay>,
    audio: AudioFade,
    rng: Rng,
    viewport: (f32, f32),
    events: Vec<WidgetEvent>,
}

impl RevealSequencer {
    pub fn new(config: WidgetConfig, seed: u64) -> Self {
        let strip = ReelStrip::new(config.reel_slots, config.slot_height, &config.placeholder);
        let strip_offset = config.initial_offset;
        let countdown_ticker = IntervalTicker::new(config.countdown_interval);
        let audio = AudioFade::new(&config);
        Self {
            phase: Phase::Idle,
            loaded: false,
            data: RevealData::default(),
            final_name: None,
            strip,
            strip_offset,
            tween: None,
            countdown_value: 0,
            countdown_ticker,
            countdown_fade: None,
            settle: None,
            confetti: ConfettiState::new(seed),
            confetti_timer: None,
            audio,
            rng: Rng::new(seed),
            viewport: (0.0, 0.0),
            events: Vec::new(),
            config,
        }
    }

    /// Apply the external data bundle. Accepted once; later calls are
    /// ignored with a warning.
    pub fn load(&mut self, data: RevealData) {
        if self.loaded {
            log::warn!("data bundle already applied, ignoring");
            return;
        }
        log::info!(
            "data applied: {} names, assignment present: {}",
            data.names.len(),
            data.assigned.is_some()
        );
        self.data = data;
        self.loaded = true;
        self.strip.refill(&self.data.names, &mut self.rng);
        self.events.push(WidgetEvent::ReelRefilled);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn strip(&self) -> &ReelStrip {
        &self.strip
    }

    /// Current strip translateY offset in CSS pixels.
    pub fn strip_offset(&self) -> f32 {
        self.strip_offset
    }

    pub fn confetti(&self) -> &ConfettiState {
        &self.confetti
    }

    /// Track the viewport; confetti bursts and wraps against these bounds.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.confetti.resize(width, height);
    }

    /// The single triggerable action. Consumed by the first accepted call;
    /// rejections leave all state unchanged.
    pub fn spin(&mut self) -> Result<(), SpinError> {
        if !self.loaded {
            return Err(SpinError::NotLoaded);
        }
        if self.phase != Phase::Idle {
            return Err(SpinError::AlreadyTriggered);
        }
        let name = match &self.data.assigned {
            Some(name) => name.clone(),
            None => {
                pick_fallback("", &self.data.names, &mut self.rng).ok_or(SpinError::NoName)?
            }
        };
        log::info!("spin accepted");
        self.final_name = Some(name);
        self.phase = Phase::Countdown;
        self.countdown_value = self.config.countdown_from;
        self.countdown_ticker.reset();
        self.audio
            .arm(self.config.audio_fade_delay, self.config.audio_volume);
        self.events.push(WidgetEvent::AudioStarted {
            src: self.config.audio_src.clone(),
            offset: self.config.audio_offset,
            volume: self.config.audio_volume,
        });
        self.events.push(WidgetEvent::CountdownShown {
            value: self.countdown_value,
        });
        Ok(())
    }

    /// Advance the sequence by `dt` seconds and return the events produced
    /// this frame, in order.
    pub fn tick(&mut self, dt: f32) -> Vec<WidgetEvent> {
        match self.phase {
            Phase::Idle | Phase::Done => {}
            Phase::Countdown => self.tick_countdown(dt),
            Phase::Spinning => self.tick_spin(dt),
            Phase::Settling => self.tick_settle(dt),
            Phase::Celebrating => self.tick_celebrate(dt),
        }
        // The confetti simulation and the audio fade run on their own
        // clocks, independent of the phase above.
        self.confetti.tick(dt);
        self.audio.tick(dt, &mut self.events);
        std::mem::take(&mut self.events)
    }

    /// Cancel whatever is running and release transient state. Events for
    /// still-live resources are returned for the bridge to apply.
    pub fn teardown(&mut self) -> Vec<WidgetEvent> {
        if self.confetti.is_active() {
            self.events.push(WidgetEvent::ConfettiStopped);
        }
        self.confetti.clear();
        if self.audio.cancel() {
            self.events.push(WidgetEvent::AudioStopped);
        }
        self.tween = None;
        self.countdown_fade = None;
        self.settle = None;
        self.confetti_timer = None;
        self.phase = Phase::Done;
        log::info!("sequencer torn down");
        std::mem::take(&mut self.events)
    }

    fn tick_countdown(&mut self, dt: f32) {
        if let Some(fade) = &mut self.countdown_fade {
            if fade.tick(dt) {
                self.countdown_fade = None;
                self.events.push(WidgetEvent::CountdownDismissed);
                self.events.push(WidgetEvent::ReelOverlayDismissed);
                self.begin_spin();
            }
            return;
        }
        let fires = self.countdown_ticker.tick(dt);
        for _ in 0..fires {
            if self.countdown_value > 1 {
                self.countdown_value -= 1;
                self.events.push(WidgetEvent::CountdownTick {
                    value: self.countdown_value,
                });
            } else {
                self.countdown_value = 0;
                self.events.push(WidgetEvent::CountdownFading);
                self.countdown_fade = Some(Delay::new(self.config.countdown_fade));
                break;
            }
        }
    }

    fn begin_spin(&mut self) {
        self.strip.refill(&self.data.names, &mut self.rng);
        if let Some(name) = &self.final_name {
            self.strip.place_final(name);
        }
        self.events.push(WidgetEvent::ReelRefilled);
        self.strip_offset = self.config.initial_offset;
        self.tween = Some(SpinTween::new(
            self.config.initial_offset,
            self.strip.target_offset(),
            self.config.spin_duration,
            self.config.spin_easing,
        ));
        self.events.push(WidgetEvent::SpinStarted);
        self.phase = Phase::Spinning;
    }

    fn tick_spin(&mut self, dt: f32) {
        if let Some(tween) = &mut self.tween {
            self.strip_offset = tween.tick(dt);
            if tween.is_complete() {
                self.tween = None;
                self.settle = Some(Delay::new(self.config.spin_settle));
                self.phase = Phase::Settling;
            }
        }
    }

    fn tick_settle(&mut self, dt: f32) {
        let done = match &mut self.settle {
            Some(settle) => settle.tick(dt),
            None => false,
        };
        if !done {
            return;
        }
        self.settle = None;
        if let Some(name) = &self.final_name {
            self.events.push(WidgetEvent::ResultRevealed { name: name.clone() });
        }
        self.confetti
            .burst(self.config.confetti_count, self.viewport.0, self.viewport.1);
        self.events.push(WidgetEvent::ConfettiBurst);
        self.confetti_timer = Some(Delay::new(self.config.confetti_duration));
        self.phase = Phase::Celebrating;
    }

    fn tick_celebrate(&mut self, dt: f32) {
        let done = match &mut self.confetti_timer {
            Some(timer) => timer.tick(dt),
            None => false,
        };
        if done {
            self.confetti_timer = None;
            self.confetti.stop();
            self.events.push(WidgetEvent::ConfettiStopped);
            self.phase = Phase::Done;
        }
    }
}

/// Uniform fallback pick from the pool, excluding `player`. The exclusion
/// name is an empty placeholder in practice, making it a no-op.
fn pick_fallback(player: &str, pool: &[String], rng: &mut Rng) -> Option<String> {
    let candidates: Vec<&String> = pool.iter().filter(|n| n.as_str() != player).collect();
    rng.pick(&candidates).map(|n| (*n).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn data(names: &[&str], assigned: Option<&str>) -> RevealData {
        RevealData {
            names: names.iter().map(|n| n.to_string()).collect(),
            assigned: assigned.map(|n| n.to_string()),
        }
    }

    fn loaded_sequencer(bundle: RevealData) -> RevealSequencer {
        let mut seq = RevealSequencer::new(WidgetConfig::default(), 42);
        seq.set_viewport(800.0, 600.0);
        seq.load(bundle);
        seq
    }

    /// Tick for `secs` of simulated time, collecting (timestamp, event).
    fn run(seq: &mut RevealSequencer, secs: f32) -> Vec<(f32, WidgetEvent)> {
        let mut collected = Vec::new();
        let steps = (secs / DT).ceil() as usize;
        for step in 0..steps {
            let now = (step + 1) as f32 * DT;
            for event in seq.tick(DT) {
                collected.push((now, event));
            }
        }
        collected
    }

    fn events_only(timeline: &[(f32, WidgetEvent)]) -> Vec<&WidgetEvent> {
        timeline.iter().map(|(_, e)| e).collect()
    }

    #[test]
    fn full_run_reveals_the_assignment() {
        let mut seq = loaded_sequencer(data(&["Ana", "Luis", "Marta"], Some("Marta")));
        seq.spin().unwrap();
        let timeline = run(&mut seq, 16.0);

        let revealed = events_only(&timeline)
            .into_iter()
            .find_map(|e| match e {
                WidgetEvent::ResultRevealed { name } => Some(name.clone()),
                _ => None,
            })
            .expect("no reveal event");
        assert_eq!(revealed, "Marta");

        // The assignment sits in the center slot and the strip is parked
        // exactly on it.
        let center = seq.strip().center_index();
        assert_eq!(seq.strip().labels()[center], "Marta");
        assert!((seq.strip_offset() - seq.strip().target_offset()).abs() < 0.01);
        assert_eq!(seq.phase(), Phase::Done);
    }

    #[test]
    fn countdown_runs_exactly_five_steps() {
        let mut seq = loaded_sequencer(data(&["Ana", "Luis"], Some("Ana")));
        seq.spin().unwrap();
        let timeline = run(&mut seq, 7.0);

        let shown: Vec<u32> = events_only(&timeline)
            .into_iter()
            .filter_map(|e| match e {
                WidgetEvent::CountdownTick { value } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(shown, vec![4, 3, 2, 1]);

        // Overlay dismissal lands at the final tick plus the fade.
        let dismissed_at = timeline
            .iter()
            .find(|(_, e)| *e == WidgetEvent::CountdownDismissed)
            .map(|(t, _)| *t)
            .expect("countdown never dismissed");
        assert!(
            (5.25..5.45).contains(&dismissed_at),
            "dismissed at {}",
            dismissed_at
        );
    }

    #[test]
    fn second_trigger_is_rejected() {
        let mut seq = loaded_sequencer(data(&["Ana", "Luis"], Some("Ana")));
        seq.spin().unwrap();
        assert_eq!(seq.spin(), Err(SpinError::AlreadyTriggered));

        let timeline = run(&mut seq, 12.0);
        assert_eq!(seq.spin(), Err(SpinError::AlreadyTriggered));

        // No double audio, no double countdown.
        let starts = events_only(&timeline)
            .into_iter()
            .filter(|e| matches!(e, WidgetEvent::AudioStarted { .. }))
            .count();
        assert_eq!(starts, 1);
        let shows = events_only(&timeline)
            .into_iter()
            .filter(|e| matches!(e, WidgetEvent::CountdownShown { .. }))
            .count();
        assert_eq!(shows, 1);
    }

    #[test]
    fn trigger_before_load_is_rejected() {
        let mut seq = RevealSequencer::new(WidgetConfig::default(), 42);
        assert_eq!(seq.spin(), Err(SpinError::NotLoaded));
        assert_eq!(seq.phase(), Phase::Idle);
        assert!(seq.tick(1.0).is_empty());
    }

    #[test]
    fn no_resolvable_name_leaves_trigger_usable() {
        let mut seq = loaded_sequencer(data(&[], None));
        seq.tick(DT); // drain the load-time refill event
        assert_eq!(seq.spin(), Err(SpinError::NoName));
        assert_eq!(seq.phase(), Phase::Idle);
        // The control is still enabled; a retry fails the same way rather
        // than being consumed.
        assert_eq!(seq.spin(), Err(SpinError::NoName));
        assert!(seq.tick(1.0).is_empty());
    }

    #[test]
    fn fallback_pick_comes_from_the_pool() {
        let mut seq = loaded_sequencer(data(&["Ana", "Luis"], None));
        seq.spin().unwrap();
        let timeline = run(&mut seq, 12.0);
        let revealed = events_only(&timeline)
            .into_iter()
            .find_map(|e| match e {
                WidgetEvent::ResultRevealed { name } => Some(name.clone()),
                _ => None,
            })
            .expect("no reveal event");
        assert!(revealed == "Ana" || revealed == "Luis");
    }

    #[test]
    fn confetti_bursts_at_reveal_and_stops_after_duration() {
        let mut seq = loaded_sequencer(data(&["Ana"], Some("Ana")));
        seq.spin().unwrap();

        // Through countdown (≈5.3 s) and spin (5 s + settle).
        let timeline = run(&mut seq, 10.4);
        assert!(events_only(&timeline)
            .into_iter()
            .any(|e| *e == WidgetEvent::ConfettiBurst));
        assert_eq!(seq.confetti().pieces().len(), 120);
        assert!(seq.confetti().is_active());

        // Confetti auto-stops five seconds after the burst.
        let timeline = run(&mut seq, 5.2);
        assert!(events_only(&timeline)
            .into_iter()
            .any(|e| *e == WidgetEvent::ConfettiStopped));
        assert!(!seq.confetti().is_active());
        assert_eq!(seq.phase(), Phase::Done);
    }

    #[test]
    fn audio_starts_at_trigger_and_fades_after_delay() {
        let mut seq = loaded_sequencer(data(&["Ana"], Some("Ana")));
        seq.spin().unwrap();
        let start = seq.tick(DT);
        assert!(matches!(
            seq_events_first_audio(&start),
            Some(WidgetEvent::AudioStarted { offset, volume, .. })
                if (*offset - 6.0).abs() < 1e-6 && (*volume - 0.4).abs() < 1e-6
        ));

        let timeline = run(&mut seq, 13.0);
        let first_fade = timeline
            .iter()
            .find(|(_, e)| matches!(e, WidgetEvent::AudioVolume { .. }))
            .map(|(t, _)| *t)
            .expect("fade never started");
        // Trigger happened one frame before the run loop started.
        assert!(
            (9.9..10.3).contains(&first_fade),
            "fade began at {}",
            first_fade
        );
        assert!(events_only(&timeline)
            .into_iter()
            .any(|e| *e == WidgetEvent::AudioStopped));
    }

    fn seq_events_first_audio(events: &[WidgetEvent]) -> Option<&WidgetEvent> {
        events
            .iter()
            .find(|e| matches!(e, WidgetEvent::AudioStarted { .. }))
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut seq = loaded_sequencer(data(&["Ana"], Some("Ana")));
        seq.spin().unwrap();
        // Mid-spin: countdown done, transform running, audio playing.
        run(&mut seq, 7.0);

        let events = seq.teardown();
        assert!(events.contains(&WidgetEvent::AudioStopped));
        assert_eq!(seq.phase(), Phase::Done);
        assert!(seq.confetti().pieces().is_empty());
        assert!(seq.tick(1.0).is_empty());
    }

    #[test]
    fn load_is_single_use() {
        let mut seq = loaded_sequencer(data(&["Ana"], Some("Ana")));
        seq.load(data(&["Bob"], Some("Bob")));
        seq.spin().unwrap();
        let timeline = run(&mut seq, 12.0);
        let revealed = events_only(&timeline)
            .into_iter()
            .find_map(|e| match e {
                WidgetEvent::ResultRevealed { name } => Some(name.clone()),
                _ => None,
            })
            .expect("no reveal event");
        assert_eq!(revealed, "Ana");
    }
}
