use reveal_core::{RevealData, RevealSequencer, SpinError, WidgetConfig, WidgetEvent};
use web_sys::{HtmlButtonElement, Window};

use crate::audio::AudioPlayer;
use crate::confetti;
use crate::dom::Dom;

/// Longest frame delta fed to the sequencer, in seconds. Keeps a
/// backgrounded tab from replaying the whole sequence in one jump.
const MAX_FRAME_DT: f32 = 0.1;

/// Owns the sequencer and every browser-side resource, and translates
/// between the two: continuous state is applied every frame, discrete
/// events as they are emitted.
pub struct WidgetRunner {
    seq: RevealSequencer,
    dom: Dom,
    audio: Option<AudioPlayer>,
    last_ts: Option<f64>,
}

impl WidgetRunner {
    pub fn new(config: WidgetConfig, dom: Dom, seed: u64) -> Self {
        Self {
            seq: RevealSequencer::new(config, seed),
            dom,
            audio: None,
            last_ts: None,
        }
    }

    pub fn window(&self) -> &Window {
        self.dom.window()
    }

    pub fn spin_button(&self) -> &HtmlButtonElement {
        self.dom.spin_button()
    }

    /// Apply the external data bundle and enable the trigger.
    pub fn apply_data(&mut self, data: RevealData) {
        self.seq.load(data);
        self.dom.set_trigger_enabled(true);
    }

    /// Leave the widget inert (no data ever arrived).
    pub fn disable_trigger(&self) {
        self.dom.set_trigger_enabled(false);
    }

    /// Click entry point. An accepted spin consumes the trigger; rejections
    /// surface as alerts and leave the control untouched.
    pub fn trigger(&mut self) {
        match self.seq.spin() {
            Ok(()) => self.dom.set_trigger_enabled(false),
            Err(SpinError::NotLoaded) => self.dom.alert("Cargando... espera unos instantes"),
            Err(SpinError::NoName) => self.dom.alert("No hay nombre disponible"),
            Err(SpinError::AlreadyTriggered) => {}
        }
    }

    /// Re-apply viewport sizing to the canvas and the simulation bounds.
    pub fn resize(&mut self) {
        let (width, height) = self.dom.viewport_size();
        self.dom.size_canvas(width, height);
        self.seq.set_viewport(width as f32, height as f32);
    }

    /// One animation frame: advance the sequencer and mirror its state
    /// onto the page.
    pub fn frame(&mut self, ts: f64) {
        let dt = match self.last_ts {
            Some(prev) => (((ts - prev) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_ts = Some(ts);

        for event in self.seq.tick(dt) {
            self.apply(event);
        }

        self.dom.set_strip_offset(self.seq.strip_offset());
        if self.seq.confetti().is_active() {
            confetti::draw(self.dom.context(), self.dom.canvas(), self.seq.confetti().pieces());
        }
    }

    /// Cancel everything and release browser resources.
    pub fn teardown(&mut self) {
        for event in self.seq.teardown() {
            self.apply(event);
        }
        self.dom.remove_countdown();
        self.dom.clear_canvas();
    }

    fn apply(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::AudioStarted {
                src,
                offset,
                volume,
            } => match AudioPlayer::start(&src, offset, volume) {
                Ok(player) => self.audio = Some(player),
                Err(err) => log::warn!("audio unavailable: {err:?}"),
            },
            WidgetEvent::AudioVolume { volume } => {
                if let Some(audio) = &self.audio {
                    audio.set_volume(volume);
                }
            }
            WidgetEvent::AudioStopped => {
                if let Some(audio) = self.audio.take() {
                    audio.pause();
                }
            }
            WidgetEvent::CountdownShown { value } => self.dom.show_countdown(value),
            WidgetEvent::CountdownTick { value } => self.dom.update_countdown(value),
            WidgetEvent::CountdownFading => self.dom.fade_countdown(),
            WidgetEvent::CountdownDismissed => self.dom.remove_countdown(),
            WidgetEvent::ReelOverlayDismissed => self.dom.dismiss_reel_overlay(),
            WidgetEvent::ReelRefilled => self.dom.sync_strip_labels(self.seq.strip().labels()),
            // The transform itself is mirrored per-frame in `frame`.
            WidgetEvent::SpinStarted => {}
            WidgetEvent::ResultRevealed { name } => self.dom.show_result(&name),
            WidgetEvent::ConfettiBurst => {
                // Match the canvas to the viewport right before drawing.
                self.resize();
            }
            WidgetEvent::ConfettiStopped => self.dom.clear_canvas(),
        }
    }
}
