use crate::extensions::Easing;

/// Configuration for the reveal widget: every timing and layout constant
/// in one place, provided to the sequencer at construction.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Number of display slots in the reel strip.
    pub reel_slots: usize,
    /// Height of one slot in CSS pixels.
    pub slot_height: f32,
    /// Strip offset before the spin, in CSS pixels.
    pub initial_offset: f32,
    /// Label shown in slots before data arrives (and when the pool is empty).
    pub placeholder: String,
    /// First value shown by the countdown overlay.
    pub countdown_from: u32,
    /// Seconds between countdown steps.
    pub countdown_interval: f32,
    /// Seconds the countdown overlay takes to fade out.
    pub countdown_fade: f32,
    /// Seconds the spin transform runs.
    pub spin_duration: f32,
    /// Easing curve of the spin transform.
    pub spin_easing: Easing,
    /// Seconds to hold after the transform before revealing the result.
    pub spin_settle: f32,
    /// Confetti pieces per burst.
    pub confetti_count: usize,
    /// Seconds the confetti runs before the auto-stop.
    pub confetti_duration: f32,
    /// Network-relative path of the background track.
    pub audio_src: String,
    /// Playback start offset in seconds.
    pub audio_offset: f32,
    /// Initial playback volume (0..1).
    pub audio_volume: f32,
    /// Seconds from trigger until the fade-out begins.
    pub audio_fade_delay: f32,
    /// Seconds between fade steps.
    pub audio_fade_interval: f32,
    /// Volume removed per fade step.
    pub audio_fade_step: f32,
    /// Volume at or below which playback pauses instead of fading further.
    pub audio_fade_floor: f32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            reel_slots: 60,
            slot_height: 120.0,
            initial_offset: -40.0,
            placeholder: "—".to_string(),
            countdown_from: 5,
            countdown_interval: 1.0,
            countdown_fade: 0.3,
            spin_duration: 5.0,
            spin_easing: Easing::QuadOut,
            spin_settle: 0.05,
            confetti_count: 120,
            confetti_duration: 5.0,
            audio_src: "/audio/bg_song.m4a".to_string(),
            audio_offset: 6.0,
            audio_volume: 0.4,
            audio_fade_delay: 10.0,
            audio_fade_interval: 0.1,
            audio_fade_step: 0.05,
            audio_fade_floor: 0.05,
        }
    }
}
