/// A discrete side effect the sequencer asks the bridge layer to perform.
/// Continuous state (strip offset, confetti pieces, phase) is read from the
/// sequencer directly each frame; events carry the one-shot transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Begin background audio playback at the given offset and volume.
    AudioStarted {
        src: String,
        offset: f32,
        volume: f32,
    },
    /// Apply a faded volume to the playing track.
    AudioVolume { volume: f32 },
    /// Pause playback and release the audio handle.
    AudioStopped,
    /// Show the countdown overlay with its first value.
    CountdownShown { value: u32 },
    /// Update the countdown number.
    CountdownTick { value: u32 },
    /// Begin the countdown overlay opacity fade.
    CountdownFading,
    /// Remove the countdown overlay from the page.
    CountdownDismissed,
    /// Fade out and hide the reel blur overlay.
    ReelOverlayDismissed,
    /// Reel slot labels changed; re-sync the strip DOM.
    ReelRefilled,
    /// The spin transform started.
    SpinStarted,
    /// Display the final name in the result slot.
    ResultRevealed { name: String },
    /// Start drawing confetti.
    ConfettiBurst,
    /// Stop drawing confetti and clear the canvas.
    ConfettiStopped,
}

/// Why a trigger was rejected. Rejections leave all sequencer state
/// unchanged and the control stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinError {
    /// No data bundle has been applied yet.
    NotLoaded,
    /// Neither an assignment nor a pool candidate is available.
    NoName,
    /// The single-use trigger was already consumed.
    AlreadyTriggered,
}
