//! Background track control. Playback failures are logged, never fatal;
//! the reveal runs on without sound.

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Handle to the playing background track.
pub struct AudioPlayer {
    element: HtmlAudioElement,
}

impl AudioPlayer {
    /// Create the element and start playback at the given offset and
    /// volume. A rejected play() promise is logged asynchronously.
    pub fn start(src: &str, offset: f32, volume: f32) -> Result<Self, JsValue> {
        let element = HtmlAudioElement::new_with_src(src)?;
        element.set_current_time(offset as f64);
        element.set_volume(volume as f64);

        let promise = element.play()?;
        let on_rejected = Closure::wrap(Box::new(|err: JsValue| {
            log::warn!("audio playback rejected: {err:?}");
        }) as Box<dyn FnMut(JsValue)>);
        let _ = promise.catch(&on_rejected);
        on_rejected.forget();

        Ok(Self { element })
    }

    pub fn set_volume(&self, volume: f32) {
        self.element.set_volume(volume.max(0.0) as f64);
    }

    pub fn pause(&self) {
        let _ = self.element.pause();
    }
}
