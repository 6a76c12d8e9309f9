//! DOM lookup and mutation. All widget side effects on the page happen
//! through this module; failures on individual style writes are ignored
//! the way ad-hoc DOM code does, but missing required elements are fatal.

use reveal_core::WidgetConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, Window,
};

const COUNTDOWN_CARD_HTML: &str = r#"
  <div class="countdown-card">
    <p class="countdown-warning">🤫 ¡Asegúrate que nadie esté viendo tu pantalla!</p>
    <p class="countdown-secret">Top Secret</p>
    <p class="countdown-number">5</p>
    <p class="countdown-sound">🔊 Activa el sonido 🔉</p>
  </div>
"#;

/// Handles to every page element the widget touches.
pub struct Dom {
    window: Window,
    document: Document,
    spin_btn: HtmlButtonElement,
    result: Element,
    result_name: Element,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    reel_overlay: Option<HtmlElement>,
    strip: HtmlElement,
    countdown: Option<HtmlElement>,
}

impl Dom {
    /// Look up the required elements and build the reel strip. Any missing
    /// required element aborts with a console error.
    pub fn lookup(config: &WidgetConfig) -> Result<Self, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let spin_btn: HtmlButtonElement = require(&document, "spinBtn")?.dyn_into()?;
        let result = require(&document, "result")?;
        let result_name = require(&document, "resultName")?;
        let canvas: HtmlCanvasElement = require(&document, "confettiCanvas")?.dyn_into()?;
        let reel = require(&document, "reel")?;

        // The blur overlay is optional by contract.
        let reel_overlay = document
            .query_selector(".reel-overlay")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let strip = build_strip(&document, &reel, config)?;

        Ok(Self {
            window,
            document,
            spin_btn,
            result,
            result_name,
            canvas,
            ctx,
            reel_overlay,
            strip,
            countdown: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn spin_button(&self) -> &HtmlButtonElement {
        &self.spin_btn
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn set_trigger_enabled(&self, enabled: bool) {
        self.spin_btn.set_disabled(!enabled);
    }

    pub fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    /// Current viewport size in CSS pixels.
    pub fn viewport_size(&self) -> (f64, f64) {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (width, height)
    }

    /// Size the confetti canvas to the viewport.
    pub fn size_canvas(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    pub fn clear_canvas(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    /// Move the strip to the given translateY offset.
    pub fn set_strip_offset(&self, offset: f32) {
        let _ = self
            .strip
            .style()
            .set_property("transform", &format!("translateY({offset}px)"));
    }

    /// Rewrite every slot label from the core strip.
    pub fn sync_strip_labels(&self, labels: &[String]) {
        let items = self.strip.children();
        for (i, label) in labels.iter().enumerate() {
            if let Some(item) = items.item(i as u32) {
                item.set_text_content(Some(label));
            }
        }
    }

    /// Show the final name and unhide the result container.
    pub fn show_result(&self, name: &str) {
        self.result_name.set_text_content(Some(name));
        let _ = self.result.class_list().remove_1("hidden");
    }

    /// Append the countdown overlay card to the page.
    pub fn show_countdown(&mut self, value: u32) {
        let overlay: HtmlElement = match self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into().ok())
        {
            Some(el) => el,
            None => return,
        };
        overlay.set_class_name("countdown-overlay");
        overlay.set_inner_html(COUNTDOWN_CARD_HTML);
        if let Some(body) = self.document.body() {
            let _ = body.append_child(&overlay);
        }
        self.countdown = Some(overlay);
        self.update_countdown(value);
    }

    /// Update the countdown number and restart its pulse animation.
    pub fn update_countdown(&self, value: u32) {
        let number = self
            .countdown
            .as_ref()
            .and_then(|el| el.query_selector(".countdown-number").ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(number) = number {
            number.set_text_content(Some(&value.to_string()));
            // Restart the CSS animation: clear it, force a reflow, re-apply.
            let _ = number.style().set_property("animation", "none");
            let _ = number.offset_width();
            let _ = number
                .style()
                .set_property("animation", "countPulse 0.8s ease-out");
        }
    }

    /// Begin the overlay opacity fade.
    pub fn fade_countdown(&self) {
        if let Some(overlay) = &self.countdown {
            let _ = overlay
                .style()
                .set_property("transition", "opacity 0.3s ease");
            let _ = overlay.style().set_property("opacity", "0");
        }
    }

    /// Remove the countdown overlay from the page.
    pub fn remove_countdown(&mut self) {
        if let Some(overlay) = self.countdown.take() {
            overlay.remove();
        }
    }

    /// Fade out the reel blur overlay, then hide it once the fade is over.
    pub fn dismiss_reel_overlay(&self) {
        let Some(overlay) = &self.reel_overlay else {
            return;
        };
        let _ = overlay
            .style()
            .set_property("transition", "opacity 0.3s ease");
        let _ = overlay.style().set_property("opacity", "0");

        let hidden = overlay.clone();
        let hide = Closure::once(move || {
            let _ = hidden.style().set_property("display", "none");
        });
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.as_ref().unchecked_ref(),
                300,
            );
        hide.forget();
    }
}

fn require(document: &Document, id: &str) -> Result<Element, JsValue> {
    document.get_element_by_id(id).ok_or_else(|| {
        let message = format!("Falta el elemento #{id}. Revisa index.html");
        web_sys::console::error_1(&message.clone().into());
        JsValue::from_str(&message)
    })
}

/// Build the `div.strip` with one `div.item` per slot inside the reel
/// container, parked at the initial offset.
fn build_strip(document: &Document, reel: &Element, config: &WidgetConfig) -> Result<HtmlElement, JsValue> {
    let strip: HtmlElement = document.create_element("div")?.dyn_into()?;
    strip.set_class_name("strip");
    for _ in 0..config.reel_slots {
        let item = document.create_element("div")?;
        item.set_class_name("item");
        item.set_text_content(Some(&config.placeholder));
        strip.append_child(&item)?;
    }
    let _ = strip.style().set_property(
        "transform",
        &format!("translateY({}px)", config.initial_offset),
    );
    reel.append_child(&strip)?;
    Ok(strip)
}
