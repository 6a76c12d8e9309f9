pub mod audio;
pub mod confetti;
pub mod dom;
pub mod runner;

pub use runner::WidgetRunner;

use std::cell::RefCell;
use std::rc::Rc;

use reveal_core::{RevealData, WidgetConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::Dom;

thread_local! {
    static RUNNER: RefCell<Option<WidgetRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner, if any. Returns None once the widget
/// has been torn down, which also ends the frame loop.
fn with_runner<R>(f: impl FnOnce(&mut WidgetRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Initialize the widget against the current page.
///
/// `data_json` is the `{ "names": [...], "assigned": ... }` bundle the
/// page-generation backend produced for this participant. A missing or
/// malformed bundle leaves the widget inert with the trigger disabled;
/// missing required DOM elements abort initialization entirely.
#[wasm_bindgen]
pub fn widget_init(data_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = WidgetConfig::default();
    let dom = Dom::lookup(&config)?;
    let mut runner = WidgetRunner::new(config, dom, js_sys::Date::now() as u64);
    runner.resize();

    match RevealData::from_json(data_json) {
        Ok(data) => runner.apply_data(data),
        Err(err) => {
            log::error!("no usable widget data: {err}");
            runner.disable_trigger();
        }
    }

    let button = runner.spin_button().clone();
    let window = runner.window().clone();

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    let on_click = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        let _ = with_runner(|r| r.trigger());
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_resize = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let _ = with_runner(|r| r.resize());
    }) as Box<dyn FnMut(web_sys::Event)>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    start_frame_loop();
    log::info!("reveal widget: initialized");
    Ok(())
}

/// Tear the widget down: cancel the running sequence, stop audio and
/// confetti, and drop the runner. The frame loop ends on its next tick.
#[wasm_bindgen]
pub fn widget_teardown() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.teardown();
        }
    });
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling requestAnimationFrame loop. Stops rescheduling as
/// soon as the runner is gone.
fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let alive = with_runner(|r| r.frame(ts)).is_some();
        if !alive {
            return;
        }
        if let (Some(win), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    let g_ref = g.borrow();
    if let (Some(win), Some(cb)) = (web_sys::window(), g_ref.as_ref()) {
        let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
