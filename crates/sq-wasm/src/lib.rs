//! WASM bridge for Squiggle: exposes the ink engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the
//! `<canvas>` and forwards pointer and key events; persistence stays on
//! the JS side through the `on_save` callback.

mod canvas2d;

use canvas2d::CanvasSurface;
use js_sys::Function;
use sq_core::codec;
use sq_core::{
    Document, EngineConfig, HistoryControl, HistoryState, PageStyle, Stroke, Tool, ViewportOrigin,
};
use sq_editor::{EngineObserver, InkEngine, InputEvent, ShortcutAction, ShortcutMap};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[derive(Default)]
struct Callbacks {
    on_save: Option<Function>,
    on_history: Option<Function>,
    /// Mirrors the engine so saved snapshots carry it.
    page_style: PageStyle,
}

/// Forwards engine notifications to whatever JS callbacks are installed.
struct JsObserver(Rc<RefCell<Callbacks>>);

impl EngineObserver for JsObserver {
    fn on_persist(&mut self, strokes: &[Stroke], page_count: u32) {
        let callbacks = self.0.borrow();
        let Some(on_save) = &callbacks.on_save else {
            return;
        };
        let snapshot =
            Document::with_strokes(strokes.to_vec(), page_count).with_page_style(callbacks.page_style);
        match codec::to_json(&snapshot) {
            Ok(json) => {
                if let Err(err) = on_save.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::error!("on_save callback threw: {err:?}");
                }
            }
            Err(err) => log::error!("failed to serialize document: {err}"),
        }
    }

    fn on_page_style_change(&mut self, style: PageStyle) {
        self.0.borrow_mut().page_style = style;
    }

    fn on_history_change(&mut self, state: HistoryState) {
        let callbacks = self.0.borrow();
        let Some(on_history) = &callbacks.on_history else {
            return;
        };
        let result = on_history.call2(
            &JsValue::NULL,
            &JsValue::from_bool(state.can_undo),
            &JsValue::from_bool(state.can_redo),
        );
        if let Err(err) = result {
            log::error!("on_history callback threw: {err:?}");
        }
    }
}

/// The WASM-facing canvas controller for one open note.
///
/// JS callbacks run synchronously while the controller is borrowed, so a
/// callback must not call back into the same `InkCanvas` (wasm-bindgen
/// rejects it as recursive use). Defer such calls, e.g. with
/// `queueMicrotask`.
#[wasm_bindgen]
pub struct InkCanvas {
    engine: InkEngine<CanvasSurface>,
    callbacks: Rc<RefCell<Callbacks>>,
}

#[wasm_bindgen]
impl InkCanvas {
    /// Open a note. `document_json` is the persisted `{strokes, pageCount}`
    /// snapshot and `config_json` overrides engine defaults; either may be
    /// empty.
    #[wasm_bindgen(constructor)]
    pub fn new(document_json: &str, config_json: &str) -> Result<InkCanvas, JsValue> {
        console_error_panic_hook_setup();
        console_logger_setup();

        let document = load_document(document_json).map_err(to_js_error)?;
        let config = load_config(config_json).map_err(to_js_error)?;
        let mut engine = InkEngine::new(config, document);

        let callbacks = Rc::new(RefCell::new(Callbacks::default()));
        engine.subscribe(Box::new(JsObserver(callbacks.clone())));
        Ok(Self { engine, callbacks })
    }

    /// Bind to a `<canvas>` element and paint the current document.
    pub fn attach(&mut self, canvas: HtmlCanvasElement, device_pixel_ratio: f32) -> Result<(), JsValue> {
        let surface = CanvasSurface::new(canvas)?;
        self.engine.set_device_pixel_ratio(device_pixel_ratio);
        self.engine.mount(surface);
        Ok(())
    }

    /// Bind the `<canvas>` stacked beneath the ink canvas; it carries the
    /// page rules.
    pub fn attach_background(&mut self, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let surface = CanvasSurface::new(canvas)?;
        self.engine.mount_background(surface);
        Ok(())
    }

    pub fn detach_background(&mut self) -> Option<HtmlCanvasElement> {
        self.engine.unmount_background().map(CanvasSurface::into_canvas)
    }

    /// Release the canvas element. Further paint calls are no-ops.
    pub fn detach(&mut self) -> Option<HtmlCanvasElement> {
        self.engine.unmount().map(CanvasSurface::into_canvas)
    }

    // ─── Pointer events ─────────────────────────────────────────────────

    /// Returns `true` if anything was painted or the document changed.
    pub fn pointer_down(&mut self, client_x: f32, client_y: f32, pressure: Option<f32>, button: i16) -> bool {
        let event = InputEvent::from_pointer_down(client_x, client_y, pressure, button);
        self.dispatch(event)
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, pressure: Option<f32>) -> bool {
        self.dispatch(InputEvent::from_pointer_move(client_x, client_y, pressure))
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32) -> bool {
        self.dispatch(InputEvent::from_pointer_up(client_x, client_y))
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.dispatch(InputEvent::PointerLeave)
    }

    fn dispatch(&mut self, event: InputEvent) -> bool {
        let viewport = self.viewport();
        self.engine.handle_pointer(&event, viewport)
    }

    /// The canvas's on-screen origin, read fresh so scrolling and layout
    /// shifts between events are honored.
    fn viewport(&self) -> ViewportOrigin {
        self.engine
            .surface()
            .map(|surface| {
                let rect = surface.canvas().get_bounding_client_rect();
                ViewportOrigin::new(rect.left() as f32, rect.top() as f32)
            })
            .unwrap_or_default()
    }

    // ─── Tool settings ──────────────────────────────────────────────────

    /// `"pen"`, `"eraser"` or `"highlighter"`. Returns `false` for
    /// anything else.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match Tool::from_name(name) {
            Some(tool) => {
                self.engine.set_tool(tool);
                true
            }
            None => {
                log::warn!("unknown tool {name:?}");
                false
            }
        }
    }

    pub fn tool(&self) -> String {
        self.engine.settings().tool.as_str().to_string()
    }

    /// `"ruled"`, `"dotted"` or `"blank"`. Returns `false` for anything
    /// else.
    pub fn set_page_style(&mut self, name: &str) -> bool {
        match PageStyle::from_name(name) {
            Some(style) => {
                self.engine.set_page_style(style);
                true
            }
            None => {
                log::warn!("unknown page style {name:?}");
                false
            }
        }
    }

    pub fn page_style(&self) -> String {
        self.engine.page_style().as_str().to_string()
    }

    pub fn set_color(&mut self, color: &str) {
        self.engine.set_color(color);
    }

    pub fn set_size(&mut self, size: f32) {
        self.engine.set_size(size);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.engine.set_zoom(zoom);
    }

    pub fn zoom(&self) -> f32 {
        self.engine.zoom()
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        self.engine.set_device_pixel_ratio(dpr);
    }

    // ─── History ────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.engine.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.engine.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.engine.history_state().can_undo
    }

    pub fn can_redo(&self) -> bool {
        self.engine.history_state().can_redo
    }

    /// Resolve and apply a key combo. Returns JSON:
    /// `{"action":"undo","applied":true}` or `{"action":null,"applied":false}`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let action = ShortcutMap::resolve(key, ctrl, shift, alt, meta);
        let applied = action.is_some_and(|a| self.engine.apply_shortcut(a));
        key_result_json(action, applied)
    }

    // ─── Document ───────────────────────────────────────────────────────

    pub fn document_json(&self) -> Result<String, JsValue> {
        codec::to_json(self.engine.document()).map_err(to_js_error)
    }

    pub fn page_count(&self) -> u32 {
        self.engine.page_count()
    }

    /// Cropped PNG data URL of the ink, or `undefined` when there is none.
    pub fn export_png_data_url(&self) -> Result<Option<String>, JsValue> {
        self.engine.export_png_data_url().map_err(to_js_error)
    }

    // ─── Callbacks ──────────────────────────────────────────────────────

    /// `callback(json)` after every committed change. Must not re-enter
    /// this controller synchronously.
    pub fn set_on_save(&mut self, callback: Option<Function>) {
        self.callbacks.borrow_mut().on_save = callback;
    }

    /// `callback(canUndo, canRedo)` after every history change. Called
    /// once immediately with the current state, still inside this call,
    /// so the callback must not re-enter this controller synchronously.
    pub fn set_on_history(&mut self, callback: Option<Function>) {
        self.callbacks.borrow_mut().on_history = callback;
        let state = self.engine.history_state();
        JsObserver(self.callbacks.clone()).on_history_change(state);
    }
}

fn load_document(json: &str) -> Result<Document, sq_core::CoreError> {
    if json.trim().is_empty() {
        return Ok(Document::new());
    }
    codec::from_json(json)
}

fn load_config(json: &str) -> Result<EngineConfig, sq_core::CoreError> {
    if json.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    EngineConfig::from_json(json)
}

fn key_result_json(action: Option<ShortcutAction>, applied: bool) -> String {
    serde_json::json!({
        "action": action.map(ShortcutAction::as_str),
        "applied": applied,
    })
    .to_string()
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ─── Console plumbing ───────────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Squiggle WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

fn console_logger_setup() {
    // Fails harmlessly when a logger is already installed.
    console_log::init_with_level(log::Level::Info).ok();
}

/// Adjust console verbosity: `"error"`, `"warn"`, `"info"`, `"debug"`,
/// `"trace"` or `"off"`. Returns `false` for an unknown level.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

// ─── Standalone validation (no canvas needed) ───────────────────────────

/// Validate a persisted document. Returns JSON: `{"ok":true,"pageCount":n}`
/// or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_document(json: &str) -> String {
    match codec::from_json(json) {
        Ok(doc) => serde_json::json!({ "ok": true, "pageCount": doc.page_count }).to_string(),
        Err(err) => serde_json::json!({ "ok": false, "error": err.to_string() }).to_string(),
    }
}
