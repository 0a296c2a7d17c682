//! The ink engine for one open note.
//!
//! Wires the interaction controller, stroke store, pagination and
//! renderer together. All mutation of the document goes through here,
//! and every committed change is announced to the subscribed
//! [`EngineObserver`]s. Opening another note means building a new engine.

use crate::input::InputEvent;
use crate::interaction::{Gesture, InteractionController};
use crate::observer::EngineObserver;
use crate::shortcuts::ShortcutAction;
use sq_core::{
    Document, EngineConfig, HistoryControl, HistoryState, PageStyle, Pagination, Stroke,
    StrokeStore, SurfaceGeometry, Tool, ViewportOrigin,
};
use sq_render::export::export_png_data_url;
use sq_render::{PendingStroke, RenderError, Renderer, Surface, page_background};
use std::ops::Range;

/// Swatches offered by the toolbar.
pub const PALETTE: [&str; 9] = [
    "#1C1C1E", "#FF3B30", "#FF9500", "#FFCC00", "#34C759", "#007AFF", "#5856D6", "#FF2D55",
    "#636366",
];

/// Base widths offered by the toolbar.
pub const PEN_SIZES: [f32; 4] = [2.0, 4.0, 7.0, 12.0];

/// Tool configuration, read at the moment each event is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: String,
    pub size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: PALETTE[0].to_string(),
            size: PEN_SIZES[1],
        }
    }
}

pub struct InkEngine<S: Surface> {
    config: EngineConfig,
    store: StrokeStore,
    pagination: Pagination,
    renderer: Renderer<S>,
    /// Page rules beneath the ink, on a separate surface so erasers
    /// cannot cut through them.
    background: Renderer<S>,
    interaction: InteractionController,
    settings: ToolSettings,
    zoom: f32,
    device_pixel_ratio: f32,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl<S: Surface> InkEngine<S> {
    /// Open a note from its persisted state. Nothing is painted until a
    /// surface is mounted.
    pub fn new(config: EngineConfig, document: Document) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("engine built from unvalidated config: {err}");
        }
        let store = StrokeStore::from_document(document);
        let geometry = SurfaceGeometry::new(
            config.page_width,
            store.document().height(config.page_height),
            1.0,
            1.0,
        );
        Self {
            pagination: Pagination::from_config(&config),
            renderer: Renderer::new(geometry),
            background: Renderer::new(geometry),
            config,
            store,
            interaction: InteractionController::new(),
            settings: ToolSettings::default(),
            zoom: 1.0,
            device_pixel_ratio: 1.0,
            observers: Vec::new(),
        }
    }

    // ─── Surface lifecycle ──────────────────────────────────────────────

    pub fn mount(&mut self, surface: S) {
        self.renderer.mount(surface);
        self.redraw();
    }

    pub fn unmount(&mut self) -> Option<S> {
        self.renderer.unmount()
    }

    /// Attach the surface that sits beneath the ink and carries the page
    /// background.
    pub fn mount_background(&mut self, surface: S) {
        self.background.mount(surface);
        self.redraw_background();
    }

    pub fn unmount_background(&mut self) -> Option<S> {
        self.background.unmount()
    }

    pub fn background_surface(&self) -> Option<&S> {
        self.background.surface()
    }

    pub fn surface(&self) -> Option<&S> {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.renderer.surface_mut()
    }

    /// Full repaint, keeping any in-progress stroke visible.
    pub fn redraw(&mut self) {
        let pending = self.interaction.is_drawing().then(|| PendingStroke {
            points: self.interaction.pending(),
            tool: self.settings.tool,
            color: &self.settings.color,
            size: self.settings.size,
        });
        self.renderer
            .redraw_with_pending(self.store.strokes(), pending);
    }

    fn redraw_background(&mut self) {
        let layer = page_background(
            self.store.page_style(),
            self.config.page_width,
            self.config.page_height,
            self.store.page_count(),
        );
        self.background.redraw_layer(&layer);
    }

    // ─── Observers ──────────────────────────────────────────────────────

    /// Register an observer. It immediately receives the current page
    /// style and history state so controls start out correct.
    pub fn subscribe(&mut self, mut observer: Box<dyn EngineObserver>) {
        observer.on_page_style_change(self.store.page_style());
        observer.on_history_change(self.store.history_state());
        self.observers.push(observer);
    }

    fn notify_persist(&mut self) {
        let (strokes, pages) = (self.store.strokes(), self.store.page_count());
        for observer in &mut self.observers {
            observer.on_persist(strokes, pages);
        }
    }

    fn notify_page_style(&mut self) {
        let style = self.store.page_style();
        for observer in &mut self.observers {
            observer.on_page_style_change(style);
        }
    }

    fn notify_history(&mut self) {
        let state = self.store.history_state();
        for observer in &mut self.observers {
            observer.on_history_change(state);
        }
    }

    // ─── Tool configuration ─────────────────────────────────────────────

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.settings.color = color.into();
    }

    pub fn set_size(&mut self, size: f32) {
        self.settings.size = size;
    }

    pub fn page_style(&self) -> PageStyle {
        self.store.page_style()
    }

    /// Switch the page background. Persisted with the document but not
    /// part of undo history.
    pub fn set_page_style(&mut self, page_style: PageStyle) {
        if !self.store.set_page_style(page_style) {
            return;
        }
        self.redraw_background();
        self.notify_page_style();
        self.notify_persist();
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor (clamped to the configured range). Resizes the
    /// surface and repaints when it changes.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.config.clamp_zoom(zoom);
        self.sync_geometry();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(round_zoom(self.zoom + self.config.zoom_step));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(round_zoom(self.zoom - self.config.zoom_step));
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0);
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        self.device_pixel_ratio = dpr;
        self.sync_geometry();
    }

    /// Derive surface geometry from page count, zoom and DPR; resize and
    /// repaint if it changed. The resize always precedes the repaint.
    fn sync_geometry(&mut self) {
        let geometry = SurfaceGeometry::new(
            self.config.page_width,
            self.store.document().height(self.config.page_height),
            self.zoom,
            self.device_pixel_ratio,
        );
        if self.background.set_geometry(geometry) {
            self.redraw_background();
        }
        if self.renderer.set_geometry(geometry) {
            self.redraw();
        }
    }

    // ─── Pointer input ──────────────────────────────────────────────────

    /// Process one pointer event. `viewport` is the surface's on-screen
    /// origin at the time of the event. Returns `true` if anything was
    /// painted or the document changed.
    pub fn handle_pointer(&mut self, event: &InputEvent, viewport: ViewportOrigin) -> bool {
        match self.interaction.handle(event, viewport, self.zoom) {
            Gesture::Ignored => false,
            Gesture::Started { abandoned, .. } => {
                // Wipe live ink of the dropped gesture; nothing backs it.
                if abandoned {
                    self.redraw();
                }
                abandoned
            }
            Gesture::Extended { from, to } => {
                let pages = self.pagination.maybe_grow(to.y, self.store.page_count());
                if self.store.grow_pages(pages) {
                    // Resize wipes the surface; the repaint includes the
                    // pending buffer, which already ends at `to`.
                    self.sync_geometry();
                    self.notify_persist();
                } else {
                    let ToolSettings { tool, color, size } = &self.settings;
                    self.renderer
                        .paint_live_segment(from, to, *tool, color, *size, to.pressure);
                }
                true
            }
            Gesture::Finished(points) => {
                let ToolSettings { tool, color, size } = &self.settings;
                if self.store.commit(points, color, *size, *tool).is_none() {
                    return false;
                }
                self.redraw();
                self.notify_persist();
                self.notify_history();
                true
            }
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.interaction.is_drawing()
    }

    /// Apply a resolved keyboard shortcut. Returns `false` when it had no
    /// effect (e.g. undo with an empty history).
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::ToolPen => self.set_tool(Tool::Pen),
            ShortcutAction::ToolEraser => self.set_tool(Tool::Eraser),
            ShortcutAction::ToolHighlighter => self.set_tool(Tool::Highlighter),
            ShortcutAction::Undo => return self.undo(),
            ShortcutAction::Redo => return self.redo(),
            ShortcutAction::ZoomIn => self.zoom_in(),
            ShortcutAction::ZoomOut => self.zoom_out(),
            ShortcutAction::ZoomReset => self.reset_zoom(),
        }
        true
    }

    // ─── Document access ────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.store.strokes()
    }

    pub fn redo_stack(&self) -> &[Stroke] {
        self.store.redo_stack()
    }

    pub fn page_count(&self) -> u32 {
        self.store.page_count()
    }

    pub fn pages(&self) -> Range<u32> {
        self.store.document().pages()
    }

    pub fn into_document(self) -> Document {
        self.store.into_document()
    }

    /// Cropped PNG of the committed ink as a data URL, for transcription.
    pub fn export_png_data_url(&self) -> Result<Option<String>, RenderError> {
        export_png_data_url(self.store.strokes(), self.config.export_padding)
    }
}

impl<S: Surface> HistoryControl for InkEngine<S> {
    fn undo(&mut self) -> bool {
        if !self.store.undo() {
            return false;
        }
        self.redraw();
        self.notify_persist();
        self.notify_history();
        true
    }

    fn redo(&mut self) -> bool {
        if !self.store.redo() {
            return false;
        }
        self.redraw();
        self.notify_persist();
        self.notify_history();
        true
    }

    fn history_state(&self) -> HistoryState {
        self.store.history_state()
    }
}

/// Snap to hundredths so repeated steps don't drift (1.0 + 0.1 × 3).
fn round_zoom(zoom: f32) -> f32 {
    (zoom * 100.0).round() / 100.0
}
