//! Integration tests: pointer events → engine → store, pages, observers.

use pretty_assertions::assert_eq;
use sq_core::{
    Document, EngineConfig, HistoryControl, HistoryState, PageStyle, Point, Stroke,
    SurfaceGeometry, Tool, ViewportOrigin,
};
use sq_editor::{EngineObserver, InkEngine, InputEvent, ShortcutAction, ShortcutMap};
use sq_render::RasterSurface;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Log {
    persisted: Vec<(usize, u32)>,
    history: Vec<HistoryState>,
    styles: Vec<PageStyle>,
}

struct Recorder(Rc<RefCell<Log>>);

impl EngineObserver for Recorder {
    fn on_persist(&mut self, strokes: &[Stroke], page_count: u32) {
        self.0.borrow_mut().persisted.push((strokes.len(), page_count));
    }

    fn on_history_change(&mut self, state: HistoryState) {
        self.0.borrow_mut().history.push(state);
    }

    fn on_page_style_change(&mut self, style: PageStyle) {
        self.0.borrow_mut().styles.push(style);
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine() -> (InkEngine<RasterSurface>, Rc<RefCell<Log>>) {
    init_logger();
    let config = EngineConfig::default();
    let mut engine = InkEngine::new(config, Document::new());
    let geometry = SurfaceGeometry::new(100.0, 100.0, 1.0, 1.0);
    engine.mount(RasterSurface::new(&geometry).unwrap());
    let log = Rc::new(RefCell::new(Log::default()));
    engine.subscribe(Box::new(Recorder(log.clone())));
    (engine, log)
}

fn draw(engine: &mut InkEngine<RasterSurface>, points: &[(f32, f32)]) {
    let origin = ViewportOrigin::ZERO;
    let (first, rest) = points.split_first().unwrap();
    engine.handle_pointer(&InputEvent::from_pointer_down(first.0, first.1, None, 0), origin);
    for &(x, y) in rest {
        engine.handle_pointer(&InputEvent::from_pointer_move(x, y, None), origin);
    }
    let last = points.last().unwrap();
    engine.handle_pointer(&InputEvent::from_pointer_up(last.0, last.1), origin);
}

fn pen_stroke() -> Stroke {
    Stroke::new(
        vec![Point::at(10.0, 10.0), Point::at(20.0, 20.0), Point::at(30.0, 30.0)],
        "#000000",
        4.0,
        Tool::Pen,
    )
}

#[test]
fn subscribe_emits_current_history() {
    let (_engine, log) = engine();
    assert_eq!(log.borrow().history, vec![HistoryState::default()]);
}

#[test]
fn pen_stroke_commits_then_undoes() {
    let (mut engine, log) = engine();
    engine.set_color("#000000");
    engine.set_size(4.0);
    draw(&mut engine, &[(10.0, 10.0), (20.0, 20.0), (30.0, 30.0)]);

    assert_eq!(engine.strokes(), &[pen_stroke()]);
    assert_eq!(
        engine.history_state(),
        HistoryState {
            can_undo: true,
            can_redo: false
        }
    );

    assert!(engine.undo());
    assert!(engine.strokes().is_empty());
    assert_eq!(engine.redo_stack(), &[pen_stroke()]);
    assert_eq!(
        engine.history_state(),
        HistoryState {
            can_undo: false,
            can_redo: true
        }
    );

    let log = log.borrow();
    assert_eq!(log.persisted, vec![(1, 1), (0, 1)]);
    assert_eq!(log.history.last(), Some(&engine.history_state()));
}

#[test]
fn tap_is_discarded() {
    let (mut engine, log) = engine();
    let origin = ViewportOrigin::ZERO;
    engine.handle_pointer(&InputEvent::from_pointer_down(5.0, 5.0, None, 0), origin);
    assert!(!engine.handle_pointer(&InputEvent::from_pointer_up(5.0, 5.0), origin));
    assert!(engine.strokes().is_empty());
    assert!(!engine.is_drawing());
    assert!(log.borrow().persisted.is_empty());
}

#[test]
fn page_grows_once_past_threshold() {
    let (mut engine, log) = engine();
    let origin = ViewportOrigin::ZERO;
    engine.handle_pointer(&InputEvent::from_pointer_down(40.0, 50.0, None, 0), origin);
    assert_eq!(engine.page_count(), 1);

    engine.handle_pointer(&InputEvent::from_pointer_move(40.0, 900.0, None), origin);
    assert_eq!(engine.page_count(), 2);
    assert_eq!(log.borrow().persisted, vec![(0, 2)]);

    engine.handle_pointer(&InputEvent::from_pointer_move(40.0, 870.0, None), origin);
    assert_eq!(engine.page_count(), 2);

    engine.handle_pointer(&InputEvent::from_pointer_up(40.0, 870.0), origin);
    assert_eq!(engine.strokes().len(), 1);
    assert_eq!(engine.pages(), 0..2);
    assert_eq!(log.borrow().persisted, vec![(0, 2), (1, 2)]);
}

#[test]
fn growth_resizes_surface_and_keeps_live_ink() {
    let (mut engine, _log) = engine();
    let origin = ViewportOrigin::ZERO;
    engine.handle_pointer(&InputEvent::from_pointer_down(40.0, 10.0, None, 0), origin);
    engine.handle_pointer(&InputEvent::from_pointer_move(40.0, 100.0, None), origin);
    engine.handle_pointer(&InputEvent::from_pointer_move(40.0, 1000.0, None), origin);

    let surface = engine.surface().unwrap();
    assert_eq!(surface.height(), 2 * 1056);
    assert_eq!(surface.width(), 816);
    // Segment painted before the resize is repainted from the buffer.
    assert_eq!(surface.pixel(40, 50).unwrap().alpha(), 255);
}

#[test]
fn undo_on_empty_history_is_silent() {
    let (mut engine, log) = engine();
    assert!(!engine.undo());
    assert!(!engine.redo());
    assert_eq!(log.borrow().history.len(), 1);
    assert!(log.borrow().persisted.is_empty());
}

#[test]
fn new_stroke_clears_redo() {
    let (mut engine, _log) = engine();
    draw(&mut engine, &[(10.0, 10.0), (20.0, 20.0)]);
    engine.undo();
    draw(&mut engine, &[(30.0, 30.0), (40.0, 40.0)]);
    assert!(engine.redo_stack().is_empty());
    assert!(!engine.redo());
}

#[test]
fn settings_read_at_commit_time() {
    let (mut engine, _log) = engine();
    engine.set_tool(Tool::Highlighter);
    engine.set_color("#FFCC00");
    engine.set_size(7.0);
    draw(&mut engine, &[(10.0, 10.0), (60.0, 10.0)]);
    let stroke = &engine.strokes()[0];
    assert_eq!(stroke.tool, Tool::Highlighter);
    assert_eq!(stroke.color, "#FFCC00");
    assert_eq!(stroke.size, 7.0);
}

#[test]
fn zoom_maps_client_to_document_space() {
    let (mut engine, _log) = engine();
    engine.set_zoom(2.0);
    let origin = ViewportOrigin::new(100.0, 50.0);
    engine.handle_pointer(&InputEvent::from_pointer_down(120.0, 70.0, Some(0.8), 0), origin);
    engine.handle_pointer(&InputEvent::from_pointer_move(140.0, 90.0, None), origin);
    engine.handle_pointer(&InputEvent::from_pointer_up(140.0, 90.0), origin);
    assert_eq!(
        engine.strokes()[0].points,
        vec![Point::new(10.0, 10.0, 0.8), Point::at(20.0, 20.0)]
    );
    assert_eq!(engine.surface().unwrap().width(), 816 * 2);
}

#[test]
fn zoom_steps_are_clamped() {
    let (mut engine, _log) = engine();
    for _ in 0..40 {
        engine.zoom_in();
    }
    assert_eq!(engine.zoom(), 3.0);
    for _ in 0..40 {
        engine.zoom_out();
    }
    assert_eq!(engine.zoom(), 0.5);
    engine.reset_zoom();
    assert_eq!(engine.zoom(), 1.0);
    engine.zoom_in();
    engine.zoom_in();
    engine.zoom_in();
    assert_eq!(engine.zoom(), 1.3);
}

#[test]
fn shortcuts_drive_engine() {
    let (mut engine, _log) = engine();
    let action = ShortcutMap::resolve("e", false, false, false, false).unwrap();
    assert!(engine.apply_shortcut(action));
    assert_eq!(engine.settings().tool, Tool::Eraser);

    assert!(!engine.apply_shortcut(ShortcutAction::Undo));
    draw(&mut engine, &[(10.0, 10.0), (20.0, 20.0)]);
    assert!(engine.apply_shortcut(ShortcutAction::Undo));
    assert!(engine.apply_shortcut(ShortcutAction::Redo));
    assert_eq!(engine.strokes().len(), 1);
}

#[test]
fn hydrated_document_is_repainted_on_mount() {
    init_logger();
    let doc = Document::with_strokes(vec![pen_stroke()], 3);
    let mut engine: InkEngine<RasterSurface> = InkEngine::new(EngineConfig::default(), doc);
    engine.mount(RasterSurface::new(&SurfaceGeometry::new(1.0, 1.0, 1.0, 1.0)).unwrap());
    let surface = engine.surface().unwrap();
    assert_eq!(surface.height(), 3 * 1056);
    assert_eq!(surface.pixel(20, 20).unwrap().alpha(), 255);
    assert_eq!(engine.history_state(), HistoryState::default());
}

#[test]
fn export_crops_committed_ink() {
    let (mut engine, _log) = engine();
    assert_eq!(engine.export_png_data_url().unwrap(), None);
    draw(&mut engine, &[(100.0, 100.0), (200.0, 150.0)]);
    let url = engine.export_png_data_url().unwrap().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
}

#[test]
fn second_down_wipes_abandoned_live_ink() {
    let (mut engine, log) = engine();
    let origin = ViewportOrigin::ZERO;
    engine.handle_pointer(&InputEvent::from_pointer_down(10.0, 50.0, None, 0), origin);
    engine.handle_pointer(&InputEvent::from_pointer_move(90.0, 50.0, None), origin);
    assert_eq!(engine.surface().unwrap().pixel(50, 50).unwrap().alpha(), 255);

    assert!(engine.handle_pointer(&InputEvent::from_pointer_down(300.0, 300.0, None, 0), origin));
    engine.handle_pointer(&InputEvent::PointerLeave, origin);

    assert!(engine.strokes().is_empty());
    assert_eq!(engine.surface().unwrap().pixel(50, 50).unwrap().alpha(), 0);
    assert!(log.borrow().persisted.is_empty());
}

#[test]
fn inverted_zoom_range_does_not_panic() {
    init_logger();
    let config = EngineConfig {
        min_zoom: 3.0,
        max_zoom: 0.5,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());
    let mut engine: InkEngine<RasterSurface> = InkEngine::new(config, Document::new());
    engine.set_zoom(1.0);
    assert_eq!(engine.zoom(), 0.5);
    engine.zoom_in();
    engine.reset_zoom();
    assert!(engine.zoom() > 0.0);
}

#[test]
fn page_style_is_announced_and_persisted() {
    let (mut engine, log) = engine();
    assert_eq!(log.borrow().styles, vec![PageStyle::Ruled]);

    engine.set_page_style(PageStyle::Dotted);
    assert_eq!(engine.document().page_style, PageStyle::Dotted);
    assert_eq!(log.borrow().styles, vec![PageStyle::Ruled, PageStyle::Dotted]);
    assert_eq!(log.borrow().persisted, vec![(0, 1)]);

    // Unchanged style is not re-announced, and history is untouched.
    engine.set_page_style(PageStyle::Dotted);
    assert_eq!(log.borrow().styles.len(), 2);
    assert_eq!(engine.history_state(), HistoryState::default());
}

#[test]
fn background_layer_follows_style_and_pages() {
    let (mut engine, _log) = engine();
    engine.mount_background(RasterSurface::new(&SurfaceGeometry::new(1.0, 1.0, 1.0, 1.0)).unwrap());
    let rule_px = |e: &InkEngine<RasterSurface>| e.background_surface().unwrap().pixel(400, 32).unwrap().alpha();
    assert!(rule_px(&engine) > 0);
    // The red margin rule spans x 79..81.
    assert_eq!(engine.background_surface().unwrap().pixel(80, 500).unwrap().alpha(), 255);

    engine.set_page_style(PageStyle::Blank);
    assert_eq!(rule_px(&engine), 0);

    // Erasing ink never touches the background layer.
    engine.set_page_style(PageStyle::Ruled);
    engine.set_tool(Tool::Eraser);
    draw(&mut engine, &[(60.0, 500.0), (100.0, 500.0)]);
    assert_eq!(engine.background_surface().unwrap().pixel(80, 500).unwrap().alpha(), 255);

    let origin = ViewportOrigin::ZERO;
    engine.set_tool(Tool::Pen);
    engine.handle_pointer(&InputEvent::from_pointer_down(40.0, 10.0, None, 0), origin);
    engine.handle_pointer(&InputEvent::from_pointer_move(40.0, 900.0, None), origin);
    let background = engine.background_surface().unwrap();
    assert_eq!(background.height(), 2 * 1056);
    assert!(background.pixel(400, 1056 + 32).unwrap().alpha() > 0);
}

#[test]
fn hydrated_page_style_survives_commits() {
    init_logger();
    let doc = Document::new().with_page_style(PageStyle::Blank);
    let mut engine: InkEngine<RasterSurface> = InkEngine::new(EngineConfig::default(), doc);
    draw(&mut engine, &[(10.0, 10.0), (20.0, 20.0)]);
    assert_eq!(engine.into_document().page_style, PageStyle::Blank);
}
