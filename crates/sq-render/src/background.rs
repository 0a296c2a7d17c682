//! Page background layer: ruled lines, dot grid, or nothing.
//!
//! The background lives on its own surface beneath the ink so that
//! destination-out eraser strokes never cut through it. It depends only
//! on page style, page size and page count.

use crate::surface::{CompositeMode, StrokeStyle};
use kurbo::{BezPath, Circle, Shape};
use sq_core::{PageStyle, Rgba};

/// Vertical distance between ruled lines.
pub const RULE_SPACING: f32 = 32.0;
/// X position of the red margin rule.
pub const MARGIN_RULE_X: f32 = 80.0;
/// Pitch of the dot grid, both axes.
pub const DOT_SPACING: f32 = 24.0;

const RULE_COLOR: Rgba = Rgba::opaque(0xE5, 0xE7, 0xEB);
const MARGIN_RULE_COLOR: Rgba = Rgba::opaque(0xFC, 0xA5, 0xA5);
const DOT_COLOR: Rgba = Rgba::opaque(0xC8, 0xC8, 0xC8);
const DOT_RADIUS: f64 = 1.0;

fn rule_style(color: Rgba, width: f32) -> StrokeStyle {
    StrokeStyle {
        color,
        width,
        composite: CompositeMode::SourceOver,
    }
}

/// Paths for every page's background, top to bottom.
pub fn page_background(
    style: PageStyle,
    page_width: f32,
    page_height: f32,
    page_count: u32,
) -> Vec<(BezPath, StrokeStyle)> {
    match style {
        PageStyle::Blank => Vec::new(),
        PageStyle::Ruled => ruled(page_width, page_height, page_count),
        PageStyle::Dotted => dotted(page_width, page_height, page_count),
    }
}

fn ruled(page_width: f32, page_height: f32, page_count: u32) -> Vec<(BezPath, StrokeStyle)> {
    let (width, height) = (page_width as f64, page_height as f64);
    let spacing = RULE_SPACING as f64;
    let mut rules = BezPath::new();
    for page in 0..page_count {
        let top = page as f64 * height;
        let mut y = spacing;
        while y < height {
            rules.move_to((0.0, top + y));
            rules.line_to((width, top + y));
            y += spacing;
        }
    }
    let mut margin = BezPath::new();
    let x = MARGIN_RULE_X as f64;
    margin.move_to((x, 0.0));
    margin.line_to((x, height * page_count as f64));

    vec![
        (rules, rule_style(RULE_COLOR, 1.0)),
        (margin, rule_style(MARGIN_RULE_COLOR, 2.0)),
    ]
}

/// One dot centred in each grid cell, restarting at every page top.
fn dotted(page_width: f32, page_height: f32, page_count: u32) -> Vec<(BezPath, StrokeStyle)> {
    let (width, height) = (page_width as f64, page_height as f64);
    let spacing = DOT_SPACING as f64;
    let mut dots = BezPath::new();
    for page in 0..page_count {
        let top = page as f64 * height;
        let mut y = spacing / 2.0;
        while y < height {
            let mut x = spacing / 2.0;
            while x < width {
                // A half-radius ring stroked at one radius fills the disc.
                dots.extend(Circle::new((x, top + y), DOT_RADIUS / 2.0).path_elements(0.05));
                x += spacing;
            }
            y += spacing;
        }
    }
    vec![(dots, rule_style(DOT_COLOR, DOT_RADIUS as f32))]
}
