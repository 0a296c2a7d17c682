//! Core ink data model.
//!
//! A document is an ordered list of immutable strokes plus a page count.
//! Stroke order is z-order: later strokes paint over earlier ones. All
//! coordinates are document-space (independent of zoom and device pixel
//! ratio), so the model never changes when the view does.

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Range;

/// Pressure assumed when the input device reports none (mouse, trackpad).
pub const DEFAULT_PRESSURE: f32 = 0.5;

fn default_pressure() -> f32 {
    DEFAULT_PRESSURE
}

/// Accepts a missing field, `null`, or a number.
fn pressure_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(DEFAULT_PRESSURE))
}

// ─── Point ───────────────────────────────────────────────────────────────

/// One captured pointer sample in document space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// 0.0 ..= 1.0
    #[serde(
        default = "default_pressure",
        deserialize_with = "pressure_or_default"
    )]
    pub pressure: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32, pressure: f32) -> Self {
        Self { x, y, pressure }
    }

    /// A point carrying the default pressure.
    pub const fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, DEFAULT_PRESSURE)
    }
}

// ─── Tool ────────────────────────────────────────────────────────────────

/// The drawing tool a stroke was made with. Decides compositing and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Highlighter,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Highlighter => "highlighter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pen" => Some(Tool::Pen),
            "eraser" => Some(Tool::Eraser),
            "highlighter" => Some(Tool::Highlighter),
            _ => None,
        }
    }
}

// ─── Page style ──────────────────────────────────────────────────────────

/// Background printed on every page, beneath the ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStyle {
    #[default]
    Ruled,
    Dotted,
    Blank,
}

impl PageStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStyle::Ruled => "ruled",
            PageStyle::Dotted => "dotted",
            PageStyle::Blank => "blank",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ruled" => Some(PageStyle::Ruled),
            "dotted" => Some(PageStyle::Dotted),
            "blank" => Some(PageStyle::Blank),
            _ => None,
        }
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// One committed freehand drawing action.
///
/// `color` is kept exactly as supplied (hex or CSS name) so that
/// persistence round-trips it verbatim; renderers parse it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: String,
    pub size: f32,
    pub tool: Tool,
}

impl Stroke {
    pub fn new(points: Vec<Point>, color: impl Into<String>, size: f32, tool: Tool) -> Self {
        Self {
            points,
            color: color.into(),
            size,
            tool,
        }
    }

    /// Axis-aligned bounds of the stroke's points (not including width).
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.points)
    }
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The open note: committed strokes in z-order, the page count and the
/// page background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub strokes: Vec<Stroke>,
    #[serde(default = "Document::first_page")]
    pub page_count: u32,
    #[serde(default)]
    pub page_style: PageStyle,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A blank single-page document.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            page_count: 1,
            page_style: PageStyle::default(),
        }
    }

    pub fn with_strokes(strokes: Vec<Stroke>, page_count: u32) -> Self {
        Self {
            strokes,
            page_count: page_count.max(1),
            page_style: PageStyle::default(),
        }
    }

    pub fn with_page_style(mut self, page_style: PageStyle) -> Self {
        self.page_style = page_style;
        self
    }

    /// Clamp a decoded page count of 0 up to 1.
    pub fn normalized(mut self) -> Self {
        self.page_count = self.page_count.max(1);
        self
    }

    fn first_page() -> u32 {
        1
    }

    /// Page indices, derived from the current count each time it is asked.
    pub fn pages(&self) -> Range<u32> {
        0..self.page_count
    }

    /// Total paintable height for the given page height.
    pub fn height(&self, page_height: f32) -> f32 {
        self.page_count as f32 * page_height
    }

    /// Bounds of every point across all strokes, erasers included.
    pub fn ink_bounds(&self) -> Option<Bounds> {
        self.strokes
            .iter()
            .filter_map(Stroke::bounds)
            .reduce(Bounds::union)
    }
}
