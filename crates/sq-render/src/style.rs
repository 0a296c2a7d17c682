//! Per-tool paint rules.
//!
//! | tool | composite | width | color |
//! |------|-----------|-------|-------|
//! | pen | source-over | `size × (0.6 + p × 0.8)` | opaque stroke color |
//! | highlighter | multiply | `size × 3 × (0.8 + p × 0.4)` | stroke RGB at 50% alpha |
//! | eraser | destination-out | `size × 4` | alpha only |
//!
//! The same rules serve live segments and committed redraws. At the
//! default pressure (0.5) pen width equals `size` and highlighter width
//! equals `size × 3`.

use crate::surface::{CompositeMode, StrokeStyle};
use sq_core::Tool;
use sq_core::color::{Rgba, color_to_alpha};

pub const HIGHLIGHTER_ALPHA: f32 = 0.5;

pub fn stroke_width(tool: Tool, size: f32, pressure: f32) -> f32 {
    let pressure = pressure.clamp(0.0, 1.0);
    match tool {
        Tool::Pen => size * (0.6 + pressure * 0.8),
        Tool::Highlighter => size * 3.0 * (0.8 + pressure * 0.4),
        Tool::Eraser => size * 4.0,
    }
}

pub fn stroke_style(tool: Tool, color: &str, size: f32, pressure: f32) -> StrokeStyle {
    let (color, composite) = match tool {
        Tool::Pen => (color_to_alpha(color, 1.0), CompositeMode::SourceOver),
        Tool::Highlighter => (
            color_to_alpha(color, HIGHLIGHTER_ALPHA),
            CompositeMode::Multiply,
        ),
        Tool::Eraser => (Rgba::BLACK, CompositeMode::DestinationOut),
    };
    StrokeStyle {
        color,
        width: stroke_width(tool, size, pressure),
        composite,
    }
}
