//! Stroke color parsing.
//!
//! Strokes store their color as the string the UI supplied. Both paint
//! paths (live feedback and full redraw) resolve it through
//! [`color_to_alpha`], so the two can never disagree about a color.

/// 8-bit RGB with a float alpha, the shape Canvas2D `rgba()` expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 ..= 1.0
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (leading `#` optional)
    /// or a CSS named color.
    pub fn parse(color: &str) -> Option<Self> {
        let trimmed = color.trim();
        named(trimmed).or_else(|| from_hex(trimmed))
    }

    /// CSS `rgba(r, g, b, a)` string.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Resolve a stored stroke color and force its alpha.
///
/// Unparseable colors fall back to black; the UI is responsible for only
/// supplying valid ones.
pub fn color_to_alpha(color: &str, alpha: f32) -> Rgba {
    let rgba = Rgba::parse(color).unwrap_or_else(|| {
        log::debug!("unparseable stroke color {color:?}, using black");
        Rgba::BLACK
    });
    rgba.with_alpha(alpha.clamp(0.0, 1.0))
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn from_hex(hex: &str) -> Option<Rgba> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    let bytes = hex.as_bytes();
    let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
    let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

    let (r, g, b, a) = match bytes.len() {
        3 => (short(0)?, short(1)?, short(2)?, 255),
        4 => (short(0)?, short(1)?, short(2)?, short(3)?),
        6 => (long(0)?, long(2)?, long(4)?, 255),
        8 => (long(0)?, long(2)?, long(4)?, long(6)?),
        _ => return None,
    };
    Some(Rgba {
        r,
        g,
        b,
        a: a as f32 / 255.0,
    })
}

fn named(name: &str) -> Option<Rgba> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "aqua" | "cyan" => (0, 255, 255),
        "pink" => (255, 192, 203),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "navy" => (0, 0, 128),
        "olive" => (128, 128, 0),
        "teal" => (0, 128, 128),
        "transparent" => return Some(Rgba::BLACK.with_alpha(0.0)),
        _ => return None,
    };
    Some(Rgba::opaque(rgb.0, rgb.1, rgb.2))
}
