//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, so the
//! browser shell only forwards `KeyboardEvent` fields.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolPen,
    ToolEraser,
    ToolHighlighter,

    // ── History ──
    Undo,
    Redo,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl ShortcutAction {
    /// Stable name handed across the wasm boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToolPen => "toolPen",
            Self::ToolEraser => "toolEraser",
            Self::ToolHighlighter => "toolHighlighter",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::ZoomReset => "zoomReset",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"="`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                // Shifted `=` on US layouts.
                "+" => Some(ShortcutAction::ZoomIn),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                _ => None,
            };
        }

        if shift || alt {
            return None;
        }

        match key {
            "p" | "P" => Some(ShortcutAction::ToolPen),
            "e" | "E" => Some(ShortcutAction::ToolEraser),
            "h" | "H" => Some(ShortcutAction::ToolHighlighter),
            _ => None,
        }
    }
}
