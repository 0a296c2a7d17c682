pub mod engine;
pub mod input;
pub mod interaction;
pub mod observer;
pub mod shortcuts;

pub use engine::{InkEngine, PALETTE, PEN_SIZES, ToolSettings};
pub use input::{InputEvent, PointerButton};
pub use interaction::{Gesture, InteractionController, InteractionState};
pub use observer::{CallbackObserver, EngineObserver};
pub use shortcuts::{ShortcutAction, ShortcutMap};
