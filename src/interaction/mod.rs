//! Per-panel interaction: input events in, render effects out.

mod input;
mod session;

pub use input::{InputEvent, Key, KeyCommand, PointerButton};
pub use session::{ClickSession, CursorState, SessionKey};
