//! Terminal side of the live view: session setup, chart drawing, key handling.

pub mod chart;
pub mod keys;
pub mod terminal;

pub use chart::{Chart, ChartRenderer, TerminalChart};
pub use keys::{handle_key, spawn_listener, KeyAction};
pub use terminal::TerminalSession;
