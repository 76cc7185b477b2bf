pub mod clipboard;
pub mod editor;
pub mod editor_display;
pub mod error;
pub mod keys;
pub mod logging;
pub mod outline;
pub mod render;
pub mod settings;
pub mod share;
pub mod textarea;
pub mod theme;

pub use error::{Error, Result};
pub use outline::{Item, Node, parse};
pub use render::{TreeConfig, render};
