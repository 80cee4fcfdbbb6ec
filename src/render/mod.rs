//! Render layer: JSON values to nested list markup, cards, and the results area.
//!
//! This module knows nothing about HTTP or the API envelope. It owns:
//! - Renderable value tree (tagged variant built from parsed JSON)
//! - Markup/text renderers for that tree
//! - Cards + the results area they are mounted into
//! - The standalone HTML page wrapper

pub mod card;
pub mod html;
pub mod markup;
pub mod value;

pub use card::{Card, ResultsArea};
pub use html::render_page;
pub use markup::{escape, render, render_text};
pub use value::Renderable;
