//! Read-only views of a board: the debug text and the markup document.

mod debug;
mod markup;

pub use debug::render_debug_text;
pub use markup::{MarkupDocument, MarkupNode};
