//! HTML output for parsed documents.

mod html;
mod options;
mod style;

pub use html::{HtmlRenderer, render, render_spans};
pub use options::RenderOptions;
pub use style::DEFAULT_CSS;
