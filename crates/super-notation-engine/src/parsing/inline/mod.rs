//! # Inline Formatting
//!
//! Brace markup inside a single line of text, e.g. `Hi {b:there}`.
//!
//! ## Modules
//!
//! - **`types`**: `Span` tree, `SpanStyle`, `InlineError`, `Formatted`
//! - **`kinds`**: brace delimiters and `Opener` recognition (`{b:`, `{color=red:`)
//! - **`cursor`**: `Cursor` for char-by-char scanning
//! - **`parser`**: `format_inline()` main entry point
//!
//! Escapes take precedence: `{{b:x}}` is the literal text `{b:x}`.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{MAX_DEPTH, format_inline};
pub use types::{Formatted, InlineError, Span, SpanStyle};
