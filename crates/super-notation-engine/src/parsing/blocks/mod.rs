//! # Block Parsing
//!
//! Phase 2 of parsing: a state machine over classified lines.
//!
//! ```text
//! AwaitingHeader -> MetadataPhase -> BodyPhase <-> { InCodeBlock, InList }
//! ```
//!
//! ## Modules
//!
//! - **`builder`**: `BlockParser` and its `State`s
//! - **`payload`**: payload grammar of individual commands (`sec=`, `img:=`, ...)
//!
//! ## Key Invariants
//!
//! - Code blocks are raw zones: no line classification or inline formatting inside
//! - Metadata entries precede the first content node
//! - A `sign:` line ends the body in every state
//! - Structural errors (declaration, unterminated code block) are fatal in
//!   both modes; lenient mode turns everything else into `Literal` nodes

pub mod builder;
pub mod payload;

pub use builder::{BlockParser, State};
