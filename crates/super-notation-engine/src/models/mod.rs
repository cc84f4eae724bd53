pub mod document;

pub use document::{ContentNode, Document, ListStyle, MetaEntry, Title};
