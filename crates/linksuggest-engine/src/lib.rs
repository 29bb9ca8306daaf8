//! # linksuggest-engine
//!
//! Turns keystrokes into ranked link suggestions.
//!
//! Pipeline for one cycle:
//! 1. [`Extractor`] walks backward from the cursor and queries the name index
//! 2. [`reconcile`] gives each entity one owner, drops repeated spans, ranks
//! 3. [`Session`] keeps the result across keystrokes and publishes highlights
//!
//! The host editor and renderer are reached only through [`EditorHost`]
//! and [`HighlightSink`].

pub mod extractor;
pub mod host;
pub mod reconciler;
pub mod session;

pub use extractor::Extractor;
pub use host::{EditorHost, HighlightSet, HighlightSink, TextBuffer};
pub use reconciler::{make_entities_unique, make_suggestions_unique, reconcile};
pub use session::Session;
