//! # linksuggest-core
//!
//! Core types and matching primitives for linksuggest.
//!
//! This crate defines the foundational types used across the other crates:
//! - [`Entity`] and [`ScoredEntity`] — linkable targets and their per-query scores
//! - [`Suggestion`], [`Position`], [`Span`] — typed text that may be a reference
//! - Similarity matcher ([`similarity`])
//! - Configuration ([`SuggestConfig`])
//! - Error hierarchy ([`LinkSuggestError`])

pub mod config;
pub mod entity;
pub mod error;
pub mod similarity;
pub mod suggestion;

pub use config::SuggestConfig;
pub use entity::{Entity, EntityKind, ScoredEntity};
pub use error::{LinkSuggestError, Result};
pub use suggestion::{Position, Span, Suggestion, SuggestionId};
