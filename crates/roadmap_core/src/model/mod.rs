//! Domain model for generated learning roadmaps.
//!
//! # Responsibility
//! - Define the canonical document shape shared by generator, store and UI.
//! - Keep topic identity rules in one place (`TopicKey`).
//!
//! # Invariants
//! - A roadmap is identified by its case-insensitive, trimmed topic.
//! - Item ids are unique across all tiers of one document.

pub mod preference;
pub mod roadmap;
