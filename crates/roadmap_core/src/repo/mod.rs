//! Repository layer over the key-value medium.
//!
//! # Responsibility
//! - Own CRUD over the persisted roadmap collection and UI preferences.
//! - Isolate serialization details from service orchestration.
//!
//! # Invariants
//! - Writes validate documents before touching the medium.
//! - Missing topics are silent no-ops for delete and progress updates.

pub mod roadmap_store;
