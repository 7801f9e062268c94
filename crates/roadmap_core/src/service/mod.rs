//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and generator calls into use-case level APIs.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod roadmap_service;
