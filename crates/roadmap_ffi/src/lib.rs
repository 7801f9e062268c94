//! Flutter-facing bindings for `roadmap_core`.

pub mod api;
