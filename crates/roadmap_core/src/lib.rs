//! Core domain logic for the learning roadmap generator.
//! This crate is the single source of truth for roadmap storage invariants.

pub mod config;
pub mod db;
pub mod generator;
pub mod logging;
pub mod medium;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use config::{GeneratorConfig, StoreConfig};
pub use generator::{GenerationError, RoadmapGenerator, TemplateGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use medium::{KeyValueMedium, MediumError, MediumResult, MemoryMedium, SqliteMedium};
pub use model::preference::Theme;
pub use model::roadmap::{
    DocumentValidationError, Progress, ProjectIdea, Resource, RoadmapDocument, RoadmapItem,
    RoadmapTiers, Tier, TopicKey,
};
pub use render::{export_file_name, render_markdown};
pub use repo::roadmap_store::{RoadmapStore, SaveMode, StoreError, StoreResult};
pub use service::roadmap_service::{OpenedRoadmap, RoadmapService, RoadmapSource, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
