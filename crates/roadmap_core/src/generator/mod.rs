//! Content generation contract.
//!
//! # Responsibility
//! - Define how a topic becomes a `RoadmapDocument`.
//! - Keep the store independent of where roadmap content comes from.
//!
//! # Invariants
//! - A successful generation returns a document that passes `validate()`.
//! - Failures are reported once and never retried here.

use crate::model::roadmap::RoadmapDocument;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod template;

pub use template::TemplateGenerator;

/// Generator failure surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    EmptyTopic,
    Failed(String),
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTopic => write!(f, "cannot generate a roadmap for an empty topic"),
            Self::Failed(reason) => write!(f, "roadmap generation failed: {reason}"),
        }
    }
}

impl Error for GenerationError {}

/// Produces a roadmap document for a topic.
pub trait RoadmapGenerator {
    fn generate(&self, topic: &str) -> Result<RoadmapDocument, GenerationError>;
}

impl<F> RoadmapGenerator for F
where
    F: Fn(&str) -> Result<RoadmapDocument, GenerationError>,
{
    fn generate(&self, topic: &str) -> Result<RoadmapDocument, GenerationError> {
        self(topic)
    }
}
