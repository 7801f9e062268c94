//! Roadmap use-case service.
//!
//! # Responsibility
//! - Serve a roadmap for a topic from storage, or generate a fresh one.
//! - Route save/delete/progress/theme actions from presentation shells.
//!
//! # Invariants
//! - A failed generation or write leaves stored roadmaps unchanged.
//! - Generated roadmaps are not persisted until the caller saves them.
//! - Explicit saves carry stored progress forward (`SaveMode::MergeProgress`).

use crate::generator::{GenerationError, RoadmapGenerator};
use crate::medium::KeyValueMedium;
use crate::model::preference::Theme;
use crate::model::roadmap::RoadmapDocument;
use crate::repo::roadmap_store::{RoadmapStore, SaveMode, StoreError, StoreResult};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for roadmap use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Topic input was blank after trimming.
    EmptyTopic,
    Generation(GenerationError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTopic => write!(f, "please enter a topic"),
            Self::Generation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyTopic => None,
            Self::Generation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<GenerationError> for ServiceError {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::EmptyTopic => Self::EmptyTopic,
            other => Self::Generation(other),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Where an opened roadmap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadmapSource {
    Saved,
    Generated,
}

/// Roadmap returned by `RoadmapService::open_roadmap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedRoadmap {
    pub document: RoadmapDocument,
    pub source: RoadmapSource,
}

/// Facade combining the store with a content generator.
pub struct RoadmapService<M: KeyValueMedium, G: RoadmapGenerator> {
    store: RoadmapStore<M>,
    generator: G,
}

impl<M: KeyValueMedium, G: RoadmapGenerator> RoadmapService<M, G> {
    pub fn new(store: RoadmapStore<M>, generator: G) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &RoadmapStore<M> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RoadmapStore<M> {
        &mut self.store
    }

    /// Returns the saved roadmap for `topic`, generating one on a miss.
    ///
    /// # Errors
    /// - `EmptyTopic` for blank input; the generator is not called.
    /// - `Generation` when the generator fails. No retry is attempted.
    /// - `Store` when the medium cannot be read.
    pub fn open_roadmap(&self, topic: &str) -> Result<OpenedRoadmap, ServiceError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ServiceError::EmptyTopic);
        }

        if let Some(document) = self.store.find_by_topic(topic)? {
            info!("event=roadmap_open module=service status=ok source=saved");
            return Ok(OpenedRoadmap {
                document,
                source: RoadmapSource::Saved,
            });
        }

        match self.generator.generate(topic) {
            Ok(document) => {
                info!("event=roadmap_open module=service status=ok source=generated");
                Ok(OpenedRoadmap {
                    document,
                    source: RoadmapSource::Generated,
                })
            }
            Err(err) => {
                error!("event=roadmap_open module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Persists a roadmap, keeping progress already stored for its topic.
    pub fn save_roadmap(&mut self, document: &RoadmapDocument) -> Result<(), ServiceError> {
        self.store.save(document, SaveMode::MergeProgress)?;
        Ok(())
    }

    /// Lists saved roadmaps in insertion order.
    pub fn saved_roadmaps(&self) -> StoreResult<Vec<RoadmapDocument>> {
        self.store.list_all()
    }

    pub fn delete_roadmap(&mut self, topic: &str) -> Result<usize, ServiceError> {
        Ok(self.store.delete_by_topic(topic)?)
    }

    /// Toggles one item's completion. Returns `false` for an unsaved topic.
    pub fn set_item_completion(
        &mut self,
        topic: &str,
        item_id: &str,
        completed: bool,
    ) -> Result<bool, ServiceError> {
        Ok(self.store.set_item_completion(topic, item_id, completed)?)
    }

    pub fn theme(&self) -> StoreResult<Theme> {
        self.store.theme()
    }

    /// Flips and persists the theme, returning the new value.
    pub fn toggle_theme(&mut self) -> Result<Theme, ServiceError> {
        let next = self.store.theme()?.toggled();
        self.store.set_theme(next)?;
        Ok(next)
    }
}
