//! Roadmap store over a single serialized collection blob.
//!
//! # Responsibility
//! - Provide list/find/save/delete over saved roadmaps.
//! - Apply per-item completion updates with read-modify-write persistence.
//! - Read and write the theme preference.
//!
//! # Invariants
//! - At most one document per `TopicKey`; saving a matching topic replaces
//!   the entry at its original position.
//! - Every write rewrites the whole collection under `roadmaps_key`.
//! - An unparseable collection blob reads as empty and is never surfaced.
//! - Mutating calls take `&mut self`, so one store is a single writer. Two
//!   stores over the same medium still race and the later write wins.

use crate::config::StoreConfig;
use crate::medium::{KeyValueMedium, MediumError};
use crate::model::preference::Theme;
use crate::model::roadmap::{DocumentValidationError, RoadmapDocument, TopicKey};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for roadmap persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(DocumentValidationError),
    Medium(MediumError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Medium(err) => write!(f, "roadmap storage failed: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize roadmaps: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Medium(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DocumentValidationError> for StoreError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<MediumError> for StoreError {
    fn from(value: MediumError) -> Self {
        Self::Medium(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// How `save` treats an existing entry with the same topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Overwrite the stored document entirely, including `completedItems`.
    #[default]
    Replace,
    /// Overwrite content but keep stored completions for ids still present.
    MergeProgress,
}

/// Roadmap CRUD over an injected key-value medium.
pub struct RoadmapStore<M: KeyValueMedium> {
    medium: M,
    config: StoreConfig,
}

impl<M: KeyValueMedium> RoadmapStore<M> {
    /// Creates a store using the default versioned key layout.
    pub fn new(medium: M) -> Self {
        Self::with_config(medium, StoreConfig::default())
    }

    pub fn with_config(medium: M, config: StoreConfig) -> Self {
        Self { medium, config }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Returns all saved roadmaps in insertion order.
    ///
    /// An absent key or malformed blob yields an empty list. Only a failing
    /// medium read is reported as an error.
    pub fn list_all(&self) -> StoreResult<Vec<RoadmapDocument>> {
        let Some(raw) = self.medium.get(&self.config.roadmaps_key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<RoadmapDocument>>(&raw) {
            Ok(documents) => Ok(documents),
            Err(err) => {
                warn!(
                    "event=roadmaps_load module=store status=degraded reason=malformed_blob key={} bytes={} error={}",
                    self.config.roadmaps_key,
                    raw.len(),
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    /// Finds the first roadmap whose topic matches case-insensitively.
    pub fn find_by_topic(&self, topic: &str) -> StoreResult<Option<RoadmapDocument>> {
        let key = TopicKey::new(topic);
        Ok(self
            .list_all()?
            .into_iter()
            .find(|document| key.matches(&document.topic)))
    }

    /// Saves a roadmap, replacing a same-topic entry in place or appending.
    ///
    /// The document is normalized first: topic trimmed, unknown and repeated
    /// completion ids dropped.
    ///
    /// # Errors
    /// - `Validation` when the document breaks structural invariants; the
    ///   medium is not touched.
    /// - `Medium` when the write is rejected (e.g. quota).
    pub fn save(&mut self, document: &RoadmapDocument, mode: SaveMode) -> StoreResult<()> {
        let mut document = document.clone().normalized();
        document.validate()?;

        let key = document.key();
        let mut documents = self.list_all()?;
        let existing = documents
            .iter()
            .position(|saved| key.matches(&saved.topic));

        match existing {
            Some(index) => {
                if mode == SaveMode::MergeProgress {
                    document = merge_progress(document, &documents[index]);
                }
                documents[index] = document;
            }
            None => documents.push(document),
        }

        self.write_collection(&documents)?;
        info!(
            "event=roadmap_save module=store status=ok action={} mode={:?} count={}",
            if existing.is_some() { "replace" } else { "append" },
            mode,
            documents.len()
        );
        Ok(())
    }

    /// Removes every roadmap matching `topic` and returns how many were removed.
    ///
    /// Removing an unknown topic is a no-op that still rewrites the
    /// unchanged collection.
    pub fn delete_by_topic(&mut self, topic: &str) -> StoreResult<usize> {
        let key = TopicKey::new(topic);
        let mut documents = self.list_all()?;
        let before = documents.len();
        documents.retain(|document| !key.matches(&document.topic));
        let removed = before - documents.len();

        self.write_collection(&documents)?;
        info!(
            "event=roadmap_delete module=store status=ok removed={} count={}",
            removed,
            documents.len()
        );
        Ok(removed)
    }

    /// Marks one item complete or incomplete and persists the roadmap.
    ///
    /// Returns `false` without writing when no roadmap matches `topic`. The
    /// update itself is idempotent in both directions.
    pub fn set_item_completion(
        &mut self,
        topic: &str,
        item_id: &str,
        completed: bool,
    ) -> StoreResult<bool> {
        let Some(mut document) = self.find_by_topic(topic)? else {
            debug!("event=roadmap_progress module=store status=skipped reason=topic_not_found");
            return Ok(false);
        };

        document.set_completed(item_id, completed);
        self.save(&document, SaveMode::Replace)?;
        debug!(
            "event=roadmap_progress module=store status=ok completed={} total_completed={}",
            completed,
            document.completed_items.len()
        );
        Ok(true)
    }

    /// Returns the stored theme, or the configured default when unset.
    ///
    /// Unknown stored values read as `light`.
    pub fn theme(&self) -> StoreResult<Theme> {
        Ok(self
            .medium
            .get(&self.config.theme_key)?
            .map_or(self.config.default_theme, |raw| Theme::parse_lenient(&raw)))
    }

    pub fn set_theme(&mut self, theme: Theme) -> StoreResult<()> {
        self.medium.set(&self.config.theme_key, theme.as_str())?;
        Ok(())
    }

    fn write_collection(&mut self, documents: &[RoadmapDocument]) -> StoreResult<()> {
        let payload = serde_json::to_string(documents)?;
        if let Err(err) = self.medium.set(&self.config.roadmaps_key, &payload) {
            warn!(
                "event=roadmaps_write module=store status=error bytes={} error={}",
                payload.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }
}

fn merge_progress(mut incoming: RoadmapDocument, stored: &RoadmapDocument) -> RoadmapDocument {
    let mut completed = stored
        .completed_items
        .iter()
        .filter(|id| incoming.roadmap.contains_item(id))
        .cloned()
        .collect::<Vec<_>>();
    for id in incoming.completed_items.drain(..) {
        if !completed.contains(&id) {
            completed.push(id);
        }
    }
    incoming.completed_items = completed;
    incoming
}

#[cfg(test)]
mod tests {
    use super::{merge_progress, RoadmapStore, SaveMode, StoreError};
    use crate::medium::MemoryMedium;
    use crate::model::roadmap::{RoadmapDocument, RoadmapItem};

    fn doc(topic: &str, ids: &[&str]) -> RoadmapDocument {
        let mut document = RoadmapDocument::new(topic, "overview");
        for id in ids {
            document
                .roadmap
                .beginner
                .push(RoadmapItem::new(*id, format!("step {id}"), ""));
        }
        document
    }

    #[test]
    fn merge_progress_keeps_stored_order_and_drops_removed_ids() {
        let mut stored = doc("Go", &["b1", "b2"]);
        stored.completed_items = vec!["b2".into(), "b1".into()];
        let mut incoming = doc("Go", &["b1", "b3"]);
        incoming.completed_items = vec!["b3".into(), "b1".into()];

        let merged = merge_progress(incoming, &stored);
        assert_eq!(merged.completed_items, vec!["b1".to_string(), "b3".to_string()]);
    }

    #[test]
    fn invalid_document_is_rejected_before_write() {
        let mut store = RoadmapStore::new(MemoryMedium::new());
        let err = store.save(&doc("  ", &["b1"]), SaveMode::Replace).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.list_all().unwrap().is_empty());
        assert!(store.medium().used_bytes() == 0);
    }
}
