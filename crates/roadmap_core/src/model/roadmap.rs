//! Roadmap document model.
//!
//! # Responsibility
//! - Define the persisted `RoadmapDocument` shape and its JSON wire names.
//! - Provide completion helpers and pre-save validation/normalization.
//!
//! # Invariants
//! - `topic` is non-empty after trimming.
//! - Every `RoadmapItem.id` is unique across beginner/intermediate/advanced.
//! - `completed_items` only names ids present in the tiers once normalized.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Normalized lookup key derived from a display topic.
///
/// Comparison is trimmed and lower-cased, so `" Rust "`, `"rust"` and
/// `"RUST"` address the same stored roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicKey(String);

impl TopicKey {
    pub fn new(topic: &str) -> Self {
        Self(topic.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether `topic` normalizes to this key.
    pub fn matches(&self, topic: &str) -> bool {
        self.0 == topic.trim().to_lowercase()
    }
}

impl Display for TopicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Proficiency tier of a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
}

impl Tier {
    /// All tiers in display order.
    pub const ALL: [Tier; 3] = [Tier::Beginner, Tier::Intermediate, Tier::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One learning step with a stable id used for completion tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

impl RoadmapItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            desc: desc.into(),
        }
    }
}

/// The three ordered tiers of a roadmap.
///
/// Missing tiers deserialize as empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapTiers {
    #[serde(default)]
    pub beginner: Vec<RoadmapItem>,
    #[serde(default)]
    pub intermediate: Vec<RoadmapItem>,
    #[serde(default)]
    pub advanced: Vec<RoadmapItem>,
}

impl RoadmapTiers {
    pub fn items(&self, tier: Tier) -> &[RoadmapItem] {
        match tier {
            Tier::Beginner => &self.beginner,
            Tier::Intermediate => &self.intermediate,
            Tier::Advanced => &self.advanced,
        }
    }

    /// Iterates items of every tier in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &RoadmapItem)> + '_ {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.items(tier).iter().map(move |item| (tier, item)))
    }

    pub fn len(&self) -> usize {
        self.beginner.len() + self.intermediate.len() + self.advanced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.iter().any(|(_, item)| item.id == item_id)
    }
}

/// Display-only learning resource link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Display-only suggested practice project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

/// Generated curriculum for one topic, plus its completion state.
///
/// Serialized with camelCase field names (`completedItems`) so stored blobs
/// stay readable by browser-side shells sharing the same layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDocument {
    /// Display-cased topic. Identity is derived through `TopicKey`.
    pub topic: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub roadmap: RoadmapTiers,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub projects: Vec<ProjectIdea>,
    /// Completed item ids in the order they were checked.
    #[serde(default)]
    pub completed_items: Vec<String>,
}

impl RoadmapDocument {
    /// Creates a document with empty tiers, resources and progress.
    pub fn new(topic: impl Into<String>, overview: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            overview: overview.into(),
            roadmap: RoadmapTiers::default(),
            resources: Vec::new(),
            projects: Vec::new(),
            completed_items: Vec::new(),
        }
    }

    pub fn key(&self) -> TopicKey {
        TopicKey::new(&self.topic)
    }

    pub fn is_completed(&self, item_id: &str) -> bool {
        self.completed_items.iter().any(|id| id == item_id)
    }

    /// Adds or removes `item_id` from the completed set.
    ///
    /// Idempotent in both directions. Returns `true` when the set changed.
    pub fn set_completed(&mut self, item_id: &str, completed: bool) -> bool {
        if completed {
            if self.is_completed(item_id) {
                return false;
            }
            self.completed_items.push(item_id.to_string());
            true
        } else {
            let before = self.completed_items.len();
            self.completed_items.retain(|id| id != item_id);
            before != self.completed_items.len()
        }
    }

    /// Checks structural invariants required before persistence.
    ///
    /// # Errors
    /// - `EmptyTopic` when the topic is blank after trimming.
    /// - `EmptyItemId` when any item has a blank id.
    /// - `DuplicateItemId` when two items share an id, across any tiers.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if self.topic.trim().is_empty() {
            return Err(DocumentValidationError::EmptyTopic);
        }

        let mut seen = HashSet::new();
        for (tier, item) in self.roadmap.iter() {
            if item.id.trim().is_empty() {
                return Err(DocumentValidationError::EmptyItemId { tier });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(DocumentValidationError::DuplicateItemId(item.id.clone()));
            }
        }

        Ok(())
    }

    /// Returns a copy with trimmed topic and clamped completion state.
    ///
    /// Completed ids that no longer name an item are dropped silently, and
    /// repeated ids collapse to their first occurrence.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.topic.trim();
        if trimmed.len() != self.topic.len() {
            self.topic = trimmed.to_string();
        }

        let mut seen = HashSet::new();
        let roadmap = &self.roadmap;
        self.completed_items
            .retain(|id| roadmap.contains_item(id) && seen.insert(id.clone()));
        self
    }

    /// Counts completed items against the current tiers.
    pub fn progress(&self) -> Progress {
        let completed = self
            .roadmap
            .iter()
            .filter(|(_, item)| self.is_completed(&item.id))
            .count();
        Progress {
            completed,
            total: self.roadmap.len(),
        }
    }
}

/// Completion summary for one roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Whole-number percentage, rounded down. Empty roadmaps report 0.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

/// Structural validation failures for `RoadmapDocument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    EmptyTopic,
    EmptyItemId { tier: Tier },
    DuplicateItemId(String),
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTopic => write!(f, "roadmap topic cannot be empty"),
            Self::EmptyItemId { tier } => write!(f, "{tier} tier contains an item with empty id"),
            Self::DuplicateItemId(id) => write!(f, "duplicate roadmap item id `{id}`"),
        }
    }
}

impl Error for DocumentValidationError {}
