//! FFI use-case API for UI shells.
//!
//! # Responsibility
//! - Expose roadmap open/save/delete/progress/theme actions to Dart via FRB.
//! - Carry roadmap documents across the boundary as JSON strings.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures come back as envelopes with `ok = false` and a message; shells
//!   show one notification and keep their current state.

use log::error;
use roadmap_core::db::open_db;
use roadmap_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, GeneratorConfig,
    RoadmapDocument, RoadmapService, RoadmapSource, RoadmapStore, SqliteMedium,
    TemplateGenerator,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "roadmap_ffi.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type SqliteRoadmapService<'conn> = RoadmapService<SqliteMedium<'conn>, TemplateGenerator>;

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Same `level + log_dir` is idempotent; a different one is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Roadmap payload returned by `roadmap_open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapResponse {
    /// Whether a roadmap was loaded or generated.
    pub ok: bool,
    /// Serialized `RoadmapDocument` (camelCase fields) on success.
    pub document_json: Option<String>,
    /// Whether the roadmap was loaded from saved storage.
    pub from_saved: bool,
    /// Notification text for the shell, including the failure reason.
    pub message: String,
}

impl RoadmapResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            document_json: None,
            from_saved: false,
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the action reached storage successfully.
    pub ok: bool,
    /// Notification text; for `theme_toggle` the new theme value.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Sidebar entry for one saved roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRoadmapItem {
    /// Topic as saved (trimmed, original casing).
    pub topic: String,
    /// Number of completed item ids.
    pub completed: u32,
    /// Number of items across all tiers.
    pub total: u32,
}

/// Response envelope for the saved-roadmap sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRoadmapsResponse {
    /// `false` when storage could not be opened or read.
    pub ok: bool,
    /// Saved roadmaps in insertion order (empty on failure).
    pub items: Vec<SavedRoadmapItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Loads the saved roadmap for `topic` or generates one.
///
/// # FFI contract
/// - Async call: generation sleeps for the configured mock delay, so FRB
///   runs it off the UI thread.
/// - Never panics.
/// - Generated roadmaps are not persisted; `from_saved` tells them apart.
pub fn roadmap_open(topic: String) -> RoadmapResponse {
    let result = with_service(|service| {
        let opened = service.open_roadmap(&topic).map_err(|err| err.to_string())?;
        let json = serde_json::to_string(&opened.document).map_err(|err| err.to_string())?;
        Ok((json, opened.source))
    });

    match result {
        Ok((json, source)) => RoadmapResponse {
            ok: true,
            document_json: Some(json),
            from_saved: source == RoadmapSource::Saved,
            message: match source {
                RoadmapSource::Saved => "Loaded saved roadmap.".to_string(),
                RoadmapSource::Generated => "Roadmap generated.".to_string(),
            },
        },
        Err(err) => RoadmapResponse::failure(format!("roadmap_open failed: {err}")),
    }
}

/// Saves a roadmap given as JSON, keeping stored progress for its topic.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Malformed JSON, a blank topic and quota failures return `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_save(document_json: String) -> ActionResponse {
    let document = match serde_json::from_str::<RoadmapDocument>(&document_json) {
        Ok(document) => document,
        Err(err) => return ActionResponse::failure(format!("roadmap_save failed: {err}")),
    };

    match with_service(|service| service.save_roadmap(&document).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Roadmap saved!"),
        Err(err) => ActionResponse::failure(format!("roadmap_save failed: {err}")),
    }
}

/// Lists saved roadmaps with their progress.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Storage failures return `ok = false` instead of an empty sidebar.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_list() -> SavedRoadmapsResponse {
    list_saved_at(&resolve_db_path())
}

/// Deletes a saved roadmap. The shell confirms with the user beforehand.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Deleting an unknown topic is `ok`.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_delete(topic: String) -> ActionResponse {
    match with_service(|service| service.delete_roadmap(&topic).map_err(|err| err.to_string())) {
        Ok(0) => ActionResponse::success("Nothing to delete."),
        Ok(_) => ActionResponse::success("Roadmap deleted."),
        Err(err) => ActionResponse::failure(format!("roadmap_delete failed: {err}")),
    }
}

/// Sets one item's completion on a saved roadmap.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - An unsaved topic is not an error; the response is `ok` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_set_item_completion(topic: String, item_id: String, completed: bool) -> ActionResponse {
    match with_service(|service| {
        service
            .set_item_completion(&topic, &item_id, completed)
            .map_err(|err| err.to_string())
    }) {
        Ok(true) => ActionResponse::success("Progress updated."),
        Ok(false) => ActionResponse::success("Roadmap is not saved; progress not stored."),
        Err(err) => ActionResponse::failure(format!("roadmap_set_item_completion failed: {err}")),
    }
}

/// Returns the stored theme (`light` or `dark`).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; storage errors and unknown stored values read as `light`.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> String {
    with_service(|service| service.theme().map_err(|err| err.to_string()))
        .map(|theme| theme.as_str().to_string())
        .unwrap_or_else(|_| "light".to_string())
}

/// Flips and persists the theme, returning the new value.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `message` carries the new theme on success.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> ActionResponse {
    match with_service(|service| service.toggle_theme().map_err(|err| err.to_string())) {
        Ok(theme) => ActionResponse::success(theme.as_str()),
        Err(err) => ActionResponse::failure(format!("theme_toggle failed: {err}")),
    }
}

fn list_saved_at(db_path: &Path) -> SavedRoadmapsResponse {
    match with_service_at(db_path, |service| {
        service.saved_roadmaps().map_err(|err| err.to_string())
    }) {
        Ok(documents) => {
            let items: Vec<SavedRoadmapItem> = documents
                .into_iter()
                .map(|document| {
                    let progress = document.progress();
                    SavedRoadmapItem {
                        topic: document.topic,
                        completed: u32::try_from(progress.completed).unwrap_or(u32::MAX),
                        total: u32::try_from(progress.total).unwrap_or(u32::MAX),
                    }
                })
                .collect();
            let message = if items.is_empty() {
                "No saved roadmaps yet.".to_string()
            } else {
                format!("Found {} saved roadmap(s).", items.len())
            };
            SavedRoadmapsResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => SavedRoadmapsResponse {
            ok: false,
            items: Vec::new(),
            message: format!("roadmap_list failed: {err}"),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ROADMAP_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_service<T>(
    f: impl FnOnce(&mut SqliteRoadmapService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    with_service_at(&resolve_db_path(), f)
}

fn with_service_at<T>(
    db_path: &Path,
    f: impl FnOnce(&mut SqliteRoadmapService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| {
        error!("event=ffi_call module=ffi status=error error_code=db_open_failed error={err}");
        format!("roadmap DB open failed: {err}")
    })?;
    let mut service = RoadmapService::new(
        RoadmapStore::new(SqliteMedium::new(&conn)),
        TemplateGenerator::new(GeneratorConfig::from_env()),
    );
    f(&mut service)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, list_saved_at, roadmap_delete, roadmap_list, roadmap_open,
        roadmap_save, roadmap_set_item_completion, theme_get,
    };
    use roadmap_core::{GeneratorConfig, RoadmapDocument, RoadmapGenerator, TemplateGenerator};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn save_then_open_returns_saved_roadmap_with_progress() {
        let topic = unique_token("ffi-save");
        let document = TemplateGenerator::new(GeneratorConfig::immediate())
            .generate(&topic)
            .expect("template generation");
        let json = serde_json::to_string(&document).expect("serialize");

        let saved = roadmap_save(json);
        assert!(saved.ok, "{}", saved.message);
        let updated = roadmap_set_item_completion(topic.to_uppercase(), "b2".to_string(), true);
        assert!(updated.ok, "{}", updated.message);

        let opened = roadmap_open(topic.clone());
        assert!(opened.ok, "{}", opened.message);
        assert!(opened.from_saved);
        let loaded: RoadmapDocument =
            serde_json::from_str(opened.document_json.as_deref().expect("document json"))
                .expect("deserialize");
        assert_eq!(loaded.completed_items, vec!["b2".to_string()]);

        let listed = roadmap_list();
        assert!(listed.ok, "{}", listed.message);
        let entry = listed
            .items
            .iter()
            .find(|item| item.topic == topic)
            .expect("saved roadmap should be listed");
        assert_eq!((entry.completed, entry.total), (1, 12));

        assert!(roadmap_delete(topic.clone()).ok);
        assert!(roadmap_list().items.iter().all(|item| item.topic != topic));
    }

    #[test]
    fn list_reports_unopenable_db_instead_of_empty_sidebar() {
        let dir = tempfile::tempdir().expect("temp dir");

        let response = list_saved_at(dir.path());

        assert!(!response.ok);
        assert!(response.items.is_empty());
        assert!(response.message.starts_with("roadmap_list failed: roadmap DB open failed"));
    }

    #[test]
    fn list_on_fresh_db_is_ok_and_empty() {
        let dir = tempfile::tempdir().expect("temp dir");

        let response = list_saved_at(&dir.path().join("roadmaps.sqlite3"));

        assert!(response.ok, "{}", response.message);
        assert!(response.items.is_empty());
        assert_eq!(response.message, "No saved roadmaps yet.");
    }

    #[test]
    fn save_rejects_malformed_json_and_blank_topic() {
        let malformed = roadmap_save("{".to_string());
        assert!(!malformed.ok);

        let blank = roadmap_save(r#"{"topic":"  "}"#.to_string());
        assert!(!blank.ok);
        assert!(blank.message.contains("topic"));
    }

    #[test]
    fn completion_on_unsaved_topic_is_not_an_error() {
        let response =
            roadmap_set_item_completion(unique_token("ffi-missing"), "b1".to_string(), true);
        assert!(response.ok);
    }

    #[test]
    fn theme_is_light_or_dark() {
        let theme = theme_get();
        assert!(theme == "light" || theme == "dark");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
