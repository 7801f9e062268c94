use roadmap_core::{
    GenerationError, GeneratorConfig, MemoryMedium, RoadmapDocument, RoadmapItem, RoadmapService,
    RoadmapSource, RoadmapStore, SaveMode, ServiceError, TemplateGenerator, Theme,
};
use std::cell::Cell;

fn template_service() -> RoadmapService<MemoryMedium, TemplateGenerator> {
    RoadmapService::new(
        RoadmapStore::new(MemoryMedium::new()),
        TemplateGenerator::new(GeneratorConfig::immediate()),
    )
}

#[test]
fn open_generates_on_miss_without_saving() {
    let service = template_service();

    let opened = service.open_roadmap("  Python ").unwrap();

    assert_eq!(opened.source, RoadmapSource::Generated);
    assert_eq!(opened.document.topic, "Python");
    assert!(service.saved_roadmaps().unwrap().is_empty());
}

#[test]
fn open_prefers_saved_roadmap_with_progress() {
    let mut service = template_service();
    let generated = service.open_roadmap("Python").unwrap().document;
    service.save_roadmap(&generated).unwrap();
    service.set_item_completion("python", "i2", true).unwrap();

    let opened = service.open_roadmap("PYTHON").unwrap();

    assert_eq!(opened.source, RoadmapSource::Saved);
    assert_eq!(opened.document.completed_items, vec!["i2".to_string()]);
}

#[test]
fn blank_topic_never_reaches_generator() {
    let calls = Cell::new(0);
    let generator = |_topic: &str| -> Result<RoadmapDocument, GenerationError> {
        calls.set(calls.get() + 1);
        Err(GenerationError::Failed("unreachable".to_string()))
    };
    let service = RoadmapService::new(RoadmapStore::new(MemoryMedium::new()), generator);

    let err = service.open_roadmap("   ").unwrap_err();

    assert!(matches!(err, ServiceError::EmptyTopic));
    assert_eq!(calls.get(), 0);
}

#[test]
fn generation_failure_surfaces_once_and_keeps_saved_state() {
    let calls = Cell::new(0);
    let generator = |_topic: &str| -> Result<RoadmapDocument, GenerationError> {
        calls.set(calls.get() + 1);
        Err(GenerationError::Failed("model offline".to_string()))
    };
    let mut store = RoadmapStore::new(MemoryMedium::new());
    let mut saved = RoadmapDocument::new("Rust", "kept");
    saved.roadmap.beginner.push(RoadmapItem::new("b1", "Intro", ""));
    store.save(&saved, SaveMode::Replace).unwrap();
    let service = RoadmapService::new(store, generator);

    let err = service.open_roadmap("Haskell").unwrap_err();

    assert!(matches!(err, ServiceError::Generation(GenerationError::Failed(_))));
    assert!(err.to_string().contains("model offline"));
    assert_eq!(calls.get(), 1);
    assert_eq!(service.saved_roadmaps().unwrap(), vec![saved]);
}

#[test]
fn resaving_an_opened_roadmap_keeps_progress() {
    let mut service = template_service();
    let shown = service.open_roadmap("Swift").unwrap().document;
    service.save_roadmap(&shown).unwrap();
    service.set_item_completion("Swift", "b1", true).unwrap();

    // The shell still holds the copy it rendered before the checkbox toggle.
    service.save_roadmap(&shown).unwrap();

    let stored = service.open_roadmap("swift").unwrap().document;
    assert_eq!(stored.completed_items, vec!["b1".to_string()]);
}

#[test]
fn delete_and_toggle_theme() {
    let mut service = template_service();
    let generated = service.open_roadmap("Elm").unwrap().document;
    service.save_roadmap(&generated).unwrap();

    assert_eq!(service.delete_roadmap("ELM").unwrap(), 1);
    assert_eq!(service.delete_roadmap("ELM").unwrap(), 0);
    assert!(!service.set_item_completion("Elm", "b1", true).unwrap());

    assert_eq!(service.theme().unwrap(), Theme::Light);
    assert_eq!(service.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(service.toggle_theme().unwrap(), Theme::Light);
}
