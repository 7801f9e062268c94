//! Plain-text projections of a roadmap for export.
//!
//! # Responsibility
//! - Render a roadmap with its completion checkboxes as markdown.
//! - Derive a filesystem-safe export file name from the topic.

use crate::model::roadmap::{RoadmapDocument, Tier};
use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_FILE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._+-]+").expect("valid file name regex"));

const FALLBACK_FILE_STEM: &str = "untitled";

/// Renders the roadmap as a markdown checklist.
pub fn render_markdown(document: &RoadmapDocument) -> String {
    let progress = document.progress();
    let mut lines = vec![format!("# {}", document.topic), String::new()];
    if !document.overview.is_empty() {
        lines.push(document.overview.clone());
        lines.push(String::new());
    }
    lines.push(format!(
        "Progress: {}/{} ({}%)",
        progress.completed,
        progress.total,
        progress.percent()
    ));

    for tier in Tier::ALL {
        let items = document.roadmap.items(tier);
        if items.is_empty() {
            continue;
        }
        push_section(&mut lines, tier_heading(tier));
        lines.extend(items.iter().map(|item| {
            let mark = if document.is_completed(&item.id) { 'x' } else { ' ' };
            if item.desc.is_empty() {
                format!("- [{mark}] {}", item.title)
            } else {
                format!("- [{mark}] {}: {}", item.title, item.desc)
            }
        }));
    }

    if !document.resources.is_empty() {
        push_section(&mut lines, "Resources");
        lines.extend(
            document
                .resources
                .iter()
                .map(|resource| format!("- [{}]({})", resource.title, resource.url)),
        );
    }

    if !document.projects.is_empty() {
        push_section(&mut lines, "Projects");
        lines.extend(
            document
                .projects
                .iter()
                .map(|project| format!("- **{}**: {}", project.title, project.desc)),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Returns `<topic>-roadmap.md` with unsafe characters collapsed to `-`.
pub fn export_file_name(topic: &str) -> String {
    let replaced = UNSAFE_FILE_CHARS_RE.replace_all(topic.trim(), "-");
    let stem = replaced.trim_matches('-');
    let stem = if stem.is_empty() { FALLBACK_FILE_STEM } else { stem };
    format!("{stem}-roadmap.md")
}

fn push_section(lines: &mut Vec<String>, heading: &str) {
    lines.push(String::new());
    lines.push(format!("## {heading}"));
    lines.push(String::new());
}

fn tier_heading(tier: Tier) -> &'static str {
    match tier {
        Tier::Beginner => "Beginner",
        Tier::Intermediate => "Intermediate",
        Tier::Advanced => "Advanced",
    }
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, render_markdown};
    use crate::model::roadmap::{ProjectIdea, Resource, RoadmapDocument, RoadmapItem};

    #[test]
    fn markdown_marks_completed_items() {
        let mut document = RoadmapDocument::new("Rust", "Ownership first.");
        document
            .roadmap
            .beginner
            .push(RoadmapItem::new("b1", "Intro", "Install rustup."));
        document
            .roadmap
            .advanced
            .push(RoadmapItem::new("a1", "Unsafe", ""));
        document.completed_items.push("b1".to_string());

        let markdown = render_markdown(&document);
        assert!(markdown.starts_with("# Rust\n"));
        assert!(markdown.contains("Progress: 1/2 (50%)"));
        assert!(markdown.contains("- [x] Intro: Install rustup."));
        assert!(markdown.contains("- [ ] Unsafe\n"));
        assert!(!markdown.contains("## Intermediate"));
    }

    #[test]
    fn markdown_sections_are_separated_by_blank_lines() {
        let mut document = RoadmapDocument::new("Go", "");
        document
            .roadmap
            .intermediate
            .push(RoadmapItem::new("i1", "Channels", ""));
        document.resources.push(Resource {
            title: "Tour".to_string(),
            url: "#".to_string(),
        });
        document.projects.push(ProjectIdea {
            title: "CLI".to_string(),
            desc: "Build one.".to_string(),
        });

        assert_eq!(
            render_markdown(&document),
            "# Go\n\nProgress: 0/1 (0%)\n\n## Intermediate\n\n- [ ] Channels\n\n\
             ## Resources\n\n- [Tour](#)\n\n## Projects\n\n- **CLI**: Build one.\n"
        );
    }

    #[test]
    fn export_file_name_sanitizes_topic() {
        assert_eq!(export_file_name("C / C++ "), "C-C++-roadmap.md");
        assert_eq!(export_file_name("Node.js"), "Node.js-roadmap.md");
        assert_eq!(export_file_name("???"), "untitled-roadmap.md");
    }
}
