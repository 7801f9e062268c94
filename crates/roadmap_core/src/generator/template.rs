//! Template-based mock generator.
//!
//! Interpolates the topic into a fixed curriculum after a configurable delay
//! that stands in for a remote model call.

use super::{GenerationError, RoadmapGenerator};
use crate::config::GeneratorConfig;
use crate::model::roadmap::{ProjectIdea, Resource, RoadmapDocument, RoadmapItem, RoadmapTiers};
use log::info;
use std::time::Instant;

/// Mock generator producing the same four-per-tier curriculum for any topic.
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator {
    config: GeneratorConfig,
}

impl TemplateGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }
}

impl RoadmapGenerator for TemplateGenerator {
    fn generate(&self, topic: &str) -> Result<RoadmapDocument, GenerationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerationError::EmptyTopic);
        }

        let started_at = Instant::now();
        let delay = self.config.mock_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let document = render_template(topic);
        info!(
            "event=roadmap_generate module=generator status=ok items={} duration_ms={}",
            document.roadmap.len(),
            started_at.elapsed().as_millis()
        );
        Ok(document)
    }
}

fn render_template(t: &str) -> RoadmapDocument {
    let roadmap = RoadmapTiers {
        beginner: vec![
            RoadmapItem::new(
                "b1",
                format!("Introduction to {t}"),
                "Understand the core concepts, history, and setup.",
            ),
            RoadmapItem::new(
                "b2",
                "Basic Syntax & Structure",
                "Learn the fundamental building blocks and rules.",
            ),
            RoadmapItem::new(
                "b3",
                "Setting up the Environment",
                "Install necessary tools, IDEs, and dependencies.",
            ),
            RoadmapItem::new(
                "b4",
                "Your First Project",
                "Create a simple \"Hello World\" style application.",
            ),
        ],
        intermediate: vec![
            RoadmapItem::new(
                "i1",
                "Data Structures & Algorithms",
                format!("Deep dive into efficient data handling in {t}"),
            ),
            RoadmapItem::new(
                "i2",
                "Advanced Concepts",
                "Master classes, inheritance, or functional paradigms.",
            ),
            RoadmapItem::new(
                "i3",
                "Working with APIs",
                "Learn to fetch and manipulate external data.",
            ),
            RoadmapItem::new(
                "i4",
                "Database Integration",
                format!("Connect {t} to SQL or NoSQL databases."),
            ),
        ],
        advanced: vec![
            RoadmapItem::new(
                "a1",
                "Performance Optimization",
                format!("Techniques to make your {t} apps lightning fast."),
            ),
            RoadmapItem::new(
                "a2",
                "Security Best Practices",
                "Protect your applications from common vulnerabilities.",
            ),
            RoadmapItem::new(
                "a3",
                "Testing & Deployment",
                "Unit testing, CI/CD pipelines, and cloud hosting.",
            ),
            RoadmapItem::new(
                "a4",
                "Scalability & Architecture",
                "Designing systems that handle millions of users.",
            ),
        ],
    };

    let resources = [
        "Official Documentation".to_string(),
        format!("FreeCodeCamp {t} Course"),
        "MDN Web Docs".to_string(),
        "Stack Overflow Community".to_string(),
    ]
    .into_iter()
    .map(|title| Resource {
        title,
        url: "#".to_string(),
    })
    .collect();

    let projects = vec![
        ProjectIdea {
            title: "Personal Portfolio".to_string(),
            desc: format!("Build a showcase site using {t}."),
        },
        ProjectIdea {
            title: "Task Manager App".to_string(),
            desc: "A CRUD application to manage daily tasks.".to_string(),
        },
        ProjectIdea {
            title: "E-commerce Store".to_string(),
            desc: "Full-featured shop with cart and checkout simulations.".to_string(),
        },
    ];

    RoadmapDocument {
        topic: t.to_string(),
        overview: format!(
            "{t} is a powerful subject that opens many doors in today's tech landscape. \
             This roadmap will guide you from the basics to advanced concepts, ensuring a solid foundation."
        ),
        roadmap,
        resources,
        projects,
        completed_items: Vec::new(),
    }
}
