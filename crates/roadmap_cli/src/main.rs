//! Command-line shell over `roadmap_core`.
//!
//! # Responsibility
//! - Render roadmaps and dispatch open/save/delete/progress/theme actions.
//! - Resolve the SQLite database path and optional file logging.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use roadmap_core::db::open_db;
use roadmap_core::{
    export_file_name, init_logging, render_markdown, GeneratorConfig, KeyValueMedium,
    RoadmapGenerator, RoadmapService, RoadmapSource, RoadmapStore, SqliteMedium,
    TemplateGenerator,
};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "roadmap.sqlite3";

#[derive(Parser)]
#[command(name = "roadmap", version, about = "Generate and track learning roadmaps")]
struct Cli {
    /// SQLite database path (defaults to a file in the temp directory)
    #[arg(long, global = true, env = "ROADMAP_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "ROADMAP_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Simulated generation delay in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the saved roadmap for a topic, or generate a new one
    Open {
        topic: String,

        /// Persist the roadmap after generating it
        #[arg(long)]
        save: bool,
    },

    /// List saved roadmaps with their progress
    List,

    /// Mark an item of a saved roadmap as completed
    Complete {
        topic: String,
        item_id: String,

        /// Clear the completion mark instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a saved roadmap
    Delete {
        topic: String,

        /// Skip the confirmation requirement
        #[arg(short, long)]
        yes: bool,
    },

    /// Write a saved or generated roadmap to a markdown file
    Export {
        topic: String,

        /// Output directory (defaults to current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the theme preference, optionally toggling it first
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| roadmap_core::default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME));
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open roadmap database `{}`", db_path.display()))?;

    let generator_config = cli
        .delay_ms
        .map_or_else(GeneratorConfig::from_env, |mock_delay_ms| GeneratorConfig {
            mock_delay_ms,
        });
    let mut service = RoadmapService::new(
        RoadmapStore::new(SqliteMedium::new(&conn)),
        TemplateGenerator::new(generator_config),
    );

    match cli.command {
        Commands::Open { topic, save } => {
            if cli.delay_ms != Some(0) {
                eprintln!("Opening roadmap for \"{}\"...", topic.trim());
            }
            let opened = service.open_roadmap(&topic)?;
            print!("{}", render_markdown(&opened.document));
            match (opened.source, save) {
                (RoadmapSource::Generated, true) => {
                    service.save_roadmap(&opened.document)?;
                    println!("\nRoadmap saved!");
                }
                (RoadmapSource::Generated, false) => {
                    println!("\n(not saved; re-run with --save to keep it)");
                }
                (RoadmapSource::Saved, _) => {
                    info!("event=cli_open module=cli status=ok source=saved");
                }
            }
        }
        Commands::List => {
            let saved = service.saved_roadmaps()?;
            if saved.is_empty() {
                println!("No saved roadmaps yet.");
            }
            for document in saved {
                let progress = document.progress();
                println!(
                    "{}\t{}/{} ({}%)",
                    document.topic,
                    progress.completed,
                    progress.total,
                    progress.percent()
                );
            }
        }
        Commands::Complete {
            topic,
            item_id,
            undo,
        } => {
            println!("{}", complete_item(&mut service, &topic, &item_id, !undo)?);
        }
        Commands::Delete { topic, yes } => {
            if !yes {
                bail!("refusing to delete \"{}\" without --yes", topic.trim());
            }
            let removed = service.delete_roadmap(&topic)?;
            println!("Deleted {removed} roadmap(s).");
        }
        Commands::Export { topic, out } => {
            let opened = service.open_roadmap(&topic)?;
            let dir = out.unwrap_or_else(|| PathBuf::from("."));
            let path = dir.join(export_file_name(&opened.document.topic));
            std::fs::write(&path, render_markdown(&opened.document))
                .with_context(|| format!("could not export roadmap to `{}`", path.display()))?;
            println!("Exported {}", path.display());
        }
        Commands::Theme { toggle } => {
            let theme = if toggle {
                service.toggle_theme()?
            } else {
                service.theme()?
            };
            println!("{theme}");
        }
    }

    Ok(())
}

/// Marks or clears one item and describes the resulting progress.
///
/// Ids the saved roadmap does not contain are reported as ignored.
fn complete_item<M: KeyValueMedium, G: RoadmapGenerator>(
    service: &mut RoadmapService<M, G>,
    topic: &str,
    item_id: &str,
    completed: bool,
) -> Result<String> {
    let Some(document) = service.store().find_by_topic(topic)? else {
        bail!("no saved roadmap for \"{}\"", topic.trim());
    };
    if !document.roadmap.contains_item(item_id) {
        let progress = document.progress();
        return Ok(format!(
            "{item_id} is not an item of \"{}\"; ignored. progress {}/{} ({}%)",
            document.topic,
            progress.completed,
            progress.total,
            progress.percent()
        ));
    }

    service.set_item_completion(topic, item_id, completed)?;
    let progress = service
        .store()
        .find_by_topic(topic)?
        .map(|document| document.progress())
        .context("roadmap disappeared while updating progress")?;
    Ok(format!(
        "{item_id} {}; progress {}/{} ({}%)",
        if completed { "completed" } else { "cleared" },
        progress.completed,
        progress.total,
        progress.percent()
    ))
}
