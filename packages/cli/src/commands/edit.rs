use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{EditSession, Intent, Outcome};
use pagesmith_model::{load_config, save_config};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// JSON array of intents to replay
    pub script: PathBuf,

    /// Publish the draft after the script finishes
    #[arg(short, long)]
    pub publish: bool,

    /// Also write the final draft to this file
    #[arg(long)]
    pub draft_out: Option<PathBuf>,
}

pub fn edit(args: EditArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let site_path = config.site_path(cwd);
    let site = load_config(&site_path)
        .with_context(|| format!("Failed to load {}", site_path.display()))?;

    let script_path = cwd.join(&args.script);
    let source = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let intents: Vec<Intent> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid intent script {}", script_path.display()))?;

    println!(
        "{} {} intent(s) from {}",
        "✏️".bright_blue(),
        intents.len(),
        args.script.display()
    );

    let mut session = EditSession::new(site.clone());
    for (index, intent) in intents.into_iter().enumerate() {
        let name = intent.name();
        let outcome = session
            .dispatch(intent)
            .with_context(|| format!("Intent #{} ({}) failed", index + 1, name))?;
        println!("  {} {}{}", "✓".green(), name, describe(&outcome));
    }

    if let Some(request) = session.pending_delete() {
        println!(
            "  {} Unconfirmed delete of {} left untouched",
            "⚠️".yellow(),
            request.block_id
        );
    }

    if args.publish {
        session.publish();
    }

    if let Some(path) = &args.draft_out {
        let path = cwd.join(path);
        save_config(&path, session.draft())?;
        println!("  {} Wrote draft to {}", "✓".green(), path.display());
    }

    if session.live() != &site {
        save_config(&site_path, session.live())?;
        println!("{} Published to {}", "✨".green(), site_path.display());
    } else if session.is_dirty() {
        println!(
            "{} Draft has unpublished edits; add a publish intent or pass --publish",
            "⚠️".yellow()
        );
    } else {
        println!("Nothing changed");
    }

    Ok(())
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Done | Outcome::Published => String::new(),
        Outcome::PageAdded(id) => format!(" → page {}", id),
        Outcome::BlockAdded(id) => format!(" → block {}", id),
        Outcome::ConfirmationRequired(request) => format!(" → \"{}\"", request.prompt),
        Outcome::Deleted(id) => format!(" → removed {}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_model::{BlockType, Page, PageStatus, PageType, WebsiteConfig};
    use serde_json::json;

    fn project(script: serde_json::Value) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut site = WebsiteConfig::new("VitalLab");
        site.pages.push(Page {
            id: "about".to_string(),
            slug: "about".to_string(),
            title: "About".to_string(),
            page_type: PageType::Custom,
            status: PageStatus::Draft,
            blocks: Vec::new(),
            legacy_content: None,
        });
        save_config(&dir.path().join("site.json"), &site).unwrap();
        fs::write(dir.path().join("script.json"), script.to_string()).unwrap();
        dir
    }

    fn args(publish: bool) -> EditArgs {
        EditArgs {
            script: PathBuf::from("script.json"),
            publish,
            draft_out: None,
        }
    }

    fn saved(dir: &tempfile::TempDir) -> WebsiteConfig {
        load_config(&dir.path().join("site.json")).unwrap()
    }

    #[test]
    fn test_published_script_is_saved() {
        let dir = project(json!([
            { "action": "select_page", "page_id": "about" },
            { "action": "add_block", "block_type": "section" },
            { "action": "add_block", "block_type": "heading" },
            { "action": "update_page", "page_id": "about", "patch": { "status": "published" } },
            { "action": "publish" }
        ]));

        edit(args(false), dir.path()).unwrap();

        let site = saved(&dir);
        let about = site.page("about").unwrap();
        assert_eq!(about.status, PageStatus::Published);
        assert_eq!(about.blocks[0].block_type(), Some(BlockType::Section));
        assert_eq!(
            about.blocks[0].children().unwrap()[0].block_type(),
            Some(BlockType::Heading)
        );
    }

    #[test]
    fn test_unpublished_edits_do_not_touch_the_site() {
        let dir = project(json!([
            { "action": "select_page", "page_id": "about" },
            { "action": "add_block", "block_type": "section" }
        ]));
        let before = fs::read_to_string(dir.path().join("site.json")).unwrap();

        edit(args(false), dir.path()).unwrap();

        let after = fs::read_to_string(dir.path().join("site.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_publish_flag_and_draft_out() {
        let dir = project(json!([
            { "action": "select_page", "page_id": "about" },
            { "action": "add_block", "block_type": "section" }
        ]));

        edit(
            EditArgs {
                draft_out: Some(PathBuf::from("draft.json")),
                ..args(true)
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(saved(&dir).page("about").unwrap().blocks.len(), 1);
        let draft = load_config(&dir.path().join("draft.json")).unwrap();
        assert_eq!(draft, saved(&dir));
    }

    #[test]
    fn test_failing_intent_aborts_without_saving() {
        let dir = project(json!([
            { "action": "select_page", "page_id": "about" },
            { "action": "add_block", "block_type": "button" },
            { "action": "publish" }
        ]));
        let before = fs::read_to_string(dir.path().join("site.json")).unwrap();

        let err = edit(args(true), dir.path()).unwrap_err();
        assert!(err.to_string().contains("add_block"));

        let after = fs::read_to_string(dir.path().join("site.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_malformed_script_is_rejected() {
        let dir = project(json!([{ "action": "teleport" }]));
        assert!(edit(args(false), dir.path()).is_err());
    }
}
