use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{EditSession, PagePatch};
use pagesmith_model::{
    save_config, BlockType, IdGenerator, MenuItem, MenuKind, Page, PageStatus, PageType,
    WebsiteConfig,
};
use serde_json::json;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Company name shown in the site header
    #[arg(short, long, default_value = "My Company")]
    pub name: String,

    /// Site document to create
    #[arg(short, long, default_value = "site.json")]
    pub site_file: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagesmith project...".bright_blue().bold()
    );

    let config = Config {
        site_file: args.site_file.clone(),
        ..Config::default()
    };

    let site_path = config.site_path(cwd);
    if site_path.exists() && !args.force {
        println!("  {} Kept existing {}", "•".bright_black(), args.site_file);
    } else {
        let site = starter_site(&args.name)?;
        save_config(&site_path, &site)?;
        println!(
            "  {} Created {} with {} pages",
            "✓".green(),
            args.site_file,
            site.pages.len()
        );
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✨ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} or script changes with pagesmith edit", args.site_file);
    println!("  2. Run: {}", "pagesmith build".bright_cyan());

    Ok(())
}

/// A published home page with a hero, an about page, and a header menu.
fn starter_site(company: &str) -> Result<WebsiteConfig> {
    let mut site = WebsiteConfig::new(company);
    site.pages.push(Page {
        id: "home".to_string(),
        slug: "home".to_string(),
        title: "Home".to_string(),
        page_type: PageType::System,
        status: PageStatus::Published,
        blocks: Vec::new(),
        legacy_content: None,
    });

    let mut session = EditSession::with_ids(site, IdGenerator::new(company));

    session.select_page("home")?;
    session.add_block(BlockType::Section)?;
    let hero = session.add_block(BlockType::Hero)?;
    session.update_content(
        &hero,
        json_object(json!({ "title": company, "subtitle": "Welcome to our new website" })),
    )?;

    let about = session.add_page()?;
    session.update_page(
        &about,
        PagePatch {
            title: Some("About".to_string()),
            slug: Some("about".to_string()),
            status: Some(PageStatus::Published),
        },
    )?;
    session.add_block(BlockType::Section)?;
    let heading = session.add_block(BlockType::Heading)?;
    session.update_content(&heading, json_object(json!({ "text": "About us" })))?;
    session.add_block(BlockType::Text)?;

    session.set_menu(
        MenuKind::Header,
        vec![
            MenuItem::new("menu_home", "Home", "home"),
            MenuItem::new("menu_about", "About", "about"),
        ],
    );

    Ok(session.publish().clone())
}

fn json_object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
