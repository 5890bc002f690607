use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_model::visitor::walk_block;
use pagesmith_model::{load_config, Block, Page, Visitor};
use std::path::Path;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Slug of the page to print; every page when omitted
    #[arg(short, long)]
    pub page: Option<String>,
}

pub fn tree(args: TreeArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let site_path = config.site_path(cwd);
    let site = load_config(&site_path)
        .with_context(|| format!("Failed to load {}", site_path.display()))?;

    let pages: Vec<&Page> = match &args.page {
        Some(slug) => vec![site
            .page_by_slug(slug)
            .ok_or_else(|| anyhow::anyhow!("No page with slug '{}'", slug))?],
        None => site.pages.iter().collect(),
    };

    for page in pages {
        println!(
            "{} {} {}",
            page.title.bold(),
            format!("/{}", page.slug).bright_black(),
            format!("({:?})", page.status).to_lowercase().bright_black()
        );
        print!("{}", outline(page));
    }

    Ok(())
}

/// One line per block: two spaces of indent per level, then type and id.
pub fn outline(page: &Page) -> String {
    struct Outline(String);

    impl Visitor for Outline {
        fn visit_block(&mut self, block: &Block, depth: usize) {
            self.0.push_str(&"  ".repeat(depth + 1));
            self.0.push_str(block.type_name());
            self.0.push(' ');
            self.0.push_str(&block.id);
            self.0.push('\n');
            walk_block(self, block, depth);
        }
    }

    if page.blocks.is_empty() {
        return match &page.legacy_content {
            Some(_) => "  (legacy content)\n".to_string(),
            None => "  (empty)\n".to_string(),
        };
    }

    let mut outline = Outline(String::new());
    outline.visit_page(page);
    outline.0
}
