use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_compiler_html::{compile_page, CompileOptions};
use pagesmith_model::{load_config, Page, PageStatus, WebsiteConfig};
use pagesmith_renderer::{render_page, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Only build the page with this slug
    #[arg(short, long)]
    pub page: Option<String>,

    /// Skip pages whose status is draft
    #[arg(long)]
    pub published_only: bool,
}

pub fn build(args: BuildArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let site_path = config.site_path(cwd);
    let site = load_config(&site_path)
        .with_context(|| format!("Failed to load {}", site_path.display()))?;

    let out_dir = match &args.out_dir {
        Some(dir) => cwd.join(dir),
        None => config.out_path(cwd),
    };

    println!("{}", "🔨 Building site...".bright_blue().bold());

    let pages = select_pages(&site, &args)?;
    if pages.is_empty() {
        println!("{}", "No pages with content to build".yellow());
        return Ok(());
    }

    fs::create_dir_all(&out_dir)?;

    let options = CompileOptions {
        pretty: config.pretty,
        ..Default::default()
    };

    let mut written = 0;
    for page in pages {
        let path = write_page(&site, page, &out_dir, options.clone())
            .with_context(|| format!("Failed to build page '{}'", page.slug))?;
        println!("  {} {} → {}", "✓".green(), page.title, path.display());
        written += 1;
    }

    println!();
    println!(
        "{} Built {} page(s) into {}",
        "✨".green(),
        written,
        out_dir.display()
    );

    Ok(())
}

fn select_pages<'a>(site: &'a WebsiteConfig, args: &BuildArgs) -> Result<Vec<&'a Page>> {
    if let Some(slug) = &args.page {
        let page = site
            .page_by_slug(slug)
            .ok_or_else(|| anyhow::anyhow!("No page with slug '{}'", slug))?;
        return Ok(vec![page]);
    }

    Ok(site
        .pages
        .iter()
        .filter(|page| {
            let keep = !page.is_blank()
                && (!args.published_only || page.status == PageStatus::Published);
            if !keep {
                debug!(slug = %page.slug, "Skipping page");
            }
            keep
        })
        .collect())
}

fn write_page(
    site: &WebsiteConfig,
    page: &Page,
    out_dir: &Path,
    options: CompileOptions,
) -> Result<PathBuf> {
    let rendered = render_page(page, &RenderOptions::static_site());
    let html = compile_page(&rendered, site, options)?;

    let path = out_dir.join(format!("{}.html", page.slug));
    fs::write(&path, html)?;
    debug!(path = %path.display(), "Wrote page");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_model::{
        save_config, Block, BlockKind, HeadingContent, PageType,
    };

    fn page(slug: &str, status: PageStatus, blocks: Vec<Block>) -> Page {
        Page {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            page_type: PageType::Custom,
            status,
            blocks,
            legacy_content: None,
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut site = WebsiteConfig::new("VitalLab");
        let heading = Block::new(
            "h1",
            BlockKind::Heading(HeadingContent {
                text: Some("Welcome".to_string()),
            }),
        );
        site.pages.push(page("home", PageStatus::Published, vec![heading]));
        site.pages.push(page("empty", PageStatus::Published, vec![]));
        let mut legacy = page("old", PageStatus::Draft, vec![]);
        legacy.legacy_content = Some("<p>Legacy</p>".to_string());
        site.pages.push(legacy);

        save_config(&dir.path().join("site.json"), &site).unwrap();
        dir
    }

    fn args() -> BuildArgs {
        BuildArgs {
            out_dir: None,
            page: None,
            published_only: false,
        }
    }

    #[test]
    fn test_build_writes_pages_with_content() {
        let dir = project();
        build(args(), dir.path()).unwrap();

        let dist = dir.path().join("dist");
        let home = fs::read_to_string(dist.join("home.html")).unwrap();
        assert!(home.contains("<title>HOME | VitalLab</title>"));
        assert!(home.contains("Welcome"));

        let old = fs::read_to_string(dist.join("old.html")).unwrap();
        assert!(old.contains("<p>Legacy</p>"));

        assert!(!dist.join("empty.html").exists());
    }

    #[test]
    fn test_build_single_page_into_override_dir() {
        let dir = project();
        build(
            BuildArgs {
                out_dir: Some("public".to_string()),
                page: Some("home".to_string()),
                published_only: false,
            },
            dir.path(),
        )
        .unwrap();

        let public = dir.path().join("public");
        assert!(public.join("home.html").exists());
        assert!(!public.join("old.html").exists());
    }

    #[test]
    fn test_build_published_only_skips_drafts() {
        let dir = project();
        build(
            BuildArgs {
                published_only: true,
                ..args()
            },
            dir.path(),
        )
        .unwrap();

        let dist = dir.path().join("dist");
        assert!(dist.join("home.html").exists());
        assert!(!dist.join("old.html").exists());
    }

    #[test]
    fn test_build_unknown_slug_fails() {
        let dir = project();
        let result = build(
            BuildArgs {
                page: Some("nope".to_string()),
                ..args()
            },
            dir.path(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_without_site_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(build(args(), dir.path()).is_err());
    }
}
