use pagesmith_model::{MenuItem, WebsiteConfig};
use pagesmith_renderer::{theme_variables, Gesture, VNode, VirtualPage};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("Invalid attribute name on <{tag}>: {name:?}")]
    InvalidAttribute { tag: String, name: String },
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Appended to bare page slugs when turning links into hrefs
    pub link_suffix: String,
    /// Emit the click-routing script for `data-navigate` elements
    pub include_script: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            link_suffix: ".html".to_string(),
            include_script: true,
        }
    }
}

const BASE_CSS: &str = "\
body { margin: 0; font-family: var(--font-primary), sans-serif; color: var(--color-secondary-900); }
.pb-block { position: relative; box-sizing: border-box; }
.pb-section-inner { width: 100%; max-width: 80rem; margin: 0 auto; }
.pb-button { padding: 0.75rem 1.5rem; border: 0; border-radius: var(--radius); background: var(--color-primary-600); color: #fff; cursor: pointer; }
.pb-button:hover { background: var(--color-primary-700); }
.pb-stats-number { font-size: 2.25rem; font-weight: 700; color: var(--color-primary-600); }
.pb-image img { max-width: 100%; height: auto; }
.pb-error { color: #dc2626; font-size: 0.75rem; padding: 0.5rem; }
.site-header, .site-footer { padding: 1rem 2rem; }
.site-footer { background: var(--color-secondary-900); color: #fff; }
nav a { margin-right: 1rem; color: inherit; }";

const NAVIGATE_SCRIPT: &str = "\
document.addEventListener('click', function (event) {
  var target = event.target.closest('[data-navigate]');
  if (target) { window.location.href = target.getAttribute('data-navigate'); }
});";

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered page into a complete HTML document with the site
/// shell (theme variables, header menu, footer) around it.
pub fn compile_page(
    page: &VirtualPage,
    site: &WebsiteConfig,
    options: CompileOptions,
) -> Result<String, CompileError> {
    debug!(page_id = %page.page_id, nodes = page.nodes.len(), "Compiling page");
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(page, site, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();

    compile_header(site, &mut ctx);

    ctx.add_line("<main>");
    ctx.indent();
    for node in &page.nodes {
        compile_node(node, &mut ctx)?;
    }
    ctx.dedent();
    ctx.add_line("</main>");

    compile_footer(site, &mut ctx);

    if ctx.options.include_script {
        ctx.add_line("<script>");
        ctx.add(NAVIGATE_SCRIPT);
        ctx.add("\n");
        ctx.add_line("</script>");
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

/// Compile nodes as an HTML fragment (no document shell).
pub fn compile_nodes(nodes: &[VNode], options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    for node in nodes {
        compile_node(node, &mut ctx)?;
    }
    Ok(ctx.get_output())
}

/// Turn a raw link into an href: bare page slugs get the link suffix,
/// anything that looks like a URL, path or anchor is kept.
pub fn resolve_link(link: &str, options: &CompileOptions) -> String {
    let external = link.is_empty()
        || link.starts_with('#')
        || link.starts_with('/')
        || link.starts_with('.')
        || link.contains(':')
        || link.contains('.');

    if external {
        link.to_string()
    } else {
        format!("{}{}", link, options.link_suffix)
    }
}

fn compile_head(page: &VirtualPage, site: &WebsiteConfig, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");

    let title = if site.company_name.is_empty() {
        escape_html(&page.title)
    } else {
        format!("{} | {}", escape_html(&page.title), escape_html(&site.company_name))
    };
    ctx.add_line(&format!("<title>{}</title>", title));

    ctx.add_line("<style>");
    ctx.indent();
    let vars = theme_variables(&site.theme)
        .into_iter()
        .map(|(name, value)| format!("{}: {};", name, escape_css(&value)))
        .collect::<Vec<_>>()
        .join(" ");
    ctx.add_line(&format!(":root {{ {} }}", vars));
    for line in BASE_CSS.lines() {
        ctx.add_line(line);
    }
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_header(site: &WebsiteConfig, ctx: &mut Context) {
    ctx.add_line("<header class=\"site-header\">");
    ctx.indent();
    let home = site
        .page_by_slug("home")
        .or_else(|| site.pages.first())
        .map(|page| resolve_link(&page.slug, &ctx.options))
        .unwrap_or_else(|| "#".to_string());
    ctx.add_line(&format!(
        "<a class=\"site-brand\" href=\"{}\">{}</a>",
        escape_html(&home),
        escape_html(&site.company_name)
    ));
    compile_menu(&site.menus.header, "site-nav", ctx);
    ctx.dedent();
    ctx.add_line("</header>");
}

fn compile_footer(site: &WebsiteConfig, ctx: &mut Context) {
    ctx.add_line("<footer class=\"site-footer\">");
    ctx.indent();

    if !site.company_tagline.is_empty() {
        ctx.add_line(&format!(
            "<p class=\"site-tagline\">{}</p>",
            escape_html(&site.company_tagline)
        ));
    }

    compile_menu(&site.menus.footer, "footer-nav", ctx);

    let contact = [
        ("email", &site.contact.email),
        ("phone", &site.contact.phone),
        ("address", &site.contact.address),
        ("hours", &site.contact.hours),
    ];
    if contact.iter().any(|(_, value)| !value.is_empty()) {
        ctx.add_line("<address class=\"site-contact\">");
        ctx.indent();
        for (field, value) in contact.iter().filter(|(_, value)| !value.is_empty()) {
            ctx.add_line(&format!(
                "<div class=\"contact-{}\">{}</div>",
                field,
                escape_html(value)
            ));
        }
        ctx.dedent();
        ctx.add_line("</address>");
    }

    ctx.dedent();
    ctx.add_line("</footer>");
}

fn compile_menu(items: &[MenuItem], class: &str, ctx: &mut Context) {
    if items.is_empty() {
        return;
    }

    ctx.add_line(&format!("<nav class=\"{}\">", class));
    ctx.indent();
    compile_menu_items(items, ctx);
    ctx.dedent();
    ctx.add_line("</nav>");
}

fn compile_menu_items(items: &[MenuItem], ctx: &mut Context) {
    ctx.add_line("<ul>");
    ctx.indent();
    for item in items {
        let link = format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&resolve_link(&item.link, &ctx.options)),
            escape_html(&item.label)
        );

        if item.children.is_empty() {
            ctx.add_line(&format!("<li>{}</li>", link));
        } else {
            ctx.add_line(&format!("<li>{}", link));
            ctx.indent();
            compile_menu_items(&item.children, ctx);
            ctx.dedent();
            ctx.add_line("</li>");
        }
    }
    ctx.dedent();
    ctx.add_line("</ul>");
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            key: _,
            on_click,
        } => compile_element(tag, attributes, styles, children, on_click.as_ref(), ctx),

        VNode::Text { content } => {
            ctx.add(&escape_html(content));
            Ok(())
        }

        VNode::RawHtml { content } => {
            ctx.add(content);
            Ok(())
        }

        VNode::Comment { content } => {
            ctx.add_line(&format!("<!-- {} -->", content.replace("--", "- -")));
            Ok(())
        }

        VNode::Error { message } => {
            ctx.add_line(&format!(
                "<div class=\"pb-error\" role=\"alert\">{}</div>",
                escape_html(message)
            ));
            Ok(())
        }
    }
}

fn compile_element(
    tag: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    gesture: Option<&Gesture>,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(tag) {
        return Err(CompileError::InvalidTag(tag.to_string()));
    }

    // Opening tag
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", tag));

    for (name, value) in attributes {
        if !is_valid_name(name) {
            return Err(CompileError::InvalidAttribute {
                tag: tag.to_string(),
                name: name.clone(),
            });
        }
        ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if !styles.is_empty() {
        let inline = styles
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("; ");
        ctx.add(&format!(" style=\"{}\"", escape_html(&inline)));
    }

    match gesture {
        Some(Gesture::Select(id)) => ctx.add(&format!(" data-select=\"{}\"", escape_html(id))),
        Some(Gesture::ClearSelection) => ctx.add(" data-deselect"),
        Some(Gesture::Navigate(link)) => {
            let href = resolve_link(link, &ctx.options);
            ctx.add(&format!(" data-navigate=\"{}\"", escape_html(&href)));
        }
        None => {}
    }

    // Self-closing tags
    if children.is_empty() && is_self_closing(tag) {
        ctx.add(" />");
        ctx.newline();
        return Ok(());
    }

    ctx.add(">");

    let block_children = has_element_children(children);
    if block_children {
        ctx.newline();
    }
    ctx.indent();

    for child in children {
        compile_node(child, ctx)?;
    }

    ctx.dedent();
    if ctx.options.pretty && block_children {
        ctx.add_indent();
    }

    // Closing tag
    ctx.add(&format!("</{}>", tag));
    ctx.newline();

    Ok(())
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep theme values from closing the style block.
fn escape_css(value: &str) -> String {
    value.replace(['<', '>', '{', '}', ';'], "")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
