//! # Edit Session
//!
//! Owns the builder state: the live configuration, the draft being
//! edited, the selected page and block, and a delete awaiting
//! confirmation. Every block edit runs through a [`Mutation`] against the
//! selected page's block list and the result replaces that list in the
//! draft. Publishing swaps the whole draft into live in one assignment.

use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError};
use crate::tree;
use pagesmith_model::{
    collect_ids, new_block, new_page, Block, BlockId, BlockType, ElementStyle, IdGenerator, IdSource,
    MenuItem, MenuKind, Page, PageId, PageStatus, PageType, RadiusScale, WebsiteConfig,
};
use pagesmith_renderer::{
    dispatch, render_page, GestureSink, Navigator, RenderOptions, VirtualPage,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, info};

/// Question put to the operator before a block is deleted.
pub const DELETE_PROMPT: &str = "Delete this element?";

/// A delete waiting for the operator's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub page_id: PageId,
    pub block_id: BlockId,
    pub prompt: String,
}

/// Page metadata edits. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: Option<PageStatus>,
}

/// Theme edits. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemePatch {
    pub font: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub border_radius: Option<RadiusScale>,
}

pub struct EditSession {
    live: WebsiteConfig,
    draft: WebsiteConfig,
    selected_page: Option<PageId>,
    selected_block: Option<BlockId>,
    pending_delete: Option<DeleteRequest>,
    ids: Box<dyn IdSource>,
}

impl EditSession {
    /// Start editing `config`; ids are seeded from the company name.
    pub fn new(config: WebsiteConfig) -> Self {
        let ids = IdGenerator::new(&config.company_name);
        Self::with_ids(config, ids)
    }

    pub fn with_ids(config: WebsiteConfig, ids: impl IdSource + 'static) -> Self {
        Self {
            draft: config.clone(),
            live: config,
            selected_page: None,
            selected_block: None,
            pending_delete: None,
            ids: Box::new(ids),
        }
    }

    /// Last published configuration.
    pub fn live(&self) -> &WebsiteConfig {
        &self.live
    }

    pub fn draft(&self) -> &WebsiteConfig {
        &self.draft
    }

    /// True when the draft has edits that are not published yet.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.live
    }

    pub fn selected_page_id(&self) -> Option<&str> {
        self.selected_page.as_deref()
    }

    pub fn selected_block_id(&self) -> Option<&str> {
        self.selected_block.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&DeleteRequest> {
        self.pending_delete.as_ref()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.selected_page
            .as_deref()
            .and_then(|id| self.draft.page(id))
    }

    /// The selected block as it currently sits in the draft.
    pub fn selected_block(&self) -> Option<&Block> {
        let page = self.current_page()?;
        let id = self.selected_block.as_deref()?;
        tree::locate(&page.blocks, id).map(|found| found.node)
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    /// Switch pages. Block selection and any pending delete are dropped.
    pub fn select_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        if self.draft.page(page_id).is_none() {
            return Err(EditorError::PageNotFound(page_id.to_string()));
        }

        self.selected_page = Some(page_id.to_string());
        self.selected_block = None;
        self.pending_delete = None;
        Ok(())
    }

    pub fn select_block(&mut self, block_id: &str) -> Result<(), EditorError> {
        let page = self.current_page().ok_or(EditorError::NoPageSelected)?;
        if !tree::contains(&page.blocks, block_id) {
            return Err(MutationError::NodeNotFound(block_id.to_string()).into());
        }

        self.selected_block = Some(block_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_block = None;
    }

    // ---------------------------------------------------------------
    // Pages
    // ---------------------------------------------------------------

    /// Add an empty custom draft page and select it.
    pub fn add_page(&mut self) -> Result<PageId, EditorError> {
        let page = new_page(self.ids.as_mut());
        if self.draft.page(&page.id).is_some() {
            return Err(MutationError::DuplicateId(page.id).into());
        }
        if self.draft.page_by_slug(&page.slug).is_some() {
            return Err(EditorError::SlugTaken(page.slug));
        }

        let id = page.id.clone();
        debug!(page_id = %id, slug = %page.slug, "Adding page");

        self.draft.pages.push(page);
        self.selected_page = Some(id.clone());
        self.selected_block = None;
        self.pending_delete = None;
        Ok(id)
    }

    pub fn update_page(&mut self, page_id: &str, patch: PagePatch) -> Result<(), EditorError> {
        if let Some(slug) = &patch.slug {
            validate_slug(slug)?;
            let taken = self
                .draft
                .pages
                .iter()
                .any(|p| p.id != page_id && p.slug == *slug);
            if taken {
                return Err(EditorError::SlugTaken(slug.clone()));
            }
        }

        let page = self
            .draft
            .page_mut(page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.to_string()))?;

        if let Some(title) = patch.title {
            page.title = title;
        }
        if let Some(slug) = patch.slug {
            page.slug = slug;
        }
        if let Some(status) = patch.status {
            page.status = status;
        }
        Ok(())
    }

    /// Remove a custom page. System pages belong to the host application.
    pub fn remove_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        let page = self
            .draft
            .page(page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.to_string()))?;
        if page.page_type == PageType::System {
            return Err(EditorError::SystemPage(page_id.to_string()));
        }

        self.draft.pages.retain(|p| p.id != page_id);
        if self.selected_page.as_deref() == Some(page_id) {
            self.selected_page = None;
            self.selected_block = None;
            self.pending_delete = None;
        }
        debug!(page_id, "Removed page");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Blocks
    // ---------------------------------------------------------------

    /// Add a fresh block relative to the current selection.
    pub fn add_block(&mut self, block_type: BlockType) -> Result<BlockId, EditorError> {
        self.add_block_to(block_type, None)
    }

    /// Add a fresh block of `block_type` and select it.
    ///
    /// Sections always go to the end of the page. Anything else needs a
    /// target: `parent_id` when given, else the selected block. A container
    /// target receives the block as its last child; a leaf target gets it
    /// as its next sibling.
    pub fn add_block_to(
        &mut self,
        block_type: BlockType,
        parent_id: Option<&str>,
    ) -> Result<BlockId, EditorError> {
        let page = self.current_page().ok_or(EditorError::NoPageSelected)?;

        let target = parent_id
            .map(str::to_string)
            .or_else(|| self.selected_block.clone());
        if block_type != BlockType::Section && target.is_none() {
            return Err(if page.blocks.is_empty() {
                EditorError::NoSections
            } else {
                EditorError::NoContainerSelected
            });
        }

        if let Some(target_id) = target.as_deref() {
            if block_type != BlockType::Section && !tree::contains(&page.blocks, target_id) {
                return Err(MutationError::NodeNotFound(target_id.to_string()).into());
            }
        }

        let block = new_block(self.ids.as_mut(), block_type);
        let id = block.id.clone();
        let mutation = match target {
            Some(target_id) if block_type != BlockType::Section => {
                Mutation::InsertChild { target_id, block }
            }
            _ => Mutation::AppendRoot { block },
        };

        self.apply(&mutation)?;
        self.selected_block = Some(id.clone());
        Ok(id)
    }

    pub fn update_content(
        &mut self,
        block_id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), EditorError> {
        self.apply(&Mutation::UpdateContent {
            node_id: block_id.to_string(),
            patch,
        })?;
        Ok(())
    }

    pub fn update_styles(&mut self, block_id: &str, patch: ElementStyle) -> Result<(), EditorError> {
        self.apply(&Mutation::UpdateStyles {
            node_id: block_id.to_string(),
            patch,
        })?;
        Ok(())
    }

    /// First half of a delete: record it and hand back the question to ask.
    pub fn request_delete(&mut self, block_id: &str) -> Result<DeleteRequest, EditorError> {
        let page = self.current_page().ok_or(EditorError::NoPageSelected)?;
        if !tree::contains(&page.blocks, block_id) {
            return Err(MutationError::NodeNotFound(block_id.to_string()).into());
        }

        let request = DeleteRequest {
            page_id: page.id.clone(),
            block_id: block_id.to_string(),
            prompt: DELETE_PROMPT.to_string(),
        };
        self.pending_delete = Some(request.clone());
        Ok(request)
    }

    /// Operator said yes: remove the block and clear the selection.
    pub fn confirm_delete(&mut self) -> Result<BlockId, EditorError> {
        let request = self.pending_delete.take().ok_or(EditorError::NoPendingDelete)?;
        if self.selected_page.as_deref() != Some(request.page_id.as_str()) {
            return Err(EditorError::NoPendingDelete);
        }

        self.apply(&Mutation::RemoveNode {
            node_id: request.block_id.clone(),
        })?;
        self.selected_block = None;
        Ok(request.block_id)
    }

    pub fn cancel_delete(&mut self) {
        if let Some(request) = self.pending_delete.take() {
            debug!(block_id = %request.block_id, "Delete cancelled");
        }
    }

    /// Ask `confirm` and delete only on a yes. Returns whether it deleted.
    pub fn delete_block_with(
        &mut self,
        block_id: &str,
        confirm: impl FnOnce(&DeleteRequest) -> bool,
    ) -> Result<bool, EditorError> {
        let request = self.request_delete(block_id)?;
        if confirm(&request) {
            self.confirm_delete()?;
            Ok(true)
        } else {
            self.cancel_delete();
            Ok(false)
        }
    }

    /// Apply a mutation to the selected page and commit it to the draft.
    ///
    /// Returns the id of the block the mutation created, if any.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<Option<BlockId>, EditorError> {
        let page_id = self.selected_page.clone().ok_or(EditorError::NoPageSelected)?;
        if let Some(block) = mutation.created_block() {
            ensure_unused_ids(&self.draft, block)?;
        }

        let page = self
            .draft
            .page_mut(&page_id)
            .ok_or_else(|| EditorError::PageNotFound(page_id.clone()))?;

        let next = mutation.apply(&page.blocks)?;
        page.blocks = next;
        debug!(page_id = %page_id, mutation = mutation.name(), "Applied mutation");

        Ok(mutation.created_id().map(str::to_string))
    }

    // ---------------------------------------------------------------
    // Site settings
    // ---------------------------------------------------------------

    pub fn update_theme(&mut self, patch: ThemePatch) {
        let theme = &mut self.draft.theme;
        if let Some(font) = patch.font {
            theme.font = font;
        }
        if let Some(primary) = patch.primary {
            theme.colors.primary = primary;
        }
        if let Some(secondary) = patch.secondary {
            theme.colors.secondary = secondary;
        }
        if let Some(accent) = patch.accent {
            theme.colors.accent = accent;
        }
        if let Some(radius) = patch.border_radius {
            theme.border_radius = radius;
        }
    }

    /// Replace a whole menu.
    pub fn set_menu(&mut self, kind: MenuKind, items: Vec<MenuItem>) {
        debug!(menu = ?kind, items = items.len(), "Replacing menu");
        *self.draft.menus.get_mut(kind) = items;
    }

    /// Copy the draft over the live configuration.
    pub fn publish(&mut self) -> &WebsiteConfig {
        self.live = self.draft.clone();
        info!(
            company = %self.live.company_name,
            pages = self.live.pages.len(),
            "Published site"
        );
        &self.live
    }

    /// Throw away unpublished edits.
    pub fn discard_draft(&mut self) {
        self.draft = self.live.clone();
        if self.current_page().is_none() {
            self.selected_page = None;
        }
        if self.selected_block().is_none() {
            self.selected_block = None;
        }
        self.pending_delete = None;
    }

    // ---------------------------------------------------------------
    // Canvas
    // ---------------------------------------------------------------

    /// Editor-mode render of the selected page.
    pub fn render_canvas(&self) -> Option<VirtualPage> {
        let page = self.current_page()?;
        Some(render_page(
            page,
            &RenderOptions::editor(self.selected_block.as_deref()),
        ))
    }

    /// Route a click on `canvas` at `path` into this session.
    pub fn handle_click(
        &mut self,
        canvas: &VirtualPage,
        path: &[usize],
        navigator: &mut dyn Navigator,
    ) {
        if let Some(gesture) = canvas.click(path).cloned() {
            dispatch(&gesture, self, navigator);
        }
    }
}

impl GestureSink for EditSession {
    fn select(&mut self, block_id: &str) {
        if let Err(err) = self.select_block(block_id) {
            debug!(block_id, error = %err, "Ignoring stale selection");
        }
    }

    fn clear_selection(&mut self) {
        EditSession::clear_selection(self);
    }
}

/// Block ids are unique across every page, not just the one being edited.
fn ensure_unused_ids(config: &WebsiteConfig, block: &Block) -> Result<(), MutationError> {
    let existing: HashSet<String> = config
        .pages
        .iter()
        .flat_map(|page| collect_ids(&page.blocks))
        .collect();

    match collect_ids(std::slice::from_ref(block))
        .into_iter()
        .find(|id| existing.contains(id))
    {
        Some(id) => Err(MutationError::DuplicateId(id)),
        None => Ok(()),
    }
}

/// Slugs are non-empty runs of lowercase ascii letters, digits and dashes.
fn validate_slug(slug: &str) -> Result<(), EditorError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(EditorError::InvalidSlug(slug.to_string()))
    }
}
