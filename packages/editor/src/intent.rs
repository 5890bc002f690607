//! Serializable builder actions.
//!
//! An [`Intent`] is one operator action at the level the builder UI works
//! in. Scripts of intents can be stored as JSON and replayed against a
//! session:
//!
//! ```json
//! [
//!   { "action": "select_page", "page_id": "home" },
//!   { "action": "add_block", "block_type": "section" },
//!   { "action": "update_styles", "block_id": "b_x_1", "patch": { "backgroundColor": "#112233" } },
//!   { "action": "publish" }
//! ]
//! ```

use crate::errors::EditorError;
use crate::session::{DeleteRequest, EditSession, PagePatch, ThemePatch};
use pagesmith_model::{BlockId, BlockType, ElementStyle, MenuItem, MenuKind, PageId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    SelectPage {
        page_id: PageId,
    },
    SelectBlock {
        block_id: BlockId,
    },
    ClearSelection,
    AddPage,
    UpdatePage {
        page_id: PageId,
        patch: PagePatch,
    },
    RemovePage {
        page_id: PageId,
    },
    AddBlock {
        block_type: BlockType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<BlockId>,
    },
    UpdateContent {
        block_id: BlockId,
        patch: Map<String, Value>,
    },
    UpdateStyles {
        block_id: BlockId,
        patch: ElementStyle,
    },
    /// Ask for confirmation; nothing is removed yet.
    RequestDelete {
        block_id: BlockId,
    },
    ConfirmDelete,
    CancelDelete,
    UpdateTheme {
        patch: ThemePatch,
    },
    SetMenu {
        menu: MenuKind,
        items: Vec<MenuItem>,
    },
    Publish,
}

/// What an intent did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done,
    PageAdded(PageId),
    BlockAdded(BlockId),
    ConfirmationRequired(DeleteRequest),
    Deleted(BlockId),
    Published,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectPage { .. } => "select_page",
            Intent::SelectBlock { .. } => "select_block",
            Intent::ClearSelection => "clear_selection",
            Intent::AddPage => "add_page",
            Intent::UpdatePage { .. } => "update_page",
            Intent::RemovePage { .. } => "remove_page",
            Intent::AddBlock { .. } => "add_block",
            Intent::UpdateContent { .. } => "update_content",
            Intent::UpdateStyles { .. } => "update_styles",
            Intent::RequestDelete { .. } => "request_delete",
            Intent::ConfirmDelete => "confirm_delete",
            Intent::CancelDelete => "cancel_delete",
            Intent::UpdateTheme { .. } => "update_theme",
            Intent::SetMenu { .. } => "set_menu",
            Intent::Publish => "publish",
        }
    }
}

impl EditSession {
    /// Run one intent to completion.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, EditorError> {
        debug!(action = intent.name(), "Dispatching intent");

        let outcome = match intent {
            Intent::SelectPage { page_id } => {
                self.select_page(&page_id)?;
                Outcome::Done
            }
            Intent::SelectBlock { block_id } => {
                self.select_block(&block_id)?;
                Outcome::Done
            }
            Intent::ClearSelection => {
                self.clear_selection();
                Outcome::Done
            }
            Intent::AddPage => Outcome::PageAdded(self.add_page()?),
            Intent::UpdatePage { page_id, patch } => {
                self.update_page(&page_id, patch)?;
                Outcome::Done
            }
            Intent::RemovePage { page_id } => {
                self.remove_page(&page_id)?;
                Outcome::Done
            }
            Intent::AddBlock {
                block_type,
                parent_id,
            } => Outcome::BlockAdded(self.add_block_to(block_type, parent_id.as_deref())?),
            Intent::UpdateContent { block_id, patch } => {
                self.update_content(&block_id, patch)?;
                Outcome::Done
            }
            Intent::UpdateStyles { block_id, patch } => {
                self.update_styles(&block_id, patch)?;
                Outcome::Done
            }
            Intent::RequestDelete { block_id } => {
                Outcome::ConfirmationRequired(self.request_delete(&block_id)?)
            }
            Intent::ConfirmDelete => Outcome::Deleted(self.confirm_delete()?),
            Intent::CancelDelete => {
                self.cancel_delete();
                Outcome::Done
            }
            Intent::UpdateTheme { patch } => {
                self.update_theme(patch);
                Outcome::Done
            }
            Intent::SetMenu { menu, items } => {
                self.set_menu(menu, items);
                Outcome::Done
            }
            Intent::Publish => {
                self.publish();
                Outcome::Published
            }
        };

        Ok(outcome)
    }

    /// Run intents in order, stopping at the first failure.
    pub fn dispatch_all(
        &mut self,
        intents: impl IntoIterator<Item = Intent>,
    ) -> Result<Vec<Outcome>, EditorError> {
        intents
            .into_iter()
            .map(|intent| self.dispatch(intent))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_model::{IdGenerator, WebsiteConfig};
    use serde_json::json;

    #[test]
    fn test_intent_wire_format() {
        let intents: Vec<Intent> = serde_json::from_value(json!([
            { "action": "add_page" },
            { "action": "add_block", "block_type": "section" },
            { "action": "add_block", "block_type": "heading", "parent_id": "b1" },
            { "action": "update_styles", "block_id": "b1", "patch": { "backgroundColor": "#112233" } },
            { "action": "set_menu", "menu": "header", "items": [{ "id": "m1", "label": "Home", "link": "home" }] },
            { "action": "publish" }
        ]))
        .unwrap();

        assert_eq!(intents[0], Intent::AddPage);
        assert_eq!(
            intents[2],
            Intent::AddBlock {
                block_type: BlockType::Heading,
                parent_id: Some("b1".to_string())
            }
        );
        assert_eq!(intents[5].name(), "publish");
    }

    #[test]
    fn test_dispatch_script() {
        let mut session =
            EditSession::with_ids(WebsiteConfig::new("Acme"), IdGenerator::from_seed("s"));

        let outcomes = session
            .dispatch_all(vec![
                Intent::AddPage,
                Intent::AddBlock {
                    block_type: BlockType::Section,
                    parent_id: None,
                },
                Intent::AddBlock {
                    block_type: BlockType::Button,
                    parent_id: None,
                },
                Intent::RequestDelete {
                    block_id: "b_s_3".to_string(),
                },
                Intent::ConfirmDelete,
                Intent::Publish,
            ])
            .unwrap();

        assert_eq!(outcomes[0], Outcome::PageAdded("p_s_1".to_string()));
        assert_eq!(outcomes[1], Outcome::BlockAdded("b_s_2".to_string()));
        assert_eq!(outcomes[2], Outcome::BlockAdded("b_s_3".to_string()));
        assert!(matches!(outcomes[3], Outcome::ConfirmationRequired(_)));
        assert_eq!(outcomes[4], Outcome::Deleted("b_s_3".to_string()));
        assert_eq!(outcomes[5], Outcome::Published);

        let page = session.live().page("p_s_1").unwrap();
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.blocks[0].children().map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_dispatch_stops_on_error() {
        let mut session = EditSession::new(WebsiteConfig::new("Acme"));
        let result = session.dispatch_all(vec![Intent::ConfirmDelete, Intent::Publish]);
        assert!(matches!(result, Err(EditorError::NoPendingDelete)));
        assert!(!session.is_dirty());
    }
}
