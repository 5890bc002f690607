//! # Block Mutations
//!
//! Serializable, intent-level operations on a page's block list. Each one
//! is validated against the current tree and then computed by the pure
//! functions in [`crate::tree`].
//!
//! ## Mutation Semantics
//!
//! ### AppendRoot
//! - Appends at the end of the root list, no target lookup
//!
//! ### InsertChild
//! - Container target: new last child
//! - Leaf target: new sibling right after the target
//! - Fails if the target is gone or the new subtree reuses an id
//!
//! ### UpdateContent / UpdateStyles
//! - Shallow merge, last write wins per field
//!
//! ### RemoveNode
//! - Removes the node and all descendants

use crate::tree::{self, FieldsPatch};
use pagesmith_model::{collect_ids, Block, ElementStyle};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Add a block at the end of the page's root list
    AppendRoot { block: Block },

    /// Add a block inside (or after) an existing block
    InsertChild { target_id: String, block: Block },

    /// Merge fields into a block's content
    UpdateContent {
        node_id: String,
        patch: Map<String, Value>,
    },

    /// Merge attributes into a block's styles
    UpdateStyles { node_id: String, patch: ElementStyle },

    /// Remove a block and its subtree
    RemoveNode { node_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Block {0} cannot hold children")]
    NotAContainer(String),

    #[error("Block id already in use: {0}")]
    DuplicateId(String),

    #[error("Empty block id")]
    EmptyId,
}

impl Mutation {
    /// Validate, then compute the next tree. `tree` is never modified.
    pub fn apply(&self, tree: &[Block]) -> Result<Vec<Block>, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::AppendRoot { block } => tree::try_append_root(tree, block.clone()),

            Mutation::InsertChild { target_id, block } => {
                tree::try_insert_child(tree, target_id, block.clone())
            }

            Mutation::UpdateContent { node_id, patch } => {
                tree::try_update_node(tree, node_id, &FieldsPatch::Content(patch.clone()))
            }

            Mutation::UpdateStyles { node_id, patch } => {
                tree::try_update_node(tree, node_id, &FieldsPatch::Styles(patch.clone()))
            }

            Mutation::RemoveNode { node_id } => tree::try_delete_node(tree, node_id),
        }
    }

    /// Validate without applying
    pub fn validate(&self, tree: &[Block]) -> Result<(), MutationError> {
        match self {
            Mutation::AppendRoot { block } => ensure_ids_present(block),

            Mutation::InsertChild { target_id, block } => {
                ensure_id(target_id)?;
                ensure_ids_present(block)?;
                if !tree::contains(tree, target_id) {
                    return Err(MutationError::NodeNotFound(target_id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateContent { node_id, .. }
            | Mutation::UpdateStyles { node_id, .. }
            | Mutation::RemoveNode { node_id } => {
                ensure_id(node_id)?;
                if !tree::contains(tree, node_id) {
                    return Err(MutationError::NodeNotFound(node_id.clone()));
                }
                Ok(())
            }
        }
    }

    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AppendRoot { .. } => "append_root",
            Mutation::InsertChild { .. } => "insert_child",
            Mutation::UpdateContent { .. } => "update_content",
            Mutation::UpdateStyles { .. } => "update_styles",
            Mutation::RemoveNode { .. } => "remove_node",
        }
    }

    /// Id of the block this mutation creates, if any.
    pub fn created_id(&self) -> Option<&str> {
        self.created_block().map(|block| block.id.as_str())
    }

    /// The subtree this mutation adds, if any.
    pub fn created_block(&self) -> Option<&Block> {
        match self {
            Mutation::AppendRoot { block } | Mutation::InsertChild { block, .. } => Some(block),
            _ => None,
        }
    }
}

fn ensure_id(id: &str) -> Result<(), MutationError> {
    if id.is_empty() {
        Err(MutationError::EmptyId)
    } else {
        Ok(())
    }
}

fn ensure_ids_present(block: &Block) -> Result<(), MutationError> {
    collect_ids(std::slice::from_ref(block))
        .iter()
        .try_for_each(|id| ensure_id(id))
}
