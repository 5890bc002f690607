//! # Tree Queries and Mutations
//!
//! Pure functions over a page's root block list. None of them touch their
//! input: each mutation copies the list, edits the copy and hands it back.
//!
//! ## Failure semantics
//!
//! The plain functions are total. A missing target leaves the tree as it
//! was and the call degrades to a no-op. The `try_*` variants report why
//! nothing happened so a caller can warn the user.
//!
//! ## Insert policy
//!
//! - Container target (`section`, `column`): the new block becomes its last
//!   child.
//! - Leaf target: the new block lands right after the target among its
//!   siblings. Root-level leaves count as siblings of the other roots.

use crate::mutations::MutationError;
use pagesmith_model::{collect_ids, Block, ElementStyle};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Result of [`locate`]: the node plus where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub node: &'a Block,
    /// Immediate parent, `None` for root-level blocks.
    pub parent: Option<&'a Block>,
    /// Position among the parent's children (or among the roots).
    pub index: usize,
}

/// Which half of a block a patch applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldsPatch {
    Content(Map<String, Value>),
    Styles(ElementStyle),
}

/// Depth-first search for `id`.
pub fn locate<'a>(tree: &'a [Block], id: &str) -> Option<Located<'a>> {
    locate_in(tree, None, id)
}

fn locate_in<'a>(siblings: &'a [Block], parent: Option<&'a Block>, id: &str) -> Option<Located<'a>> {
    for (index, node) in siblings.iter().enumerate() {
        if node.id == id {
            return Some(Located {
                node,
                parent,
                index,
            });
        }

        if let Some(children) = node.children() {
            if let Some(found) = locate_in(children, Some(node), id) {
                return Some(found);
            }
        }
    }

    None
}

pub fn contains(tree: &[Block], id: &str) -> bool {
    locate(tree, id).is_some()
}

/// Append `block` to the root list.
pub fn append_root(tree: &[Block], block: Block) -> Vec<Block> {
    try_append_root(tree, block).unwrap_or_else(|err| {
        debug!(error = %err, "Root append skipped");
        tree.to_vec()
    })
}

pub fn try_append_root(tree: &[Block], block: Block) -> Result<Vec<Block>, MutationError> {
    ensure_fresh_ids(tree, &block)?;

    let mut next = tree.to_vec();
    next.push(block);
    Ok(next)
}

/// Insert `block` relative to `target_id` (see module docs for the policy).
pub fn insert_child(tree: &[Block], target_id: &str, block: Block) -> Vec<Block> {
    try_insert_child(tree, target_id, block).unwrap_or_else(|err| {
        debug!(target_id, error = %err, "Insert skipped");
        tree.to_vec()
    })
}

pub fn try_insert_child(
    tree: &[Block],
    target_id: &str,
    block: Block,
) -> Result<Vec<Block>, MutationError> {
    let target = locate(tree, target_id)
        .ok_or_else(|| MutationError::NodeNotFound(target_id.to_string()))?;
    ensure_fresh_ids(tree, &block)?;

    let (siblings_of, position) = if target.node.is_container() {
        (Some(target_id.to_string()), None)
    } else {
        (target.parent.map(|p| p.id.clone()), Some(target.index + 1))
    };

    let mut next = tree.to_vec();
    let siblings = match &siblings_of {
        Some(container_id) => find_mut(&mut next, container_id)
            .and_then(|container| container.children_mut())
            .ok_or_else(|| MutationError::NotAContainer(container_id.clone()))?,
        None => &mut next,
    };

    match position {
        Some(index) => siblings.insert(index.min(siblings.len()), block),
        None => siblings.push(block),
    }

    Ok(next)
}

/// Shallow-merge `patch` into the block `id`.
pub fn update_node(tree: &[Block], id: &str, patch: &FieldsPatch) -> Vec<Block> {
    try_update_node(tree, id, patch).unwrap_or_else(|err| {
        debug!(node_id = id, error = %err, "Update skipped");
        tree.to_vec()
    })
}

pub fn try_update_node(
    tree: &[Block],
    id: &str,
    patch: &FieldsPatch,
) -> Result<Vec<Block>, MutationError> {
    let mut next = tree.to_vec();
    let node = find_mut(&mut next, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    match patch {
        FieldsPatch::Content(fields) => {
            if !node.merge_content(fields) {
                debug!(node_id = id, block_type = node.type_name(), "Block carries no content");
            }
        }
        FieldsPatch::Styles(styles) => node.styles.merge(styles),
    }

    Ok(next)
}

/// Remove the block `id` and its whole subtree.
pub fn delete_node(tree: &[Block], id: &str) -> Vec<Block> {
    try_delete_node(tree, id).unwrap_or_else(|err| {
        debug!(node_id = id, error = %err, "Delete skipped");
        tree.to_vec()
    })
}

pub fn try_delete_node(tree: &[Block], id: &str) -> Result<Vec<Block>, MutationError> {
    let mut next = tree.to_vec();
    remove_from(&mut next, id).ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
    Ok(next)
}

fn find_mut<'a>(blocks: &'a mut [Block], id: &str) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if block.id == id {
            return Some(block);
        }

        if let Some(children) = block.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }

    None
}

fn remove_from(blocks: &mut Vec<Block>, id: &str) -> Option<Block> {
    if let Some(pos) = blocks.iter().position(|b| b.id == id) {
        return Some(blocks.remove(pos));
    }

    for block in blocks.iter_mut() {
        if let Some(children) = block.children_mut() {
            if let Some(removed) = remove_from(children, id) {
                return Some(removed);
            }
        }
    }

    None
}

/// Reject a block whose subtree reuses an id already in the tree.
fn ensure_fresh_ids(tree: &[Block], block: &Block) -> Result<(), MutationError> {
    let existing: HashSet<String> = collect_ids(tree).into_iter().collect();
    let mut incoming = HashSet::new();

    for id in collect_ids(std::slice::from_ref(block)) {
        if existing.contains(&id) || !incoming.insert(id.clone()) {
            return Err(MutationError::DuplicateId(id));
        }
    }

    Ok(())
}
