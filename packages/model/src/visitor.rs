use crate::block::Block;
use crate::site::{Page, WebsiteConfig};
use std::collections::HashSet;

/// Visitor for walking block trees immutably.
///
/// The default methods walk the whole tree depth-first in child order.
/// Override a `visit_*` method to act on nodes; call the matching `walk_*`
/// function from the override to keep descending.
pub trait Visitor: Sized {
    fn visit_config(&mut self, config: &WebsiteConfig) {
        walk_config(self, config);
    }

    fn visit_page(&mut self, page: &Page) {
        walk_page(self, page);
    }

    fn visit_block(&mut self, block: &Block, depth: usize) {
        walk_block(self, block, depth);
    }
}

pub fn walk_config<V: Visitor>(visitor: &mut V, config: &WebsiteConfig) {
    for page in &config.pages {
        visitor.visit_page(page);
    }
}

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &Page) {
    walk_blocks(visitor, &page.blocks, 0);
}

pub fn walk_blocks<V: Visitor>(visitor: &mut V, blocks: &[Block], depth: usize) {
    for block in blocks {
        visitor.visit_block(block, depth);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block, depth: usize) {
    if let Some(children) = block.children() {
        walk_blocks(visitor, children, depth + 1);
    }
}

/// Every block id in `blocks`, in depth-first order.
pub fn collect_ids(blocks: &[Block]) -> Vec<String> {
    struct Ids(Vec<String>);

    impl Visitor for Ids {
        fn visit_block(&mut self, block: &Block, depth: usize) {
            self.0.push(block.id.clone());
            walk_block(self, block, depth);
        }
    }

    let mut ids = Ids(Vec::new());
    walk_blocks(&mut ids, blocks, 0);
    ids.0
}

/// Block ids that occur more than once anywhere in the configuration.
pub fn duplicate_ids(config: &WebsiteConfig) -> Vec<String> {
    struct Dupes {
        seen: HashSet<String>,
        dupes: Vec<String>,
    }

    impl Visitor for Dupes {
        fn visit_block(&mut self, block: &Block, depth: usize) {
            if !self.seen.insert(block.id.clone()) && !self.dupes.contains(&block.id) {
                self.dupes.push(block.id.clone());
            }
            walk_block(self, block, depth);
        }
    }

    let mut dupes = Dupes {
        seen: HashSet::new(),
        dupes: Vec::new(),
    };
    dupes.visit_config(config);
    dupes.dupes
}
