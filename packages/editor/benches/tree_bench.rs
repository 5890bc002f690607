use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagesmith_editor::{delete_node, insert_child, locate, update_node, FieldsPatch};
use pagesmith_model::{new_block, Block, BlockType, ElementStyle, IdGenerator};
use pagesmith_renderer::{render_blocks, RenderOptions};

/// `sections` sections of three columns holding `widgets` leaves each.
fn build_page(sections: usize, widgets: usize) -> Vec<Block> {
    let mut ids = IdGenerator::from_seed("bench");

    (0..sections)
        .map(|_| {
            let columns = (0..3)
                .map(|_| {
                    let leaves = (0..widgets)
                        .map(|i| {
                            let kind = if i % 2 == 0 { BlockType::Heading } else { BlockType::Text };
                            new_block(&mut ids, kind)
                        })
                        .collect();
                    new_block(&mut ids, BlockType::Column).with_children(leaves)
                })
                .collect();
            new_block(&mut ids, BlockType::Section).with_children(columns)
        })
        .collect()
}

fn last_leaf_id(tree: &[Block]) -> String {
    pagesmith_model::collect_ids(tree).pop().unwrap_or_default()
}

fn locate_deep_node(c: &mut Criterion) {
    let tree = build_page(20, 10);
    let id = last_leaf_id(&tree);

    c.bench_function("locate_deep_node", |b| {
        b.iter(|| locate(black_box(&tree), black_box(&id)).is_some())
    });
}

fn mutate_page(c: &mut Criterion) {
    let tree = build_page(20, 10);
    let id = last_leaf_id(&tree);
    let patch = FieldsPatch::Styles(ElementStyle {
        background_color: Some("#445566".to_string()),
        ..Default::default()
    });
    let mut ids = IdGenerator::from_seed("fresh");
    let fresh = new_block(&mut ids, BlockType::Divider);

    c.bench_function("update_node", |b| {
        b.iter(|| update_node(black_box(&tree), &id, &patch))
    });

    c.bench_function("insert_after_leaf", |b| {
        b.iter(|| insert_child(black_box(&tree), &id, fresh.clone()))
    });

    c.bench_function("delete_node", |b| {
        b.iter(|| delete_node(black_box(&tree), &id))
    });
}

fn render_page_blocks(c: &mut Criterion) {
    let tree = build_page(20, 10);
    let editor = RenderOptions::editor(None);

    c.bench_function("render_static", |b| {
        b.iter(|| render_blocks(black_box(&tree), &RenderOptions::static_site()))
    });

    c.bench_function("render_editor", |b| {
        b.iter(|| render_blocks(black_box(&tree), &editor))
    });
}

criterion_group!(benches, locate_deep_node, mutate_page, render_page_blocks);
criterion_main!(benches);
