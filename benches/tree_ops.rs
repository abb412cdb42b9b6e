use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use bplustree::{BPlusTree, Key};

const ENTRY_COUNT: i64 = 10_000;

/// Keys `0..ENTRY_COUNT` visited in a scattered but repeatable order.
fn scattered_keys() -> Vec<Key> {
    // 7919 is prime and coprime to ENTRY_COUNT, so this is a permutation
    (0..ENTRY_COUNT).map(|i| (i * 7919) % ENTRY_COUNT).collect()
}

fn filled_tree(capacity: usize, keys: &[Key]) -> BPlusTree {
    let mut tree = BPlusTree::new(capacity).expect("even capacity");
    for &key in keys {
        tree.insert(key, key.to_string());
    }
    tree
}

fn tree_ops(c: &mut Criterion) {
    let keys = scattered_keys();
    let mut group = c.benchmark_group("bplustree");
    group.throughput(Throughput::Elements(keys.len() as u64));

    for capacity in [4usize, 16, 64] {
        group.bench_with_input(
            BenchmarkId::new("insert", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| black_box(filled_tree(capacity, &keys)));
            },
        );

        let tree = filled_tree(capacity, &keys);
        group.bench_with_input(
            BenchmarkId::new("lookup", capacity),
            &tree,
            |b, tree| {
                b.iter(|| {
                    for &key in &keys {
                        black_box(tree.lookup(key));
                    }
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("delete", capacity), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for &key in &keys {
                        black_box(tree.delete(key));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, tree_ops);
criterion_main!(benches);
