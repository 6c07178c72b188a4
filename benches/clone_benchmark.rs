use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ghostclone::graph::from_adjacency;
use ghostclone::{clone_graph, CloneLimits, GhostToken, GraphCloner, IndexGraph, NodeArena, NodeId};

fn chain(len: usize) -> Vec<Vec<usize>> {
    // 0 -> 1 -> ... -> len-1 -> 0
    (0..len).map(|i| vec![(i + 1) % len]).collect()
}

fn dense(len: usize, degree: usize) -> Vec<Vec<usize>> {
    (0..len)
        .map(|i| (1..=degree).map(|k| (i * 31 + k * 17) % len).collect())
        .collect()
}

fn bench_pointer_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_clone");

    for (name, adjacency) in [("chain_10k", chain(10_000)), ("dense_2k_x8", dense(2_000, 8))] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &adjacency, |b, adjacency| {
            b.iter(|| {
                GhostToken::new(|mut token| {
                    let input = NodeArena::with_capacity(adjacency.len());
                    let nodes = from_adjacency(&input, &mut token, 0..adjacency.len(), adjacency).unwrap();

                    let output = NodeArena::with_capacity(adjacency.len());
                    let root = clone_graph(Some(nodes[0]), &output, &mut token);
                    black_box(root.map(|r| r.degree(&token)));
                })
            });
        });
    }

    group.finish();
}

fn bench_bounded_clone(c: &mut Criterion) {
    let adjacency = chain(10_000);

    c.bench_function("pointer_clone_untrusted_limits", |b| {
        let cloner = GraphCloner::with_limits(CloneLimits::untrusted());
        b.iter(|| {
            GhostToken::new(|mut token| {
                let input = NodeArena::with_capacity(adjacency.len());
                let nodes = from_adjacency(&input, &mut token, 0..adjacency.len(), &adjacency).unwrap();

                let output = NodeArena::with_capacity(adjacency.len());
                black_box(cloner.clone_with_report(Some(nodes[0]), &output, &mut token).unwrap().map(|r| r.stats));
            })
        });
    });
}

fn bench_index_clone(c: &mut Criterion) {
    let graph = IndexGraph::from_adjacency(0..2_000usize, &dense(2_000, 8)).unwrap();

    c.bench_function("index_clone_dense_2k_x8", |b| {
        b.iter(|| {
            black_box(
                graph
                    .clone_reachable(Some(NodeId::from_index(0)), CloneLimits::unbounded())
                    .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_pointer_clone, bench_bounded_clone, bench_index_clone);
criterion_main!(benches);
