use algoviz::algorithm::{search, sort, traverse};
use algoviz::graph::generators;
use algoviz::{BinaryTree, PathKind, SearchKind, SortKind, Structure, TraversalKind, UndirectedGraph};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_sorts(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values = generators::random_values(200, 1000, &mut rng);

    let mut group = c.benchmark_group("sort");
    for kind in SortKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &values, |b, values| {
            b.iter(|| sort(kind, black_box(values)))
        });
    }
    group.finish();
}

fn bench_searches(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values = generators::sorted_random_values(5000, 100_000, &mut rng);
    let target = values[3777];

    let mut group = c.benchmark_group("search");
    for kind in SearchKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &values, |b, values| {
            b.iter(|| search(kind, black_box(values), target))
        });
    }
    group.finish();
}

fn bench_traversals(c: &mut Criterion) {
    let tree = BinaryTree::from_input(&generators::sample_tree()).expect("sample tree");
    let graph = UndirectedGraph::from_input(&generators::grid_graph(30, 30)).expect("grid");

    let mut group = c.benchmark_group("traversal");
    for kind in TraversalKind::ALL {
        let structure = if kind.tree_only() {
            Structure::Tree(tree.clone())
        } else {
            Structure::Graph(graph.clone())
        };
        group.bench_function(BenchmarkId::from_parameter(kind), |b| {
            b.iter(|| traverse(kind, black_box(structure.clone()), None))
        });
    }
    group.finish();
}

fn bench_routes(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let input = generators::random_geometric_graph(400, 100.0, 12.0, &mut rng);
    let graph = UndirectedGraph::<f64>::from_input(&input).expect("geometric graph");

    let mut group = c.benchmark_group("route");
    for kind in PathKind::ALL {
        group.bench_function(BenchmarkId::from_parameter(kind), |b| {
            b.iter(|| kind.find_path::<f64, _>(black_box(&graph), "n0", "n399"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sorts, bench_searches, bench_traversals, bench_routes);
criterion_main!(benches);
