//! Benchmark for identifier translation overhead.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nxnk_core::Graph;

fn build_grid(side: u32) -> Graph<String> {
    let mut g = Graph::new();
    for x in 0..side {
        for y in 0..side {
            let here = format!("{}:{}", x, y);
            if x + 1 < side {
                g.add_edge(here.clone(), format!("{}:{}", x + 1, y)).unwrap();
            }
            if y + 1 < side {
                g.add_edge(here, format!("{}:{}", x, y + 1)).unwrap();
            }
        }
    }
    g
}

fn bench_add_edges(c: &mut Criterion) {
    c.bench_function("build_grid_50x50", |b| b.iter(|| black_box(build_grid(50))));
}

fn bench_queries(c: &mut Criterion) {
    let g = build_grid(100);
    let names: Vec<String> = g.nodes().cloned().collect();

    c.bench_function("neighbors_all_nodes", |b| {
        b.iter(|| {
            let mut total = 0;
            for name in &names {
                total += g.neighbors(name).unwrap().count();
            }
            black_box(total)
        })
    });

    c.bench_function("degrees_lazy", |b| {
        b.iter(|| black_box(g.degrees().map(|(_, d)| d).sum::<usize>()))
    });

    c.bench_function("to_networkit_and_back", |b| {
        b.iter(|| {
            let handles: Vec<usize> = g
                .to_networkit_nodes(&names)
                .collect::<Result<_, _>>()
                .unwrap();
            black_box(g.to_user_nodes(handles).count())
        })
    });
}

criterion_group!(benches, bench_add_edges, bench_queries);
criterion_main!(benches);
