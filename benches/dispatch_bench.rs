use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use linestat::analyzers::LineAnalyzer;
use linestat::dispatch::{CancelToken, SequentialPool, ThreadWorkerPool, WorkerPool};
use linestat::io::FileWalker;
use linestat::FailurePolicy;
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

fn create_tree(files: usize, lines: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for i in 0..files {
        let sub = dir.path().join(format!("d{}", i % 8));
        fs::create_dir_all(&sub).unwrap();
        let body: String = (0..lines)
            .map(|j| "x".repeat((i + j * 7) % 100) + "\n")
            .collect();
        fs::write(sub.join(format!("f{}.txt", i)), body).unwrap();
    }
    dir
}

fn benchmark_dispatch(c: &mut Criterion) {
    let dir = create_tree(400, 200);
    let walker = FileWalker::new(dir.path().to_path_buf());
    let analyzer = LineAnalyzer::default();

    let mut group = c.benchmark_group("dispatch");
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        let pool = SequentialPool::new(FailurePolicy::FailFast);
        b.iter(|| {
            let result = pool
                .map_reduce(walker.walk(), |p| analyzer.analyze(p), &CancelToken::new())
                .unwrap();
            black_box(result);
        })
    });

    for workers in [2, 4, 8] {
        let pool = ThreadWorkerPool::new(workers, FailurePolicy::FailFast).unwrap();
        group.bench_with_input(BenchmarkId::new("threads", workers), &pool, |b, pool| {
            b.iter(|| {
                let result = pool
                    .map_reduce(walker.walk(), |p| analyzer.analyze(p), &CancelToken::new())
                    .unwrap();
                black_box(result);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_dispatch);
criterion_main!(benches);
