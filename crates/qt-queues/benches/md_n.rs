use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qt_queues::md_n::{extend_tail, spectral_roots, LinearSystem};
use qt_queues::{MdnSolver, QueueParameters};

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("md_n_solve");
    for n in [1usize, 2, 5, 10] {
        let params = QueueParameters::from_utilization(1.0, 0.8, n).unwrap();
        let solver = MdnSolver::new(params).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &solver, |b, s| {
            b.iter(|| black_box(s.solve().unwrap()))
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let params = QueueParameters::from_utilization(1.0, 0.8, 10).unwrap();
    let roots = spectral_roots(&params).unwrap();
    let boundary = LinearSystem::build(&params, &roots)
        .unwrap()
        .solve(params.residual_tolerance())
        .unwrap();
    let weights = qt_queues::md_n::arrival_weights(&params);

    c.bench_function("md_n_roots_n10", |b| {
        b.iter(|| black_box(spectral_roots(black_box(&params)).unwrap()))
    });
    c.bench_function("md_n_linear_system_n10", |b| {
        b.iter(|| {
            black_box(
                LinearSystem::build(&params, black_box(&roots))
                    .unwrap()
                    .solve(params.residual_tolerance())
                    .unwrap(),
            )
        })
    });
    c.bench_function("md_n_tail_n10", |b| {
        b.iter(|| {
            black_box(extend_tail(black_box(&boundary.probabilities), &weights, params.length()).unwrap())
        })
    });
}

criterion_group!(benches, bench_solve, bench_stages);
criterion_main!(benches);
