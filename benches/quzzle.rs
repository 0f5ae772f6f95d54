//! Search benchmarks on the Quzzle.
//!
//! Run with:
//! ```bash
//! cargo bench --bench quzzle
//! ```

use backtrack::board::Board;
use backtrack::frontier::Strategy;
use backtrack::puzzle::{DedupMode, PuzzleConfig, PuzzleSolver};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const START: &str = "0 0 1 1\n0 0 2 3\n. . 2 3\n4 5 5 6\n4 7 7 8\n";
const TARGET: &str = "1 1 0 0\n3 2 0 0\n3 2 . .\n6 5 5 4\n8 7 7 4\n";

fn config() -> PuzzleConfig {
    let start: Board = START.parse().expect("valid start board");
    let target: Board = TARGET.parse().expect("valid target board");
    PuzzleConfig::new(start, target, 0)
}

// ============================================================================
// Benchmark: full solve, per strategy and dedup mode
// ============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("quzzle/solve");
    group.sample_size(10);

    for strategy in [Strategy::Bfs, Strategy::Dfs] {
        for dedup in [DedupMode::Full, DedupMode::Layout] {
            let config = config().with_strategy(strategy).with_dedup(dedup);
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), dedup),
                &config,
                |b, config| {
                    b.iter(|| {
                        let mut solver = PuzzleSolver::new(config.clone());
                        let outcome = solver.solve();
                        (outcome, solver.visits())
                    });
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Benchmark: move generation
// ============================================================================

fn bench_moves(c: &mut Criterion) {
    let board: Board = START.parse().expect("valid start board");
    c.bench_function("quzzle/moves", |b| b.iter(|| board.moves()));
}

criterion_group!(benches, bench_solve, bench_moves);
criterion_main!(benches);
