use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use lib::eval::Evaluator;
use lib::game::Game;
use lib::search::Minimax;

fn bench(c: &mut Criterion) {
    c.benchmark_group("benches").bench_function("minimax", |b| {
        b.iter_batched_ref(
            || (Minimax::new(Evaluator::default()), Game::default()),
            |(mm, game)| mm.select(game),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
