//! Benchmarks for hand evaluation and equity runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tictactoe_equity::equity::{DealSampler, EquityConfig, EquityEngine, EquityRequest};
use tictactoe_equity::game::{Board, Card, HandEvaluator};

fn cards<const N: usize>(s: &str) -> [Card; N] {
    let cards: Vec<Card> = s
        .split_whitespace()
        .map(|t| Card::parse(t).unwrap())
        .collect();
    cards.try_into().unwrap()
}

fn evaluate_5_benchmark(c: &mut Criterion) {
    let eval = HandEvaluator::new();
    let hand: [Card; 5] = cards("Ah Kd Qs Qc 7h");

    c.bench_function("evaluate_5", |b| b.iter(|| eval.evaluate_5(black_box(&hand))));
}

fn best_hand_benchmark(c: &mut Criterion) {
    let eval = HandEvaluator::new();
    let hole: [Card; 4] = cards("Ah Kd 9s 9c");
    let board = Board::parse("Qh Jh Th 9d 4s 4d 2s 3s 5c").unwrap();

    c.bench_function("best_hand_48_combos", |b| {
        b.iter(|| eval.best_hand(black_box(&hole), black_box(&board)))
    });
}

fn sample_deal_benchmark(c: &mut Criterion) {
    let request = EquityRequest::parse(
        &["Ah Kd * *", "* * * *", "* * * *"],
        "* * * * * * * * *",
    )
    .unwrap();
    let sampler = DealSampler::new(&request).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut deal = sampler.template();

    c.bench_function("sample_deal_3_players", |b| {
        b.iter(|| {
            sampler.sample_into(&mut rng, &mut deal);
            black_box(&deal);
        })
    });
}

fn equity_run_benchmark(c: &mut Criterion) {
    let request = EquityRequest::parse(&["Ah Kh Qd Jc", "* * * *"], "* * * * * * * * *").unwrap();
    let engine = EquityEngine::new(EquityConfig::new().with_trials(10_000).with_seed(42));

    c.bench_function("equity_10000_trials_heads_up", |b| {
        b.iter(|| engine.run(black_box(&request)).unwrap())
    });
}

criterion_group!(
    benches,
    evaluate_5_benchmark,
    best_hand_benchmark,
    sample_deal_benchmark,
    equity_run_benchmark
);
criterion_main!(benches);
