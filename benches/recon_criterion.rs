use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use recon_chess::game_state::chess_types::Color;
use recon_chess::game_state::game_state::GameState;
use recon_chess::move_generation::move_generator::LegalMoveGenerator;
use recon_chess::move_generation::perft::perft;
use recon_chess::recon::move_revision::speculative_moves;
use recon_chess::search::mcts_config::MctsConfig;
use recon_chess::search::mcts_search::Mcts;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    BenchCase {
        name: "promotions",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
    },
];

fn bench_speculative_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("speculative_moves");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let mover = game.side_to_move;
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &game, |b, game| {
            b.iter(|| black_box(speculative_moves(black_box(game), mover)).len());
        });
    }

    group.finish();
}

fn bench_rollouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(30);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let mut mcts = Mcts::new(game.clone(), Color::White, MctsConfig::deterministic(1, 7));
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &game, |b, game| {
            b.iter(|| black_box(mcts.simulate(black_box(game))));
        });
    }

    group.finish();
}

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(6));

    let game = GameState::new_game();
    for iterations in [50usize, 200] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(BenchmarkId::from_parameter(iterations), &iterations, |b, &iterations| {
            b.iter(|| {
                let mut mcts = Mcts::new(game.clone(), Color::White, MctsConfig::deterministic(iterations, 3));
                mcts.search().expect("search invariants hold");
                black_box(mcts.pick_move())
            });
        });
    }

    group.finish();
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_legal");
    group.sample_size(20);

    let game = GameState::new_game();
    let nodes = perft(&LegalMoveGenerator, &game, 3);
    assert_eq!(nodes, 8902, "perft mismatch before benchmarking");
    group.throughput(Throughput::Elements(nodes));
    group.bench_function("startpos_d3", |b| {
        b.iter(|| black_box(perft(&LegalMoveGenerator, black_box(&game), 3)));
    });

    group.finish();
}

criterion_group!(
    recon_benches,
    bench_speculative_moves,
    bench_rollouts,
    bench_search_iterations,
    bench_perft
);
criterion_main!(recon_benches);
