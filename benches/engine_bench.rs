use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use skirmish::board::{Archetype, Board, Side, Unit};
use skirmish::config::GameConfig;
use skirmish::game::Game;
use skirmish::movegen::{attack_targets, move_targets};
use skirmish::policy::{choose, Context};
use skirmish::resolve::resolve_attack;
use skirmish::selfplay::{play_game, SelfPlayConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_game() -> Game {
    Game::new(&GameConfig {
        seed: Some(7),
        auto_reply: false,
        ..GameConfig::default()
    })
    .unwrap()
}

fn bench_movegen(c: &mut Criterion) {
    let game = seeded_game();
    let cells: Vec<usize> = game.board().occupied_cells(None).into_iter().collect();
    c.bench_function("movegen_all_units", |b| {
        b.iter(|| {
            for &cell in &cells {
                black_box(move_targets(black_box(game.board()), cell));
                black_box(attack_targets(black_box(game.board()), cell));
            }
        })
    });
}

fn bench_resolve_attack(c: &mut Criterion) {
    let mut board = Board::new(8);
    board.place(Unit::new(Archetype::Swordsman, 3), 0).unwrap();
    board.place(Unit::new(Archetype::Vampire, 3), 9).unwrap();
    c.bench_function("resolve_attack", |b| {
        b.iter_batched(
            || board.clone(),
            |mut scratch| resolve_attack(black_box(&mut scratch), 0, 9),
            BatchSize::SmallInput,
        )
    });
}

fn bench_policy_choice(c: &mut Criterion) {
    let game = seeded_game();
    let mut rng = StdRng::seed_from_u64(3);
    c.bench_function("policy_choose_enemy", |b| {
        b.iter(|| choose(black_box(game.board()), Side::Enemy, Context::default(), &mut rng))
    });
}

fn bench_policy_turn(c: &mut Criterion) {
    let game = seeded_game();
    c.bench_function("game_clone_and_policy_turn", |b| {
        b.iter(|| {
            let mut g = black_box(&game).clone();
            g.play_policy_turn()
        })
    });
}

fn bench_selfplay_game(c: &mut Criterion) {
    let config = SelfPlayConfig {
        num_games: 1,
        threads: 1,
        ..SelfPlayConfig::default()
    };
    c.bench_function("selfplay_full_game", |b| {
        b.iter(|| play_game(black_box(&config), 0, 17))
    });
}

criterion_group!(
    benches,
    bench_movegen,
    bench_resolve_attack,
    bench_policy_choice,
    bench_policy_turn,
    bench_selfplay_game,
);
criterion_main!(benches);
