use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minesweeper_engine::{Board, Position};

fn benchmark_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_cascade");

    // Worst case: no mines at all, the fill sweeps the entire board.
    for size in [16usize, 32, 64] {
        let board = Board::new(size).unwrap();
        group.bench_function(format!("mine-free {}x{}", size, size), |b| {
            b.iter(|| black_box(board.reveal_cascade(Position::new(0, 0))))
        });
    }

    // Beginner density: fills stop at the numbered boundary ring.
    group.bench_function("9x9 with 10 mines", |b| {
        b.iter_with_setup(
            || Board::new(9).unwrap().place_mines(10).unwrap(),
            |board| black_box(board.reveal_cascade(Position::new(4, 4))),
        )
    });

    group.finish();
}

criterion_group!(benches, benchmark_cascade);
criterion_main!(benches);
