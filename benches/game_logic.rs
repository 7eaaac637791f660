use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stacker::core::{Board, Grid};
use stacker::engine::{Headless, Session, SessionConfig};
use stacker::types::{BoardState, PieceKind, Turn, VisualTag, BOARD_COLS};

fn bench_animate(c: &mut Criterion) {
    let mut board = Board::new(12345);
    board.config(Some(20), true, None);

    c.bench_function("board_animate", |b| {
        b.iter(|| {
            board.animate();
            if board.state() == BoardState::Dead {
                board.init();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("collapse_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::default();
            for row in 19..23 {
                for col in 0..BOARD_COLS as i32 {
                    grid.occupy(row, col, VisualTag::Mino(PieceKind::I));
                }
            }
            grid.collapse_rows(black_box(&[19, 20, 21, 22]));
            grid
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut board = Board::new(12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            board.spawn_kind(black_box(PieceKind::T));
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut board = Board::new(12345);
    board.spawn_kind(PieceKind::T);
    let mut delta = 1;

    c.bench_function("move_by", |b| {
        b.iter(|| {
            if !board.move_by(delta) {
                delta = -delta;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = Board::new(12345);
    board.spawn_kind(PieceKind::T);
    board.soft_drop();
    board.soft_drop();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            board.rotate(black_box(Turn::Right));
        })
    });
}

fn bench_session_frame(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::default(), 12345);
    let mut out = Headless;

    c.bench_function("session_frame_present", |b| {
        b.iter(|| {
            session.on_frame(&mut out);
        })
    });
}

criterion_group!(
    benches,
    bench_animate,
    bench_line_clear,
    bench_spawn,
    bench_move,
    bench_rotate,
    bench_session_frame
);
criterion_main!(benches);
