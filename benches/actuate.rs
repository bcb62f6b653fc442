use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kanji_2048::actuator::numerals::translate;
use kanji_2048::actuator::{build_game_page, ActuatorConfig, HtmlActuator};
use kanji_2048::term::{BoardView, FrameBuffer, Viewport};
use kanji_2048::types::{Grid, Metadata, NumeralType, Tile};

/// A crowded board: every cell filled, one merge and a few slides.
fn full_grid() -> Grid {
    let mut grid = Grid::new(4);
    for x in 0..4 {
        for y in 0..4 {
            let value = 2u32 << ((x * 4 + y) % 12);
            grid.insert_tile(Tile::new(value, x, y)).unwrap();
        }
    }
    grid.insert_tile(Tile::new(8, 0, 0).merged_from(
        Tile::new(4, 0, 0).slid_from(0, 0),
        Tile::new(4, 0, 0).slid_from(0, 1),
    ))
    .unwrap();
    grid.insert_tile(Tile::new(2048, 3, 3).slid_from(3, 0)).unwrap();
    grid
}

fn bench_actuate_frame(c: &mut Criterion) {
    let grid = full_grid();
    let metadata = Metadata::new(20480, 40960, NumeralType::Daiji);
    let mut actuator = HtmlActuator::new(build_game_page(4), ActuatorConfig::default()).unwrap();

    c.bench_function("actuate_full_board", |b| {
        b.iter(|| {
            actuator.actuate(black_box(&grid), black_box(&metadata));
            actuator.flush_frames();
        })
    });
}

fn bench_update_grid(c: &mut Criterion) {
    let grid = full_grid();
    let mut actuator = HtmlActuator::new(build_game_page(4), ActuatorConfig::default()).unwrap();
    actuator.actuate(&grid, &Metadata::new(0, 0, NumeralType::Arabic));
    actuator.flush_frames();
    let modes = [NumeralType::Arabic, NumeralType::Daiji, NumeralType::Kanji];
    let mut i = 0usize;

    c.bench_function("update_grid_switch_numerals", |b| {
        b.iter(|| {
            i += 1;
            let metadata = Metadata::new(20480, 40960, modes[i % 3]);
            actuator.update_grid(black_box(&grid), &metadata).unwrap();
        })
    });
}

fn bench_translate(c: &mut Criterion) {
    c.bench_function("translate_daiji", |b| {
        b.iter(|| translate(black_box(131072), NumeralType::Daiji))
    });
}

fn bench_board_view(c: &mut Criterion) {
    let grid = full_grid();
    let mut actuator = HtmlActuator::new(build_game_page(4), ActuatorConfig::default()).unwrap();
    actuator.actuate(&grid, &Metadata::new(20480, 40960, NumeralType::Kanji));
    actuator.flush_frames();
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("board_view_render_into", |b| {
        b.iter(|| view.render_into(black_box(actuator.surface()), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_actuate_frame,
    bench_update_grid,
    bench_translate,
    bench_board_view
);
criterion_main!(benches);
