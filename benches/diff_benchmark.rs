//! Diff benchmark: buffer diffing and full engine frames.
//!
//! Target: < 500µs for a full 200×50 repaint

use cellframe::{
    render_diff, Buffer, Cell, Engine, EngineConfig, Rgb, SequenceCache, Style, TestBackend,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Fill a buffer with shifting letters and colors, then commit it.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let glyph = char::from(b'A' + ((x + y + seed) % 26) as u8);
            let style = Style::new()
                .fg(Rgb::new(
                    ((x * 3 + seed) % 256) as u8,
                    ((y * 7 + seed) % 256) as u8,
                    ((x + y + seed) % 256) as u8,
                ))
                .bg(Rgb::new(20, 20, 30));
            buffer.set(x, y, Cell::styled(glyph, style));
        }
    }
    buffer
}

fn diff(current: &Buffer, next: &Buffer, full: bool, cache: &mut SequenceCache) -> usize {
    let mut output = Vec::with_capacity(65536);
    render_diff(current, next, full, cache, &mut output).bytes
}

fn diff_identical_buffers(c: &mut Criterion) {
    let mut buffer = create_test_buffer(200, 50, 0);
    buffer.clear_dirty();
    let committed = buffer.clone();
    let mut cache = SequenceCache::default();

    c.bench_function("diff_200x50_identical", |b| {
        b.iter(|| diff(black_box(&committed), black_box(&buffer), false, &mut cache));
    });
}

fn diff_single_cell_change(c: &mut Criterion) {
    let mut committed = create_test_buffer(200, 50, 0);
    committed.clear_dirty();
    let mut next = committed.clone();
    next.set(100, 25, Cell::styled('X', Style::new().fg(Rgb::new(255, 0, 0))));
    let mut cache = SequenceCache::default();

    c.bench_function("diff_200x50_single_change", |b| {
        b.iter(|| diff(black_box(&committed), black_box(&next), false, &mut cache));
    });
}

fn diff_line_change(c: &mut Criterion) {
    let mut committed = create_test_buffer(200, 50, 0);
    committed.clear_dirty();
    let mut next = committed.clone();
    let yellow = Style::new().fg(Rgb::new(255, 255, 0));
    for x in 0..200 {
        next.set(x, 25, Cell::styled('*', yellow));
    }
    let mut cache = SequenceCache::default();

    c.bench_function("diff_200x50_line_change", |b| {
        b.iter(|| diff(black_box(&committed), black_box(&next), false, &mut cache));
    });
}

fn diff_full_repaint(c: &mut Criterion) {
    let committed = Buffer::new(200, 50);
    let next = create_test_buffer(200, 50, 1);
    let mut cache = SequenceCache::default();

    c.bench_function("diff_200x50_full_repaint", |b| {
        b.iter(|| diff(black_box(&committed), black_box(&next), true, &mut cache));
    });
}

fn diff_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_by_size");

    for (width, height) in [(80, 24), (120, 40), (200, 50), (300, 80)] {
        let committed = create_test_buffer(width, height, 0);
        let next = create_test_buffer(width, height, 1);
        let mut cache = SequenceCache::default();

        group.bench_with_input(
            BenchmarkId::new("full_change", format!("{width}x{height}")),
            &(committed, next),
            |b, (a, n)| b.iter(|| diff(black_box(a), black_box(n), false, &mut cache)),
        );
    }

    group.finish();
}

fn engine_status_line_frame(c: &mut Criterion) {
    let mut engine = Engine::new(TestBackend::new(120, 40), EngineConfig::default());
    engine.initialize().expect("initialize");
    let mut tick = 0u64;

    c.bench_function("engine_120x40_status_line", |b| {
        b.iter(|| {
            tick += 1;
            engine.begin_frame().expect("begin");
            engine
                .write_at(0, 39, &format!("\x1b[7m tick {tick:>8} \x1b[0m"))
                .expect("write");
            engine.end_frame().expect("end");
            engine.backend_mut().clear_writes();
        });
    });
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_single_cell_change,
    diff_line_change,
    diff_full_repaint,
    diff_various_sizes,
    engine_status_line_frame,
);
criterion_main!(benches);
