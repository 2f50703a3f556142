//! Task board demo: a small dashboard redrawn every 50ms.
//!
//! Only the progress bars and the clock change between frames, so each
//! frame writes a few dozen bytes. Resize the terminal to see a full
//! repaint.
//!
//! Press 'q' or Escape to quit.
//!
//! Logs go to stderr, filtered by `CELLFRAME_LOG`:
//!
//! ```sh
//! CELLFRAME_LOG=render=trace cargo run --example task_board 2> render.log
//! ```

use cellframe::{styled, BoxVariant, Engine, EngineConfig, Modifiers, Rgb, Style};
use crossterm::event::{self, Event, KeyCode};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const TASKS: &[(&str, u32)] = &[
    ("parse config", 7),
    ("index workspace", 3),
    ("fetch dependencies", 5),
    ("compile", 2),
    ("run tests", 4),
];

fn bar(progress: u32, width: usize) -> String {
    let filled = (progress as usize * width) / 100;
    let done = Style::new().fg(Rgb::new(80, 200, 120));
    let todo = Style::new().fg(Rgb::new(70, 70, 70));
    format!(
        "{}{}\x1b[0m {progress:>3}%",
        styled(&"█".repeat(filled), done),
        styled(&"░".repeat(width - filled), todo),
    )
}

fn draw(engine: &mut Engine, started: Instant, tick: u32) -> Result<(), cellframe::EngineError> {
    let (width, height) = engine.dimensions().unwrap_or((80, 24));
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    let height = i32::try_from(height).unwrap_or(i32::MAX);

    let title = Style::new()
        .fg(Rgb::WHITE)
        .bg(Rgb::new(40, 80, 120))
        .add_modifiers(Modifiers::BOLD);
    engine.clear_line(0)?;
    engine.write_at(0, 0, &styled(&format!(" Task board  {:>6.1}s ", started.elapsed().as_secs_f32()), title))?;

    engine.draw_box(0, 1, width.min(60), 2 + TASKS.len() as i32, BoxVariant::Rounded, None)?;
    for (row, (name, speed)) in (2..).zip(TASKS) {
        let progress = (tick.saturating_mul(*speed) / 2).min(100);
        let label = if progress == 100 {
            styled(&format!("{name:<20}"), Style::new().add_modifiers(Modifiers::ITALIC))
        } else {
            format!("{name:<20}")
        };
        engine.write_at(2, row, &format!("{label} {}", bar(progress, 24)))?;
    }

    engine.clear_line(height - 1)?;
    engine.write_at(1, height - 1, "\x1b[7m q \x1b[0m quit")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CELLFRAME_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env()
        .with_alternate_screen(true)
        .with_raw_mode(true);
    let mut engine = Engine::new(cellframe::CrosstermBackend::new(), config);
    engine.initialize()?;

    let started = Instant::now();
    let mut tick = 0u32;
    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                    engine.cleanup();
                    let stats = engine.performance_stats();
                    println!(
                        "{} frames, {} bytes written, avg {}µs per frame",
                        stats.frame_count, stats.bytes_written, stats.avg_render_us
                    );
                    return Ok(());
                }
                Event::Resize(..) => {
                    engine.update_dimensions()?;
                }
                _ => {}
            }
        }

        engine.begin_frame()?;
        draw(&mut engine, started, tick)?;
        engine.end_frame()?;

        tick = tick.wrapping_add(1);
        std::thread::sleep(Duration::from_millis(50));
    }
}
