//! Shared helpers: replay emitted bytes through a VT100 emulator and
//! compare the resulting screen with a buffer.

#![allow(dead_code)]

use cellframe::{Buffer, Engine, EngineConfig, Rgb, Style, TestBackend};

/// An initialized engine over an in-memory backend.
pub fn engine(width: u16, height: u16) -> Engine<TestBackend> {
    let mut engine = Engine::new(TestBackend::new(width, height), EngineConfig::default());
    engine.initialize().expect("initialize");
    engine
}

/// Run one frame.
pub fn frame(
    engine: &mut Engine<TestBackend>,
    draw: impl FnOnce(&mut Engine<TestBackend>) -> Result<(), cellframe::EngineError>,
) {
    engine.begin_frame().expect("begin_frame");
    draw(engine).expect("draw");
    engine.end_frame().expect("end_frame");
}

/// Feed everything the engine has written so far into a fresh emulator.
pub fn replay(engine: &Engine<TestBackend>) -> vt100::Parser {
    let (width, height) = engine.dimensions().expect("initialized");
    replay_bytes(width, height, &engine.backend().output())
}

/// Feed `bytes` into a fresh `width` × `height` emulator.
pub fn replay_bytes(width: u32, height: u32, bytes: &[u8]) -> vt100::Parser {
    let rows = u16::try_from(height).expect("height");
    let cols = u16::try_from(width).expect("width");
    let mut parser = vt100::Parser::new(rows, cols, 0);
    parser.process(bytes);
    parser
}

fn color(color: vt100::Color) -> Option<Rgb> {
    match color {
        vt100::Color::Rgb(r, g, b) => Some(Rgb::new(r, g, b)),
        vt100::Color::Default | vt100::Color::Idx(_) => None,
    }
}

/// Glyph and style of one emulator cell. Never-written cells read as a
/// default-styled space.
pub fn screen_cell(parser: &vt100::Parser, x: u16, y: u16) -> (char, Style) {
    let cell = parser.screen().cell(y, x).expect("cell in range");
    let glyph = cell.contents().chars().next().unwrap_or(' ');
    let mut style = Style {
        fg: color(cell.fgcolor()),
        bg: color(cell.bgcolor()),
        ..Style::DEFAULT
    };
    style.modifiers.set(cellframe::Modifiers::BOLD, cell.bold());
    style.modifiers.set(cellframe::Modifiers::ITALIC, cell.italic());
    style.modifiers.set(cellframe::Modifiers::UNDERLINE, cell.underline());
    style.modifiers.set(cellframe::Modifiers::REVERSE, cell.inverse());
    (glyph, style)
}

/// Assert the emulator shows exactly `buffer`, glyphs and styles.
pub fn assert_screen_matches(parser: &vt100::Parser, buffer: &Buffer) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let expected = buffer.get(x, y).expect("in range");
            let (glyph, style) = screen_cell(parser, x, y);
            assert_eq!(
                (glyph, style),
                (expected.glyph(), expected.style()),
                "screen differs from buffer at ({x}, {y})"
            );
        }
    }
}
