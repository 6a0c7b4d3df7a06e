#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use vix_engine::VimEngine;
use vix_keys::{KeyInput, NamedKey};

/// Route engine logs through the test harness when RUST_LOG is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn engine(lines: &[&str]) -> VimEngine {
    init_tracing();
    VimEngine::from_lines(lines)
}

/// Feed a sequence of printable keys.
pub fn feed(engine: &mut VimEngine, keys: &str) {
    engine.process_text(keys);
}

pub fn esc(engine: &mut VimEngine) {
    engine.process_key(KeyInput::named(NamedKey::Escape));
}

pub fn enter(engine: &mut VimEngine) {
    engine.process_key(KeyInput::named(NamedKey::Enter));
}

pub fn backspace(engine: &mut VimEngine) {
    engine.process_key(KeyInput::named(NamedKey::Backspace));
}

pub fn ctrl(engine: &mut VimEngine, c: char) {
    engine.process_key(KeyInput::control(c));
}

/// Build an engine, run keys, hand it back for assertions.
pub fn run(lines: &[&str], keys: &str) -> VimEngine {
    let mut e = engine(lines);
    feed(&mut e, keys);
    e
}
