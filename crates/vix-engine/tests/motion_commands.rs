mod common;
use common::*;

use pretty_assertions::assert_eq;
use vix_engine::{Mode, ProcessResult};
use vix_keys::KeyInput;
use vix_text::Point;

#[test]
fn char_motions_move_and_clamp() {
    let mut e = engine(&["abcdef"]);
    feed(&mut e, "3l");
    assert_eq!(e.caret(), Point::new(0, 3));
    feed(&mut e, "h");
    assert_eq!(e.caret(), Point::new(0, 2));
    // Past the line end the caret stays on the last character.
    feed(&mut e, "99l");
    assert_eq!(e.caret(), Point::new(0, 5));
}

#[test]
fn line_start_and_end_commands() {
    let mut e = engine(&["  cat dog"]);
    feed(&mut e, "$");
    assert_eq!(e.caret(), Point::new(0, 8));
    feed(&mut e, "0");
    assert_eq!(e.caret(), Point::new(0, 0));
    feed(&mut e, "$^");
    assert_eq!(e.caret(), Point::new(0, 2));
}

#[test]
fn vertical_motion_keeps_sticky_column() {
    let mut e = engine(&["abcdef", "ab", "abcdef"]);
    feed(&mut e, "4l");
    assert_eq!(e.caret(), Point::new(0, 4));
    // Short middle line clamps the caret but remembers the column.
    feed(&mut e, "j");
    assert_eq!(e.caret(), Point::new(1, 1));
    feed(&mut e, "j");
    assert_eq!(e.caret(), Point::new(2, 4));
    // A horizontal motion forgets the sticky column.
    feed(&mut e, "hkk");
    assert_eq!(e.caret(), Point::new(0, 3));
}

#[test]
fn goto_line_commands_land_on_first_non_blank() {
    let mut e = engine(&["one", "  two", "three"]);
    feed(&mut e, "G");
    assert_eq!(e.caret(), Point::new(2, 0));
    feed(&mut e, "2G");
    assert_eq!(e.caret(), Point::new(1, 2));
    feed(&mut e, "gg");
    assert_eq!(e.caret(), Point::new(0, 0));
}

#[test]
fn word_motions_with_counts() {
    let mut e = engine(&["one two three four"]);
    feed(&mut e, "w");
    assert_eq!(e.caret(), Point::new(0, 4));
    feed(&mut e, "2w");
    assert_eq!(e.caret(), Point::new(0, 14));
    feed(&mut e, "3b");
    assert_eq!(e.caret(), Point::new(0, 0));
    feed(&mut e, "e");
    assert_eq!(e.caret(), Point::new(0, 2));
}

#[test]
fn find_char_and_till_char() {
    let mut e = engine(&["cat dog cat"]);
    feed(&mut e, "fo");
    assert_eq!(e.caret(), Point::new(0, 5));
    feed(&mut e, "0to");
    assert_eq!(e.caret(), Point::new(0, 4));
    // Backward onto a previous 'c'.
    feed(&mut e, "Fc");
    assert_eq!(e.caret(), Point::new(0, 0));
    // Missing target leaves the caret alone.
    feed(&mut e, "fz");
    assert_eq!(e.caret(), Point::new(0, 0));
}

#[test]
fn paragraph_motion_stops_at_blank_line() {
    let mut e = engine(&["alpha", "", "beta"]);
    feed(&mut e, "}");
    assert_eq!(e.caret(), Point::new(1, 0));
    feed(&mut e, "}");
    assert_eq!(e.caret(), Point::new(2, 0));
    feed(&mut e, "{{");
    assert_eq!(e.caret(), Point::new(0, 0));
}

#[test]
fn motion_at_buffer_edge_is_consumed_but_moves_nothing() {
    let mut e = engine(&["one", "two"]);
    assert_eq!(e.process_key(KeyInput::from_char('k')), ProcessResult::Processed);
    assert_eq!(e.caret(), Point::new(0, 0));
    assert_eq!(e.process_key(KeyInput::from_char('h')), ProcessResult::Processed);
    assert_eq!(e.caret(), Point::new(0, 0));
}

#[test]
fn unknown_key_reports_unhandled_only_when_nothing_pending() {
    let mut e = engine(&["one"]);
    assert_eq!(e.process_key(KeyInput::from_char('q')), ProcessResult::Unhandled);
    // With a count pending the key is swallowed and the state reset.
    feed(&mut e, "5");
    assert_eq!(e.process_key(KeyInput::from_char('q')), ProcessResult::Processed);
    feed(&mut e, "l");
    assert_eq!(e.caret(), Point::new(0, 1), "count must not leak into the next command");
    assert_eq!(e.mode(), Mode::Normal);
}

#[test]
fn escape_cancels_a_pending_operator() {
    let mut e = engine(&["cat dog"]);
    feed(&mut e, "d");
    esc(&mut e);
    feed(&mut e, "w");
    assert_eq!(e.text(), "cat dog");
    assert_eq!(e.caret(), Point::new(0, 4));
}
