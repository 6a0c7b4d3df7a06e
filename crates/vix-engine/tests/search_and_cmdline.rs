mod common;
use common::*;

use pretty_assertions::assert_eq;
use vix_engine::Mode;
use vix_registers::RegisterName;
use vix_state::setting_keys;
use vix_text::Point;

#[test]
fn slash_search_lands_on_the_match() {
    let mut e = engine(&["cat dog", "dog cat"]);
    feed(&mut e, "/dog");
    assert_eq!(e.mode(), Mode::CommandLine);
    assert_eq!(e.command_line(), "dog");
    enter(&mut e);
    assert_eq!(e.mode(), Mode::Normal);
    assert_eq!(e.caret(), Point::new(0, 4));
    assert_eq!(
        e.registers()
            .get(RegisterName::LastSearch)
            .string_value("\n"),
        "dog"
    );
}

#[test]
fn n_repeats_and_wraps_around() {
    let mut e = engine(&["cat dog", "dog cat"]);
    feed(&mut e, "/dog");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 4));
    feed(&mut e, "n");
    assert_eq!(e.caret(), Point::new(1, 0));
    // Past the last hit the search wraps to the top.
    feed(&mut e, "n");
    assert_eq!(e.caret(), Point::new(0, 4));
}

#[test]
fn capital_n_reverses_without_wrapping() {
    let mut e = engine(&["cat dog", "dog cat"]);
    feed(&mut e, "/dog");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 4));
    // Nothing before the first hit: the caret stays put.
    feed(&mut e, "N");
    assert_eq!(e.caret(), Point::new(0, 4));
}

#[test]
fn question_mark_searches_backward() {
    let mut e = engine(&["cat dog", "dog cat"]);
    feed(&mut e, "G$");
    feed(&mut e, "?dog");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(1, 0));
}

#[test]
fn bare_slash_reuses_the_last_pattern() {
    let mut e = engine(&["cat dog", "dog cat"]);
    feed(&mut e, "/dog");
    enter(&mut e);
    feed(&mut e, "gg/");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 4));
}

#[test]
fn ignorecase_setting_widens_the_match() {
    let mut e = engine(&["dog Cat"]);
    feed(&mut e, "/cat");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 0));

    let mut e = engine(&["dog Cat"]);
    e.settings_mut().set_bool(setting_keys::IGNORE_CASE, true);
    feed(&mut e, "/cat");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 4));
}

#[test]
fn nowrapscan_stops_at_the_buffer_end() {
    let mut e = engine(&["cat dog"]);
    e.settings_mut().set_bool(setting_keys::WRAP_SCAN, false);
    feed(&mut e, "/cat");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 0));
}

#[test]
fn ex_line_number_jumps_to_first_non_blank() {
    let mut e = engine(&["one", "  two", "three"]);
    feed(&mut e, ":2");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(1, 2));
    feed(&mut e, ":$");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(2, 0));
    // Out-of-range numbers clamp to the last line.
    feed(&mut e, ":99");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(2, 0));
}

#[test]
fn executed_line_is_recorded_in_the_colon_register() {
    let mut e = engine(&["one"]);
    feed(&mut e, ":quit");
    enter(&mut e);
    assert_eq!(e.mode(), Mode::Normal);
    assert_eq!(e.caret(), Point::new(0, 0));
    assert_eq!(
        e.registers()
            .get(RegisterName::LastCommand)
            .string_value("\n"),
        "quit"
    );
}

#[test]
fn backspace_edits_the_pending_line() {
    let mut e = engine(&["one", "two", "three"]);
    feed(&mut e, ":3");
    backspace(&mut e);
    feed(&mut e, "2");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(1, 0));
}

#[test]
fn backspace_on_an_empty_line_abandons_command_mode() {
    let mut e = engine(&["one"]);
    feed(&mut e, ":");
    backspace(&mut e);
    assert_eq!(e.mode(), Mode::Normal);
}

#[test]
fn escape_aborts_without_searching() {
    let mut e = engine(&["cat dog"]);
    feed(&mut e, "/dog");
    esc(&mut e);
    assert_eq!(e.mode(), Mode::Normal);
    assert_eq!(e.caret(), Point::new(0, 0));
    assert!(e.registers().get(RegisterName::LastSearch).is_empty());
    assert_eq!(e.command_line(), "");
}

#[test]
fn search_repeat_honors_a_count() {
    let mut e = engine(&["a dog b dog c dog"]);
    feed(&mut e, "/dog");
    enter(&mut e);
    assert_eq!(e.caret(), Point::new(0, 2));
    feed(&mut e, "2n");
    assert_eq!(e.caret(), Point::new(0, 14));
}
