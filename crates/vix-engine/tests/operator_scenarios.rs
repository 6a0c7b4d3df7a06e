mod common;
use common::*;

use pretty_assertions::assert_eq;
use vix_engine::Mode;
use vix_registers::RegisterName;
use vix_text::Point;

#[test]
fn dw_deletes_word_and_trailing_space() {
    let e = run(&["cat dog"], "dw");
    assert_eq!(e.text(), "dog");
    assert_eq!(e.caret(), Point::new(0, 0));
    assert_eq!(
        e.registers().get(RegisterName::Unnamed).string_value("\n"),
        "cat "
    );
    // Character-wise deletes smaller than a line land in `-`.
    assert_eq!(
        e.registers()
            .get(RegisterName::SmallDelete)
            .string_value("\n"),
        "cat "
    );
}

#[test]
fn counts_before_and_after_operator_multiply() {
    let e = run(&["a b c d e f g"], "2d3w");
    assert_eq!(e.text(), "g");
}

#[test]
fn doubled_operator_acts_on_whole_lines() {
    let mut e = engine(&["one", "two", "three"]);
    feed(&mut e, "dd");
    assert_eq!(e.text(), "two\nthree");
    assert_eq!(
        e.registers()
            .get(RegisterName::Numbered(1))
            .string_value("\n"),
        "one\n"
    );
    feed(&mut e, "2dd");
    assert_eq!(e.text(), "");
}

#[test]
fn line_deletes_rotate_the_numbered_ring() {
    let mut e = engine(&["one", "two", "three"]);
    feed(&mut e, "dddd");
    assert_eq!(
        e.registers()
            .get(RegisterName::Numbered(1))
            .string_value("\n"),
        "two\n"
    );
    assert_eq!(
        e.registers()
            .get(RegisterName::Numbered(2))
            .string_value("\n"),
        "one\n"
    );
}

#[test]
fn delete_with_linewise_motion() {
    let e = run(&["one", "two", "three"], "dj");
    assert_eq!(e.text(), "three");
    assert_eq!(e.caret(), Point::new(0, 0));
}

#[test]
fn delete_to_line_end_is_inclusive() {
    let mut e = engine(&["cat dog"]);
    feed(&mut e, "llld$");
    assert_eq!(e.text(), "cat");
    assert_eq!(e.caret(), Point::new(0, 2));
}

#[test]
fn change_word_enters_insert_mode() {
    let mut e = engine(&["cat dog"]);
    feed(&mut e, "cw");
    assert_eq!(e.mode(), Mode::Insert);
    assert_eq!(e.text(), "dog");
    feed(&mut e, "big ");
    esc(&mut e);
    assert_eq!(e.text(), "big dog");
    assert_eq!(e.mode(), Mode::Normal);
}

#[test]
fn change_line_reopens_an_empty_line() {
    let mut e = engine(&["one", "two"]);
    feed(&mut e, "cc");
    assert_eq!(e.mode(), Mode::Insert);
    assert_eq!(e.caret(), Point::new(0, 0));
    feed(&mut e, "hi");
    esc(&mut e);
    assert_eq!(e.text(), "hi\ntwo");
}

#[test]
fn yank_then_paste_linewise() {
    let mut e = engine(&["one", "two"]);
    feed(&mut e, "yy");
    // Yanks land in register 0 as well as the unnamed mirror.
    assert_eq!(
        e.registers()
            .get(RegisterName::Numbered(0))
            .string_value("\n"),
        "one\n"
    );
    feed(&mut e, "p");
    assert_eq!(e.text(), "one\none\ntwo");
    assert_eq!(e.caret(), Point::new(1, 0));
}

#[test]
fn yank_word_then_paste_before() {
    let mut e = engine(&["cat dog"]);
    feed(&mut e, "ywP");
    assert_eq!(e.text(), "cat cat dog");
    assert_eq!(e.caret(), Point::new(0, 3));
}

#[test]
fn paste_after_final_line_without_trailing_break() {
    let mut e = engine(&["one", "two"]);
    feed(&mut e, "yyG");
    feed(&mut e, "p");
    assert_eq!(e.text(), "one\ntwo\none");
    assert_eq!(e.caret(), Point::new(2, 0));
}

#[test]
fn charwise_paste_with_count() {
    let mut e = engine(&["cat"]);
    feed(&mut e, "x");
    assert_eq!(e.text(), "at");
    feed(&mut e, "2p");
    assert_eq!(e.text(), "acct");
}

#[test]
fn rot13_operator_over_a_motion() {
    let e = run(&["abc"], "g?$");
    assert_eq!(e.text(), "nop");
}

#[test]
fn rot13_doubled_covers_the_line() {
    let e = run(&["Hello", "world"], "g?g?");
    assert_eq!(e.text(), "Uryyb\nworld");
}

#[test]
fn delete_char_commands() {
    let mut e = engine(&["cat"]);
    feed(&mut e, "x");
    assert_eq!(e.text(), "at");
    feed(&mut e, "lX");
    assert_eq!(e.text(), "t");
    assert_eq!(e.caret(), Point::new(0, 0));
    // x at the end of the content is a no-op on an empty remainder.
    feed(&mut e, "xx");
    assert_eq!(e.text(), "");
}

#[test]
fn delete_char_with_count_clamps_to_line() {
    let e = run(&["cat dog"], "99x");
    assert_eq!(e.text(), "");
}

#[test]
fn change_to_end_keeps_the_caret_past_content() {
    let mut e = engine(&["cat dog"]);
    feed(&mut e, "3lC");
    assert_eq!(e.mode(), Mode::Insert);
    assert_eq!(e.text(), "cat");
    feed(&mut e, "!");
    esc(&mut e);
    assert_eq!(e.text(), "cat!");
}

#[test]
fn replace_char_command() {
    let mut e = engine(&["cat"]);
    feed(&mut e, "rx");
    assert_eq!(e.text(), "xat");
    assert_eq!(e.caret(), Point::new(0, 0));
    feed(&mut e, "3rz");
    assert_eq!(e.text(), "zzz");
    assert_eq!(e.caret(), Point::new(0, 2));
    // Not enough characters for the count: the whole command fails.
    feed(&mut e, "09ry");
    assert_eq!(e.text(), "zzz");
}

#[test]
fn operator_with_failed_motion_leaves_buffer_alone() {
    let e = run(&["one"], "dk");
    assert_eq!(e.text(), "one");
    assert_eq!(e.mode(), Mode::Normal);
}

#[test]
fn operator_cancelled_by_non_motion_key() {
    let e = run(&["cat dog"], "dp");
    assert_eq!(e.text(), "cat dog");
    assert_eq!(e.mode(), Mode::Normal);
}
