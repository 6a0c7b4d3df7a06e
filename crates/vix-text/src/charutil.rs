//! Character classification and the small alphabet transforms used by
//! commands (`g?` rot13, Ctrl-A style letter stepping).

/// Word-character classes used by word/WORD motions. `Word` covers letters,
/// digits and underscore; `Punctuation` is any other non-blank; `Blank` is
/// space/tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Blank,
    Word,
    Punctuation,
}

/// Classify a character for normal-word motion purposes.
pub fn char_class(c: char) -> CharClass {
    if c == ' ' || c == '\t' {
        CharClass::Blank
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

pub fn is_word_char(c: char) -> bool {
    char_class(c) == CharClass::Word
}

/// WORD motions only distinguish blank from non-blank.
pub fn is_big_word_char(c: char) -> bool {
    char_class(c) != CharClass::Blank
}

pub fn is_blank(c: char) -> bool {
    char_class(c) == CharClass::Blank
}

/// Rotate an ASCII letter 13 places within its case; anything else is
/// returned unchanged. Applying it twice is the identity.
pub fn rot13(c: char) -> char {
    match c {
        'a'..='z' => (((c as u8 - b'a' + 13) % 26) + b'a') as char,
        'A'..='Z' => (((c as u8 - b'A' + 13) % 26) + b'A') as char,
        other => other,
    }
}

/// Step an ASCII letter by `delta` places, saturating at the alphabet
/// bounds of its case. Non-letters are returned unchanged.
pub fn alpha_add(delta: i32, c: char) -> char {
    let (lo, hi) = match c {
        'a'..='z' => (b'a', b'z'),
        'A'..='Z' => (b'A', b'Z'),
        _ => return c,
    };
    let stepped = (c as u8 as i32).saturating_add(delta);
    stepped.clamp(lo as i32, hi as i32) as u8 as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classes() {
        assert_eq!(char_class('a'), CharClass::Word);
        assert_eq!(char_class('_'), CharClass::Word);
        assert_eq!(char_class('9'), CharClass::Word);
        assert_eq!(char_class(','), CharClass::Punctuation);
        assert_eq!(char_class(' '), CharClass::Blank);
        assert_eq!(char_class('\t'), CharClass::Blank);
        assert!(is_big_word_char(','));
        assert!(!is_big_word_char(' '));
    }

    #[test]
    fn rot13_known_pairs() {
        assert_eq!(rot13('a'), 'n');
        assert_eq!(rot13('N'), 'A');
        assert_eq!(rot13('!'), '!');
    }

    #[test]
    fn alpha_add_saturates() {
        assert_eq!(alpha_add(1, 'z'), 'z');
        assert_eq!(alpha_add(5, 'y'), 'z');
        assert_eq!(alpha_add(-1, 'a'), 'a');
        assert_eq!(alpha_add(-3, 'B'), 'A');
        assert_eq!(alpha_add(1, 'a'), 'b');
        assert_eq!(alpha_add(2, '!'), '!');
    }

    proptest! {
        #[test]
        fn rot13_is_an_involution(c in proptest::char::any()) {
            prop_assert_eq!(rot13(rot13(c)), c);
        }

        #[test]
        fn alpha_add_stays_in_case(delta in -60i32..60, c in proptest::char::range('a', 'z')) {
            let out = alpha_add(delta, c);
            prop_assert!(out.is_ascii_lowercase());
        }

        #[test]
        fn alpha_add_upper_stays_in_case(delta in -60i32..60, c in proptest::char::range('A', 'Z')) {
            let out = alpha_add(delta, c);
            prop_assert!(out.is_ascii_uppercase());
        }
    }
}
