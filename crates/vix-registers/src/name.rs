//! The closed register alphabet.
//!
//! Exactly 74 identities: the unnamed register `"`, 26 lowercase letters,
//! their 26 uppercase append variants, the 10 numbered registers, and 11
//! specials. Every identity maps to exactly one character and back; the
//! mapping is exercised exhaustively in tests.

/// Name of a register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterName {
    /// `"` — the default target of delete/yank/paste.
    Unnamed,
    /// `a`..`z`. The payload is the lowercase letter.
    Lower(char),
    /// `A`..`Z` — append-mode variants of the lowercase slots.
    Upper(char),
    /// `0`..`9`. `0` receives yanks; `1`..`9` rotate on line deletes.
    Numbered(u8),
    /// `~` — drag-and-drop text.
    Drop,
    /// `-` — deletes smaller than one line.
    SmallDelete,
    /// `_` — the black hole; writes are discarded.
    Blackhole,
    /// `*` — primary-selection clipboard.
    SelectionStar,
    /// `+` — system clipboard.
    SelectionPlus,
    /// `%` — current file name (read-only in hosts).
    FileName,
    /// `:` — most recent command line.
    LastCommand,
    /// `#` — alternate file name.
    AlternateFile,
    /// `/` — last search pattern.
    LastSearch,
    /// `.` — last inserted text.
    LastInsert,
    /// `=` — expression register.
    Expression,
}

impl RegisterName {
    /// The character denoting this register.
    pub fn char(&self) -> char {
        match *self {
            Self::Unnamed => '"',
            Self::Lower(c) => c,
            Self::Upper(c) => c,
            Self::Numbered(n) => (b'0' + n) as char,
            Self::Drop => '~',
            Self::SmallDelete => '-',
            Self::Blackhole => '_',
            Self::SelectionStar => '*',
            Self::SelectionPlus => '+',
            Self::FileName => '%',
            Self::LastCommand => ':',
            Self::AlternateFile => '#',
            Self::LastSearch => '/',
            Self::LastInsert => '.',
            Self::Expression => '=',
        }
    }

    /// Inverse of [`char`](Self::char): succeeds for exactly the 74 defined
    /// characters.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Self::Unnamed),
            'a'..='z' => Some(Self::Lower(c)),
            'A'..='Z' => Some(Self::Upper(c)),
            '0'..='9' => Some(Self::Numbered(c as u8 - b'0')),
            '~' => Some(Self::Drop),
            '-' => Some(Self::SmallDelete),
            '_' => Some(Self::Blackhole),
            '*' => Some(Self::SelectionStar),
            '+' => Some(Self::SelectionPlus),
            '%' => Some(Self::FileName),
            ':' => Some(Self::LastCommand),
            '#' => Some(Self::AlternateFile),
            '/' => Some(Self::LastSearch),
            '.' => Some(Self::LastInsert),
            '=' => Some(Self::Expression),
            _ => None,
        }
    }

    /// Every register name, in display order. Always 74 entries.
    pub fn all() -> Vec<Self> {
        let mut out = vec![Self::Unnamed];
        out.extend(('a'..='z').map(Self::Lower));
        out.extend(('A'..='Z').map(Self::Upper));
        out.extend((0..10).map(Self::Numbered));
        out.extend([
            Self::Drop,
            Self::SmallDelete,
            Self::Blackhole,
            Self::SelectionStar,
            Self::SelectionPlus,
            Self::FileName,
            Self::LastCommand,
            Self::AlternateFile,
            Self::LastSearch,
            Self::LastInsert,
            Self::Expression,
        ]);
        out
    }

    /// True for the uppercase append variants.
    pub fn is_append(&self) -> bool {
        matches!(self, Self::Upper(_))
    }

    /// The slot a name stores into: uppercase variants share their lowercase
    /// letter's slot, everything else is its own slot.
    pub fn storage_slot(&self) -> Self {
        match *self {
            Self::Upper(c) => Self::Lower(c.to_ascii_lowercase()),
            other => other,
        }
    }
}
