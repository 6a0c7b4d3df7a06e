//! Repeatable text changes.
//!
//! Insert/Replace-mode edits are recorded as a [`TextChange`] tree so the
//! repeat command can replay the whole edit verbatim. The tree has three
//! shapes: literal inserted text, a run of backspaces, and the sequential
//! combination of two changes.

/// One replayable edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// Literal text typed in.
    Insert(String),
    /// `n` characters backspaced away.
    DeleteLeft(usize),
    /// Two changes applied in sequence.
    Combination(Box<TextChange>, Box<TextChange>),
}

impl TextChange {
    pub fn combine(left: TextChange, right: TextChange) -> TextChange {
        TextChange::Combination(Box::new(left), Box::new(right))
    }

    /// Flatten the tree into its leaf operations, left to right.
    fn leaves<'a>(&'a self, out: &mut Vec<&'a TextChange>) {
        match self {
            TextChange::Combination(a, b) => {
                a.leaves(out);
                b.leaves(out);
            }
            leaf => out.push(leaf),
        }
    }

    /// The net inserted text of this change, derived by simulating the leaf
    /// operations: inserts accumulate, a DeleteLeft shortens the
    /// accumulated text. A DeleteLeft that reaches back past everything
    /// inserted so far makes the net insert indeterminate: the result is
    /// `None`.
    pub fn insert_text(&self) -> Option<String> {
        let mut ops = Vec::new();
        self.leaves(&mut ops);
        let mut text: Vec<char> = Vec::new();
        for op in ops {
            match op {
                TextChange::Insert(s) => text.extend(s.chars()),
                TextChange::DeleteLeft(n) => {
                    if *n > text.len() {
                        return None;
                    }
                    text.truncate(text.len() - n);
                }
                TextChange::Combination(..) => unreachable!("leaves are not combinations"),
            }
        }
        Some(text.into_iter().collect())
    }

    /// Leaf operations as (inserted text, delete count) steps for replay.
    pub fn operations(&self) -> Vec<ChangeOp> {
        let mut ops = Vec::new();
        self.leaves(&mut ops);
        ops.iter()
            .map(|op| match op {
                TextChange::Insert(s) => ChangeOp::Insert(s.clone()),
                TextChange::DeleteLeft(n) => ChangeOp::DeleteLeft(*n),
                TextChange::Combination(..) => unreachable!("leaves are not combinations"),
            })
            .collect()
    }
}

/// A single replay step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOp {
    Insert(String),
    DeleteLeft(usize),
}

/// Accumulates the in-progress Insert/Replace-mode change and remembers the
/// last completed one for the repeat command.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    current: Option<TextChange>,
    last: Option<TextChange>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin recording a fresh change, discarding any unfinished one.
    pub fn start(&mut self) {
        self.current = None;
    }

    fn push(&mut self, change: TextChange) {
        self.current = Some(match self.current.take() {
            // Adjacent inserts coalesce so `insert_text` stays cheap and the
            // recorded tree mirrors what the user net-typed.
            Some(TextChange::Insert(mut a)) => {
                if let TextChange::Insert(b) = change {
                    a.push_str(&b);
                    TextChange::Insert(a)
                } else {
                    TextChange::combine(TextChange::Insert(a), change)
                }
            }
            Some(prior) => TextChange::combine(prior, change),
            None => change,
        });
    }

    pub fn record_insert(&mut self, text: &str) {
        if !text.is_empty() {
            self.push(TextChange::Insert(text.to_string()));
        }
    }

    pub fn record_delete_left(&mut self, count: usize) {
        if count > 0 {
            self.push(TextChange::DeleteLeft(count));
        }
    }

    /// Finish the in-progress change; it becomes the repeat target. An
    /// empty recording leaves the previous last change in place.
    pub fn complete(&mut self) {
        if let Some(change) = self.current.take() {
            self.last = Some(change);
        }
    }

    pub fn last_change(&self) -> Option<&TextChange> {
        self.last.as_ref()
    }

    /// Install a change directly (used when a command synthesizes an edit).
    pub fn set_last_change(&mut self, change: TextChange) {
        self.last = Some(change);
    }
}
