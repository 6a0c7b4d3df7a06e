//! Stable (line, column) tracking across buffer edits.
//!
//! The buffer owns a registration table mapping opaque handles to tracked
//! positions; the handle held by a feature (marks, visual anchors) carries
//! no reference back to the buffer. On every edit the table recomputes all
//! live entries before the edit notification returns.
//!
//! Boundary policy: tracking is line-level. The column is fixed at
//! creation; only the line number moves. An edit confined to lines above
//! the tracked line shifts it by the edit's net line delta; an intra-line
//! edit (even at or before the tracked column) leaves it untouched; an
//! edit that removes the tracked line outright — whether it lands in the
//! span's interior or the span swallowed the whole first line, break
//! included — invalidates it permanently, while an edit ending on the
//! tracked line merges it onto the edit's first line. Resolution clamps
//! the column to the line's current length.

use std::collections::HashMap;
use tracing::{debug, trace};
use vix_text::Point;

/// Opaque identity of one tracked position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackingHandle(u64);

/// Callback invoked exactly once when a tracked position is released.
pub type CloseFn = Box<dyn FnOnce()>;

struct Entry {
    line: usize,
    column: usize,
    valid: bool,
    on_close: Option<CloseFn>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("line", &self.line)
            .field("column", &self.column)
            .field("valid", &self.valid)
            .finish_non_exhaustive()
    }
}

/// Registration table of tracked positions; owned by the editable buffer.
#[derive(Debug, Default)]
pub struct TrackingTable {
    entries: HashMap<u64, Entry>,
    next_id: u64,
}

/// Line-shaped description of one edit, precomputed by the buffer: the
/// first and last line the replaced span touched (in the pre-edit
/// snapshot) and how many line breaks the replacement text contains.
#[derive(Debug, Clone, Copy)]
pub struct LineEdit {
    pub first_line: usize,
    pub last_line: usize,
    pub inserted_breaks: usize,
    /// The span started at `first_line`'s first character and ran past its
    /// break, removing the line outright (a line-wise delete) rather than
    /// editing within it.
    pub removes_first_line: bool,
}

impl TrackingTable {
    pub fn create(&mut self, line: usize, column: usize, on_close: CloseFn) -> TrackingHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                line,
                column,
                valid: true,
                on_close: Some(on_close),
            },
        );
        trace!(target: "state.tracking", id, line, column, "create");
        TrackingHandle(id)
    }

    /// Current position, or `None` for unknown, released or invalidated
    /// handles.
    pub fn resolve(&self, handle: TrackingHandle) -> Option<Point> {
        let entry = self.entries.get(&handle.0)?;
        if entry.valid {
            Some(Point::new(entry.line, entry.column))
        } else {
            None
        }
    }

    /// Release a handle: runs its close callback (exactly once — the entry
    /// is removed, so a second release is a no-op) and stops tracking.
    pub fn release(&mut self, handle: TrackingHandle) {
        if let Some(mut entry) = self.entries.remove(&handle.0) {
            trace!(target: "state.tracking", id = handle.0, "release");
            if let Some(close) = entry.on_close.take() {
                close();
            }
        }
    }

    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    /// Recompute every live entry for one edit.
    pub fn apply_edit(&mut self, edit: LineEdit) {
        let removed_breaks = edit.last_line - edit.first_line;
        for (id, entry) in &mut self.entries {
            if !entry.valid || entry.line < edit.first_line {
                continue;
            }
            if entry.line > edit.last_line {
                // Entirely below the edit: shift by the net line delta.
                entry.line = entry.line + edit.inserted_breaks - removed_breaks;
            } else if entry.line == edit.first_line {
                if edit.removes_first_line {
                    // The whole line (break included) is gone, not edited.
                    debug!(target: "state.tracking", id, line = entry.line, "invalidated");
                    entry.valid = false;
                }
                // Otherwise the edit's first line survives in place.
            } else if entry.line == edit.last_line {
                // Last edited line merges onto the first.
                entry.line = edit.first_line + edit.inserted_breaks;
            } else {
                // Interior line removed outright.
                debug!(target: "state.tracking", id, line = entry.line, "invalidated");
                entry.valid = false;
            }
        }
    }
}

impl Drop for TrackingTable {
    fn drop(&mut self) {
        // Whatever is still registered gets its close callback on teardown.
        for (_, mut entry) in self.entries.drain() {
            if let Some(close) = entry.on_close.take() {
                close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn noop() -> CloseFn {
        Box::new(|| {})
    }

    #[test]
    fn resolves_to_created_position() {
        let mut table = TrackingTable::default();
        let h = table.create(2, 5, noop());
        assert_eq!(table.resolve(h), Some(Point::new(2, 5)));
    }

    #[test]
    fn intra_line_edit_leaves_position_alone() {
        let mut table = TrackingTable::default();
        let h = table.create(0, 1, noop());
        table.apply_edit(LineEdit {
            first_line: 0,
            last_line: 0,
            inserted_breaks: 0,
            removes_first_line: false,
        });
        assert_eq!(table.resolve(h), Some(Point::new(0, 1)));
    }

    #[test]
    fn line_insert_above_shifts_down() {
        let mut table = TrackingTable::default();
        let h = table.create(3, 2, noop());
        table.apply_edit(LineEdit {
            first_line: 0,
            last_line: 0,
            inserted_breaks: 2,
            removes_first_line: false,
        });
        assert_eq!(table.resolve(h), Some(Point::new(5, 2)));
    }

    #[test]
    fn line_delete_above_shifts_up() {
        let mut table = TrackingTable::default();
        let h = table.create(4, 0, noop());
        // Lines 1-2 deleted (span touched lines 1..=3, no inserted breaks,
        // line 3's tail merges onto line 1).
        table.apply_edit(LineEdit {
            first_line: 1,
            last_line: 3,
            inserted_breaks: 0,
            removes_first_line: false,
        });
        assert_eq!(table.resolve(h), Some(Point::new(2, 0)));
    }

    #[test]
    fn deleting_the_tracked_line_invalidates_forever() {
        let mut table = TrackingTable::default();
        let h = table.create(2, 4, noop());
        table.apply_edit(LineEdit {
            first_line: 1,
            last_line: 3,
            inserted_breaks: 0,
            removes_first_line: false,
        });
        assert_eq!(table.resolve(h), None);
        // Later edits never resurrect it.
        table.apply_edit(LineEdit {
            first_line: 0,
            last_line: 0,
            inserted_breaks: 5,
            removes_first_line: false,
        });
        assert_eq!(table.resolve(h), None);
    }

    #[test]
    fn removing_the_whole_first_line_invalidates() {
        let mut table = TrackingTable::default();
        let h = table.create(0, 0, noop());
        // A line-wise delete of line 0: span ran from its first character
        // past its break.
        table.apply_edit(LineEdit {
            first_line: 0,
            last_line: 1,
            inserted_breaks: 0,
            removes_first_line: true,
        });
        assert_eq!(table.resolve(h), None);
    }

    #[test]
    fn merge_moves_last_line_onto_first() {
        let mut table = TrackingTable::default();
        let h = table.create(2, 1, noop());
        // Delete from mid line 0 to mid line 2: line 2's tail joins line 0.
        table.apply_edit(LineEdit {
            first_line: 0,
            last_line: 2,
            inserted_breaks: 0,
            removes_first_line: false,
        });
        assert_eq!(table.resolve(h), Some(Point::new(0, 1)));
    }

    #[test]
    fn close_runs_exactly_once() {
        let count = Rc::new(Cell::new(0));
        let mut table = TrackingTable::default();
        let c = count.clone();
        let h = table.create(0, 0, Box::new(move || c.set(c.get() + 1)));
        table.release(h);
        table.release(h);
        assert_eq!(count.get(), 1);
        assert_eq!(table.resolve(h), None);
    }

    #[test]
    fn close_runs_on_table_teardown() {
        let count = Rc::new(Cell::new(0));
        {
            let mut table = TrackingTable::default();
            let c = count.clone();
            table.create(0, 0, Box::new(move || c.set(c.get() + 1)));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn close_runs_even_for_invalidated_entries() {
        let count = Rc::new(Cell::new(0));
        let mut table = TrackingTable::default();
        let c = count.clone();
        let h = table.create(1, 0, Box::new(move || c.set(c.get() + 1)));
        table.apply_edit(LineEdit {
            first_line: 0,
            last_line: 2,
            inserted_breaks: 0,
            removes_first_line: true,
        });
        assert_eq!(table.resolve(h), None);
        table.release(h);
        assert_eq!(count.get(), 1);
    }
}
