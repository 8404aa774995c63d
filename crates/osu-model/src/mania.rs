//! Mania action model.
//!
//! Maps and replays share one normalized shape: `(start, end, col)` triples,
//! one per note or per completed press/release pair. Scoring expands each
//! column into a time-sorted list of role-tagged events.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::SINGLE_NOTE_GAP_MS;

/// One mania note (map) or one completed key press/release pair (replay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManiaNote {
    /// Press time in milliseconds.
    pub start: i32,
    /// Release time in milliseconds.
    pub end: i32,
    /// Column index, 0-based.
    pub col: usize,
}

impl ManiaNote {
    pub fn new(start: i32, end: i32, col: usize) -> Self {
        Self { start, end, col }
    }

    /// Whether this is a single (tap) note rather than a long note.
    pub fn is_single(&self) -> bool {
        self.end - self.start <= SINGLE_NOTE_GAP_MS
    }
}

/// Role of an expanded per-column event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteRole {
    Press,
    Release,
}

/// A role-tagged event in one column's expanded timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEvent {
    /// Event time in milliseconds.
    pub time: i32,
    /// Press or release.
    pub role: NoteRole,
    /// Index of the owning note in [`ManiaActions::notes`].
    pub note: usize,
}

/// Normalized mania actions: notes across a declared number of columns.
///
/// Used for both maps and replays; input order across columns is arbitrary,
/// expansion re-indexes per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManiaActions {
    notes: Vec<ManiaNote>,
    columns: usize,
}

impl ManiaActions {
    /// Wrap notes, deriving the column count from the data.
    pub fn new(notes: Vec<ManiaNote>) -> Result<Self, InputError> {
        let columns = notes.iter().map(|n| n.col + 1).max().unwrap_or(0);
        Self::with_columns(notes, columns)
    }

    /// Wrap notes spanning an explicitly declared number of columns.
    ///
    /// A replay in which the player never touched the last column still
    /// spans the full key count; declare it here.
    pub fn with_columns(notes: Vec<ManiaNote>, columns: usize) -> Result<Self, InputError> {
        for (i, note) in notes.iter().enumerate() {
            if note.end < note.start {
                return Err(InputError::NegativeNoteLength { note: i });
            }
            if note.col >= columns {
                return Err(InputError::ColumnOutOfRange {
                    note: i,
                    col: note.col,
                    columns,
                });
            }
        }
        Ok(Self { notes, columns })
    }

    pub fn notes(&self) -> &[ManiaNote] {
        &self.notes
    }

    pub fn note(&self, index: usize) -> &ManiaNote {
        &self.notes[index]
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Expand one column into a time-sorted list of role-tagged events.
    ///
    /// Each note contributes a press at `start` and a release at `end`;
    /// presses sort before releases on time ties.
    pub fn column_events(&self, col: usize) -> Vec<ColumnEvent> {
        let mut events = Vec::new();
        for (i, note) in self.notes.iter().enumerate() {
            if note.col != col {
                continue;
            }
            events.push(ColumnEvent {
                time: note.start,
                role: NoteRole::Press,
                note: i,
            });
            events.push(ColumnEvent {
                time: note.end,
                role: NoteRole::Release,
                note: i,
            });
        }
        events.sort_by_key(|e| (e.time, e.role as u8));
        events
    }

    /// Press times for one column, sorted.
    pub fn press_times(&self, col: usize) -> Vec<i32> {
        let mut times: Vec<i32> = self
            .notes
            .iter()
            .filter(|n| n.col == col)
            .map(|n| n.start)
            .collect();
        times.sort_unstable();
        times
    }
}
