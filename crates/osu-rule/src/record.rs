//! Score records and the append-only score stream.

use serde::{Deserialize, Serialize};

use osu_model::StdAction;

/// Classification of one (player event, aimpoint) pairing or forced pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    /// A press landed inside its hit window.
    HitPress,
    /// A release landed inside its release window.
    HitRelease,
    /// A hold sample was satisfied.
    AimHold,
    /// An expectation was failed; `action` records which kind.
    Miss,
    /// A blank tap, or a map event the player never interacted with.
    Empty,
}

/// One emitted judgment.
///
/// Std records carry positions and no column; mania records carry a column
/// and no positions. Blank-tap `Empty` records have no map time; end-fill
/// `Empty` records do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player event time (or the sweep clock for end-of-replay misses).
    pub replay_time: i32,
    /// Judged map event time, absent for blank taps.
    pub map_time: Option<i32>,
    /// Cursor position at the player event (std only).
    pub replay_pos: Option<[f32; 2]>,
    /// Judged aimpoint position (std only).
    pub map_pos: Option<[f32; 2]>,
    /// The classification.
    pub judgment: Judgment,
    /// Player action kind this record pertains to.
    pub action: StdAction,
    /// Owning hit-object / note index, absent for blank taps.
    pub note_index: Option<usize>,
    /// Column (mania only).
    pub column: Option<usize>,
}

impl ScoreRecord {
    /// Timing offset `replay - map`, when both times are present.
    pub fn offset(&self) -> Option<i32> {
        self.map_time.map(|map| self.replay_time - map)
    }
}

/// Append-only log of judgments, in engine visit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStream {
    records: Vec<ScoreRecord>,
}

impl ScoreStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter()
    }

    /// Records with the given judgment.
    pub fn with_judgment(&self, judgment: Judgment) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().filter(move |r| r.judgment == judgment)
    }

    /// Records for one mania column.
    pub fn in_column(&self, col: usize) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().filter(move |r| r.column == Some(col))
    }

    /// A copy stably sorted by `(note_index, replay_time)`; blank taps
    /// (no note index) sort last, keeping their relative order.
    pub fn sorted_by_note(&self) -> Vec<ScoreRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by_key(|r| (r.note_index.unwrap_or(usize::MAX), r.replay_time));
        sorted
    }

    /// Timing offsets of every record with both times present.
    pub fn offsets(&self) -> impl Iterator<Item = i32> + '_ {
        self.records.iter().filter_map(|r| r.offset())
    }
}

impl<'a> IntoIterator for &'a ScoreStream {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
