use thiserror::Error;

/// Input validation errors surfaced when normalizing maps and replays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("map contains no hit objects")]
    EmptyMap,
    #[error("hit object {object} has no aimpoints")]
    EmptyObject { object: usize },
    #[error("hit object {object} does not begin with a press aimpoint")]
    MissingPress { object: usize },
    #[error("hit object {object} aimpoint times decrease at index {aimpoint}")]
    UnorderedAimpoints { object: usize, aimpoint: usize },
    #[error("hit objects are not ordered by start time at object {object}")]
    UnorderedObjects { object: usize },
    #[error("hit object {object} is not a press/release pair 1 ms apart at one position")]
    MalformedCircle { object: usize },
    #[error("replay times decrease at event {index}")]
    NonMonotonicReplay { index: usize },
    #[error("note {note} ends before it starts")]
    NegativeNoteLength { note: usize },
    #[error("note {note} sits in column {col}, outside the declared {columns} columns")]
    ColumnOutOfRange {
        note: usize,
        col: usize,
        columns: usize,
    },
    #[error("map has {map} columns but replay has {replay}")]
    ColumnMismatch { map: usize, replay: usize },
}
