// Data model: aimpoints, hit-object chains, mania notes, player events

mod aimpoint;
mod error;
mod mania;
mod player;

pub use aimpoint::{Aimpoint, AimpointRole, HitObject, HitObjectKind, StdMap};
pub use error::InputError;
pub use mania::{ColumnEvent, ManiaActions, ManiaNote, NoteRole};
pub use player::{StdAction, StdReplay, StdReplayEvent};

/// A circle's press and release are authored this many milliseconds apart.
pub const CIRCLE_RELEASE_GAP_MS: i32 = 1;

/// A mania note with `end - start` at or below this is a single (tap) note.
pub const SINGLE_NOTE_GAP_MS: i32 = 1;
