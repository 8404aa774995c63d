//! Mania frame reconstruction: bitmask frames -> press/release pairs.

use log::debug;
use osu_model::{InputError, ManiaActions, ManiaNote};

use crate::frame::ManiaFrame;

/// Reconstruct per-column press/release pairs from delta-timed bitmask
/// frames over `columns` columns.
///
/// A rising edge opens a pair in its column; the falling edge closes it.
/// A key still down after the last frame closes at the final timestamp.
pub fn mania_actions(frames: &[ManiaFrame], columns: usize) -> Result<ManiaActions, InputError> {
    let mut held: Vec<Option<i32>> = vec![None; columns];
    let mut pairs: Vec<ManiaNote> = Vec::new();
    let mut time = 0i32;

    for frame in frames {
        time += frame.delta;
        for col in 0..columns {
            let down = frame.keys.down(col);
            match held[col] {
                None if down => held[col] = Some(time),
                Some(start) if !down => {
                    pairs.push(ManiaNote::new(start, time, col));
                    held[col] = None;
                }
                _ => {}
            }
        }
    }

    for (col, start) in held.into_iter().enumerate() {
        if let Some(start) = start {
            pairs.push(ManiaNote::new(start, time, col));
        }
    }

    debug!("reconstructed {} mania pairs over {columns} columns", pairs.len());
    ManiaActions::with_columns(pairs, columns)
}
