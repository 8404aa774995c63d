//! Std frame reduction: per-frame key state -> one action per frame.

use log::debug;
use osu_model::{StdAction, StdReplayEvent};

use crate::frame::{KeyMask, StdFrame};

/// Reduce raw frames to one normalized event per frame.
///
/// A rising edge on any button is a press, a falling edge a release, a
/// button still held a hold, anything else free cursor motion. When several
/// buttons change in one frame, press wins over release wins over hold.
pub fn std_events(frames: &[StdFrame]) -> Vec<StdReplayEvent> {
    std_events_reduced(frames, false, false)
}

/// [`std_events`] with the blocked-input rewrite applied.
///
/// With `press_block`, a press arriving while another button is already
/// down becomes free motion; `release_block` does the same for a release
/// that leaves another button down. The rewrite is local and preserves
/// frame order and times.
pub fn std_events_reduced(
    frames: &[StdFrame],
    press_block: bool,
    release_block: bool,
) -> Vec<StdReplayEvent> {
    let mut events = Vec::with_capacity(frames.len());
    let mut prev = KeyMask::NONE;

    for frame in frames {
        let pressed = frame.keys.pressed_since(prev);
        let released = frame.keys.released_since(prev);

        let action = if pressed.any() {
            if press_block && prev.any() {
                StdAction::Free
            } else {
                StdAction::Press
            }
        } else if released.any() {
            if release_block && frame.keys.any() {
                StdAction::Free
            } else {
                StdAction::Release
            }
        } else if frame.keys.any() {
            StdAction::Hold
        } else {
            StdAction::Free
        };

        events.push(StdReplayEvent {
            time: frame.time,
            x: frame.x,
            y: frame.y,
            action,
        });
        prev = frame.keys;
    }

    debug!("reduced {} std frames", events.len());
    events
}
