//! Std player event model.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// What the player's input did at one replay event.
///
/// `Free` carries cursor motion only; `Press`/`Release` are key
/// transitions; `Hold` means a key is still down this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StdAction {
    Free,
    Press,
    Hold,
    Release,
}

/// One normalized std replay event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdReplayEvent {
    /// Event time in milliseconds.
    pub time: i32,
    /// Cursor x position.
    pub x: f32,
    /// Cursor y position.
    pub y: f32,
    /// Input action this frame.
    pub action: StdAction,
}

/// A validated std replay: events in non-decreasing time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdReplay {
    events: Vec<StdReplayEvent>,
}

impl StdReplay {
    /// Validate time ordering and wrap. Time ties are permitted.
    pub fn new(events: Vec<StdReplayEvent>) -> Result<Self, InputError> {
        for (i, pair) in events.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(InputError::NonMonotonicReplay { index: i + 1 });
            }
        }
        Ok(Self { events })
    }

    pub fn events(&self) -> &[StdReplayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(time: i32, action: StdAction) -> StdReplayEvent {
        StdReplayEvent {
            time,
            x: 0.0,
            y: 0.0,
            action,
        }
    }

    #[test]
    fn accepts_ties() {
        let replay = StdReplay::new(vec![
            ev(10, StdAction::Press),
            ev(10, StdAction::Hold),
            ev(20, StdAction::Release),
        ])
        .unwrap();
        assert_eq!(replay.len(), 3);
    }

    #[test]
    fn rejects_decreasing_times() {
        let err = StdReplay::new(vec![ev(10, StdAction::Press), ev(9, StdAction::Release)])
            .unwrap_err();
        assert_eq!(err, InputError::NonMonotonicReplay { index: 1 });
    }
}
