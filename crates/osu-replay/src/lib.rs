// Replay frame reconstruction: raw key-state frames -> normalized events

mod frame;
mod mania_events;
mod std_events;

pub use frame::{KeyMask, ManiaFrame, StdFrame};
pub use mania_events::mania_actions;
pub use std_events::{std_events, std_events_reduced};
