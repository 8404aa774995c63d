// Derived statistics over score streams and mania maps

mod density;
mod gaussian;
mod offsets;

pub use density::{column_note_counts, hold_fraction, peak_notes_per_second};
pub use gaussian::{
    mean, normal_cdf, odds_all_taps_within, odds_some_tap_within, prob_over_trials, stdev,
    variance,
};
pub use offsets::{aim_offsets, aim_x_offsets, aim_y_offsets, press_offsets, release_offsets};
