//! Mania map summaries as single-pass interval scans.

use osu_model::ManiaActions;

/// Notes per column.
pub fn column_note_counts(map: &ManiaActions) -> Vec<usize> {
    let mut counts = vec![0usize; map.column_count()];
    for note in map.notes() {
        counts[note.col] += 1;
    }
    counts
}

/// Peak press density over any window of `window_ms`, in notes per second.
///
/// Two-pointer sweep over press times: linear in the note count.
pub fn peak_notes_per_second(map: &ManiaActions, window_ms: i32) -> f32 {
    let mut times: Vec<i32> = map.notes().iter().map(|n| n.start).collect();
    times.sort_unstable();
    if times.is_empty() || window_ms <= 0 {
        return 0.0;
    }

    let mut best = 0usize;
    let mut lo = 0usize;
    for hi in 0..times.len() {
        while times[hi] - times[lo] > window_ms {
            lo += 1;
        }
        best = best.max(hi - lo + 1);
    }
    best as f32 * 1000.0 / window_ms as f32
}

/// Fraction of notes that are long (held) notes.
pub fn hold_fraction(map: &ManiaActions) -> f32 {
    if map.notes().is_empty() {
        return 0.0;
    }
    let holds = map.notes().iter().filter(|n| !n.is_single()).count();
    holds as f32 / map.notes().len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use osu_model::ManiaNote;

    fn map() -> ManiaActions {
        ManiaActions::new(vec![
            ManiaNote::new(0, 1, 0),
            ManiaNote::new(100, 400, 0),
            ManiaNote::new(200, 201, 1),
            ManiaNote::new(1500, 1501, 2),
        ])
        .unwrap()
    }

    #[test]
    fn counts_per_column() {
        assert_eq!(column_note_counts(&map()), vec![2, 1, 1, 0]);
    }

    #[test]
    fn peak_density_two_pointer() {
        // Three presses within 200 ms, then a lone note much later
        assert_eq!(peak_notes_per_second(&map(), 1000), 3.0);
        assert_eq!(peak_notes_per_second(&map(), 200), 15.0);
    }

    #[test]
    fn hold_fraction_counts_long_notes() {
        assert_eq!(hold_fraction(&map()), 0.25);
    }
}
