//! Mania scoring engine.
//!
//! Each column is scored independently. The column's notes expand into a
//! time-sorted list of press/release events; a cursor walks that list as
//! the player's own press/release transitions arrive. Timing windows are
//! the same zone tables as the std engine, with no spatial component.
//!
//! Advancement is a step count: a judged press moves past the note's
//! release too when the note is a single (its release is meaningless), a
//! judged long-note press leaves the release pending.

use log::debug;
use osu_model::{ColumnEvent, InputError, ManiaActions, NoteRole, StdAction};
use osu_replay::{ManiaFrame, mania_actions};

use crate::record::{Judgment, ScoreRecord, ScoreStream};
use crate::settings::Settings;

/// Score a mania replay against a mania map.
///
/// Fails when the map is empty or the declared column counts differ.
pub fn score(
    map: &ManiaActions,
    replay: &ManiaActions,
    settings: &Settings,
) -> Result<ScoreStream, InputError> {
    if map.is_empty() {
        return Err(InputError::EmptyMap);
    }
    if map.column_count() != replay.column_count() {
        return Err(InputError::ColumnMismatch {
            map: map.column_count(),
            replay: replay.column_count(),
        });
    }

    let mut stream = ScoreStream::new();
    for col in 0..map.column_count() {
        let mut run = ColumnRun {
            map,
            settings,
            col,
            events: map.column_events(col),
            cursor: 0,
            stream: &mut stream,
        };
        run.play(&replay.column_events(col));
    }

    debug!(
        "mania run: {} columns, {} notes, {} records",
        map.column_count(),
        map.notes().len(),
        stream.len()
    );
    Ok(stream)
}

/// [`score`] over raw bitmask frames spanning `columns` columns.
pub fn score_frames(
    map: &ManiaActions,
    frames: &[ManiaFrame],
    columns: usize,
    settings: &Settings,
) -> Result<ScoreStream, InputError> {
    let replay = mania_actions(frames, columns)?;
    score(map, &replay, settings)
}

struct ColumnRun<'a> {
    map: &'a ManiaActions,
    settings: &'a Settings,
    col: usize,
    events: Vec<ColumnEvent>,
    cursor: usize,
    stream: &'a mut ScoreStream,
}

impl ColumnRun<'_> {
    fn play(&mut self, replay_events: &[ColumnEvent]) {
        for ev in replay_events {
            self.catch_up(ev.time);

            let Some(map_ev) = self.current() else {
                continue;
            };

            // Only a matching transition kind engages the map event.
            let steps = match (ev.role, map_ev.role) {
                (NoteRole::Press, NoteRole::Press) => self.process_press(ev.time, &map_ev),
                (NoteRole::Release, NoteRole::Release) => self.process_release(ev.time, &map_ev),
                _ => 0,
            };
            self.cursor += steps;
        }

        // Map events the player never interacted with become fills.
        while let Some(map_ev) = self.current() {
            self.push(Judgment::Empty, map_ev.time, &map_ev);
            self.cursor += 1;
        }
    }

    fn current(&self) -> Option<ColumnEvent> {
        self.events.get(self.cursor).copied()
    }

    fn is_single(&self, ev: &ColumnEvent) -> bool {
        self.map.note(ev.note).is_single()
    }

    fn push(&mut self, judgment: Judgment, replay_time: i32, map_ev: &ColumnEvent) {
        self.stream.push(ScoreRecord {
            replay_time,
            map_time: Some(map_ev.time),
            replay_pos: None,
            map_pos: None,
            judgment,
            action: match map_ev.role {
                NoteRole::Press => StdAction::Press,
                NoteRole::Release => StdAction::Release,
            },
            note_index: Some(map_ev.note),
            column: Some(self.col),
        });
    }

    fn push_blank(&mut self, replay_time: i32, role: NoteRole) {
        self.stream.push(ScoreRecord {
            replay_time,
            map_time: None,
            replay_pos: None,
            map_pos: None,
            judgment: Judgment::Empty,
            action: match role {
                NoteRole::Press => StdAction::Press,
                NoteRole::Release => StdAction::Release,
            },
            note_index: None,
            column: Some(self.col),
        });
    }

    /// Miss map events whose deadline elapsed before this replay time.
    fn catch_up(&mut self, time: i32) {
        while let Some(map_ev) = self.current() {
            let steps = self.process_overdue(time, &map_ev);
            if steps == 0 {
                break;
            }
            self.cursor += steps;
        }
    }

    fn process_overdue(&mut self, time: i32, map_ev: &ColumnEvent) -> usize {
        let s = self.settings;
        let offset = time - map_ev.time;
        match map_ev.role {
            NoteRole::Press => {
                if offset > s.pos_hit_miss_range {
                    self.push(Judgment::Miss, time, map_ev);
                    // The note's release is dropped with its press
                    2
                } else {
                    0
                }
            }
            NoteRole::Release => {
                if offset > s.pos_rel_miss_range {
                    if !self.is_single(map_ev) && !s.lazy_sliders {
                        self.push(Judgment::Miss, time, map_ev);
                    }
                    1
                } else {
                    0
                }
            }
        }
    }

    fn process_press(&mut self, time: i32, map_ev: &ColumnEvent) -> usize {
        let s = self.settings;
        let offset = time - map_ev.time;

        if offset <= -s.neg_hit_miss_range || offset > s.pos_hit_miss_range {
            // Nothing zone: a stray tap
            if s.blank_miss {
                self.push_blank(time, NoteRole::Press);
            }
            0
        } else if offset <= -s.neg_hit_range || offset > s.pos_hit_range {
            if s.press_miss {
                self.push(Judgment::Miss, time, map_ev);
                2
            } else {
                0
            }
        } else {
            self.push(Judgment::HitPress, time, map_ev);
            if self.is_single(map_ev) { 2 } else { 1 }
        }
    }

    fn process_release(&mut self, time: i32, map_ev: &ColumnEvent) -> usize {
        let s = self.settings;

        // Long-note releases ablated, single-note releases meaningless
        if s.lazy_sliders || self.is_single(map_ev) {
            return 1;
        }

        let offset = time - map_ev.time;
        if offset <= -s.neg_rel_miss_range || offset > s.pos_rel_miss_range {
            if s.blank_miss {
                self.push_blank(time, NoteRole::Release);
            }
            0
        } else if offset <= -s.neg_rel_range || offset > s.pos_rel_range {
            if s.release_miss {
                self.push(Judgment::Miss, time, map_ev);
                1
            } else {
                0
            }
        } else {
            self.push(Judgment::HitRelease, time, map_ev);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osu_model::ManiaNote;

    fn map_single() -> ManiaActions {
        ManiaActions::new(vec![ManiaNote::new(1000, 1001, 0)]).unwrap()
    }

    fn map_long() -> ManiaActions {
        ManiaActions::new(vec![ManiaNote::new(1000, 2000, 0)]).unwrap()
    }

    fn replay(pairs: Vec<ManiaNote>, columns: usize) -> ManiaActions {
        ManiaActions::with_columns(pairs, columns).unwrap()
    }

    fn judgments(stream: &ScoreStream) -> Vec<Judgment> {
        stream.iter().map(|r| r.judgment).collect()
    }

    // =========================================================================
    // Press window sweep (single note at 1000 ms)
    // =========================================================================

    #[test]
    fn press_sweep_single_note() {
        let map = map_single();
        let settings = Settings::default();

        for ms in 0..=2000 {
            let rep = replay(vec![ManiaNote::new(ms, ms + 1, 0)], 1);
            let stream = score(&map, &rep, &settings).unwrap();
            let offset = ms - 1000;

            let first = stream.records()[0];
            if offset <= -settings.neg_hit_miss_range {
                // Too early to engage: the note is filled at the end
                assert_eq!(first.judgment, Judgment::Empty, "offset {offset}");
                assert_eq!(first.map_time, Some(1000), "offset {offset}");
            } else if offset <= -settings.neg_hit_range {
                assert_eq!(first.judgment, Judgment::Miss, "offset {offset}");
                assert_eq!(first.offset(), Some(offset));
            } else if offset <= settings.pos_hit_range {
                assert_eq!(first.judgment, Judgment::HitPress, "offset {offset}");
                assert_eq!(first.offset(), Some(offset));
            } else if offset <= settings.pos_hit_miss_range {
                assert_eq!(first.judgment, Judgment::Miss, "offset {offset}");
            } else {
                // Too late: the catch-up pass misses the note first
                assert_eq!(first.judgment, Judgment::Miss, "offset {offset}");
                assert_eq!(first.replay_time, ms, "offset {offset}");
            }
        }
    }

    #[test]
    fn blank_miss_records_stray_taps() {
        let map = map_single();
        let mut b = Settings::builder();
        b.blank_miss = true;
        let settings = b.build().unwrap();

        // Way-early tap: Empty (no map time), then the note fills as Empty
        let rep = replay(vec![ManiaNote::new(100, 101, 0)], 1);
        let stream = score(&map, &rep, &settings).unwrap();
        let records = stream.records();
        assert_eq!(records[0].judgment, Judgment::Empty);
        assert_eq!(records[0].map_time, None);
        assert_eq!(records[0].replay_time, 100);
        assert_eq!(records[1].judgment, Judgment::Empty);
        assert_eq!(records[1].map_time, Some(1000));
    }

    // =========================================================================
    // Long notes
    // =========================================================================

    #[test]
    fn long_note_perfect() {
        let map = map_long();
        let settings = Settings::default();
        let rep = replay(vec![ManiaNote::new(1000, 1999, 0)], 1);

        let stream = score(&map, &rep, &settings).unwrap();
        assert_eq!(
            judgments(&stream),
            vec![Judgment::HitPress, Judgment::HitRelease]
        );
        assert_eq!(stream.records()[0].offset(), Some(0));
        assert_eq!(stream.records()[1].offset(), Some(-1));
    }

    #[test]
    fn long_note_early_release_misses() {
        let map = map_long();
        let settings = Settings::default();

        // Released instantly: a full second early, before the release
        // window opens, so the release is never engaged and fills
        let rep = replay(vec![ManiaNote::new(1000, 1000, 0)], 1);
        let stream = score(&map, &rep, &settings).unwrap();
        assert_eq!(
            judgments(&stream),
            vec![Judgment::HitPress, Judgment::Empty]
        );

        // Released 600 ms early: inside the miss window
        let rep = replay(vec![ManiaNote::new(1000, 1400, 0)], 1);
        let stream = score(&map, &rep, &settings).unwrap();
        assert_eq!(
            judgments(&stream),
            vec![Judgment::HitPress, Judgment::Miss]
        );
    }

    #[test]
    fn lazy_sliders_skip_release_judgment() {
        let map = map_long();
        let mut b = Settings::builder();
        b.lazy_sliders = true;
        let settings = b.build().unwrap();
        let rep = replay(vec![ManiaNote::new(1000, 1200, 0)], 1);

        let stream = score(&map, &rep, &settings).unwrap();
        assert_eq!(judgments(&stream), vec![Judgment::HitPress]);
    }

    #[test]
    fn overdue_long_note_press_drops_whole_note() {
        let map = map_long();
        let settings = Settings::default();
        // First touch long after the press window: catch-up misses the
        // press and its release together, the stray press records nothing
        let rep = replay(vec![ManiaNote::new(3500, 3600, 0)], 1);

        let stream = score(&map, &rep, &settings).unwrap();
        assert_eq!(judgments(&stream), vec![Judgment::Miss]);
        assert_eq!(stream.records()[0].action, StdAction::Press);
    }

    // =========================================================================
    // Column handling
    // =========================================================================

    #[test]
    fn column_mismatch_is_rejected() {
        let map = ManiaActions::with_columns(vec![ManiaNote::new(0, 1, 0)], 4).unwrap();
        let rep = ManiaActions::with_columns(vec![ManiaNote::new(0, 1, 0)], 2).unwrap();
        let err = score(&map, &rep, &Settings::default()).unwrap_err();
        assert_eq!(err, InputError::ColumnMismatch { map: 4, replay: 2 });
    }

    #[test]
    fn empty_map_is_rejected() {
        let map = ManiaActions::with_columns(vec![], 1).unwrap();
        let rep = ManiaActions::with_columns(vec![], 1).unwrap();
        assert_eq!(
            score(&map, &rep, &Settings::default()).unwrap_err(),
            InputError::EmptyMap
        );
    }

    #[test]
    fn columns_are_independent() {
        let map = ManiaActions::new(vec![
            ManiaNote::new(1000, 1001, 0),
            ManiaNote::new(1000, 1001, 1),
        ])
        .unwrap();
        // Only column 1 is played
        let rep = replay(vec![ManiaNote::new(1000, 1001, 1)], 2);

        let stream = score(&map, &rep, &Settings::default()).unwrap();
        let col0: Vec<Judgment> = stream.in_column(0).map(|r| r.judgment).collect();
        let col1: Vec<Judgment> = stream.in_column(1).map(|r| r.judgment).collect();
        assert_eq!(col0, vec![Judgment::Empty, Judgment::Empty]);
        assert_eq!(col1, vec![Judgment::HitPress]);
    }

    #[test]
    fn unplayed_map_fills_with_its_own_times() {
        let map = ManiaActions::new(vec![
            ManiaNote::new(500, 501, 0),
            ManiaNote::new(900, 1400, 0),
        ])
        .unwrap();
        let rep = ManiaActions::with_columns(vec![], 1).unwrap();

        let stream = score(&map, &rep, &Settings::default()).unwrap();
        let times: Vec<Option<i32>> = stream.iter().map(|r| r.map_time).collect();
        assert_eq!(
            times,
            vec![Some(500), Some(501), Some(900), Some(1400)]
        );
        assert!(stream.iter().all(|r| r.judgment == Judgment::Empty));
    }

    // =========================================================================
    // Completeness
    // =========================================================================

    /// Every press-role map event gets exactly one record carrying its time.
    fn press_records_per_column(stream: &ScoreStream, col: usize) -> Vec<i32> {
        let mut times: Vec<i32> = stream
            .in_column(col)
            .filter(|r| r.action == StdAction::Press && r.map_time.is_some())
            .map(|r| r.map_time.unwrap())
            .collect();
        times.sort_unstable();
        times
    }

    #[test]
    fn completeness_over_a_messy_replay() {
        let map = ManiaActions::new(vec![
            ManiaNote::new(100, 101, 0),
            ManiaNote::new(500, 900, 0),
            ManiaNote::new(1200, 1201, 0),
            ManiaNote::new(300, 700, 1),
        ])
        .unwrap();
        // Early taps, a held long note, stray extra taps, one untouched note
        let rep = replay(
            vec![
                ManiaNote::new(90, 130, 0),
                ManiaNote::new(460, 890, 0),
                ManiaNote::new(2000, 2100, 0),
                ManiaNote::new(20, 40, 1),
            ],
            2,
        );

        let stream = score(&map, &rep, &Settings::default()).unwrap();
        assert_eq!(press_records_per_column(&stream, 0), vec![100, 500, 1200]);
        assert_eq!(press_records_per_column(&stream, 1), vec![300]);
    }
}
