//! Randomized properties over both engines.

use proptest::prelude::*;

use osu_model::{HitObject, ManiaActions, ManiaNote, StdAction, StdMap, StdReplay, StdReplayEvent};
use osu_rule::{Settings, mania_score, std_score};

/// Non-overlapping std maps: circles and small sliders on a coarse grid.
fn std_map_strategy() -> impl Strategy<Value = StdMap> {
    prop::collection::vec((0..20i32, 0..512u32, 0..384u32, prop::bool::ANY), 1..12).prop_map(
        |notes| {
            let mut objects = Vec::new();
            let mut time = 0i32;
            for (gap, x, y, is_slider) in notes {
                time += 400 + gap * 10;
                let (x, y) = (x as f32, y as f32);
                if is_slider {
                    objects.push(HitObject::slider(&[
                        (time, x, y),
                        (time + 120, x + 30.0, y),
                        (time + 240, x + 60.0, y),
                    ]));
                    time += 240;
                } else {
                    objects.push(HitObject::circle(time, x, y));
                }
            }
            StdMap::new(objects).expect("generated maps are well-formed")
        },
    )
}

fn std_replay_strategy() -> impl Strategy<Value = StdReplay> {
    prop::collection::vec(
        (0..60i32, 0..512u32, 0..384u32, 0..4u8),
        0..40,
    )
    .prop_map(|frames| {
        let mut events = Vec::new();
        let mut time = 0i32;
        for (gap, x, y, action) in frames {
            time += gap;
            events.push(StdReplayEvent {
                time,
                x: x as f32,
                y: y as f32,
                action: match action {
                    0 => StdAction::Free,
                    1 => StdAction::Press,
                    2 => StdAction::Hold,
                    _ => StdAction::Release,
                },
            });
        }
        StdReplay::new(events).expect("generated times are non-decreasing")
    })
}

fn mania_map_strategy() -> impl Strategy<Value = ManiaActions> {
    prop::collection::vec((0..30i32, 0..600i32, 0..4usize), 1..16).prop_map(|rows| {
        let mut per_col = [0i32; 4];
        let notes = rows
            .into_iter()
            .map(|(gap, len, col)| {
                let start = per_col[col] + 300 + gap * 10;
                let end = start + len.max(1);
                per_col[col] = end;
                ManiaNote::new(start, end, col)
            })
            .collect();
        ManiaActions::with_columns(notes, 4).expect("generated notes are in range")
    })
}

fn mania_replay_strategy() -> impl Strategy<Value = ManiaActions> {
    prop::collection::vec((0..200i32, 1..400i32, 0..4usize), 0..24).prop_map(|rows| {
        let mut per_col = [0i32; 4];
        let pairs = rows
            .into_iter()
            .map(|(gap, len, col)| {
                let start = per_col[col] + gap;
                let end = start + len;
                per_col[col] = end;
                ManiaNote::new(start, end, col)
            })
            .collect();
        ManiaActions::with_columns(pairs, 4).expect("generated pairs are in range")
    })
}

proptest! {
    /// Two runs over identical inputs produce identical streams.
    #[test]
    fn std_is_deterministic(map in std_map_strategy(), replay in std_replay_strategy()) {
        let settings = Settings::default();
        let a = std_score::score(&map, &replay, &settings);
        let b = std_score::score(&map, &replay, &settings);
        prop_assert_eq!(a, b);
    }

    /// The map cursor never moves backwards: judged note indices are
    /// non-decreasing in visit order.
    #[test]
    fn std_note_indices_monotone(map in std_map_strategy(), replay in std_replay_strategy()) {
        let settings = Settings::default();
        let stream = std_score::score(&map, &replay, &settings);
        let indices: Vec<usize> = stream.iter().filter_map(|r| r.note_index).collect();
        prop_assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Every std record's map time belongs to its note's chain.
    #[test]
    fn std_map_times_belong_to_their_notes(
        map in std_map_strategy(),
        replay in std_replay_strategy(),
    ) {
        let settings = Settings::default();
        let stream = std_score::score(&map, &replay, &settings);
        for record in &stream {
            let (Some(idx), Some(map_time)) = (record.note_index, record.map_time) else {
                continue;
            };
            let object = &map.objects()[idx];
            prop_assert!(object.aimpoints().iter().any(|ap| ap.time == map_time));
        }
    }

    #[test]
    fn mania_is_deterministic(map in mania_map_strategy(), replay in mania_replay_strategy()) {
        let settings = Settings::default();
        let a = mania_score::score(&map, &replay, &settings).unwrap();
        let b = mania_score::score(&map, &replay, &settings).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Per column, the multiset of judged press times equals the map's
    /// press times, for any replay.
    #[test]
    fn mania_press_completeness(
        map in mania_map_strategy(),
        replay in mania_replay_strategy(),
    ) {
        let settings = Settings::default();
        let stream = mania_score::score(&map, &replay, &settings).unwrap();
        for col in 0..map.column_count() {
            let mut judged: Vec<i32> = stream
                .in_column(col)
                .filter(|r| r.action == StdAction::Press && r.map_time.is_some())
                .map(|r| r.map_time.unwrap())
                .collect();
            judged.sort_unstable();
            prop_assert_eq!(judged, map.press_times(col), "column {}", col);
        }
    }

    /// Lazy sliders never judge a long-note release.
    #[test]
    fn mania_lazy_sliders_drop_release_judgments(
        map in mania_map_strategy(),
        replay in mania_replay_strategy(),
    ) {
        let mut builder = Settings::builder();
        builder.lazy_sliders = true;
        let settings = builder.build().unwrap();
        let stream = mania_score::score(&map, &replay, &settings).unwrap();
        for record in &stream {
            let (Some(idx), StdAction::Release) = (record.note_index, record.action) else {
                continue;
            };
            // Only untouched-note fills may reference a long-note release
            if !map.note(idx).is_single() {
                prop_assert_eq!(record.judgment, osu_rule::Judgment::Empty);
            }
        }
    }
}
