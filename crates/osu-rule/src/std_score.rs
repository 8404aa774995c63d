//! Std scoring engine.
//!
//! Replays a player's input against a map's aimpoint chains and emits one
//! score record per classified action or missed expectation. The run keeps
//! a single `(object, aimpoint)` map cursor; every replay event first
//! catches the cursor up over elapsed aimpoints (free processing), then
//! dispatches on its action kind. Each processor returns an [`Advance`]
//! telling the loop how far to move the cursor.
//!
//! Policy matrix: `require_tap_*` / `require_aim_*` decide whether a key
//! transition and cursor proximity are needed per aimpoint role. An
//! ablated requirement turns the free processor into an auto-scorer: the
//! aimpoint is granted its hit judgment the moment its time passes, which
//! is how relax (no taps) and autopilot (no aim) plays are analyzed.

use log::debug;
use osu_model::{Aimpoint, AimpointRole, InputError, StdAction, StdMap, StdReplay, StdReplayEvent};
use osu_replay::{StdFrame, std_events_reduced};

use crate::record::{Judgment, ScoreRecord, ScoreStream};
use crate::settings::Settings;

/// Map cursor advancement selected by a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advance {
    /// Do not move the cursor.
    Nop,
    /// Advance one aimpoint within the hit-object (next object if none left).
    Aimpoint,
    /// Advance to the next hit-object's first aimpoint.
    Note,
}

/// Position of a timing offset relative to one window set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    EarlySilent,
    EarlyMiss,
    Hit,
    LateMiss,
    LateSilent,
}

fn zone(offset: i32, neg_miss: i32, neg_hit: i32, pos_hit: i32, pos_miss: i32) -> Zone {
    if offset <= -neg_miss {
        Zone::EarlySilent
    } else if offset <= -neg_hit {
        Zone::EarlyMiss
    } else if offset <= pos_hit {
        Zone::Hit
    } else if offset <= pos_miss {
        Zone::LateMiss
    } else {
        Zone::LateSilent
    }
}

/// Score a std replay against a std map.
///
/// Deterministic and pure: the same inputs always produce the same stream.
/// Input validity is enforced by the [`StdMap`] / [`StdReplay`] /
/// [`Settings`] constructors; an engine state outside the decision tables
/// is a bug and panics.
pub fn score(map: &StdMap, replay: &StdReplay, settings: &Settings) -> ScoreStream {
    let mut run = Run::new(map, settings);

    for ev in replay.events() {
        // Catch-up: free-process aimpoints the replay has moved past.
        while let Some(ap) = run.current() {
            if ev.time <= ap.time {
                break;
            }
            let adv = run.process_free(ev.time, Some([ev.x, ev.y]));
            if adv == Advance::Nop {
                break;
            }
            run.apply(adv);
        }

        let Some(ap) = run.current() else {
            break;
        };

        // Not yet visible: the aimpoint is beyond the look-ahead horizon.
        if ap.time > ev.time.saturating_add(settings.ar_ms) {
            continue;
        }

        let adv = match ev.action {
            StdAction::Free => run.process_free(ev.time, Some([ev.x, ev.y])),
            StdAction::Press => run.process_press(ev),
            StdAction::Hold => run.process_hold(ev),
            StdAction::Release => run.process_release(ev),
        };
        run.apply(adv);
    }

    // End sweep: everything left is judged at a clock past every deadline.
    let sweep_time = sweep_clock(map, settings);
    while run.current().is_some() {
        let adv = run.process_free(sweep_time, None);
        if adv == Advance::Nop {
            break;
        }
        run.apply(adv);
    }

    debug!(
        "std run: {} events, {} objects, {} records",
        replay.len(),
        map.object_count(),
        run.stream.len()
    );
    run.stream
}

/// [`score`] over raw frames: applies the blocked-input rewrite from
/// `press_block` / `release_block` before scoring.
pub fn score_frames(
    map: &StdMap,
    frames: &[StdFrame],
    settings: &Settings,
) -> Result<ScoreStream, InputError> {
    let events = std_events_reduced(frames, settings.press_block, settings.release_block);
    let replay = StdReplay::new(events)?;
    Ok(score(map, &replay, settings))
}

fn sweep_clock(map: &StdMap, settings: &Settings) -> i32 {
    let deadline = settings
        .pos_hit_miss_range
        .max(settings.pos_rel_miss_range)
        .max(settings.pos_hld_range);
    map.last_time().saturating_add(deadline).saturating_add(1)
}

struct Run<'a> {
    map: &'a StdMap,
    settings: &'a Settings,
    object: usize,
    aim: usize,
    /// Where the player last tapped blank space; back-dates a later miss.
    last_press_pos: Option<[f32; 2]>,
    stream: ScoreStream,
}

impl<'a> Run<'a> {
    fn new(map: &'a StdMap, settings: &'a Settings) -> Self {
        Self {
            map,
            settings,
            object: 0,
            aim: 0,
            last_press_pos: None,
            stream: ScoreStream::new(),
        }
    }

    fn current(&self) -> Option<Aimpoint> {
        self.map.aimpoint(self.object, self.aim).copied()
    }

    fn object_has_more(&self) -> bool {
        self.map.aimpoint(self.object, self.aim + 1).is_some()
    }

    fn apply(&mut self, adv: Advance) {
        match adv {
            Advance::Nop => return,
            Advance::Aimpoint => {
                if self.object_has_more() {
                    self.aim += 1;
                } else {
                    self.object += 1;
                    self.aim = 0;
                }
            }
            Advance::Note => {
                self.object += 1;
                self.aim = 0;
            }
        }
        self.last_press_pos = None;
    }

    fn slider_miss_advance(&self) -> Advance {
        if self.settings.miss_slider {
            Advance::Note
        } else {
            Advance::Aimpoint
        }
    }

    fn aim_ok(pos: Option<[f32; 2]>, ap: &Aimpoint, radius: f32) -> bool {
        pos.is_some_and(|[x, y]| ap.distance_to(x, y) <= radius)
    }

    fn push(
        &mut self,
        judgment: Judgment,
        replay_time: i32,
        replay_pos: Option<[f32; 2]>,
        ap: &Aimpoint,
        action: StdAction,
    ) {
        self.stream.push(ScoreRecord {
            replay_time,
            map_time: Some(ap.time),
            replay_pos,
            map_pos: Some([ap.x, ap.y]),
            judgment,
            action,
            note_index: Some(self.object),
            column: None,
        });
    }

    fn push_empty(&mut self, replay_time: i32, replay_pos: [f32; 2]) {
        self.stream.push(ScoreRecord {
            replay_time,
            map_time: None,
            replay_pos: Some(replay_pos),
            map_pos: None,
            judgment: Judgment::Empty,
            action: StdAction::Press,
            note_index: None,
            column: None,
        });
    }

    /// Free processing: decides the fate of an aimpoint no corresponding
    /// player event claimed. Also drives catch-up and the end sweep.
    fn process_free(&mut self, time: i32, pos: Option<[f32; 2]>) -> Advance {
        let s = self.settings;
        let Some(ap) = self.current() else {
            return Advance::Nop;
        };
        let offset = time - ap.time;

        match ap.role {
            AimpointRole::Press => {
                let aim_ok = Self::aim_ok(pos, &ap, s.hitobject_radius);
                if s.require_tap_press || (s.require_aim_press && !aim_ok) {
                    if offset > s.pos_hit_miss_range {
                        let tap_pos = self.last_press_pos;
                        self.push(Judgment::Miss, time, tap_pos, &ap, StdAction::Press);
                        Advance::Note
                    } else {
                        Advance::Nop
                    }
                } else if offset >= 0 {
                    self.push(Judgment::HitPress, time, pos, &ap, StdAction::Press);
                    Advance::Note
                } else {
                    Advance::Nop
                }
            }
            AimpointRole::Hold => {
                let aim_ok = Self::aim_ok(pos, &ap, s.follow_radius);
                if s.require_tap_hold || (s.require_aim_hold && !aim_ok) {
                    let deadline = if s.recoverable_release {
                        s.pos_hld_range
                    } else {
                        0
                    };
                    if offset > deadline {
                        self.push(Judgment::Miss, time, None, &ap, StdAction::Hold);
                        self.slider_miss_advance()
                    } else {
                        Advance::Nop
                    }
                } else if offset >= 0 {
                    self.push(Judgment::AimHold, time, pos, &ap, StdAction::Hold);
                    Advance::Aimpoint
                } else {
                    Advance::Nop
                }
            }
            AimpointRole::Release => {
                let aim_ok = Self::aim_ok(pos, &ap, s.release_radius);
                if s.require_tap_release || (s.require_aim_release && !aim_ok) {
                    if offset > s.pos_rel_miss_range {
                        self.push(Judgment::Miss, time, None, &ap, StdAction::Release);
                        Advance::Note
                    } else {
                        Advance::Nop
                    }
                } else if offset >= 0 {
                    self.push(Judgment::HitRelease, time, pos, &ap, StdAction::Release);
                    Advance::Note
                } else {
                    Advance::Nop
                }
            }
        }
    }

    /// Press processing against a press aimpoint.
    fn process_press(&mut self, ev: &StdReplayEvent) -> Advance {
        let s = self.settings;
        let Some(ap) = self.current() else {
            return Advance::Nop;
        };
        if ap.role != AimpointRole::Press {
            return Advance::Nop;
        }

        let offset = ev.time - ap.time;
        let pos = [ev.x, ev.y];

        // Blank tap: outside the circle. Remember where, for back-dating.
        if s.require_aim_press && ap.distance_to(ev.x, ev.y) > s.hitobject_radius {
            if s.blank_miss {
                self.push_empty(ev.time, pos);
            }
            self.last_press_pos = Some(pos);
            return Advance::Nop;
        }

        if !s.require_tap_press {
            if offset < 0 {
                if s.blank_miss {
                    self.push_empty(ev.time, pos);
                }
                return Advance::Nop;
            }
            self.push(Judgment::HitPress, ev.time, Some(pos), &ap, StdAction::Press);
            return self.hit_press_advance();
        }

        match zone(
            offset,
            s.neg_hit_miss_range,
            s.neg_hit_range,
            s.pos_hit_range,
            s.pos_hit_miss_range,
        ) {
            Zone::EarlySilent => {
                if s.blank_miss {
                    self.push_empty(ev.time, pos);
                }
                Advance::Nop
            }
            Zone::EarlyMiss | Zone::LateMiss => {
                if s.press_miss {
                    self.push(Judgment::Miss, ev.time, Some(pos), &ap, StdAction::Press);
                    Advance::Note
                } else {
                    Advance::Nop
                }
            }
            Zone::Hit => {
                self.push(Judgment::HitPress, ev.time, Some(pos), &ap, StdAction::Press);
                self.hit_press_advance()
            }
            // Handled later by free processing.
            Zone::LateSilent => Advance::Nop,
        }
    }

    /// A press hit walks into the object's chain: a slider's first hold,
    /// or a circle's release 1 ms later.
    fn hit_press_advance(&self) -> Advance {
        if self.object_has_more() {
            Advance::Aimpoint
        } else {
            Advance::Note
        }
    }

    /// Hold processing against a hold aimpoint.
    fn process_hold(&mut self, ev: &StdReplayEvent) -> Advance {
        let s = self.settings;
        let Some(ap) = self.current() else {
            return Advance::Nop;
        };
        if ap.role != AimpointRole::Hold {
            return Advance::Nop;
        }

        let offset = ev.time - ap.time;
        let pos = [ev.x, ev.y];

        if s.require_aim_hold && ap.distance_to(ev.x, ev.y) > s.follow_radius {
            if s.recoverable_missaim {
                // The cursor may come back; only the elapsed window misses.
                if offset > s.pos_hld_range {
                    self.push(Judgment::Miss, ev.time, Some(pos), &ap, StdAction::Hold);
                    return self.slider_miss_advance();
                }
                return Advance::Nop;
            }
            self.push(Judgment::Miss, ev.time, Some(pos), &ap, StdAction::Hold);
            return self.slider_miss_advance();
        }

        if !s.require_tap_hold {
            if offset < 0 {
                return Advance::Nop;
            }
            self.push(Judgment::AimHold, ev.time, Some(pos), &ap, StdAction::Hold);
            return Advance::Aimpoint;
        }

        if offset <= -s.neg_hld_range {
            Advance::Nop
        } else if offset <= s.pos_hld_range {
            self.push(Judgment::AimHold, ev.time, Some(pos), &ap, StdAction::Hold);
            Advance::Aimpoint
        } else {
            Advance::Nop
        }
    }

    /// Release processing against a hold or release aimpoint.
    fn process_release(&mut self, ev: &StdReplayEvent) -> Advance {
        let s = self.settings;
        let Some(ap) = self.current() else {
            return Advance::Nop;
        };

        let offset = ev.time - ap.time;
        let pos = [ev.x, ev.y];

        match ap.role {
            // A press is pending; a release means nothing yet.
            AimpointRole::Press => Advance::Nop,
            AimpointRole::Hold => {
                if s.recoverable_release || !s.require_tap_hold {
                    // The next hold event can re-engage the slider.
                    Advance::Nop
                } else {
                    self.push(Judgment::Miss, ev.time, Some(pos), &ap, StdAction::Hold);
                    self.slider_miss_advance()
                }
            }
            AimpointRole::Release => {
                if s.require_aim_release && ap.distance_to(ev.x, ev.y) > s.release_radius {
                    self.push(Judgment::Miss, ev.time, Some(pos), &ap, StdAction::Release);
                    return Advance::Note;
                }

                if !s.require_tap_release {
                    if offset < 0 {
                        return Advance::Nop;
                    }
                    self.push(Judgment::HitRelease, ev.time, Some(pos), &ap, StdAction::Release);
                    return Advance::Note;
                }

                match zone(
                    offset,
                    s.neg_rel_miss_range,
                    s.neg_rel_range,
                    s.pos_rel_range,
                    s.pos_rel_miss_range,
                ) {
                    Zone::EarlySilent | Zone::LateSilent => Advance::Nop,
                    Zone::EarlyMiss | Zone::LateMiss => {
                        if s.release_miss {
                            self.push(Judgment::Miss, ev.time, Some(pos), &ap, StdAction::Release);
                            Advance::Note
                        } else {
                            Advance::Nop
                        }
                    }
                    Zone::Hit => {
                        self.push(Judgment::HitRelease, ev.time, Some(pos), &ap, StdAction::Release);
                        Advance::Note
                    }
                }
            }
        }
    }
}
