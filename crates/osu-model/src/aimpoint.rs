//! Std map action model.
//!
//! A map is normalized into hit-objects, each a chain of aimpoints the
//! scoring engine walks in `(object, aimpoint)` order. A circle contributes
//! a press and a release 1 ms apart at the same coordinate; a slider
//! contributes a press, hold samples along its path, and a release.

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::CIRCLE_RELEASE_GAP_MS;

/// What the player is expected to do at an aimpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AimpointRole {
    Press,
    Hold,
    Release,
}

/// The kind of hit-object an aimpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitObjectKind {
    Circle,
    Slider,
    Spinner,
}

/// A single authored instant the engine must judge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aimpoint {
    /// Time in milliseconds.
    pub time: i32,
    /// Playfield x coordinate.
    pub x: f32,
    /// Playfield y coordinate.
    pub y: f32,
    /// Expected player action.
    pub role: AimpointRole,
    /// Kind of the owning hit-object.
    pub kind: HitObjectKind,
}

impl Aimpoint {
    /// Euclidean distance from a cursor position to this aimpoint.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One authored note: a grouped chain of aimpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    aimpoints: Vec<Aimpoint>,
}

impl HitObject {
    /// A hit-circle: press + release 1 ms apart at the same coordinate.
    pub fn circle(time: i32, x: f32, y: f32) -> Self {
        Self {
            aimpoints: vec![
                Aimpoint {
                    time,
                    x,
                    y,
                    role: AimpointRole::Press,
                    kind: HitObjectKind::Circle,
                },
                Aimpoint {
                    time: time + CIRCLE_RELEASE_GAP_MS,
                    x,
                    y,
                    role: AimpointRole::Release,
                    kind: HitObjectKind::Circle,
                },
            ],
        }
    }

    /// A slider: press at the first point, holds along the path, release at
    /// the last point. `points` must hold at least two `(time, x, y)` entries.
    pub fn slider(points: &[(i32, f32, f32)]) -> Self {
        let last = points.len() - 1;
        let aimpoints = points
            .iter()
            .enumerate()
            .map(|(i, &(time, x, y))| Aimpoint {
                time,
                x,
                y,
                role: match i {
                    0 => AimpointRole::Press,
                    i if i == last => AimpointRole::Release,
                    _ => AimpointRole::Hold,
                },
                kind: HitObjectKind::Slider,
            })
            .collect();
        Self { aimpoints }
    }

    /// A spinner: press at start, release at end, judged at the center.
    pub fn spinner(start: i32, end: i32, x: f32, y: f32) -> Self {
        Self {
            aimpoints: vec![
                Aimpoint {
                    time: start,
                    x,
                    y,
                    role: AimpointRole::Press,
                    kind: HitObjectKind::Spinner,
                },
                Aimpoint {
                    time: end,
                    x,
                    y,
                    role: AimpointRole::Release,
                    kind: HitObjectKind::Spinner,
                },
            ],
        }
    }

    /// Build from raw aimpoints (parser-facing constructor).
    pub fn from_aimpoints(aimpoints: Vec<Aimpoint>) -> Self {
        Self { aimpoints }
    }

    pub fn aimpoints(&self) -> &[Aimpoint] {
        &self.aimpoints
    }

    pub fn len(&self) -> usize {
        self.aimpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aimpoints.is_empty()
    }

    pub fn kind(&self) -> HitObjectKind {
        self.aimpoints[0].kind
    }

    pub fn start_time(&self) -> i32 {
        self.aimpoints[0].time
    }

    pub fn end_time(&self) -> i32 {
        self.aimpoints[self.aimpoints.len() - 1].time
    }
}

/// A validated std map: hit-objects ordered by start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdMap {
    objects: Vec<HitObject>,
}

impl StdMap {
    /// Validate and wrap a sequence of hit-objects.
    ///
    /// Checks: the map is non-empty, every object starts with a press and
    /// has non-decreasing aimpoint times, objects are ordered by start
    /// time, and circles are press/release pairs 1 ms apart at one
    /// coordinate.
    pub fn new(objects: Vec<HitObject>) -> Result<Self, InputError> {
        if objects.is_empty() {
            return Err(InputError::EmptyMap);
        }

        for (i, obj) in objects.iter().enumerate() {
            if obj.is_empty() {
                return Err(InputError::EmptyObject { object: i });
            }
            if obj.aimpoints[0].role != AimpointRole::Press {
                return Err(InputError::MissingPress { object: i });
            }
            for (j, pair) in obj.aimpoints.windows(2).enumerate() {
                if pair[1].time < pair[0].time {
                    return Err(InputError::UnorderedAimpoints {
                        object: i,
                        aimpoint: j + 1,
                    });
                }
            }
            if obj.kind() == HitObjectKind::Circle {
                let ok = obj.aimpoints.len() == 2
                    && obj.aimpoints[1].role == AimpointRole::Release
                    && obj.aimpoints[1].time - obj.aimpoints[0].time == CIRCLE_RELEASE_GAP_MS
                    && obj.aimpoints[0].x == obj.aimpoints[1].x
                    && obj.aimpoints[0].y == obj.aimpoints[1].y;
                if !ok {
                    return Err(InputError::MalformedCircle { object: i });
                }
            }
            if i > 0 && obj.start_time() < objects[i - 1].start_time() {
                return Err(InputError::UnorderedObjects { object: i });
            }
        }

        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[HitObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Aimpoint at `(object, aimpoint)`, if the cursor is still on the map.
    pub fn aimpoint(&self, object: usize, aimpoint: usize) -> Option<&Aimpoint> {
        self.objects.get(object)?.aimpoints().get(aimpoint)
    }

    pub fn first_time(&self) -> i32 {
        self.objects[0].start_time()
    }

    pub fn last_time(&self) -> i32 {
        self.objects[self.objects.len() - 1].end_time()
    }

    /// Flat iteration in engine visit order.
    pub fn iter_flat(&self) -> impl Iterator<Item = (usize, usize, &Aimpoint)> {
        self.objects.iter().enumerate().flat_map(|(oi, obj)| {
            obj.aimpoints()
                .iter()
                .enumerate()
                .map(move |(ai, ap)| (oi, ai, ap))
        })
    }
}
