//! Offset projections over a score stream.

use osu_rule::{Judgment, ScoreStream};

/// Timing offsets of judged presses, milliseconds (late is positive).
pub fn press_offsets(stream: &ScoreStream) -> Vec<i32> {
    stream
        .with_judgment(Judgment::HitPress)
        .filter_map(|r| r.offset())
        .collect()
}

/// Timing offsets of judged releases.
pub fn release_offsets(stream: &ScoreStream) -> Vec<i32> {
    stream
        .with_judgment(Judgment::HitRelease)
        .filter_map(|r| r.offset())
        .collect()
}

fn aim_pairs(stream: &ScoreStream) -> impl Iterator<Item = ([f32; 2], [f32; 2])> + '_ {
    stream
        .iter()
        .filter(|r| r.judgment != Judgment::HitRelease)
        .filter_map(|r| Some((r.replay_pos?, r.map_pos?)))
}

/// Cursor x offsets from aimpoint centers (std streams only).
pub fn aim_x_offsets(stream: &ScoreStream) -> Vec<f32> {
    aim_pairs(stream).map(|(rp, mp)| rp[0] - mp[0]).collect()
}

/// Cursor y offsets from aimpoint centers.
pub fn aim_y_offsets(stream: &ScoreStream) -> Vec<f32> {
    aim_pairs(stream).map(|(rp, mp)| rp[1] - mp[1]).collect()
}

/// Planar cursor distances from aimpoint centers.
pub fn aim_offsets(stream: &ScoreStream) -> Vec<f32> {
    aim_pairs(stream)
        .map(|(rp, mp)| {
            let dx = rp[0] - mp[0];
            let dy = rp[1] - mp[1];
            (dx * dx + dy * dy).sqrt()
        })
        .collect()
}
