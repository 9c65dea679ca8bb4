//! Directional "closest candidate" search.
//!
//! Every directional operation (moving a window onto a tile, moving the
//! tile selection, focusing a neighbouring window) asks the same question:
//! starting from one rect and looking in a direction, which of these other
//! rects comes next?
//!
//! # Scoring
//!
//! Both the source and each candidate are reduced to an *anchor*: the
//! midpoint of the edge facing the look direction
//! (`center + size / 2 ⊙ direction`).  With `relative = candidate − source`:
//!
//! ```text
//! score = dot(direction, normalize(relative)) / |relative|
//! ```
//!
//! The dot product favours candidates squarely in the look direction over
//! diagonal ones, the `1 / distance` term favours near candidates over far
//! ones.  Candidates with a non-positive score are behind or beside the
//! source and never win.  A candidate whose anchor coincides with the
//! source's has no direction and is skipped.
//!
//! Before scoring, the source is grown by [`EDGE_MARGIN`] on every side so
//! that a candidate sharing an exact boundary with the source is not lost to
//! floating-point noise.

use crate::command::Direction;
use crate::geometry::{Rect, Vector};
use log::trace;

/// Outward margin applied to the source rect.  Expressed in the coordinate
/// space of the rects, which is percent for every strategy in this crate.
pub const EDGE_MARGIN: f64 = 0.1;

/// Midpoint of the edge of `rect` that faces `look`.
pub fn anchor(rect: &Rect, look: Vector) -> Vector {
    rect.center() + rect.size().multiply(look / 2.0)
}

/// Score of `target` as seen from `source` looking in `direction`.
///
/// Returns `None` when the target is not in the requested direction
/// (score ≤ 0) or when its anchor coincides with the source's.
pub fn score(source: &Rect, target: &Rect, direction: Direction) -> Option<f64> {
    let look = direction.vector();
    let relative = anchor(target, look) - anchor(source, look);
    let distance = relative.length();
    let heading = relative.normalized()?;
    let score = look.dot(heading) / distance;
    (score.is_finite() && score > 0.0).then_some(score)
}

/// Pick the best candidate in `direction` from `source`, using
/// [`EDGE_MARGIN`].
///
/// Candidates carry an identity `T` alongside their rect; the winner is
/// returned with both.  On an exact score tie the earliest candidate wins.
pub fn closest_in_direction<T, I>(source: Rect, direction: Direction, candidates: I) -> Option<(T, Rect)>
where
    I: IntoIterator<Item = (T, Rect)>,
{
    closest_in_direction_with_margin(source, direction, candidates, EDGE_MARGIN)
}

/// [`closest_in_direction`] with an explicit source margin.
pub fn closest_in_direction_with_margin<T, I>(
    source: Rect,
    direction: Direction,
    candidates: I,
    margin: f64,
) -> Option<(T, Rect)>
where
    I: IntoIterator<Item = (T, Rect)>,
{
    let source = source.expand(margin);
    let mut best: Option<(f64, T, Rect)> = None;
    for (item, rect) in candidates {
        let Some(s) = score(&source, &rect, direction) else {
            continue;
        };
        trace!("candidate {:?} scored {:.5}", rect, s);
        if best.as_ref().map_or(true, |(b, _, _)| s > *b) {
            best = Some((s, item, rect));
        }
    }
    best.map(|(_, item, rect)| (item, rect))
}
