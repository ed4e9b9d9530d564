use nalgebra::distance;
use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::error::{GeometryError, InsetError, Result};
use crate::geometry::{Loop, Segment, Winding};
use crate::math::predicates::triangle_altitude;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::topology::ring::{EdgeKey, EdgeRing};

use super::bisector::vertex_bisector;
use super::convexity::vertex_is_convex;
use super::join::miter;
use super::TrackedEdge;

/// An edge of the shrinking loop together with the junction at its start.
#[derive(Debug, Clone, Copy)]
struct Front {
    edge: TrackedEdge,
    /// Start of the edge in the current loop. Moves to the miter point when
    /// a collapse makes a more distant edge its predecessor.
    start: Point2,
    /// End of the edge in the current loop.
    end: Point2,
    /// Bisector of the start junction, `None` between anti-parallel edges.
    bisector: Option<Vector2>,
    /// Gap to an anti-parallel predecessor lying on this edge's inward side.
    facing: Option<f64>,
}

/// How the edge ahead of a junction meets the edge behind it.
#[derive(Debug, Clone, Copy)]
struct Junction {
    point: Option<Point2>,
    bisector: Option<Vector2>,
    facing: Option<f64>,
}

/// Inset distance at which an edge vanishes.
#[derive(Debug, Clone, Copy)]
struct Event {
    height: f64,
    /// Neighbour that vanishes at the same height, for facing edges.
    partner: Option<EdgeKey>,
}

/// Removes the edges that vanish under an inset of `distance`.
///
/// Collapse events are processed lowest first. An edge's event is the
/// altitude at which the rays along its two junction bisectors meet, or half
/// the gap to an anti-parallel neighbour facing it. Input junctions use
/// `bisectors`; whenever an edge is dropped the junction between its former
/// neighbours is rebuilt and their events recomputed. Processing stops at the
/// first event above `distance` (within `TOLERANCE`), so the order of removals
/// does not depend on `distance`. Survivors keep their input order and index.
///
/// # Errors
///
/// Returns `InsetError::DegenerateAltitude` if a collapse triangle violates
/// the triangle inequality.
pub(super) fn prune(
    boundary: &Loop,
    bisectors: &[Vector2],
    winding: Winding,
    distance: f64,
    reach: f64,
) -> Result<Vec<TrackedEdge>> {
    let segments = boundary.segments();
    let mut ring = EdgeRing::from_values(segments.iter().enumerate().map(|(source, segment)| {
        let previous = &segments[boundary.prev_index(source)];
        Front {
            edge: TrackedEdge {
                source,
                segment: *segment,
            },
            start: segment.start,
            end: segment.end,
            bisector: Some(bisectors[source]),
            facing: facing_gap(previous, segment, winding),
        }
    }));

    let mut events = SecondaryMap::new();
    for key in ring.keys() {
        if let Some(event) = next_event(&ring, key, reach)? {
            events.insert(key, event);
        }
    }

    while ring.len() >= 2 {
        let mut earliest: Option<(EdgeKey, Event)> = None;
        for key in ring.keys() {
            if let Some(event) = events.get(key) {
                if earliest.map_or(true, |(_, e)| event.height < e.height) {
                    earliest = Some((key, *event));
                }
            }
        }
        let Some((key, event)) = earliest.filter(|(_, e)| e.height <= distance + TOLERANCE)
        else {
            break;
        };

        let mut dirty = Vec::with_capacity(2);
        for removed in std::iter::once(key).chain(event.partner) {
            let after = ring.next(removed);
            if let Some(front) = ring.remove(removed) {
                events.remove(removed);
                debug!(
                    edge = front.edge.source,
                    altitude = event.height,
                    distance,
                    "edge collapsed"
                );
            }
            dirty.extend(after);
        }

        for key in dirty {
            if ring.get(key).is_none() || ring.len() < 2 {
                continue;
            }
            reconnect(&mut ring, key, winding, reach);
            let before = ring.prev(key).into_iter();
            for affected in std::iter::once(key).chain(before) {
                match next_event(&ring, affected, reach)? {
                    Some(event) => {
                        events.insert(affected, event);
                    }
                    None => {
                        events.remove(affected);
                    }
                }
            }
        }
    }

    Ok(ring.into_values().into_iter().map(|front| front.edge).collect())
}

/// Rebuilds the junction between `key` and its current predecessor.
fn reconnect(ring: &mut EdgeRing<Front>, key: EdgeKey, winding: Winding, reach: f64) {
    let Some(prev_key) = ring.prev(key) else {
        return;
    };
    let (Some(previous), Some(current)) = (ring.get(prev_key), ring.get(key)) else {
        return;
    };
    let (previous, current) = (previous.edge.segment, current.edge.segment);
    let junction = junction(&previous, &current, winding, reach);
    trace!(?junction, "rebuilt junction");

    if let Some(front) = ring.get_mut(prev_key) {
        front.end = junction.point.unwrap_or(previous.end);
    }
    if let Some(front) = ring.get_mut(key) {
        front.start = junction.point.unwrap_or(current.start);
        front.bisector = junction.bisector;
        front.facing = junction.facing;
    }
}

/// Joins two edges that were not adjacent in the input loop.
///
/// Convex junctions meet at the miter point of the two edges; reflex ones
/// keep both original endpoints, as the join stage bridges them with a chord.
fn junction(previous: &Segment, current: &Segment, winding: Winding, reach: f64) -> Junction {
    if is_anti_parallel(previous, current) {
        return Junction {
            point: None,
            bisector: None,
            facing: facing_gap(previous, current, winding),
        };
    }
    let point = if vertex_is_convex(previous, current, winding) {
        miter(previous, current, reach)
    } else {
        None
    };
    Junction {
        point,
        bisector: Some(vertex_bisector(previous, current, winding)),
        facing: None,
    }
}

fn is_anti_parallel(previous: &Segment, current: &Segment) -> bool {
    match (previous.direction(), current.direction()) {
        (Some(a), Some(b)) => a.perp(&b).abs() <= TOLERANCE && a.dot(&b) < 0.0,
        _ => false,
    }
}

/// Distance between anti-parallel `previous` and `current` when `current`
/// lies on the inward side of `previous`; both vanish at half of it.
fn facing_gap(previous: &Segment, current: &Segment, winding: Winding) -> Option<f64> {
    if !is_anti_parallel(previous, current) {
        return None;
    }
    let normal = winding.inset_direction(previous)?;
    let gap = (current.start - previous.end).dot(&normal);
    (gap >= -TOLERANCE).then_some(gap.max(0.0))
}

/// Lowest inset distance at which the edge at `key` vanishes, if any.
fn next_event(ring: &EdgeRing<Front>, key: EdgeKey, reach: f64) -> Result<Option<Event>> {
    let (Some(prev_key), Some(next_key)) = (ring.prev(key), ring.next(key)) else {
        return Ok(None);
    };
    let (Some(front), Some(next)) = (ring.get(key), ring.get(next_key)) else {
        return Ok(None);
    };

    let mut earliest: Option<Event> = None;
    let mut consider = |height: f64, partner: Option<EdgeKey>| {
        if earliest.map_or(true, |e| height < e.height) {
            earliest = Some(Event { height, partner });
        }
    };

    if let (Some(start_bisector), Some(end_bisector)) = (front.bisector, next.bisector) {
        let span = Segment::new(front.start, front.end);
        let altitude = if span.vector().dot(&front.edge.segment.vector()) <= 0.0 {
            // Neighbouring miters already cross over this edge.
            Some(0.0)
        } else {
            collapse_altitude(&span, &start_bisector, &end_bisector, reach).map_err(|err| {
                InsetError::DegenerateAltitude {
                    edge: front.edge.source,
                    source: err,
                }
            })?
        };
        if let Some(h) = altitude {
            consider(h, None);
        }
    }
    if let Some(gap) = front.facing {
        consider(gap / 2.0, Some(prev_key));
    }
    if let Some(gap) = next.facing {
        consider(gap / 2.0, Some(next_key));
    }
    Ok(earliest)
}

/// Height at which the bisector rays of `segment` meet.
///
/// Rays of length `reach` leave both endpoints along their bisectors. If they
/// meet, the result is the altitude of the triangle formed by the segment and
/// the meeting point. `None` means the rays do not meet and the edge cannot
/// collapse. A zero-length segment has altitude 0.
///
/// # Errors
///
/// Propagates `GeometryError` from the altitude computation.
pub(super) fn collapse_altitude(
    segment: &Segment,
    start_bisector: &Vector2,
    end_bisector: &Vector2,
    reach: f64,
) -> std::result::Result<Option<f64>, GeometryError> {
    let base = segment.length();
    if base < TOLERANCE {
        return Ok(Some(0.0));
    }

    let start_ray = Segment::new(segment.start, segment.start + start_bisector * reach);
    let end_ray = Segment::new(segment.end, segment.end + end_bisector * reach);
    let Some(apex) = start_ray.intersection(&end_ray) else {
        return Ok(None);
    };

    let altitude = triangle_altitude(
        base,
        distance(&segment.start, &apex),
        distance(&segment.end, &apex),
    )?;
    Ok(Some(altitude))
}
