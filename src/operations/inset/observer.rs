use nalgebra::distance;
use tracing::{debug, trace};

use crate::geometry::{Loop, Segment};
use crate::topology::ring::prev_index;

use super::convexity::vertex_is_convex;

/// Pipeline stage at which a snapshot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The caller's loop.
    Original,
    /// One trace per vertex, from the vertex along its bisector.
    Bisectors,
    /// Edges that survived collapse detection.
    Pruned,
    /// Survivors moved along their inward normals, not yet joined.
    Translated,
    /// The joined loop.
    Joined,
    /// The joined loop after short-edge merging.
    Merged,
}

impl Stage {
    /// Short name used to label exported snapshots.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Original => "outlines",
            Self::Bisectors => "bisectors",
            Self::Pruned => "relevants",
            Self::Translated => "raw_insets",
            Self::Joined => "final_insets",
            Self::Merged => "merged",
        }
    }
}

/// Passive receiver of intermediate snapshots.
///
/// Observers cannot influence the pipeline; a headless caller passes
/// [`NoopObserver`].
pub trait StageObserver {
    fn observe(&mut self, stage: Stage, segments: &[Segment]);
}

impl<F: FnMut(Stage, &[Segment])> StageObserver for F {
    fn observe(&mut self, stage: Stage, segments: &[Segment]) {
        self(stage, segments);
    }
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn observe(&mut self, _stage: Stage, _segments: &[Segment]) {}
}

/// Keeps every snapshot in the order it was observed.
#[derive(Debug, Clone, Default)]
pub struct StageRecorder {
    snapshots: Vec<(Stage, Loop)>,
}

impl StageRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshots(&self) -> &[(Stage, Loop)] {
        &self.snapshots
    }

    /// Returns the latest snapshot recorded for `stage`.
    #[must_use]
    pub fn snapshot(&self, stage: Stage) -> Option<&Loop> {
        self.snapshots
            .iter()
            .rev()
            .find(|(s, _)| *s == stage)
            .map(|(_, snapshot)| snapshot)
    }

    /// Stages in the order they were observed.
    #[must_use]
    pub fn stages(&self) -> Vec<Stage> {
        self.snapshots.iter().map(|(s, _)| *s).collect()
    }
}

impl StageObserver for StageRecorder {
    fn observe(&mut self, stage: Stage, segments: &[Segment]) {
        self.snapshots.push((stage, Loop::new(segments.to_vec())));
    }
}

/// Logs a per-segment table for each stage through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn observe(&mut self, stage: Stage, segments: &[Segment]) {
        debug!(stage = stage.tag(), segments = segments.len(), "inset stage");
        if stage == Stage::Bisectors {
            return;
        }
        for row in segment_reports(segments) {
            trace!(
                stage = stage.tag(),
                id = row.index,
                convex = row.convex,
                length = row.length,
                gap = row.gap,
                angle = row.angle,
                segment = %row.segment,
            );
        }
    }
}

/// Diagnostic row describing one segment of a loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentReport {
    pub index: usize,
    /// Convexity of the vertex at the segment's start.
    pub convex: bool,
    pub length: f64,
    /// Distance from the previous segment's end to this segment's start.
    pub gap: f64,
    /// Angle in radians at the vertex, between the previous segment's start
    /// and this segment's end.
    pub angle: f64,
    pub segment: Segment,
}

/// Builds one report row per segment, using the loop's own orientation.
#[must_use]
pub fn segment_reports(segments: &[Segment]) -> Vec<SegmentReport> {
    let n = segments.len();
    let winding = Loop::new(segments.to_vec()).winding();
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let previous = &segments[prev_index(index, n)];
            let back = previous.start - segment.start;
            let forward = segment.end - segment.start;
            let angle = if back.norm_squared() > 0.0 && forward.norm_squared() > 0.0 {
                back.angle(&forward)
            } else {
                0.0
            };
            SegmentReport {
                index,
                convex: vertex_is_convex(previous, segment, winding),
                length: segment.length(),
                gap: distance(&previous.end, &segment.start),
                angle,
                segment: *segment,
            }
        })
        .collect()
}
