mod bisector;
mod collapse;
mod convexity;
mod join;
mod merge;
mod observer;
mod translate;

use tracing::{debug, warn};

use crate::error::{InsetError, Result};
use crate::geometry::{Loop, Segment};

pub use convexity::{convex_vertices, vertex_is_convex};
pub use merge::merge_short_edges;
pub use observer::{
    segment_reports, NoopObserver, SegmentReport, Stage, StageObserver, StageRecorder,
    TracingObserver,
};
pub use translate::offset_segment;

/// Default tolerance for endpoint coincidence and short-edge merging.
pub const DEFAULT_CUTOFF_LENGTH: f64 = 1e-3;

/// Default ray and miter extension, as a multiple of the inset distance.
pub const DEFAULT_ELONGATION: f64 = 100.0;

/// Tunables for [`LoopInset`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InsetConfig {
    /// Endpoint coincidence tolerance, also the short-edge threshold.
    pub cutoff_length: f64,
    /// Extension applied to bisector rays and miter joins, as a multiple of
    /// `max(distance, cutoff_length)`.
    pub elongation: f64,
    /// Run the short-edge merge after joining.
    pub merge_short_edges: bool,
}

impl Default for InsetConfig {
    fn default() -> Self {
        Self {
            cutoff_length: DEFAULT_CUTOFF_LENGTH,
            elongation: DEFAULT_ELONGATION,
            merge_short_edges: false,
        }
    }
}

impl InsetConfig {
    #[must_use]
    pub fn with_cutoff_length(mut self, cutoff_length: f64) -> Self {
        self.cutoff_length = cutoff_length;
        self
    }

    #[must_use]
    pub fn with_elongation(mut self, elongation: f64) -> Self {
        self.elongation = elongation;
        self
    }

    #[must_use]
    pub fn with_merge_short_edges(mut self, merge: bool) -> Self {
        self.merge_short_edges = merge;
        self
    }

    fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("cutoff_length", self.cutoff_length),
            ("elongation", self.elongation),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(InsetError::InvalidParameter { parameter, value });
            }
        }
        Ok(())
    }
}

/// A local defect that did not abort the inset.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// The extensions of two translated edges meeting at a convex vertex did
    /// not intersect, so the joint was left open.
    TrimFailed {
        /// Joint index in the pruned loop (start of `current`).
        vertex: usize,
        /// Index in the input loop of the edge that starts at the joint.
        edge: usize,
        previous: Segment,
        current: Segment,
    },
    /// The inset loop winds against the input, so it cannot lie inside it.
    Inverted { input_area: f64, output_area: f64 },
}

/// Result of a successful inset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsetOutput {
    /// The inset loop; empty when every edge collapsed.
    pub result: Loop,
    /// Non-fatal defects, empty for a clean inset.
    pub anomalies: Vec<Anomaly>,
}

impl InsetOutput {
    /// Returns `true` if no anomaly was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Returns `true` if the loop collapsed entirely.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.result.is_empty()
    }

    #[must_use]
    pub fn into_loop(self) -> Loop {
        self.result
    }
}

/// An input edge carried through the pipeline with its index in the input loop.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrackedEdge {
    source: usize,
    segment: Segment,
}

/// Insets a closed loop of segments by a uniform distance.
///
/// Stages: validate, bisectors, collapse pruning, translation, joining and
/// optionally short-edge merging. Each stage reads the previous stage's
/// output and produces a new one; the input loop is never modified.
#[derive(Debug, Clone)]
pub struct LoopInset {
    boundary: Loop,
    distance: f64,
    config: InsetConfig,
}

impl LoopInset {
    /// Creates a new inset operation with the default configuration.
    #[must_use]
    pub fn new(boundary: Loop, distance: f64) -> Self {
        Self {
            boundary,
            distance,
            config: InsetConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: InsetConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the inset.
    ///
    /// # Errors
    ///
    /// See [`execute_observed`](Self::execute_observed).
    pub fn execute(&self) -> Result<InsetOutput> {
        self.execute_observed(&mut NoopObserver)
    }

    /// Executes the inset, handing a snapshot of every stage to `observer`.
    ///
    /// # Errors
    ///
    /// - `InsetError::InsufficientSegments` for fewer than 2 segments.
    /// - `InsetError::InvalidParameter` for a negative or non-finite distance,
    ///   or an invalid configuration.
    /// - `InsetError::NotClosedLoop` if consecutive segments do not meet
    ///   within `cutoff_length`.
    /// - `InsetError::DegenerateAltitude` if a collapse test is degenerate.
    pub fn execute_observed<O: StageObserver + ?Sized>(
        &self,
        observer: &mut O,
    ) -> Result<InsetOutput> {
        let count = self.boundary.len();
        if count < 2 {
            return Err(InsetError::InsufficientSegments { count });
        }
        if !(self.distance.is_finite() && self.distance >= 0.0) {
            return Err(InsetError::InvalidParameter {
                parameter: "distance",
                value: self.distance,
            });
        }
        self.config.validate()?;

        let cutoff = self.config.cutoff_length;
        let reach = self.config.elongation * self.distance.max(cutoff);
        let winding = self.boundary.winding();
        observer.observe(Stage::Original, self.boundary.segments());

        let bisectors = bisector::compute(&self.boundary, winding, cutoff)?;
        observer.observe(
            Stage::Bisectors,
            &bisector::traces(&self.boundary, &bisectors, self.distance),
        );

        let survivors = collapse::prune(&self.boundary, &bisectors, winding, self.distance, reach)?;
        observer.observe(Stage::Pruned, &segments_of(&survivors));
        debug!(
            input = count,
            survivors = survivors.len(),
            distance = self.distance,
            "collapse detection"
        );
        if survivors.len() < 2 {
            return Ok(InsetOutput::default());
        }

        let translated = translate::offset_edges(&survivors, winding, self.distance);
        observer.observe(Stage::Translated, &segments_of(&translated));

        let (mut result, mut anomalies) = join::connect(&translated, winding, reach, cutoff);
        observer.observe(Stage::Joined, result.segments());

        if self.config.merge_short_edges {
            result = merge_short_edges(&result, cutoff);
            observer.observe(Stage::Merged, result.segments());
        }
        if self.distance > 0.0 {
            anomalies.extend(orientation_anomaly(&self.boundary, &result));
        }

        debug!(
            segments = result.len(),
            anomalies = anomalies.len(),
            "inset complete"
        );
        Ok(InsetOutput { result, anomalies })
    }
}

/// Flags an inset whose signed area does not share the input's sign.
fn orientation_anomaly(boundary: &Loop, result: &Loop) -> Option<Anomaly> {
    let input_area = boundary.signed_area();
    let output_area = result.signed_area();
    if result.is_empty() || input_area * output_area > 0.0 {
        return None;
    }
    warn!(input_area, output_area, "inset winds against its input");
    Some(Anomaly::Inverted {
        input_area,
        output_area,
    })
}

fn segments_of(edges: &[TrackedEdge]) -> Vec<Segment> {
    edges.iter().map(|e| e.segment).collect()
}

/// Insets `boundary` by `distance` with the given endpoint tolerance.
///
/// # Errors
///
/// See [`LoopInset::execute_observed`].
pub fn inset(boundary: &Loop, distance: f64, cutoff_length: f64) -> Result<InsetOutput> {
    LoopInset::new(boundary.clone(), distance)
        .with_config(InsetConfig::default().with_cutoff_length(cutoff_length))
        .execute()
}
