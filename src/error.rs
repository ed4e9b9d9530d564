use thiserror::Error;

/// Top-level error type for loop insetting.
///
/// Every variant aborts the whole inset call; no partial loop is returned.
/// Non-fatal anomalies are reported through
/// [`Anomaly`](crate::operations::inset::Anomaly) instead.
#[derive(Debug, Error)]
pub enum InsetError {
    #[error("{count} segment(s) cannot form a closed loop, at least 2 are required")]
    InsufficientSegments { count: usize },

    #[error("loop is not closed at vertex {index}: gap {gap} exceeds tolerance {tolerance}")]
    NotClosedLoop {
        index: usize,
        gap: f64,
        tolerance: f64,
    },

    #[error("collapse test for edge {edge} is degenerate")]
    DegenerateAltitude {
        edge: usize,
        #[source]
        source: GeometryError,
    },

    #[error("parameter {parameter} = {value} is out of range")]
    InvalidParameter { parameter: &'static str, value: f64 },
}

/// Errors raised by the geometric primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("sides ({a}, {b}, {c}) violate the triangle inequality")]
    TriangleInequality { a: f64, b: f64, c: f64 },

    #[error("triangle base has zero length")]
    ZeroBase,
}

/// Convenience type alias for results using [`InsetError`].
pub type Result<T> = std::result::Result<T, InsetError>;
