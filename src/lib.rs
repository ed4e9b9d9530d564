pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{GeometryError, InsetError, Result};
pub use geometry::{Loop, Segment, Winding};
pub use operations::inset::{inset, Anomaly, InsetConfig, InsetOutput, LoopInset};
pub use operations::shells::ConcentricShells;
