pub mod segment;
pub mod segment_loop;
pub mod winding;

pub use segment::Segment;
pub use segment_loop::Loop;
pub use winding::Winding;
