pub mod ring;

pub use ring::{EdgeKey, EdgeRing};
