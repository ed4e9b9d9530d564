pub mod inset;
pub mod shells;
