pub mod candidate;
pub mod geo;
pub mod similarity;

pub use candidate::{Candidate, SourceKind, UNREACHABLE};
pub use geo::Coordinates;
pub use similarity::DimensionMismatch;
