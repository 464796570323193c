//! Feature-space primitives for linkage clustering.
//!
//! Pure math library — zero I/O. Provides validated points, Euclidean
//! distance, and the labeled point set that the linkage engine mutates
//! in place.

mod distance;
mod error;
mod point;
mod set;

pub use distance::{Distance, euclidean};
pub use error::GeomError;
pub use point::Point;
pub use set::LabeledSet;
