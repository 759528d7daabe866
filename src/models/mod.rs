pub mod coordinates;
pub mod green;
pub mod marker;
pub mod route;

pub use coordinates::Coordinates;
pub use green::{GreenCategory, GreenPolygon, GreenPolygonSet};
pub use marker::{District, Marker, NewMarker};
pub use route::{Decision, RouteLeg, Verdict};
