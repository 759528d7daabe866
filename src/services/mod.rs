pub mod green_areas;
pub mod green_route;
pub mod valhalla;
