//! park-planner: itinerary ordering and nearest-park lookup over a park catalog.
//!
//! Distances are great-circle kilometers. The engine holds no I/O; the
//! surrounding application feeds it catalog snapshots and maps its results
//! onto HTTP responses.

pub mod engine;
pub mod error;
pub mod geo;
pub mod index;
pub mod matrix;
pub mod park;
pub mod solver;
pub mod traits;

pub use engine::{EngineConfig, NearestPark, ParkEngine};
pub use error::{EngineError, ErrorCode, Result};
pub use geo::{bearing_deg, distance_km, CompassPoint, Coordinate, EARTH_RADIUS_KM};
pub use index::{IndexSnapshot, Neighbor, SpatialIndex};
pub use matrix::{DistanceMatrix, HaversineMatrix};
pub use park::{ParkId, ParkLocation, ParkRecord};
pub use solver::{Itinerary, ItineraryOptions, ItineraryStop};
