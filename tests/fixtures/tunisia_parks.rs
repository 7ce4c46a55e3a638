//! Tunisian national parks for realistic test fixtures.
//!
//! Coordinates are the park reference points used by the park catalog.

use park_planner::{Coordinate, ParkId, ParkLocation, ParkRecord};

/// A named park with coordinates.
#[derive(Debug, Clone)]
pub struct Park {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Park {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self { id, name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng).expect("fixture coordinates are valid")
    }

    pub fn id(&self) -> ParkId {
        ParkId::from(self.id)
    }

    pub fn location(&self) -> ParkLocation {
        ParkLocation::new(self.id, self.name, self.coordinate())
    }

    pub fn record(&self) -> ParkRecord {
        ParkRecord {
            id: self.id(),
            name: self.name.to_string(),
            latitude: self.lat,
            longitude: self.lng,
        }
    }
}

// ============================================================================
// North (Tell Atlas, coast)
// ============================================================================

pub const NORTH: &[Park] = &[
    Park::new("ichkeul", "Parc National d'Ichkeul", 37.1617, 9.6742),
    Park::new("boukornine", "Parc National de Boukornine", 36.6833, 10.2167),
    Park::new("zaghouan", "Parc National de Zaghouan", 36.4000, 10.1500),
    Park::new("zembra", "Parc National de Zembra et Zembretta", 37.1167, 10.8167),
    Park::new("el-feija", "Parc National d'El Feija", 36.5500, 8.5333),
    Park::new("chitana", "Parc National de Jebel Chitana-Cap Négro", 37.0500, 8.9000),
    Park::new("serj", "Parc National de Jebel Serj", 36.1000, 9.4000),
    Park::new("oued-zeen", "Parc National de Oued Zeen", 36.5000, 8.7000),
];

// ============================================================================
// Centre (steppes, Dorsal)
// ============================================================================

pub const CENTRE: &[Park] = &[
    Park::new("chaambi", "Parc National de Chaambi", 35.1667, 8.6667),
    Park::new("bouhedma", "Parc National de Bouhedma", 34.5333, 9.6667),
    Park::new("orbata", "Parc National de l'Orbata", 34.7000, 8.7500),
    Park::new("mghilla", "Parc National de Jebel Mghilla", 34.9000, 9.3000),
    Park::new("zaghdoud", "Parc National de Jebel Zaghdoud", 35.7000, 9.8000),
];

// ============================================================================
// South (Sahara)
// ============================================================================

pub const SOUTH: &[Park] = &[
    Park::new("jebil", "Parc National de Jebil", 33.3000, 9.5000),
    Park::new("dghoumes", "Parc National de Dghoumès", 33.9000, 8.4500),
    Park::new("sidi-toui", "Parc National de Sidi Toui", 33.0833, 10.3167),
    Park::new("senghar", "Parc National de Senghar-Jabess", 31.5000, 9.8000),
];

/// Reference points for request origins.
pub const TUNIS: (f64, f64) = (36.8065, 10.1815);
pub const SFAX: (f64, f64) = (34.7400, 10.7600);

/// Every park in the catalog.
pub fn all_parks() -> Vec<Park> {
    NORTH.iter().chain(CENTRE).chain(SOUTH).cloned().collect()
}

pub fn catalog() -> Vec<ParkLocation> {
    all_parks().iter().map(Park::location).collect()
}

pub fn point((lat, lng): (f64, f64)) -> Coordinate {
    Coordinate::new(lat, lng).expect("fixture coordinates are valid")
}
