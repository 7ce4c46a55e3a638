//! Park records as seen by the planner.
//!
//! The catalog is owned by the persistence layer. The planner only ever holds
//! immutable copies taken at rebuild time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::geo::Coordinate;

/// Opaque, unique park key. Ordering is used for deterministic tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParkId(String);

impl ParkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ParkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A park location with a validated coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkLocation {
    pub id: ParkId,
    pub name: String,
    pub coordinate: Coordinate,
}

impl ParkLocation {
    pub fn new(id: impl Into<ParkId>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
        }
    }
}

/// Unvalidated catalog row, as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRecord {
    pub id: ParkId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<ParkRecord> for ParkLocation {
    type Error = EngineError;

    fn try_from(record: ParkRecord) -> Result<Self> {
        let coordinate = Coordinate::new(record.latitude, record.longitude)?;
        Ok(Self {
            id: record.id,
            name: record.name,
            coordinate,
        })
    }
}
