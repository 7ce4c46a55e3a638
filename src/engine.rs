//! Query façade used by the HTTP layer.
//!
//! Holds the spatial index over the current catalog and answers itinerary,
//! nearest-park and radius requests against one consistent snapshot each.
//! Catalog changes arrive only through [`ParkEngine::rebuild`].

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::geo::{bearing_deg, CompassPoint, Coordinate};
use crate::index::{IndexSnapshot, Neighbor, SpatialIndex};
use crate::matrix::HaversineMatrix;
use crate::park::{ParkId, ParkLocation, ParkRecord};
use crate::solver::{self, Itinerary, ItineraryOptions};
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub itinerary: ItineraryOptions,
}

/// Closest park to a reported position, with the direction to head in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestPark {
    pub park: ParkLocation,
    pub distance_km: f64,
    pub bearing_deg: f64,
    pub heading: CompassPoint,
}

#[derive(Debug)]
pub struct ParkEngine<M = HaversineMatrix> {
    index: SpatialIndex,
    matrix_provider: M,
    options: ItineraryOptions,
}

impl Default for ParkEngine<HaversineMatrix> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ParkEngine<HaversineMatrix> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_matrix_provider(config, HaversineMatrix)
    }
}

impl<M> ParkEngine<M>
where
    M: DistanceMatrixProvider,
{
    pub fn with_matrix_provider(config: EngineConfig, matrix_provider: M) -> Self {
        Self {
            index: SpatialIndex::new(),
            matrix_provider,
            options: config.itinerary,
        }
    }

    /// Replaces the catalog. Call after any insert, update or delete of a park.
    pub fn rebuild(&self, parks: Vec<ParkLocation>) -> Result<usize> {
        self.index.rebuild(parks)
    }

    /// Validates raw catalog rows, then rebuilds.
    ///
    /// Any invalid coordinate fails the whole rebuild with `InvalidCoordinate`
    /// and the previous catalog stays in place.
    pub fn rebuild_from_records<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = ParkRecord>,
    {
        let parks = records
            .into_iter()
            .map(ParkLocation::try_from)
            .collect::<Result<Vec<_>>>()?;
        self.rebuild(parks)
    }

    /// Plans a visiting order over `park_ids` starting from `start`.
    pub fn plan_itinerary(&self, start: Coordinate, park_ids: &[ParkId]) -> Result<Itinerary> {
        if park_ids.is_empty() {
            return Err(EngineError::EmptyParkSet);
        }

        let mut seen = HashSet::with_capacity(park_ids.len());
        for id in park_ids {
            if !seen.insert(id) {
                return Err(EngineError::DuplicateParkId(id.clone()));
            }
        }

        let snapshot = self.index.snapshot();
        let mut parks = park_ids
            .iter()
            .map(|id| {
                snapshot
                    .get(id)
                    .cloned()
                    .ok_or_else(|| EngineError::UnknownParkId(id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        // Canonical row order, so the caller's ordering of ids never matters.
        parks.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(stops = parks.len(), catalog = snapshot.len(), "planning itinerary");
        solver::optimize(start, &parks, &self.matrix_provider, &self.options)
    }

    /// The `k` closest parks, ascending by distance then id.
    pub fn nearest_parks(&self, point: Coordinate, k: usize) -> Vec<Neighbor> {
        self.index.nearest(point, k)
    }

    /// Every park within `radius_km` of `point`.
    pub fn parks_within_radius(&self, point: Coordinate, radius_km: f64) -> Result<Vec<Neighbor>> {
        self.index.within(point, radius_km)
    }

    /// Emergency lookup: the single closest park and how to head there.
    ///
    /// `None` when the catalog is empty.
    pub fn nearest_park(&self, point: Coordinate) -> Option<NearestPark> {
        let Neighbor { park, distance_km } = self.index.nearest(point, 1).into_iter().next()?;
        let bearing_deg = bearing_deg(point, park.coordinate);
        Some(NearestPark {
            park,
            distance_km,
            bearing_deg,
            heading: CompassPoint::from_bearing(bearing_deg),
        })
    }

    pub fn catalog_size(&self) -> usize {
        self.index.len()
    }

    pub fn get(&self, id: &ParkId) -> Option<ParkLocation> {
        self.index.snapshot().get(id).cloned()
    }

    /// The catalog snapshot currently answering queries.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.index.snapshot()
    }
}
