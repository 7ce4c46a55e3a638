//! Spatial index over the park catalog.
//!
//! Parks are stored in an R-tree as points on the unit sphere. Chord length
//! grows with great-circle distance, so the tree's nearest-first order is the
//! haversine order, with no special cases at the antimeridian or the poles.
//!
//! The published catalog is an immutable [`IndexSnapshot`] behind an `Arc`.
//! Rebuilds assemble a new snapshot off to the side and swap the pointer, so
//! a query always runs against one consistent catalog.

use std::f64::consts::FRAC_PI_2;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::geo::{distance_km, unit_vector, Coordinate, EARTH_RADIUS_KM};
use crate::park::{ParkId, ParkLocation};

/// Slack on tree distances so rounding between chord and haversine never
/// drops an exact tie.
const BOUND_SLACK_KM: f64 = 1e-3;
const CHORD_SLACK: f64 = 1e-9;

/// A park paired with its distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub park: ParkLocation,
    pub distance_km: f64,
}

/// Tree entry: position in the snapshot's id-sorted park list.
#[derive(Debug, Clone, Copy)]
struct IndexedPark {
    pos: usize,
    xyz: [f64; 3],
}

impl RTreeObject for IndexedPark {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.xyz)
    }
}

impl PointDistance for IndexedPark {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.xyz[0] - point[0];
        let dy = self.xyz[1] - point[1];
        let dz = self.xyz[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Great-circle km for a squared chord on the unit sphere.
fn chord_to_km(distance_2: f64) -> f64 {
    2.0 * EARTH_RADIUS_KM * (distance_2.sqrt() / 2.0).min(1.0).asin()
}

fn km_to_chord(km: f64) -> f64 {
    2.0 * (km / (2.0 * EARTH_RADIUS_KM)).min(FRAC_PI_2).sin()
}

/// Immutable view of the catalog at one point in time.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    /// Sorted by id, so position order doubles as the tie-break order.
    parks: Vec<ParkLocation>,
    tree: RTree<IndexedPark>,
}

impl Default for IndexSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl IndexSnapshot {
    pub fn empty() -> Self {
        Self {
            parks: Vec::new(),
            tree: RTree::new(),
        }
    }

    /// Builds a snapshot, rejecting repeated identifiers.
    pub fn build(mut parks: Vec<ParkLocation>) -> Result<Self> {
        parks.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(pair) = parks.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(EngineError::DuplicateParkId(pair[1].id.clone()));
        }

        let entries: Vec<IndexedPark> = parks
            .iter()
            .enumerate()
            .map(|(pos, park)| IndexedPark {
                pos,
                xyz: unit_vector(park.coordinate),
            })
            .collect();

        Ok(Self {
            parks,
            tree: RTree::bulk_load(entries),
        })
    }

    pub fn len(&self) -> usize {
        self.parks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }

    /// All parks, ordered by id.
    pub fn parks(&self) -> &[ParkLocation] {
        &self.parks
    }

    pub fn get(&self, id: &ParkId) -> Option<&ParkLocation> {
        self.parks
            .binary_search_by(|park| park.id.cmp(id))
            .ok()
            .map(|pos| &self.parks[pos])
    }

    /// The `k` parks closest to `point`, ascending by distance then id.
    ///
    /// Returns every park when `k` exceeds the catalog size.
    pub fn nearest(&self, point: Coordinate, k: usize) -> Vec<Neighbor> {
        let k = k.min(self.parks.len());
        if k == 0 {
            return Vec::new();
        }

        let query = unit_vector(point);
        let mut best: Vec<(f64, usize)> = Vec::with_capacity(k + 1);
        let mut visited = 0usize;

        for (entry, distance_2) in self.tree.nearest_neighbor_iter_with_distance_2(&query) {
            if best.len() == k && chord_to_km(distance_2) - BOUND_SLACK_KM > best[k - 1].0 {
                break;
            }
            visited += 1;
            best.push((distance_km(point, self.parks[entry.pos].coordinate), entry.pos));
            if best.len() >= k {
                best.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                best.truncate(k);
            }
        }

        debug!(k, visited, parks = self.parks.len(), "nearest query");
        self.neighbors(best)
    }

    /// Every park within `radius_km` of `point` (inclusive), ordered by
    /// distance then id.
    pub fn within(&self, point: Coordinate, radius_km: f64) -> Result<Vec<Neighbor>> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(EngineError::InvalidRadius(radius_km));
        }

        let reach = km_to_chord(radius_km + BOUND_SLACK_KM);
        let mut hits: Vec<(f64, usize)> = self
            .tree
            .locate_within_distance(unit_vector(point), reach * reach + CHORD_SLACK)
            .map(|entry| (distance_km(point, self.parks[entry.pos].coordinate), entry.pos))
            .filter(|(d, _)| *d <= radius_km)
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        Ok(self.neighbors(hits))
    }

    fn neighbors(&self, ranked: Vec<(f64, usize)>) -> Vec<Neighbor> {
        ranked
            .into_iter()
            .map(|(distance_km, pos)| Neighbor {
                park: self.parks[pos].clone(),
                distance_km,
            })
            .collect()
    }
}

/// Rebuildable, concurrently readable spatial index.
///
/// Queries clone the current snapshot pointer and never wait on a rebuild in
/// progress. Rebuilds are serialized among themselves.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    current: RwLock<Arc<IndexSnapshot>>,
    rebuild_lock: Mutex<()>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        // The guarded value is a plain Arc, so a poisoned lock still holds a valid one.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the index contents. On error the previous snapshot stays published.
    ///
    /// Returns the number of indexed parks.
    pub fn rebuild(&self, parks: Vec<ParkLocation>) -> Result<usize> {
        let _serial = self.rebuild_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let snapshot = match IndexSnapshot::build(parks) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) => {
                warn!(error = %err, "rejected catalog rebuild, keeping previous index");
                return Err(err);
            }
        };
        let size = snapshot.len();

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;

        info!(parks = size, "spatial index rebuilt");
        Ok(size)
    }

    pub fn nearest(&self, point: Coordinate, k: usize) -> Vec<Neighbor> {
        self.snapshot().nearest(point, k)
    }

    pub fn within(&self, point: Coordinate, radius_km: f64) -> Result<Vec<Neighbor>> {
        self.snapshot().within(point, radius_km)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
