//! Pairwise distance matrix over a requested subset of parks.
//!
//! Built fresh per itinerary request. Requests are bounded to a few dozen
//! stops by the caller, so the O(n²) fill is cheap.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::error::{EngineError, Result};
use crate::geo::distance_km;
use crate::park::{ParkId, ParkLocation};
use crate::traits::DistanceMatrixProvider;

/// Square, symmetric matrix of kilometers with a zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<ParkId>,
    km: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Number of parks (rows).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Park identifiers in row order.
    pub fn ids(&self) -> &[ParkId] {
        &self.ids
    }

    /// Distance between rows `i` and `j`.
    #[inline]
    pub fn between(&self, i: usize, j: usize) -> f64 {
        self.km[i][j]
    }

    /// Distance between two parks by identifier.
    pub fn get(&self, a: &ParkId, b: &ParkId) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.km[i][j])
    }

    pub fn position(&self, id: &ParkId) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }
}

/// Great-circle matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    pub fn build(parks: &[ParkLocation]) -> Result<DistanceMatrix> {
        if parks.is_empty() {
            return Err(EngineError::EmptyParkSet);
        }

        let mut seen = HashSet::with_capacity(parks.len());
        for park in parks {
            if !seen.insert(&park.id) {
                return Err(EngineError::DuplicateParkId(park.id.clone()));
            }
        }

        let n = parks.len();
        // Upper triangle only; the lower half is mirrored below.
        let upper: Vec<Vec<f64>> = parks
            .par_iter()
            .enumerate()
            .map(|(i, from)| {
                parks[i + 1..]
                    .iter()
                    .map(|to| distance_km(from.coordinate, to.coordinate))
                    .collect()
            })
            .collect();

        let mut km = vec![vec![0.0; n]; n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, d) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                km[i][j] = d;
                km[j][i] = d;
            }
        }

        Ok(DistanceMatrix {
            ids: parks.iter().map(|p| p.id.clone()).collect(),
            km,
        })
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, parks: &[ParkLocation]) -> Result<DistanceMatrix> {
        Self::build(parks)
    }
}
