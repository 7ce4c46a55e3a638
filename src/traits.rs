//! Seams between the planner and its distance source.

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::park::ParkLocation;

/// Provides a distance matrix for a set of parks.
///
/// The matrix is indexed by the provided park order. Implementations must
/// reject an empty set and repeated identifiers before computing anything.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, parks: &[ParkLocation]) -> Result<DistanceMatrix>;
}
