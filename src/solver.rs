//! Itinerary optimizer (open-path TSP heuristic).
//!
//! Construction is nearest-neighbor from the start point, then 2-opt local
//! search improves the order. The path does not return to the start.
//! Everything is deterministic: ties go to the lower park id and no
//! randomness is involved.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::geo::{distance_km, Coordinate};
use crate::matrix::DistanceMatrix;
use crate::park::{ParkId, ParkLocation};
use crate::traits::DistanceMatrixProvider;

/// Minimum gain (km) for a 2-opt move to count as an improvement.
const IMPROVEMENT_EPSILON_KM: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryOptions {
    /// Run 2-opt after construction.
    pub improve: bool,
    /// Maximum number of applied 2-opt moves. `None` caps at n².
    pub max_improvements: Option<usize>,
}

impl Default for ItineraryOptions {
    fn default() -> Self {
        Self {
            improve: true,
            max_improvements: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStop {
    pub park_id: ParkId,
    pub name: String,
    /// Distance from the previous stop (or the start).
    pub leg_km: f64,
    /// Distance travelled from the start up to and including this leg.
    pub cumulative_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub start: Coordinate,
    pub stops: Vec<ItineraryStop>,
    pub total_km: f64,
    /// Total of the nearest-neighbor order before improvement.
    pub construction_km: f64,
    /// Number of 2-opt moves applied.
    pub improvements: usize,
}

impl Itinerary {
    pub fn park_ids(&self) -> impl Iterator<Item = &ParkId> {
        self.stops.iter().map(|stop| &stop.park_id)
    }
}

/// Orders `parks` for a visit starting at `start`.
///
/// Fails with `EmptyParkSet` or `DuplicateParkId` (from the matrix provider)
/// before any routing work is done.
pub fn optimize<M>(
    start: Coordinate,
    parks: &[ParkLocation],
    matrix_provider: &M,
    options: &ItineraryOptions,
) -> Result<Itinerary>
where
    M: DistanceMatrixProvider,
{
    let matrix = matrix_provider.matrix_for(parks)?;
    let start_km: Vec<f64> = parks
        .iter()
        .map(|park| distance_km(start, park.coordinate))
        .collect();

    let mut order = nearest_neighbor_order(&start_km, &matrix);
    let construction_km = path_length(&order, &start_km, &matrix);

    let improvements = if options.improve {
        let cap = options
            .max_improvements
            .unwrap_or_else(|| order.len() * order.len());
        two_opt(&mut order, &start_km, &matrix, cap)
    } else {
        0
    };

    let mut stops = Vec::with_capacity(order.len());
    let mut cumulative_km = 0.0;
    let mut prev: Option<usize> = None;
    for &idx in &order {
        let leg_km = leg(prev, idx, &start_km, &matrix);
        cumulative_km += leg_km;
        stops.push(ItineraryStop {
            park_id: parks[idx].id.clone(),
            name: parks[idx].name.clone(),
            leg_km,
            cumulative_km,
        });
        prev = Some(idx);
    }

    debug!(
        stops = stops.len(),
        construction_km,
        total_km = cumulative_km,
        improvements,
        "itinerary optimized"
    );

    Ok(Itinerary {
        start,
        stops,
        total_km: cumulative_km,
        construction_km,
        improvements,
    })
}

/// Greedy construction: always move to the closest unvisited park.
///
/// `start_km[i]` is the distance from the start point to matrix row `i`.
pub fn nearest_neighbor_order(start_km: &[f64], matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.len();
    let ids = matrix.ids();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current: Option<usize> = None;

    for _ in 0..n {
        let next = (0..n)
            .filter(|&j| !visited[j])
            .min_by(|&a, &b| {
                leg(current, a, start_km, matrix)
                    .total_cmp(&leg(current, b, start_km, matrix))
                    .then_with(|| ids[a].cmp(&ids[b]))
            });

        let Some(next) = next else { break };
        visited[next] = true;
        order.push(next);
        current = Some(next);
    }

    order
}

/// Length of the open path start → order[0] → … → order[n-1].
pub fn path_length(order: &[usize], start_km: &[f64], matrix: &DistanceMatrix) -> f64 {
    let mut total = 0.0;
    let mut prev = None;
    for &idx in order {
        total += leg(prev, idx, start_km, matrix);
        prev = Some(idx);
    }
    total
}

/// Runs 2-opt until no improving reversal remains or `max_improvements`
/// moves have been applied. Returns the number of applied moves.
pub fn two_opt(
    order: &mut [usize],
    start_km: &[f64],
    matrix: &DistanceMatrix,
    max_improvements: usize,
) -> usize {
    let mut applied = 0;
    while applied < max_improvements {
        if !two_opt_improve(order, start_km, matrix) {
            break;
        }
        applied += 1;
    }

    if applied == max_improvements && applied > 0 {
        debug!(applied, "2-opt stopped at improvement cap");
    }
    applied
}

/// 2-opt: reverse one segment of the path if that shortens it.
/// Returns true if an improvement was made.
///
/// Reversing `order[i..=j]` only changes the edge entering position `i` and
/// the edge leaving position `j`; the open end has no leaving edge.
fn two_opt_improve(order: &mut [usize], start_km: &[f64], matrix: &DistanceMatrix) -> bool {
    let n = order.len();
    if n < 2 {
        return false;
    }

    for i in 0..n - 1 {
        let before_i = if i == 0 { None } else { Some(order[i - 1]) };
        for j in i + 1..n {
            let after_j = order.get(j + 1).copied();

            let mut current = leg(before_i, order[i], start_km, matrix);
            let mut candidate = leg(before_i, order[j], start_km, matrix);
            if let Some(next) = after_j {
                current += matrix.between(order[j], next);
                candidate += matrix.between(order[i], next);
            }

            if candidate < current - IMPROVEMENT_EPSILON_KM {
                order[i..=j].reverse();
                return true;
            }
        }
    }

    false
}

#[inline]
fn leg(prev: Option<usize>, to: usize, start_km: &[f64], matrix: &DistanceMatrix) -> f64 {
    match prev {
        Some(from) => matrix.between(from, to),
        None => start_km[to],
    }
}
