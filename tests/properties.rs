//! Property tests for distances, proximity queries and itineraries.

use std::collections::BTreeSet;

use proptest::prelude::*;

use park_planner::{distance_km, Coordinate, ParkEngine, ParkId, ParkLocation};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
}

/// Points scattered over Tunisia, where itineraries are actually planned.
fn regional() -> impl Strategy<Value = Coordinate> {
    (30.0f64..38.0, 7.5f64..11.6).prop_map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
}

fn parks(max: usize) -> impl Strategy<Value = Vec<ParkLocation>> {
    prop::collection::vec(regional(), 1..=max).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, c)| ParkLocation::new(format!("park-{:02}", i), format!("Park {}", i), c))
            .collect()
    })
}

fn engine_with(parks: &[ParkLocation]) -> ParkEngine {
    let engine: ParkEngine = ParkEngine::default();
    engine.rebuild(parks.to_vec()).unwrap();
    engine
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        prop_assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(distance_km(a, a), 0.0);
    }

    #[test]
    fn distance_respects_triangle_inequality(a in coordinate(), b in coordinate(), c in coordinate()) {
        prop_assert!(distance_km(a, c) <= distance_km(a, b) + distance_km(b, c) + 1e-3);
    }

    #[test]
    fn rejects_out_of_range_latitude(lat in 90.0001f64..1000.0, lng in -180.0f64..=180.0) {
        prop_assert!(Coordinate::new(lat, lng).is_err());
        prop_assert!(Coordinate::new(-lat, lng).is_err());
    }

    #[test]
    fn nearest_matches_linear_scan(catalog in parks(30), at in coordinate(), k in 0usize..35) {
        let engine = engine_with(&catalog);

        let mut expected: Vec<(ParkId, f64)> = catalog
            .iter()
            .map(|p| (p.id.clone(), distance_km(at, p.coordinate)))
            .collect();
        expected.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        expected.truncate(k);

        let got: Vec<(ParkId, f64)> = engine
            .nearest_parks(at, k)
            .into_iter()
            .map(|n| (n.park.id, n.distance_km))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn within_matches_linear_scan(catalog in parks(30), at in regional(), radius in 0.0f64..800.0) {
        let engine = engine_with(&catalog);

        let expected: BTreeSet<ParkId> = catalog
            .iter()
            .filter(|p| distance_km(at, p.coordinate) <= radius)
            .map(|p| p.id.clone())
            .collect();
        let got: BTreeSet<ParkId> = engine
            .parks_within_radius(at, radius)
            .unwrap()
            .into_iter()
            .map(|n| n.park.id)
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn itinerary_is_permutation_and_never_worse(catalog in parks(12), start in regional()) {
        let engine = engine_with(&catalog);
        let requested: Vec<ParkId> = catalog.iter().map(|p| p.id.clone()).collect();

        let itinerary = engine.plan_itinerary(start, &requested).unwrap();

        let returned: Vec<ParkId> = itinerary.park_ids().cloned().collect();
        prop_assert_eq!(returned.len(), requested.len());
        let returned: BTreeSet<ParkId> = returned.into_iter().collect();
        let requested_set: BTreeSet<ParkId> = requested.iter().cloned().collect();
        prop_assert_eq!(returned, requested_set);

        prop_assert!(itinerary.total_km <= itinerary.construction_km);

        let again = engine.plan_itinerary(start, &requested).unwrap();
        prop_assert_eq!(again, itinerary);
    }
}
