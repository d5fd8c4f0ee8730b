//! Shared test instances.

use crate::distance::CostMatrix;
use crate::models::{City, ItineraryData};

/// Home plus two destinations, 5 time/cost units between every pair.
///
/// A: 10 enjoyment/day, B: 8 enjoyment/day, both cost 3/day and allow
/// 2..=4 days. Budget 60.
pub(crate) fn three_city_instance(total_trip_days: f64) -> ItineraryData {
    let cities = vec![
        City::home("Home"),
        City::new("A", 3.0, 10.0, 2, 4),
        City::new("B", 3.0, 8.0, 2, 4),
    ];
    ItineraryData::new(
        cities,
        CostMatrix::uniform(3, 5.0),
        CostMatrix::uniform(3, 5.0),
        60.0,
        total_trip_days,
    )
}

/// Home plus four destinations on a line, with asymmetric travel cost.
pub(crate) fn line_instance() -> ItineraryData {
    let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)];
    let time = CostMatrix::from_points(&points);
    let mut cost = time.affine(10.0, 5.0);
    cost.set(4, 0, cost.get(4, 0) + 3.0);
    let cities = vec![
        City::home("Home"),
        City::new("C1", 20.0, 6.0, 1, 3),
        City::new("C2", 25.0, 9.0, 1, 3),
        City::new("C3", 15.0, 4.0, 2, 2),
        City::new("C4", 30.0, 12.0, 1, 4),
    ];
    ItineraryData::new(cities, time, cost, 250.0, 14.0).with_travel_time_penalty(0.5)
}
