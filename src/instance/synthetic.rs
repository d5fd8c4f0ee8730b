//! Seeded random instances.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::CostMatrix;
use crate::error::ValidationError;
use crate::models::{City, ItineraryData};

/// Parameters of [`generate_synthetic`].
///
/// # Examples
///
/// ```
/// use u_itinerary::instance::SyntheticConfig;
///
/// let config = SyntheticConfig::new(7).with_cities(8).with_budget_factor(0.4);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.n_cities, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// RNG seed; equal seeds give equal instances.
    pub seed: u64,
    /// Number of cities including home.
    pub n_cities: usize,
    /// Side of the square cities are scattered in, measured in travel days.
    pub area: f64,
    /// Travel cost per travel day.
    pub fare_per_day: f64,
    /// Fixed cost of every trip leg.
    pub fixed_fare: f64,
    /// Budget as a fraction of visiting every city at its minimum stay.
    pub budget_factor: f64,
    /// Trip length as a fraction of visiting every city at its maximum stay.
    pub days_factor: f64,
    /// Objective penalty per travel day.
    pub travel_time_penalty: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_cities: 6,
            area: 2.0,
            fare_per_day: 40.0,
            fixed_fare: 20.0,
            budget_factor: 0.7,
            days_factor: 0.6,
            travel_time_penalty: 0.0,
        }
    }
}

impl SyntheticConfig {
    /// Default parameters with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Sets the number of cities including home.
    pub fn with_cities(mut self, n_cities: usize) -> Self {
        self.n_cities = n_cities;
        self
    }

    /// Sets the budget factor.
    pub fn with_budget_factor(mut self, factor: f64) -> Self {
        self.budget_factor = factor;
        self
    }

    /// Sets the trip-length factor.
    pub fn with_days_factor(mut self, factor: f64) -> Self {
        self.days_factor = factor;
        self
    }

    /// Sets the travel-time penalty.
    pub fn with_travel_time_penalty(mut self, penalty: f64) -> Self {
        self.travel_time_penalty = penalty;
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.n_cities < 2 {
            return Err(ValidationError::TooFewCities(self.n_cities));
        }
        for (what, value) in [
            ("area", self.area),
            ("budget_factor", self.budget_factor),
            ("days_factor", self.days_factor),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { what });
            }
            if value <= 0.0 {
                return Err(ValidationError::NonPositive { what, value });
            }
        }
        for (what, value) in [
            ("fare_per_day", self.fare_per_day),
            ("fixed_fare", self.fixed_fare),
            ("travel_time_penalty", self.travel_time_penalty),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { what });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeWeight {
                    what,
                    from: 0,
                    to: 0,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Generates a random, always-feasible instance.
///
/// Cities are scattered uniformly in an `area × area` square with home at
/// the first point. Travel time is the Euclidean distance (symmetric);
/// travel cost is `time · fare_per_day + fixed_fare`. Destinations draw a
/// stay cost of 30..120 per day, enjoyment of 3..10 per day, a minimum stay
/// of 1..=2 days and a maximum stay of up to 4 days more.
///
/// Budget and trip length are scaled from visiting every destination in
/// index order (at minimum stays for the budget, maximum stays for the
/// days), then raised if needed so the cheapest single-city round trip
/// still fits both. Both are rounded up to whole units.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the configuration is out of range.
///
/// # Examples
///
/// ```
/// use u_itinerary::instance::{generate_synthetic, SyntheticConfig};
///
/// let a = generate_synthetic(&SyntheticConfig::new(1)).expect("valid config");
/// let b = generate_synthetic(&SyntheticConfig::new(1)).expect("valid config");
/// assert_eq!(a, b);
/// assert!(a.validate().is_ok());
/// ```
pub fn generate_synthetic(config: &SyntheticConfig) -> Result<ItineraryData, ValidationError> {
    config.validate()?;
    let n = config.n_cities;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| {
            (
                rng.random_range(0.0..config.area),
                rng.random_range(0.0..config.area),
            )
        })
        .collect();
    let travel_time = CostMatrix::from_points(&points);
    let travel_cost = travel_time.affine(config.fare_per_day, config.fixed_fare);

    let mut cities = Vec::with_capacity(n);
    cities.push(City::home("Home"));
    for i in 1..n {
        let stay_cost = rng.random_range(30.0..120.0f64).round();
        let enjoyment = rng.random_range(3.0..10.0f64).round();
        let min_stay = rng.random_range(1..=2u32);
        let max_stay = min_stay + rng.random_range(0..=4u32);
        cities.push(City::new(
            format!("City {i}"),
            stay_cost,
            enjoyment,
            min_stay,
            max_stay,
        ));
    }

    // Every destination in index order.
    let mut full_cost = 0.0;
    let mut full_days = 0.0;
    for i in 0..n {
        let next = (i + 1) % n;
        full_cost += travel_cost.get(i, next);
        full_days += travel_time.get(i, next);
    }
    for city in &cities[1..] {
        full_cost += city.stay_cost_per_day() * f64::from(city.min_stay());
        full_days += f64::from(city.max_stay());
    }

    // Cheapest single-city round trip at minimum stay.
    let (single_cost, single_days) = (1..n)
        .map(|i| {
            let city = &cities[i];
            let stay = f64::from(city.min_stay());
            (
                travel_cost.get(0, i) + travel_cost.get(i, 0) + city.stay_cost_per_day() * stay,
                travel_time.get(0, i) + travel_time.get(i, 0) + stay,
            )
        })
        .fold((f64::INFINITY, 0.0), |best, cand| {
            if cand.0 < best.0 {
                cand
            } else {
                best
            }
        });

    let budget = (config.budget_factor * full_cost).max(single_cost).ceil();
    let total_trip_days = (config.days_factor * full_days).max(single_days).ceil();
    debug!(
        seed = config.seed,
        n_cities = n,
        budget,
        total_trip_days,
        "synthetic instance generated"
    );

    Ok(
        ItineraryData::new(cities, travel_time, travel_cost, budget, total_trip_days)
            .with_travel_time_penalty(config.travel_time_penalty),
    )
}
