//! Planning instance.

use serde::{Deserialize, Serialize};

use super::City;
use crate::distance::CostMatrix;
use crate::error::ValidationError;

/// One trip-planning instance.
///
/// Index 0 of `cities` is the home city. Travel matrices are directed and
/// must cover every city. Values are plain data: callers mutate a clone
/// (see [`with_budget`](Self::with_budget)) rather than the original.
///
/// Construction does not validate; [`validate`](Self::validate) is run by
/// the model builder before anything reaches a solver.
///
/// # Examples
///
/// ```
/// use u_itinerary::models::{City, ItineraryData};
/// use u_itinerary::distance::CostMatrix;
///
/// let cities = vec![
///     City::home("Home"),
///     City::new("A", 3.0, 10.0, 2, 4),
///     City::new("B", 3.0, 8.0, 2, 4),
/// ];
/// let data = ItineraryData::new(
///     cities,
///     CostMatrix::uniform(3, 5.0),
///     CostMatrix::uniform(3, 5.0),
///     60.0,
///     20.0,
/// );
/// assert_eq!(data.n_cities(), 3);
/// assert!(data.validate().is_ok());
///
/// let tighter = data.with_budget(30.0);
/// assert_eq!(tighter.budget(), 30.0);
/// assert_eq!(data.budget(), 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryData {
    cities: Vec<City>,
    travel_time: CostMatrix,
    travel_cost: CostMatrix,
    budget: f64,
    total_trip_days: f64,
    #[serde(default)]
    travel_time_penalty: f64,
}

impl ItineraryData {
    /// Creates an instance with no travel-time penalty.
    pub fn new(
        cities: Vec<City>,
        travel_time: CostMatrix,
        travel_cost: CostMatrix,
        budget: f64,
        total_trip_days: f64,
    ) -> Self {
        Self {
            cities,
            travel_time,
            travel_cost,
            budget,
            total_trip_days,
            travel_time_penalty: 0.0,
        }
    }

    /// Sets the objective penalty per unit of travel time.
    pub fn with_travel_time_penalty(mut self, penalty: f64) -> Self {
        self.travel_time_penalty = penalty;
        self
    }

    /// Returns a copy with a different budget.
    pub fn with_budget(&self, budget: f64) -> Self {
        let mut data = self.clone();
        data.budget = budget;
        data
    }

    /// Returns a copy with a different trip-day limit.
    pub fn with_total_trip_days(&self, days: f64) -> Self {
        let mut data = self.clone();
        data.total_trip_days = days;
        data
    }

    /// Number of cities including home.
    pub fn n_cities(&self) -> usize {
        self.cities.len()
    }

    /// All cities (index 0 = home).
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Travel time matrix.
    pub fn travel_time_matrix(&self) -> &CostMatrix {
        &self.travel_time
    }

    /// Travel cost matrix.
    pub fn travel_cost_matrix(&self) -> &CostMatrix {
        &self.travel_cost
    }

    /// Travel time of arc `from → to`.
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.travel_time.get(from, to)
    }

    /// Travel cost of arc `from → to`.
    pub fn travel_cost(&self, from: usize, to: usize) -> f64 {
        self.travel_cost.get(from, to)
    }

    /// Daily stay cost of city `i` (zero for home).
    pub fn stay_cost_per_day(&self, i: usize) -> f64 {
        if i == 0 {
            0.0
        } else {
            self.cities[i].stay_cost_per_day()
        }
    }

    /// Daily enjoyment of city `i` (zero for home).
    pub fn enjoyment_per_day(&self, i: usize) -> f64 {
        if i == 0 {
            0.0
        } else {
            self.cities[i].enjoyment_per_day()
        }
    }

    /// Minimum stay of city `i` (zero for home).
    pub fn min_stay(&self, i: usize) -> u32 {
        if i == 0 {
            0
        } else {
            self.cities[i].min_stay()
        }
    }

    /// Maximum stay of city `i` (zero for home).
    pub fn max_stay(&self, i: usize) -> u32 {
        if i == 0 {
            0
        } else {
            self.cities[i].max_stay()
        }
    }

    /// Total money available for stays and travel.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Total days available for stays and travel.
    pub fn total_trip_days(&self) -> f64 {
        self.total_trip_days
    }

    /// Objective penalty per unit of travel time.
    pub fn travel_time_penalty(&self) -> f64 {
        self.travel_time_penalty
    }

    /// Checks dimensions, signs and bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let n = self.n_cities();
        if n < 2 {
            return Err(ValidationError::TooFewCities(n));
        }
        self.travel_time.validate("travel_time", n)?;
        self.travel_cost.validate("travel_cost", n)?;

        for (i, city) in self.cities.iter().enumerate().skip(1) {
            if !city.stay_cost_per_day().is_finite() {
                return Err(ValidationError::NonFinite {
                    what: "stay_cost_per_day",
                });
            }
            if !city.enjoyment_per_day().is_finite() {
                return Err(ValidationError::NonFinite {
                    what: "enjoyment_per_day",
                });
            }
            if city.stay_cost_per_day() < 0.0 {
                return Err(ValidationError::NegativeWeight {
                    what: "stay_cost_per_day",
                    from: i,
                    to: i,
                    value: city.stay_cost_per_day(),
                });
            }
            if city.min_stay() > city.max_stay() {
                return Err(ValidationError::InvertedStayBounds {
                    city: i,
                    min: city.min_stay(),
                    max: city.max_stay(),
                });
            }
        }

        positive("budget", self.budget)?;
        positive("total_trip_days", self.total_trip_days)?;
        if !self.travel_time_penalty.is_finite() {
            return Err(ValidationError::NonFinite {
                what: "travel_time_penalty",
            });
        }
        if self.travel_time_penalty < 0.0 {
            return Err(ValidationError::NegativeWeight {
                what: "travel_time_penalty",
                from: 0,
                to: 0,
                value: self.travel_time_penalty,
            });
        }
        Ok(())
    }
}

fn positive(what: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { what });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { what, value });
    }
    Ok(())
}
