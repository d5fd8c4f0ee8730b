//! City type.

use serde::{Deserialize, Serialize};

/// A city that may be part of the itinerary.
///
/// City 0 of an instance is the home city: the tour starts and ends there
/// and it never accrues stay days, stay cost or enjoyment.
///
/// # Examples
///
/// ```
/// use u_itinerary::models::City;
///
/// let home = City::home("Seoul");
/// assert_eq!(home.max_stay(), 0);
///
/// let c = City::new("Busan", 80.0, 12.0, 1, 4);
/// assert_eq!(c.name(), "Busan");
/// assert_eq!(c.enjoyment_per_day(), 12.0);
/// assert!(c.stay_range().contains(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    name: String,
    stay_cost_per_day: f64,
    enjoyment_per_day: f64,
    min_stay: u32,
    max_stay: u32,
}

impl City {
    /// Creates a destination city.
    pub fn new(
        name: impl Into<String>,
        stay_cost_per_day: f64,
        enjoyment_per_day: f64,
        min_stay: u32,
        max_stay: u32,
    ) -> Self {
        Self {
            name: name.into(),
            stay_cost_per_day,
            enjoyment_per_day,
            min_stay,
            max_stay,
        }
    }

    /// Creates the home city (no stay, no cost, no enjoyment).
    pub fn home(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0, 0, 0)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cost of one day spent in this city.
    pub fn stay_cost_per_day(&self) -> f64 {
        self.stay_cost_per_day
    }

    /// Enjoyment gained per day spent in this city.
    pub fn enjoyment_per_day(&self) -> f64 {
        self.enjoyment_per_day
    }

    /// Minimum number of days if the city is visited.
    pub fn min_stay(&self) -> u32 {
        self.min_stay
    }

    /// Maximum number of days if the city is visited.
    pub fn max_stay(&self) -> u32 {
        self.max_stay
    }

    /// Allowed stay lengths when visited.
    pub fn stay_range(&self) -> std::ops::RangeInclusive<u32> {
        self.min_stay..=self.max_stay
    }
}
