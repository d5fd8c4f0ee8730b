//! Solver selection and pass-through options.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A MILP backend known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Pure-Rust simplex with branch and bound; always compiled in.
    Microlp,
    /// COIN-OR CBC; requires the `coin_cbc` cargo feature.
    CoinCbc,
}

impl SolverKind {
    /// Lower-case identifier, e.g. `coin_cbc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Microlp => "microlp",
            Self::CoinCbc => "coin_cbc",
        }
    }

    /// The solver `good_lp` picks when none is named.
    pub fn library_default() -> Self {
        if cfg!(feature = "coin_cbc") {
            Self::CoinCbc
        } else {
            Self::Microlp
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown solver name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown solver {0:?}")]
pub struct UnknownSolver(pub String);

impl FromStr for SolverKind {
    type Err = UnknownSolver;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "microlp" => Ok(Self::Microlp),
            "coin_cbc" | "cbc" => Ok(Self::CoinCbc),
            _ => Err(UnknownSolver(s.to_string())),
        }
    }
}

/// Opaque solver parameters, forwarded verbatim to backends that take
/// named parameters.
///
/// # Examples
///
/// ```
/// use u_itinerary::solver::SolverOptions;
///
/// let opts = SolverOptions::new().with("seconds", "30").with("threads", "2");
/// assert_eq!(opts.get("seconds"), Some("30"));
/// assert_eq!(opts.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolverOptions(BTreeMap<String, String>);

impl SolverOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces an option in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value of an option, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How to run the solver for one solve.
///
/// # Examples
///
/// ```
/// use u_itinerary::solver::{SolverConfig, SolverKind};
///
/// let config = SolverConfig::default()
///     .with_preferred(SolverKind::CoinCbc)
///     .with_verbose(true)
///     .with_option("seconds", "10");
/// assert_eq!(config.preferred, SolverKind::CoinCbc);
/// assert_eq!(config.options.get("seconds"), Some("10"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Solver tried first.
    pub preferred: SolverKind,
    /// Emit solver diagnostics.
    pub verbose: bool,
    /// Backend parameters.
    pub options: SolverOptions,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            preferred: SolverKind::Microlp,
            verbose: false,
            options: SolverOptions::new(),
        }
    }
}

impl SolverConfig {
    /// Sets the solver tried first.
    pub fn with_preferred(mut self, solver: SolverKind) -> Self {
        self.preferred = solver;
        self
    }

    /// Enables or disables solver diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Adds a backend parameter.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key, value);
        self
    }
}
