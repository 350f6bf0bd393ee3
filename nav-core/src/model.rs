//! Data model for a region: named cities connected by bidirectional, weighted streets.
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

/// Length of a single street.
pub type Length = u32;

/// Accumulated length of a route; wide enough that summing street lengths cannot overflow in any
/// region that fits in memory.
pub type Distance = u64;

/// A city in a region, identified by its name and nothing else.
#[derive(Clone, Debug, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct City {
    /// Unique name of the city within its region.
    name: String,
}

impl City {
    /// Create a city with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the city.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// Identity is the name alone. Hashing must agree with `str` so that maps keyed by `City` can be
// queried by name through `Borrow<str>`.
impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for City {}

impl Hash for City {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.as_str().hash(state);
    }
}

impl Borrow<str> for City {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl From<&str> for City {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for City {
    fn from(value: String) -> Self {
        Self { name: value }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A street between two cities. Streets can be travelled in both directions at the same length;
/// `from` and `to` only record the order in which the endpoints were written down.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Street {
    /// First endpoint, as written in the input.
    pub from: City,
    /// Second endpoint, as written in the input.
    pub to: City,
    /// Cost of travelling the street in either direction.
    pub length: Length,
}

impl Street {
    /// Create a street between `from` and `to`.
    pub fn new(from: impl Into<City>, to: impl Into<City>, length: Length) -> Self {
        Self { from: from.into(), to: to.into(), length }
    }
}

/// Renders the street the way it is written in a region file: `<from> <to> <length>`.
impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.to, self.length)
    }
}

/// Integrity violations detected while assembling a [`Region`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    /// The same city name was declared more than once.
    #[error("city {0} is declared more than once")]
    DuplicateCity(City),

    /// A street names an endpoint that is not a city of the region.
    #[error("street `{street}` references unknown city {city}")]
    UnknownCity {
        /// The endpoint that could not be resolved.
        city: City,
        /// The offending street.
        street: Street,
    },
}

/// A set of uniquely named cities and the streets between them.
///
/// A region is validated once on construction and never changes afterwards, so it can be shared
/// freely (including across threads) by any number of routing queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// All cities, ordered by name.
    cities: BTreeSet<City>,
    /// All streets, in input order. Parallel streets are kept.
    streets: Vec<Street>,
}

impl Region {
    /// Build a region, checking that names are unique and that every street connects two known
    /// cities.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DuplicateCity`] for a repeated name and [`RegionError::UnknownCity`]
    /// for the first street whose endpoint is not in `cities`.
    #[instrument(level = "debug", skip_all)]
    pub fn new(
        cities: impl IntoIterator<Item = City>,
        streets: impl IntoIterator<Item = Street>,
    ) -> Result<Self, RegionError> {
        let mut city_set = BTreeSet::new();
        for city in cities {
            if let Some(dup) = city_set.replace(city) {
                return Err(RegionError::DuplicateCity(dup));
            }
        }

        let streets: Vec<Street> = streets.into_iter().collect();
        for street in &streets {
            for endpoint in [&street.from, &street.to] {
                if !city_set.contains(endpoint) {
                    return Err(RegionError::UnknownCity { city: endpoint.clone(), street: street.clone() });
                }
            }
        }

        Ok(Self { cities: city_set, streets })
    }

    /// All cities, ordered by name.
    #[must_use]
    pub fn cities(&self) -> impl ExactSizeIterator<Item = &City> {
        self.cities.iter()
    }

    /// All streets, in the order they were given.
    #[must_use]
    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    /// Look a city up by name.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    /// Whether a city with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains(name)
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the region has no cities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Renders the region in the region file format, so the output can be parsed back.
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cities")?;
        for city in &self.cities {
            writeln!(f, "{city}")?;
        }
        writeln!(f, "streets")?;
        for street in &self.streets {
            writeln!(f, "{street}")?;
        }
        Ok(())
    }
}
