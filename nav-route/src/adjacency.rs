//! Traversal structure derived from a [`Region`].
use std::collections::HashMap;

use nav_core::{
    City,
    Length,
    Region,
};
use tracing::{
    debug,
    instrument,
};

/// Every city of a region mapped to the `(neighbour, length)` pairs reachable over one street.
///
/// Both directions of each street are stored explicitly, and parallel streets stay separate
/// entries; the search simply prefers the shorter one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Neighbour lists keyed by city, isolated cities included.
    neighbours: HashMap<City, Vec<(City, Length)>>,
}

impl Adjacency {
    /// Build the adjacency map for `region`.
    #[instrument(skip(region), fields(cities = region.len(), streets = region.streets().len()))]
    pub fn build(region: &Region) -> Self {
        let mut neighbours: HashMap<City, Vec<(City, Length)>> =
            region.cities().map(|city| (city.clone(), Vec::new())).collect();

        for street in region.streets() {
            // Region guarantees both endpoints exist, so the entries are always there.
            if let Some(list) = neighbours.get_mut(&street.from) {
                list.push((street.to.clone(), street.length));
            }
            if let Some(list) = neighbours.get_mut(&street.to) {
                list.push((street.from.clone(), street.length));
            }
        }

        debug!(entries = neighbours.values().map(Vec::len).sum::<usize>(), "adjacency built");
        Self { neighbours }
    }

    /// Neighbours of `city`, or `None` if the city is not part of the map.
    #[must_use]
    pub fn neighbours(&self, city: &str) -> Option<&[(City, Length)]> {
        self.neighbours.get(city).map(Vec::as_slice)
    }

    /// The map's own key for `name`, if the city is present.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&City> {
        self.neighbours.get_key_value(name).map(|(city, _)| city)
    }

    /// Whether `city` is a key of the map.
    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        self.neighbours.contains_key(city)
    }

    /// Number of cities in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether the map has no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Iterate over every city and its neighbour list, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&City, &[(City, Length)])> {
        self.neighbours.iter().map(|(city, list)| (city, list.as_slice()))
    }
}

impl From<&Region> for Adjacency {
    fn from(region: &Region) -> Self {
        Self::build(region)
    }
}
