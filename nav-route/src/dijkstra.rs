//! Single-source shortest paths over an [`Adjacency`] map (Dijkstra's algorithm).
//!
//! A query runs the search from the start city until the frontier is exhausted, recording for
//! every reached city its distance and the city it was reached from. The start is recorded as its
//! own predecessor, which is where path reconstruction stops.
//!
//! "Infinite" distance is represented by a city being absent from the distance map, never by a
//! numeric sentinel, so there is no `MAX + length` to overflow. Street lengths are summed as
//! [`Distance`] (`u64`).
use std::cmp::Reverse;
use std::collections::{
    BinaryHeap,
    HashMap,
    HashSet,
};
use std::fmt;

use itertools::Itertools;
use nav_core::{
    City,
    Distance,
};
use thiserror::Error;
use tracing::{
    debug,
    instrument,
};

use crate::adjacency::Adjacency;

/// Why a routing query produced no route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The start or target name is not a city of the region.
    #[error("city {0:?} not found")]
    CityNotFound(String),

    /// Both cities exist but the target cannot be reached from the start.
    #[error("no route from {start} to {target}")]
    NoRoute {
        /// Where the search started.
        start: City,
        /// The unreachable city.
        target: City,
    },
}

/// A complete route, start first and target last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Cities in travel order.
    pub cities: Vec<City>,
    /// Sum of the street lengths along the route.
    pub length: Distance,
}

/// Renders the cities as a bracketed list, e.g. `[n0, n3, n1]`.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.cities.iter().join(", "))
    }
}

/// Result of a single-source search: final distances and predecessors of every city reachable
/// from `start`. Unreachable cities appear in neither map.
#[derive(Debug)]
pub struct ShortestPaths<'a> {
    /// The map the search ran over; used to tell unknown cities from unreachable ones.
    adjacency: &'a Adjacency,
    /// Where the search started.
    start: &'a City,
    /// Minimum distance from `start`.
    distances: HashMap<&'a City, Distance>,
    /// City each reached city was last improved from. `start` maps to itself.
    predecessors: HashMap<&'a City, &'a City>,
}

impl<'a> ShortestPaths<'a> {
    /// The city the search started from.
    #[must_use]
    pub const fn start(&self) -> &'a City {
        self.start
    }

    /// Minimum distance from the start to `city`, or `None` if it is unreachable or unknown.
    #[must_use]
    pub fn distance(&self, city: &str) -> Option<Distance> {
        self.adjacency.city(city).and_then(|city| self.distances.get(city).copied())
    }

    /// Number of cities reachable from the start, the start included.
    #[must_use]
    pub fn reachable(&self) -> usize {
        self.distances.len()
    }

    /// Walk the predecessor chain back from `target` and return the route in travel order.
    ///
    /// # Errors
    ///
    /// [`RouteError::CityNotFound`] if `target` is not in the map, [`RouteError::NoRoute`] if it
    /// was never reached.
    pub fn route_to(&self, target: &str) -> Result<Route, RouteError> {
        let target = self
            .adjacency
            .city(target)
            .ok_or_else(|| RouteError::CityNotFound(target.to_owned()))?;
        let no_route = || RouteError::NoRoute { start: self.start.clone(), target: target.clone() };

        let length = self.distances.get(target).copied().ok_or_else(no_route)?;

        let mut cities = vec![target.clone()];
        let mut current = target;
        loop {
            let previous = *self.predecessors.get(current).ok_or_else(no_route)?;
            if previous == current {
                break;
            }
            cities.push(previous.clone());
            current = previous;
        }
        cities.reverse();

        Ok(Route { cities, length })
    }

    /// Like [`route_to`](Self::route_to) but only the cities.
    ///
    /// # Errors
    ///
    /// See [`route_to`](Self::route_to).
    pub fn path_to(&self, target: &str) -> Result<Vec<City>, RouteError> {
        self.route_to(target).map(|route| route.cities)
    }
}

/// Run Dijkstra's algorithm from `start` over the whole map.
///
/// The frontier is a plain binary heap without decrease-key, so a city may be pushed several
/// times; only its first (smallest) pop is processed, later ones are stale and skipped.
///
/// # Errors
///
/// [`RouteError::CityNotFound`] if `start` is not a city of the map.
#[instrument(skip(adjacency), fields(cities = adjacency.len()))]
pub fn dijkstra<'a>(adjacency: &'a Adjacency, start: &str) -> Result<ShortestPaths<'a>, RouteError> {
    let start = adjacency
        .city(start)
        .ok_or_else(|| RouteError::CityNotFound(start.to_owned()))?;

    let mut distances: HashMap<&City, Distance> = HashMap::from([(start, 0)]);
    let mut predecessors: HashMap<&City, &City> = HashMap::from([(start, start)]);
    let mut finalized: HashSet<&City> = HashSet::with_capacity(adjacency.len());
    let mut frontier: BinaryHeap<Reverse<(Distance, &City)>> = BinaryHeap::from([Reverse((0, start))]);
    let mut stale = 0_usize;

    while let Some(Reverse((distance, city))) = frontier.pop() {
        if !finalized.insert(city) {
            stale += 1;
            continue;
        }

        let Some(neighbours) = adjacency.neighbours(city.name()) else { continue };
        for (neighbour, length) in neighbours {
            let candidate = distance.saturating_add(Distance::from(*length));
            if distances.get(neighbour).map_or(true, |&known| candidate < known) {
                distances.insert(neighbour, candidate);
                predecessors.insert(neighbour, city);
                frontier.push(Reverse((candidate, neighbour)));
            }
        }
    }

    debug!(reached = finalized.len(), stale, "search finished");
    Ok(ShortestPaths { adjacency, start, distances, predecessors })
}

/// Shortest route between two cities, with its length.
///
/// # Errors
///
/// [`RouteError::CityNotFound`] if either name is not in the map (checked before searching),
/// [`RouteError::NoRoute`] if the target is unreachable.
#[instrument(skip(adjacency))]
pub fn route(start: &str, target: &str, adjacency: &Adjacency) -> Result<Route, RouteError> {
    for name in [start, target] {
        if !adjacency.contains(name) {
            return Err(RouteError::CityNotFound(name.to_owned()));
        }
    }

    let route = dijkstra(adjacency, start)?.route_to(target)?;
    debug!(hops = route.cities.len() - 1, length = route.length, "route found");
    Ok(route)
}

/// Shortest path between two cities as the ordered list of cities from `start` to `target`.
/// `start == target` yields `[start]`.
///
/// # Errors
///
/// See [`route`].
pub fn shortest_path(start: &str, target: &str, adjacency: &Adjacency) -> Result<Vec<City>, RouteError> {
    route(start, target, adjacency).map(|route| route.cities)
}

#[cfg(test)]
mod tests;
