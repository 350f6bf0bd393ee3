//! Shared region fixtures for tests across the workspace.
#![allow(missing_docs, clippy::missing_docs_in_private_items)]

use rstest::fixture;

use crate::{
    City,
    Length,
    Region,
    Street,
};

/// Build a region from plain names.
///
/// # Panics
///
/// Panics if a name is declared twice or a street names an undeclared city.
pub fn region_from(cities: &[&str], streets: &[(&str, &str, Length)]) -> Region {
    Region::new(
        cities.iter().copied().map(City::from),
        streets.iter().map(|&(from, to, length)| Street::new(from, to, length)),
    )
    .expect("test region should be valid")
}

/// ```text
///   A --1-- B
///   |       |
///   4       2
///   |       |
///   C --1-- D
/// ```
///
/// Shortest A→D is A→B→D at length 3.
#[fixture]
pub fn diamond() -> Region {
    region_from(&["A", "B", "C", "D"], &[("A", "B", 1), ("B", "D", 2), ("A", "C", 4), ("C", "D", 1)])
}

/// A single city and no streets.
#[fixture]
pub fn lone_city() -> Region {
    region_from(&["A"], &[])
}

/// Two components, `{A, B}` and `{C, D}`.
#[fixture]
pub fn split_region() -> Region {
    region_from(&["A", "B", "C", "D"], &[("A", "B", 3), ("C", "D", 4)])
}
