#![deny(
    // This is overly strict, of course. The intent is somewhat of a "quality seal," less to fix
    // everything, and more to force us to add inline allows that say "we think this is okay, but you
    // might want to take a second look here."
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # nav-route – shortest routes between the cities of a region
//!
//! A region is a set of named cities joined by bidirectional streets with non-negative integer
//! lengths. nav-route reads one from its text format, derives a traversal structure from it and
//! answers "what is a shortest way from this city to that one?".
//!
//! ## Pipeline overview
//! 1. Parsing ([`parse_region`](crate::input::parse_region)) – read the `cities` / `streets`
//!    sections into a validated [`Region`](nav_core::Region).
//! 2. Adjacency ([`Adjacency::build`](crate::adjacency::Adjacency::build)) – map every city to its
//!    `(neighbour, length)` pairs, both directions of every street included.
//! 3. Search ([`route`](crate::dijkstra::route)) – Dijkstra's algorithm from the start city, then
//!    predecessor walk-back from the target.
//! 4. Output ([`render_route`](crate::render::render_route)) – text or JSON, plus an optional
//!    Graphviz rendering of the region with the route highlighted.
//!
//! Regions and adjacency maps are immutable once built; every query allocates its own working
//! state, so one map can serve queries from several threads at once.

pub mod adjacency;
pub mod dijkstra;
pub mod input;
pub mod render;

pub use adjacency::Adjacency;
pub use dijkstra::{
    dijkstra,
    route,
    shortest_path,
    Route,
    RouteError,
    ShortestPaths,
};
pub use input::{
    parse_region,
    parse_str,
    read_region,
    InputError,
};
pub use render::{
    region_dot,
    render_route,
    OutputFormat,
};
