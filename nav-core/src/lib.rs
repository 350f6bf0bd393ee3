#![deny(
    // The intent is a "quality seal": lints fire, and anything we decide is fine gets an inline
    // allow that says so.
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # nav-core – shared building blocks for `navroute`
//!
//! Holds the region model (cities joined by bidirectional, weighted streets) that every other
//! crate in the workspace routes over, plus the crate-standard logging setup.

pub mod logging;
pub mod model;

#[cfg(feature = "testutils")]
pub mod testutils;

pub use model::{
    City,
    Distance,
    Length,
    Region,
    RegionError,
    Street,
};
