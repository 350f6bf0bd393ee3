//! Output helpers: route printing and Graphviz export.
use std::collections::{
    HashMap,
    HashSet,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use nav_core::{
    City,
    Distance,
    Length,
    Region,
};
use petgraph::dot::Dot;
use petgraph::graph::{
    EdgeReference,
    NodeIndex,
    UnGraph,
};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::{
    debug,
    instrument,
};

use crate::dijkstra::Route;

/// How a route is printed on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bracketed list of city names, e.g. `[n0, n3, n1]`.
    #[default]
    Text,
    /// A single JSON object with the endpoints, total length and cities.
    Json,
}

/// JSON shape of a route.
#[derive(Serialize)]
struct RouteReport<'a> {
    /// First city.
    start: &'a City,
    /// Last city.
    target: &'a City,
    /// Total length.
    length: Distance,
    /// Cities in travel order.
    cities: &'a [City],
}

/// Render `route` in the requested format.
///
/// # Errors
///
/// Fails only if JSON serialization fails.
pub fn render_route(route: &Route, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(route.to_string()),
        OutputFormat::Json => {
            let (Some(start), Some(target)) = (route.cities.first(), route.cities.last()) else {
                anyhow::bail!("cannot render an empty route");
            };
            let report = RouteReport { start, target, length: route.length, cities: &route.cities };
            Ok(serde_json::to_string(&report)?)
        },
    }
}

/// Graphviz description of `region`, with the cities and streets of `route` (if any) highlighted.
///
/// Where parallel streets join two consecutive route cities, only the shortest one is
/// highlighted.
#[instrument(skip_all, fields(cities = region.len()))]
pub fn region_dot(region: &Region, route: Option<&Route>) -> String {
    let mut graph = UnGraph::<&str, Length>::with_capacity(region.len(), region.streets().len());
    let index: HashMap<&str, NodeIndex> =
        region.cities().map(|city| (city.name(), graph.add_node(city.name()))).collect();
    for street in region.streets() {
        graph.add_edge(index[street.from.name()], index[street.to.name()], street.length);
    }

    let on_route: HashSet<NodeIndex> = route
        .into_iter()
        .flat_map(|r| r.cities.iter())
        .filter_map(|city| index.get(city.name()).copied())
        .collect();

    let route_edges: HashSet<_> = route
        .into_iter()
        .flat_map(|r| r.cities.windows(2))
        .filter_map(|hop| {
            let (a, b) = (*index.get(hop[0].name())?, *index.get(hop[1].name())?);
            graph.edges_connecting(a, b).min_by_key(|e| *e.weight()).map(|e| e.id())
        })
        .collect();

    let edge_attrs = |_: &UnGraph<&str, Length>, edge: EdgeReference<'_, Length>| {
        if route_edges.contains(&edge.id()) {
            "color=red penwidth=2".to_owned()
        } else {
            String::new()
        }
    };
    let node_attrs = |_: &UnGraph<&str, Length>, (node, _): (NodeIndex, &&str)| {
        if on_route.contains(&node) {
            "style=filled fillcolor=lightblue".to_owned()
        } else {
            String::new()
        }
    };

    let dot = Dot::with_attr_getters(&graph, &[], &edge_attrs, &node_attrs);
    debug!(highlighted = route_edges.len(), "region rendered as DOT");
    format!("{dot}")
}

/// Write DOT content to `path`.
///
/// # Errors
///
/// Any I/O error creating or writing the file.
#[instrument(skip(dot_content))]
pub fn write_dot_file(path: &Path, dot_content: &str) -> Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{dot_content}")?;

    debug!("graph written to: {}", path.display());
    Ok(())
}
