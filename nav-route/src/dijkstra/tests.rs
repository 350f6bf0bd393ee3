use std::collections::HashMap;

use assertables::*;
use nav_core::testutils::*;
use nav_core::{
    Length,
    Region,
    Street,
};
use petgraph::graph::UnGraph;
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};
use rstest::*;
use tracing_test::traced_test;

use super::*;
use crate::adjacency::Adjacency;

fn names(path: &[City]) -> Vec<&str> {
    path.iter().map(City::name).collect()
}

/// Length of a path using the shortest street between each consecutive pair, or `None` if some
/// pair is not directly connected.
fn path_length(region: &Region, path: &[City]) -> Option<Distance> {
    let mut shortest: HashMap<(&str, &str), Length> = HashMap::new();
    for street in region.streets() {
        for key in [(street.from.name(), street.to.name()), (street.to.name(), street.from.name())] {
            let entry = shortest.entry(key).or_insert(street.length);
            *entry = (*entry).min(street.length);
        }
    }

    path.windows(2)
        .map(|pair| shortest.get(&(pair[0].name(), pair[1].name())).map(|&l| Distance::from(l)))
        .sum()
}

#[rstest]
fn test_diamond_prefers_cheaper_side(diamond: Region) {
    let adjacency = Adjacency::build(&diamond);

    let path = shortest_path("A", "D", &adjacency).unwrap();
    assert_eq!(names(&path), ["A", "B", "D"]);
    assert_eq!(path_length(&diamond, &path), Some(3));

    let route = route("A", "D", &adjacency).unwrap();
    assert_eq!(route.length, 3);
    assert_eq!(route.to_string(), "[A, B, D]");
}

#[rstest]
fn test_lone_city_routes_to_itself(lone_city: Region) {
    let adjacency = Adjacency::build(&lone_city);

    assert_eq!(names(&shortest_path("A", "A", &adjacency).unwrap()), ["A"]);
    assert_eq!(route("A", "A", &adjacency).unwrap().length, 0);
}

#[rstest]
#[case::same_component("C", "C")]
#[case::with_streets("D", "D")]
fn test_start_is_target(split_region: Region, #[case] start: &str, #[case] target: &str) {
    let adjacency = Adjacency::build(&split_region);

    assert_eq!(names(&shortest_path(start, target, &adjacency).unwrap()), [start]);
}

#[rstest]
fn test_disconnected_target(split_region: Region) {
    let adjacency = Adjacency::build(&split_region);

    let err = shortest_path("A", "C", &adjacency).unwrap_err();
    assert_eq!(err, RouteError::NoRoute { start: City::new("A"), target: City::new("C") });

    // Still fine inside a component.
    assert_eq!(names(&shortest_path("D", "C", &adjacency).unwrap()), ["D", "C"]);
}

#[rstest]
#[case::start("n0", "A")]
#[case::target("A", "n1")]
#[case::both("n0", "n1")]
fn test_unknown_city(diamond: Region, #[case] start: &str, #[case] target: &str) {
    let adjacency = Adjacency::build(&diamond);

    let err = shortest_path(start, target, &adjacency).unwrap_err();
    assert!(matches!(err, RouteError::CityNotFound(_)), "{err:?}");
    assert_contains!(err.to_string(), "not found");
}

#[rstest]
fn test_unknown_city_with_unreachable_target(split_region: Region) {
    let adjacency = Adjacency::build(&split_region);
    let paths = dijkstra(&adjacency, "A").unwrap();

    assert_eq!(paths.route_to("Z").unwrap_err(), RouteError::CityNotFound("Z".into()));
    assert!(matches!(paths.route_to("C").unwrap_err(), RouteError::NoRoute { .. }));
}

#[rstest]
fn test_dijkstra_distances(diamond: Region) {
    let adjacency = Adjacency::build(&diamond);
    let paths = dijkstra(&adjacency, "C").unwrap();

    assert_eq!(paths.start(), &City::new("C"));
    assert_eq!(paths.reachable(), 4);
    assert_eq!(paths.distance("C"), Some(0));
    assert_eq!(paths.distance("D"), Some(1));
    assert_eq!(paths.distance("B"), Some(3));
    assert_eq!(paths.distance("A"), Some(4));
    assert_none!(paths.distance("Q"));
    assert_eq!(names(&paths.path_to("B").unwrap()), ["C", "D", "B"]);
}

#[rstest]
fn test_parallel_streets_use_shortest() {
    let region = region_from(&["A", "B"], &[("A", "B", 9), ("B", "A", 2), ("A", "B", 4)]);
    let adjacency = Adjacency::build(&region);

    assert_eq!(route("B", "A", &adjacency).unwrap().length, 2);
}

#[rstest]
fn test_zero_length_streets() {
    let region = region_from(&["A", "B", "C"], &[("A", "B", 0), ("B", "C", 0), ("A", "C", 1), ("C", "C", 0)]);
    let adjacency = Adjacency::build(&region);

    let route = route("A", "C", &adjacency).unwrap();
    assert_eq!(route.length, 0);
    assert_eq!(names(&route.cities), ["A", "B", "C"]);
}

#[rstest]
fn test_long_streets_do_not_overflow() {
    let max = Length::MAX;
    let region = region_from(&["A", "B", "C", "D"], &[("A", "B", max), ("B", "C", max), ("C", "D", max)]);
    let adjacency = Adjacency::build(&region);

    assert_eq!(route("A", "D", &adjacency).unwrap().length, 3 * Distance::from(max));
    assert_eq!(route("D", "B", &adjacency).unwrap().length, 2 * Distance::from(max));
}

#[rstest]
fn test_repeated_queries_agree(diamond: Region) {
    let adjacency = Adjacency::build(&diamond);
    let first = route("D", "A", &adjacency).unwrap();

    for _ in 0..10 {
        assert_eq!(route("D", "A", &adjacency).unwrap().length, first.length);
    }
}

#[rstest]
fn test_concurrent_queries_share_adjacency(diamond: Region) {
    let adjacency = Adjacency::build(&diamond);

    let lengths: Vec<Distance> = std::thread::scope(|s| {
        // Every thread is spawned before any is joined.
        #[allow(clippy::needless_collect)]
        let handles: Vec<_> = ["A", "B", "C", "D"]
            .into_iter()
            .map(|start| {
                let adjacency = &adjacency;
                s.spawn(move || route(start, "D", adjacency).unwrap().length)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(lengths, [3, 2, 1, 0]);
}

#[test]
#[traced_test]
fn test_search_is_logged() {
    let adjacency = Adjacency::build(&diamond());
    route("A", "D", &adjacency).unwrap();

    assert!(logs_contain("search finished"));
    assert!(logs_contain("route found"));
}

fn random_region(rng: &mut StdRng) -> Region {
    let n = rng.gen_range(1..=7);
    let cities: Vec<City> = (0..n).map(|i| City::new(format!("n{i}"))).collect();
    let streets: Vec<Street> = (0..rng.gen_range(0..=12))
        .map(|_| {
            let from = &cities[rng.gen_range(0..n)];
            let to = &cities[rng.gen_range(0..n)];
            Street::new(from.clone(), to.clone(), rng.gen_range(0..=20))
        })
        .collect();
    Region::new(cities, streets).unwrap()
}

/// Compare every query on small random regions against an exhaustive search over all simple
/// paths and against petgraph's own Dijkstra.
#[rstest]
fn test_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..60 {
        let region = random_region(&mut rng);
        let adjacency = Adjacency::build(&region);

        let mut graph = UnGraph::<&str, Length>::new_undirected();
        let index: HashMap<&str, _> = region.cities().map(|c| (c.name(), graph.add_node(c.name()))).collect();
        for street in region.streets() {
            graph.add_edge(index[street.from.name()], index[street.to.name()], street.length);
        }

        for start in region.cities() {
            let oracle = petgraph::algo::dijkstra(&graph, index[start.name()], None, |e| Distance::from(*e.weight()));

            for target in region.cities() {
                let result = route(start.name(), target.name(), &adjacency);

                let brute_force = if start == target {
                    Some(0)
                } else {
                    petgraph::algo::all_simple_paths::<Vec<_>, _>(&graph, index[start.name()], index[target.name()], 0, None)
                        .filter_map(|nodes| {
                            let path: Vec<City> = nodes.into_iter().map(|i| City::new(graph[i])).collect();
                            path_length(&region, &path)
                        })
                        .min()
                };
                assert_eq!(brute_force, oracle.get(&index[target.name()]).copied());

                match (brute_force, result) {
                    (Some(best), Ok(route)) => {
                        assert_eq!(route.length, best, "{region}\n{start} -> {target}");
                        assert_eq!(route.cities.first(), Some(start));
                        assert_eq!(route.cities.last(), Some(target));
                        assert_eq!(path_length(&region, &route.cities), Some(best));
                    },
                    (None, Err(err)) => {
                        assert_eq!(err, RouteError::NoRoute { start: start.clone(), target: target.clone() });
                    },
                    (expected, actual) => panic!("{region}\n{start} -> {target}: {expected:?} vs {actual:?}"),
                }
            }
        }
    }
}
