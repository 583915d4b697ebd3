use rand::prelude::*;

use crate::graph::input::{GraphInput, TreeInput, TreeNodeInput};
use crate::{Error, Result};

/// Generates `len` random values in `1..=max`
pub fn random_values<R: Rng + ?Sized>(len: usize, max: i64, rng: &mut R) -> Vec<i64> {
    let max = max.max(1);
    (0..len).map(|_| rng.gen_range(1..=max)).collect()
}

/// Evenly spaced ascending values, e.g. `len = 4, max = 100` -> `[25, 50, 75, 100]`
pub fn ascending_values(len: usize, max: i64) -> Vec<i64> {
    let step = (max / len.max(1) as i64).max(1);
    (1..=len as i64).map(|i| i * step).collect()
}

/// The mirror of [`ascending_values`]
pub fn descending_values(len: usize, max: i64) -> Vec<i64> {
    let mut values = ascending_values(len, max);
    values.reverse();
    values
}

/// Sorted values with small random gaps, the usual input for the searches
pub fn sorted_random_values<R: Rng + ?Sized>(len: usize, max: i64, rng: &mut R) -> Vec<i64> {
    let step = (max as f64 / len.max(1) as f64).max(1.0);
    let mut values: Vec<i64> = (0..len)
        .map(|i| (((i + 1) as f64 * step).floor() as i64 + rng.gen_range(0..5)).min(max))
        .collect();
    values.sort_unstable();
    values
}

/// The eleven-node binary tree A..K
pub fn sample_tree() -> TreeInput {
    let width = 800.0;
    let layout = [
        ("A", width / 2.0, 80.0),
        ("B", width / 2.0 - 150.0, 180.0),
        ("C", width / 2.0 + 150.0, 180.0),
        ("D", width / 2.0 - 225.0, 280.0),
        ("E", width / 2.0 - 75.0, 280.0),
        ("F", width / 2.0 + 75.0, 280.0),
        ("G", width / 2.0 + 225.0, 280.0),
        ("H", width / 2.0 - 262.0, 380.0),
        ("I", width / 2.0 - 187.0, 380.0),
        ("J", width / 2.0 - 112.0, 380.0),
        ("K", width / 2.0 - 37.0, 380.0),
    ];
    let children = |id: &str| match id {
        "A" => (Some("B"), Some("C")),
        "B" => (Some("D"), Some("E")),
        "C" => (Some("F"), Some("G")),
        "D" => (Some("H"), Some("I")),
        "E" => (Some("J"), Some("K")),
        _ => (None, None),
    };

    TreeInput {
        nodes: layout
            .iter()
            .map(|&(id, x, y)| {
                let (left, right) = children(id);
                TreeNodeInput {
                    id: id.to_string(),
                    x,
                    y,
                    left: left.map(str::to_string),
                    right: right.map(str::to_string),
                }
            })
            .collect(),
        root: Some("A".to_string()),
    }
}

/// The eight-node undirected traversal graph
pub fn sample_graph() -> GraphInput {
    let layout = [
        ("1", 200.0, 150.0),
        ("2", 400.0, 100.0),
        ("3", 600.0, 150.0),
        ("4", 150.0, 300.0),
        ("5", 400.0, 250.0),
        ("6", 650.0, 300.0),
        ("7", 300.0, 400.0),
        ("8", 500.0, 400.0),
    ];
    let links = [
        ("1", "2"), ("1", "4"), ("2", "3"), ("2", "5"),
        ("3", "5"), ("3", "6"), ("4", "5"), ("4", "7"),
        ("5", "6"), ("5", "7"), ("5", "8"), ("6", "8"),
        ("7", "8"),
    ];

    let graph = layout
        .iter()
        .fold(GraphInput::default(), |g, &(id, x, y)| g.node(id, x, y));
    links
        .iter()
        .fold(graph, |g, &(source, target)| g.edge(source, target, 1.0))
}

const KZN_CITIES: &[(&str, f64, f64)] = &[
    ("durban", 400.0, 350.0),
    ("pmb", 350.0, 280.0),
    ("richards", 450.0, 200.0),
    ("newcastle", 250.0, 150.0),
    ("ladysmith", 300.0, 220.0),
    ("empangeni", 430.0, 250.0),
    ("port_shepstone", 380.0, 420.0),
];

const KZN_ROADS: &[(&str, &str, f64, &str)] = &[
    ("durban", "pmb", 80.0, "N3"),
    ("durban", "richards", 170.0, "N2"),
    ("pmb", "ladysmith", 160.0, "N3"),
    ("ladysmith", "newcastle", 100.0, "N11"),
    ("richards", "empangeni", 30.0, "N2"),
    ("durban", "port_shepstone", 120.0, "N2"),
    ("durban", "empangeni", 150.0, "R102"),
    ("pmb", "newcastle", 240.0, "N3/N11"),
];

const GAUTENG_CITIES: &[(&str, f64, f64)] = &[
    ("jhb", 400.0, 300.0),
    ("pta", 400.0, 180.0),
    ("sandton", 420.0, 280.0),
    ("soweto", 350.0, 330.0),
    ("kempton", 480.0, 290.0),
    ("randburg", 380.0, 260.0),
    ("centurion", 400.0, 230.0),
];

const GAUTENG_ROADS: &[(&str, &str, f64, &str)] = &[
    ("jhb", "pta", 60.0, "N1"),
    ("jhb", "sandton", 15.0, "M1"),
    ("jhb", "soweto", 20.0, "M70"),
    ("sandton", "pta", 50.0, "N1"),
    ("jhb", "kempton", 25.0, "R24"),
    ("sandton", "randburg", 10.0, "N1"),
    ("pta", "centurion", 20.0, "N1"),
    ("centurion", "jhb", 40.0, "N1/N14"),
    ("randburg", "soweto", 25.0, "R564"),
];

/// Road maps with distances in km and road names; `region` is `kzn` or `gauteng`
pub fn sample_map(region: &str) -> Result<GraphInput> {
    let (cities, roads) = match region {
        "kzn" => (KZN_CITIES, KZN_ROADS),
        "gauteng" => (GAUTENG_CITIES, GAUTENG_ROADS),
        other => return Err(Error::InvalidInput(format!("unknown map region: {}", other))),
    };

    let graph = cities
        .iter()
        .fold(GraphInput::default(), |g, &(id, x, y)| g.node(id, x, y));
    Ok(roads
        .iter()
        .fold(graph, |g, &(source, target, km, road)| g.named_edge(source, target, km, road)))
}

/// Generates a random geometric graph in the plane.
/// n: number of nodes, placed uniformly in `[0, side)²`
/// radius: nodes closer than this are connected, weighted by their distance
pub fn random_geometric_graph<R: Rng + ?Sized>(n: usize, side: f64, radius: f64, rng: &mut R) -> GraphInput {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
        .collect();

    let mut graph = points
        .iter()
        .enumerate()
        .fold(GraphInput::default(), |g, (i, &(x, y))| g.node(&format!("n{}", i), x, y));

    for i in 0..n {
        for j in (i + 1)..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[j];
            let dist = (x1 - x2).hypot(y1 - y2);
            if dist <= radius {
                graph = graph.edge(&format!("n{}", i), &format!("n{}", j), dist);
            }
        }
    }

    graph
}

/// Generates a `width × height` 4-connected grid with unit spacing and unit weights
pub fn grid_graph(width: usize, height: usize) -> GraphInput {
    let id = |x: usize, y: usize| format!("{}_{}", x, y);
    let mut graph = GraphInput::default();

    for y in 0..height {
        for x in 0..width {
            graph = graph.node(&id(x, y), x as f64, y as f64);
        }
    }
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                graph = graph.edge(&id(x, y), &id(x + 1, y), 1.0);
            }
            if y + 1 < height {
                graph = graph.edge(&id(x, y), &id(x, y + 1), 1.0);
            }
        }
    }

    graph
}
