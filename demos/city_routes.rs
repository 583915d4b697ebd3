use algoviz::graph::generators;
use algoviz::{Graph, PathKind, UndirectedGraph};
use colored::*;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let queries = [
        ("kzn", "port_shepstone", "newcastle"),
        ("kzn", "durban", "empangeni"),
        ("gauteng", "soweto", "centurion"),
        ("gauteng", "kempton", "randburg"),
    ];

    for (region, from, to) in queries {
        let graph = UndirectedGraph::<f64>::from_input(&generators::sample_map(region)?)?;
        println!(
            "\n{} {} -> {} ({} cities, {} roads)",
            region.to_uppercase().bold().blue(),
            from.bold(),
            to.bold(),
            graph.node_count(),
            graph.edge_count()
        );

        for kind in PathKind::ALL {
            let started = Instant::now();
            let (route, explored) = kind.explore::<f64, _>(&graph, from, to)?;
            let elapsed = started.elapsed();

            match route {
                Some(route) => println!(
                    "  {:<9} {:>7.1} km  explored {:>2}  {:>8.2?}  {}",
                    kind.name().green(),
                    route.total_weight,
                    explored,
                    elapsed,
                    route.path.join(" -> ")
                ),
                None => println!("  {:<9} {}", kind.name().red(), "unreachable".red()),
            }
        }
    }

    Ok(())
}
