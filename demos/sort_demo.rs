use algoviz::engine::Callbacks;
use algoviz::graph::generators;
use algoviz::model::{ArraySnapshot, ElementState};
use algoviz::{AlgorithmId, Family, RunParams, RunReport, RunRequest, SortKind, Snapshot, Visualizer};
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Print one array frame, colouring each element by its state
fn draw(frame: &ArraySnapshot) {
    let cells: Vec<String> = frame
        .elements
        .iter()
        .map(|element| {
            let text = format!("{:>3}", element.value);
            match element.state {
                ElementState::Comparing => text.yellow().bold().to_string(),
                ElementState::Swapping => text.red().bold().to_string(),
                ElementState::Pivot => text.magenta().to_string(),
                ElementState::Sorted => text.green().to_string(),
                _ => text.normal().to_string(),
            }
        })
        .collect();
    println!("{}", cells.join(" "));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let kind: SortKind = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bubble".to_string())
        .parse()?;

    let mut rng = StdRng::seed_from_u64(7);
    let values = generators::random_values(12, 99, &mut rng);

    println!("{}", format!("=== {} ===", kind).bold().blue());
    println!("Input: {:?}\n", values);

    let visualizer = Visualizer::new(Family::Sorting);
    visualizer.set_speed(100);

    let request = RunRequest::new(AlgorithmId::Sort(kind), RunParams::array(values));
    let mut frames = 0usize;
    let mut observer = Callbacks::new(|snapshot: Snapshot| {
        frames += 1;
        if let Snapshot::Array(frame) = snapshot {
            draw(&frame);
        }
    });

    let outcome = visualizer.start(&request, &mut observer).await?;

    match outcome.completed() {
        Some(RunReport::Sorted(result)) => {
            println!();
            println!("{} {:?}", "Sorted:".green().bold(), result.values);
            println!("Comparisons: {}", result.comparisons.to_string().cyan());
            println!("Swaps:       {}", result.swaps.to_string().cyan());
            println!("Frames:      {}", frames.to_string().cyan());
        }
        Some(_) => println!("{}", "Unexpected report".red()),
        None => println!("{}", "Run cancelled".yellow()),
    }

    Ok(())
}
