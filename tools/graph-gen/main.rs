use clap::Parser;
use flowgraph::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;

/// A CLI tool to generate sample flow graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of steps in the generated chain
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Index of the first step
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Chance that a step's failure path jumps to another step instead of ending
    #[arg(long, default_value_t = 0.25)]
    retry_chance: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.retry_chance) {
        eprintln!(
            "Error: --retry-chance ({}) must be between 0 and 1",
            cli.retry_chance
        );
        std::process::exit(1);
    }

    let end = cli.start.checked_add(cli.steps).unwrap_or_else(|| {
        eprintln!(
            "Error: --start ({}) plus --steps ({}) exceeds the largest index {}",
            cli.start,
            cli.steps,
            u32::MAX
        );
        std::process::exit(1);
    });

    println!(
        "Generating a flow graph of {} steps starting at index {}...",
        cli.steps, cli.start
    );

    let graph = FlowGraph::builder("Generated flow")
        .description(format!("{} generated steps", cli.steps))
        .steps(generate_steps(&mut rng, cli.start, end, cli.retry_chance))
        .build();

    graph.save(&cli.output)?;

    println!(
        "Successfully generated and saved flow graph to '{}'",
        cli.output
    );

    Ok(())
}

/// Generates a chain over `start..end` where each step succeeds into the next
/// one and the last step ends the flow.
fn generate_steps(rng: &mut ThreadRng, start: u32, end: u32, retry_chance: f64) -> Vec<FlowStep> {
    (start..end)
        .map(|index| {
            let on_success = if index + 1 == end {
                Target::End
            } else {
                Target::Step(StepIndex::from(index + 1))
            };
            let on_failure = if index > start && rng.random_bool(retry_chance) {
                Target::Step(StepIndex::from(rng.random_range(start..index)))
            } else {
                Target::End
            };
            FlowStep::builder(i64::from(index))
                .title(format!("Step {}", index))
                .description(format!("Generated step {}", index))
                .failure_code(format!("E{:04}", index))
                .on_success(on_success)
                .on_failure(on_failure)
                .constraint("maxAttempts", serde_json::json!(rng.random_range(1..=5)))
                .cost("latencyMs", rng.random_range(5.0..500.0))
                .build()
        })
        .collect()
}
