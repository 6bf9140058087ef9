use clap::{Parser, Subcommand};
use flowgraph::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Inspect and normalize flow graph JSON files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the graph's labels, entry point and steps in order
    Inspect {
        /// Path to the flow graph JSON file
        path: String,
    },
    /// Read a graph leniently and write it back in canonical form
    Normalize {
        /// Path to the flow graph JSON file
        path: String,
        /// Where to write the result; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
        /// Emit single-line JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
    /// Remove the step at an index and write the resulting graph
    Remove {
        /// Path to the flow graph JSON file
        path: String,
        /// Index of the step to remove
        #[arg(short, long, allow_negative_numbers = true)]
        index: i64,
        /// Where to write the result; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { path } => inspect(&load(&path)),
        Command::Normalize {
            path,
            output,
            compact,
        } => {
            let graph = load(&path);
            let text = if compact {
                graph.to_json_string()
            } else {
                graph.to_json_string_pretty()
            };
            emit(&text, output.as_deref());
        }
        Command::Remove {
            path,
            index,
            output,
        } => {
            let graph = load(&path);
            let next = graph.remove_step_at(index);
            if next.shares_storage(&graph) {
                eprintln!("No step stored at index {}; graph unchanged.", index);
            }
            emit(&next.to_json_string_pretty(), output.as_deref());
        }
    }
}

fn inspect(graph: &FlowGraph) {
    println!("Name:        {}", graph.name());
    println!("Description: {}", graph.description());
    println!("Entry:       {}", graph.entry_index());
    println!("Steps:       {}", graph.len());

    for step in graph.steps_sorted() {
        let dangling = step
            .targets()
            .filter(|target| !target.is_end() && graph.step_at_target(*target).is_none())
            .count();
        println!(
            "  {:>4}  {:<24} ok -> {:<6} fail -> {:<6} {}{}",
            step.wire_index(),
            step.title(),
            step.on_success().to_string(),
            step.on_failure().to_string(),
            step.failure_code(),
            if dangling > 0 { "  (dangling target)" } else { "" },
        );
    }
}

fn load(path: &str) -> FlowGraph {
    FlowGraph::from_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn emit(text: &str, output: Option<&str>) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                exit_with_error(&format!("Could not write to file '{}': {}", path, e))
            });
            println!("Wrote graph to '{}'", path);
        }
        None => println!("{}", text),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
