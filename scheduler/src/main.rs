#![forbid(unsafe_code)]
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::{debug, error};

mod commands;

#[derive(Debug, Parser)]
/// Job-shop scheduler using the shortest processing time rule
struct App {
    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Schedule instance files and report the makespan
    Schedule {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print the full schedules as JSON
        #[arg(long)]
        json: bool,
        /// Schedule the files in parallel
        #[arg(short, long, env = "JSP_PARALLEL")]
        parallel: bool,
    },
    /// Draw the schedule of an instance as an SVG Gantt chart
    Gantt {
        #[arg(required = true)]
        path: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
    },
    /// Create a graphviz notation for the solution graph of an instance
    Graph {
        #[arg(required = true)]
        path: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
    },
    /// Schedule every instance in a folder and write one result line per file
    Benchmark(Benchmark),
    /// Write a random instance in the benchmark format
    Generate(Generate),
}

#[derive(Args, Debug)]
pub struct Benchmark {
    #[arg(required = true)]
    instance_folder: PathBuf,
    #[arg(required = true)]
    output: PathBuf,
    /// Schedule the instances in parallel
    #[arg(short, long, env = "JSP_PARALLEL")]
    parallel: bool,
}

#[derive(Args, Debug)]
pub struct Generate {
    /// Number of jobs to generate
    #[arg(short, long, default_value_t = 10)]
    jobs: usize,
    /// Number of machines every job visits
    #[arg(short, long, default_value_t = 5)]
    machines: usize,
    #[arg(long, default_value_t = 1)]
    min_duration: u64,
    #[arg(long, default_value_t = 99)]
    max_duration: u64,
    /// Seed for reproducible instances
    #[arg(short, long, env = "JSP_SEED")]
    seed: Option<u64>,
    /// Target file for output
    #[arg(required = true)]
    file: PathBuf,
}

fn main() {
    let args: App = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    if let Err(err) = match args.command {
        Commands::Schedule {
            paths,
            json,
            parallel,
        } => commands::schedule(paths, json, parallel),
        Commands::Gantt { path, output } => commands::gantt(path, output),
        Commands::Graph { path, output } => commands::graph(path, output),
        Commands::Benchmark(benchmark) => commands::benchmark(benchmark),
        Commands::Generate(generate) => commands::generate(generate),
    } {
        error!("An error occurred: {err:#}");
        std::process::exit(1);
    }
}
