use anyhow::Result;
use jobshop::{schedule_batch, SchedulerOptions};
use log::info;

use super::{load_instance, schedule::MakespanReport};
use crate::Benchmark;

pub fn benchmark(benchmark: Benchmark) -> Result<()> {
    if !benchmark.instance_folder.is_dir() {
        anyhow::bail!("instance_folder is not a directory")
    }

    let folder = benchmark.instance_folder.read_dir()?;

    let mut paths = vec![];
    for entry in folder {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let instances = paths
        .iter()
        .map(|path| load_instance(path))
        .collect::<Result<Vec<_>>>()?;

    let schedules = schedule_batch(
        &instances,
        &SchedulerOptions {
            parallel: benchmark.parallel,
        },
    );

    let scheduling_results: Vec<String> = paths
        .into_iter()
        .zip(&instances)
        .zip(&schedules)
        .map(|((path, instance), schedule)| {
            MakespanReport::new(path, schedule, instance.optimal_makespan())
        })
        .map(|report| match (report.optimal_makespan, report.difference) {
            (Some(optimum), Some(difference)) => format!(
                "{:?}: {} (optimal {optimum}, difference {difference})",
                report.path, report.makespan
            ),
            _ => format!("{:?}: {}", report.path, report.makespan),
        })
        .collect();

    std::fs::write(&benchmark.output, scheduling_results.join("\n"))?;

    info!(
        "Wrote {} results to: {:?}",
        scheduling_results.len(),
        benchmark.output
    );

    Ok(())
}
