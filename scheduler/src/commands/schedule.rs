use std::{fmt, path::PathBuf};

use anyhow::Result;
use jobshop::{schedule_batch, Schedule, SchedulerOptions};
use log::debug;
use serde_json::json;

use super::load_instance;

/// Computed makespan of one file next to its known optimum.
#[derive(Debug)]
pub struct MakespanReport {
    pub path: PathBuf,
    pub makespan: u64,
    pub optimal_makespan: Option<u64>,
    pub difference: Option<i64>,
}

impl MakespanReport {
    pub fn new(path: PathBuf, schedule: &Schedule, optimal_makespan: Option<u64>) -> Self {
        Self {
            path,
            makespan: schedule.makespan(),
            optimal_makespan,
            difference: optimal_makespan.map(|optimum| schedule.difference_to(optimum)),
        }
    }
}

impl fmt::Display for MakespanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path.display())?;
        write!(f, "Calculated Makespan (SPT): {}", self.makespan)?;

        if let (Some(optimum), Some(difference)) = (self.optimal_makespan, self.difference) {
            write!(f, "\nOptimal Makespan: {optimum}")?;
            write!(f, "\nDifference: {difference}")?;
        }

        Ok(())
    }
}

pub fn schedule(paths: Vec<PathBuf>, json: bool, parallel: bool) -> Result<()> {
    let instances = paths
        .iter()
        .map(|path| load_instance(path))
        .collect::<Result<Vec<_>>>()?;

    let schedules = schedule_batch(&instances, &SchedulerOptions { parallel });
    debug!("scheduled {} instances", schedules.len());

    for ((path, instance), schedule) in paths.into_iter().zip(&instances).zip(&schedules) {
        let report = MakespanReport::new(path, schedule, instance.optimal_makespan());

        if json {
            let output = json!({
                "file": report.path,
                "makespan": report.makespan,
                "optimal_makespan": report.optimal_makespan,
                "difference": report.difference,
                "schedule": schedule,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{report}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use jobshop::{schedule, Instance};

    use super::MakespanReport;

    fn single_job() -> Instance {
        Instance::new(1, 2, vec![vec![4, 6]], vec![vec![2, 1]]).unwrap()
    }

    #[test]
    fn report_with_optimum() {
        let instance = single_job().with_optimal_makespan(Some(8));

        let report = MakespanReport::new(
            PathBuf::from("./tiny.txt"),
            &schedule(&instance),
            instance.optimal_makespan(),
        );

        assert_eq!(report.difference, Some(2));
        assert_eq!(
            report.to_string(),
            "File: ./tiny.txt\nCalculated Makespan (SPT): 10\nOptimal Makespan: 8\nDifference: 2"
        );
    }

    #[test]
    fn report_without_optimum() {
        let instance = single_job();

        let report = MakespanReport::new(PathBuf::from("tiny.txt"), &schedule(&instance), None);

        assert_eq!(report.difference, None);
        assert_eq!(
            report.to_string(),
            "File: tiny.txt\nCalculated Makespan (SPT): 10"
        );
    }

    #[test]
    fn report_difference_saturates() {
        let instance = Instance::new(1, 1, vec![vec![u64::MAX]], vec![vec![1]]).unwrap();

        let report = MakespanReport::new(PathBuf::from("huge.txt"), &schedule(&instance), Some(0));

        assert_eq!(report.difference, Some(i64::MAX));
        assert!(report.to_string().ends_with(&format!("Difference: {}", i64::MAX)));
    }
}
