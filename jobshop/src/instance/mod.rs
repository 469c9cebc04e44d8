use hashbrown::HashSet;
use jsp_lib_parser::structs::JspLibProblem;
use log::trace;

mod error;
mod machine;

pub use error::MalformedInstance;
pub use machine::MachineId;

const PROCESSING_TIMES: &str = "processing times";
const MACHINE_ORDER: &str = "machine order";

/// One step of a job: which machine it runs on and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub machine: MachineId,
    pub duration: u64,
}

/// A validated job-shop instance.
///
/// Every job visits every machine exactly once. Rows are indexed by job and
/// then by the job's own step order, not by machine.
///
/// `Instance::default()` is the degenerate instance without jobs or machines;
/// [`Instance::new`] never produces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    machines: usize,
    processing_times: Vec<Vec<u64>>,
    machine_order: Vec<Vec<MachineId>>,
    optimal_makespan: Option<u64>,
}

impl Instance {
    /// Validates the two job tables. Machine ids in `machine_order` are 1-based.
    pub fn new(
        jobs: usize,
        machines: usize,
        processing_times: Vec<Vec<u64>>,
        machine_order: Vec<Vec<u64>>,
    ) -> Result<Self, MalformedInstance> {
        if jobs == 0 || machines == 0 {
            return Err(MalformedInstance::EmptyDimension { jobs, machines });
        }

        check_rows(PROCESSING_TIMES, &processing_times, jobs, machines)?;
        check_rows(MACHINE_ORDER, &machine_order, jobs, machines)?;
        check_total_time(&processing_times)?;

        let machine_order = machine_order
            .iter()
            .enumerate()
            .map(|(job, row)| {
                let mut visited = HashSet::with_capacity(machines);

                row.iter()
                    .enumerate()
                    .map(|(step, &number)| {
                        let machine = MachineId::from_number(number, machines, job, step)?;

                        if !visited.insert(machine) {
                            return Err(MalformedInstance::DuplicateMachine { job, machine });
                        }

                        Ok(machine)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!("validated instance with {jobs} jobs on {machines} machines");

        Ok(Self {
            machines,
            processing_times,
            machine_order,
            optimal_makespan: None,
        })
    }

    /// Attaches a known reference makespan, e.g. the published optimum.
    pub fn with_optimal_makespan(mut self, optimal_makespan: Option<u64>) -> Self {
        self.optimal_makespan = optimal_makespan;
        self
    }

    pub fn jobs(&self) -> usize {
        self.processing_times.len()
    }

    pub fn machines(&self) -> usize {
        self.machines
    }

    pub fn optimal_makespan(&self) -> Option<u64> {
        self.optimal_makespan
    }

    pub fn processing_time(&self, job: usize, step: usize) -> Option<u64> {
        self.processing_times.get(job)?.get(step).copied()
    }

    pub fn machine(&self, job: usize, step: usize) -> Option<MachineId> {
        self.machine_order.get(job)?.get(step).copied()
    }

    /// Operations of `job` in precedence order. Empty for unknown jobs.
    pub fn operations(&self, job: usize) -> impl Iterator<Item = Operation> + '_ {
        let durations = self.processing_times.get(job).map(Vec::as_slice);
        let machines = self.machine_order.get(job).map(Vec::as_slice);

        machines
            .unwrap_or_default()
            .iter()
            .zip(durations.unwrap_or_default())
            .map(|(&machine, &duration)| Operation { machine, duration })
    }

    /// Sum of all processing times of `job`, the SPT priority key.
    pub fn total_processing_time(&self, job: usize) -> u64 {
        self.processing_times
            .get(job)
            .map(|row| row.iter().sum())
            .unwrap_or_default()
    }

    pub fn processing_times(&self) -> &[Vec<u64>] {
        &self.processing_times
    }

    pub fn machine_order(&self) -> &[Vec<MachineId>] {
        &self.machine_order
    }
}

fn check_rows<T>(
    table: &'static str,
    rows: &[Vec<T>],
    jobs: usize,
    machines: usize,
) -> Result<(), MalformedInstance> {
    if rows.len() != jobs {
        return Err(MalformedInstance::RowCountMismatch {
            table,
            expected: jobs,
            found: rows.len(),
        });
    }

    match rows.iter().position(|row| row.len() != machines) {
        Some(job) => Err(MalformedInstance::RaggedRow {
            table,
            job,
            expected: machines,
            found: rows[job].len(),
        }),
        None => Ok(()),
    }
}

/// No start or end time can exceed the sum of all durations, so bounding it
/// keeps schedule arithmetic in range.
fn check_total_time(processing_times: &[Vec<u64>]) -> Result<u64, MalformedInstance> {
    processing_times
        .iter()
        .enumerate()
        .try_fold(0u64, |total, (job, row)| {
            row.iter()
                .try_fold(total, |total, &duration| total.checked_add(duration))
                .ok_or(MalformedInstance::TotalTimeOverflow { job })
        })
}

impl TryFrom<JspLibProblem> for Instance {
    type Error = MalformedInstance;

    fn try_from(problem: JspLibProblem) -> Result<Self, Self::Error> {
        Ok(Instance::new(
            problem.jobs,
            problem.machines,
            problem.processing_times,
            problem.machine_sequences,
        )?
        .with_optimal_makespan(problem.optimal_makespan))
    }
}

impl From<&Instance> for JspLibProblem {
    fn from(instance: &Instance) -> Self {
        JspLibProblem {
            jobs: instance.jobs(),
            machines: instance.machines(),
            optimal_makespan: instance.optimal_makespan(),
            processing_times: instance.processing_times.clone(),
            machine_sequences: instance
                .machine_order
                .iter()
                .map(|row| row.iter().map(|machine| machine.number()).collect())
                .collect(),
        }
    }
}
