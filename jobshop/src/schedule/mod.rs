use serde::Serialize;

use crate::instance::MachineId;

mod verify;

pub use verify::ScheduleViolation;

/// A single operation with its assigned time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduledOperation {
    pub job: usize,
    /// Position in the job's own operation order.
    pub step: usize,
    pub machine: MachineId,
    pub start: u64,
    pub end: u64,
}

impl ScheduledOperation {
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Start and end times of every operation of an instance.
///
/// Times are indexed by `(job, step)`. The `(job, machine)` view needed for
/// charts is available through [`Schedule::operation_on`] and the
/// `*_by_machine` matrices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Order in which jobs were committed to the machines.
    job_order: Vec<usize>,
    machine_count: usize,
    machine_order: Vec<Vec<MachineId>>,
    start_times: Vec<Vec<u64>>,
    end_times: Vec<Vec<u64>>,
    makespan: u64,
}

impl Schedule {
    pub(crate) fn new(
        job_order: Vec<usize>,
        machine_count: usize,
        machine_order: Vec<Vec<MachineId>>,
        start_times: Vec<Vec<u64>>,
        end_times: Vec<Vec<u64>>,
    ) -> Self {
        let makespan = end_times.iter().flatten().copied().max().unwrap_or(0);

        Self {
            job_order,
            machine_count,
            machine_order,
            start_times,
            end_times,
            makespan,
        }
    }

    /// Completion time of the last operation, `0` for an empty schedule.
    pub fn makespan(&self) -> u64 {
        self.makespan
    }

    pub fn job_order(&self) -> &[usize] {
        &self.job_order
    }

    pub fn jobs(&self) -> usize {
        self.start_times.len()
    }

    pub fn machines(&self) -> usize {
        self.machine_count
    }

    pub fn is_empty(&self) -> bool {
        self.start_times.iter().all(Vec::is_empty)
    }

    pub fn start_time(&self, job: usize, step: usize) -> Option<u64> {
        self.start_times.get(job)?.get(step).copied()
    }

    pub fn end_time(&self, job: usize, step: usize) -> Option<u64> {
        self.end_times.get(job)?.get(step).copied()
    }

    pub fn operation(&self, job: usize, step: usize) -> Option<ScheduledOperation> {
        Some(ScheduledOperation {
            job,
            step,
            machine: *self.machine_order.get(job)?.get(step)?,
            start: self.start_time(job, step)?,
            end: self.end_time(job, step)?,
        })
    }

    /// The operation `job` runs on `machine`.
    pub fn operation_on(&self, job: usize, machine: MachineId) -> Option<ScheduledOperation> {
        let step = self
            .machine_order
            .get(job)?
            .iter()
            .position(|&visited| visited == machine)?;

        self.operation(job, step)
    }

    /// All operations, job by job in step order.
    pub fn operations(&self) -> impl Iterator<Item = ScheduledOperation> + '_ {
        (0..self.jobs()).flat_map(move |job| self.job_operations(job))
    }

    /// All operations in the order they were committed to the machines.
    pub fn committed_operations(&self) -> impl Iterator<Item = ScheduledOperation> + '_ {
        self.job_order
            .iter()
            .flat_map(move |&job| self.job_operations(job))
    }

    fn job_operations(&self, job: usize) -> impl Iterator<Item = ScheduledOperation> + '_ {
        let steps = self.start_times.get(job).map(Vec::len).unwrap_or_default();

        (0..steps).filter_map(move |step| self.operation(job, step))
    }

    /// Operations processed by `machine`, ordered by start time.
    pub fn machine_timeline(&self, machine: MachineId) -> Vec<ScheduledOperation> {
        // Commitment order already is start order on every machine.
        self.committed_operations()
            .filter(|operation| operation.machine == machine)
            .collect()
    }

    /// Job × machine matrix of start times.
    pub fn start_times_by_machine(&self) -> Vec<Vec<u64>> {
        self.by_machine(|operation| operation.start)
    }

    /// Job × machine matrix of end times.
    pub fn end_times_by_machine(&self) -> Vec<Vec<u64>> {
        self.by_machine(|operation| operation.end)
    }

    fn by_machine(&self, time: impl Fn(&ScheduledOperation) -> u64) -> Vec<Vec<u64>> {
        let mut matrix = vec![vec![0; self.machine_count]; self.jobs()];

        for operation in self.operations() {
            if let Some(cell) = matrix
                .get_mut(operation.job)
                .and_then(|row| row.get_mut(operation.machine.index()))
            {
                *cell = time(&operation);
            }
        }

        matrix
    }

    /// Signed distance between this makespan and a reference value, saturated
    /// to the `i64` range.
    pub fn difference_to(&self, reference: u64) -> i64 {
        let difference = i128::from(self.makespan) - i128::from(reference);
        i64::try_from(difference).unwrap_or(if difference < 0 { i64::MIN } else { i64::MAX })
    }
}
