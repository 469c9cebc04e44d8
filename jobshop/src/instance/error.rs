use thiserror::Error;

use super::MachineId;

/// Structural problems found while building an [`Instance`](super::Instance).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInstance {
    #[error("instance needs at least one job and one machine, got {jobs} jobs and {machines} machines")]
    EmptyDimension { jobs: usize, machines: usize },
    #[error("{table} has {found} rows, expected one per job ({expected})")]
    RowCountMismatch {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{table} row of job {job} has {found} entries, expected one per machine ({expected})")]
    RaggedRow {
        table: &'static str,
        job: usize,
        expected: usize,
        found: usize,
    },
    #[error("job {job} step {step} names machine {machine}, valid machines are 1..={machines}")]
    MachineOutOfRange {
        job: usize,
        step: usize,
        machine: u64,
        machines: usize,
    },
    #[error("job {job} visits {machine} more than once")]
    DuplicateMachine { job: usize, machine: MachineId },
    #[error("processing times of job {job} push the instance total past u64::MAX")]
    TotalTimeOverflow { job: usize },
}
