use thiserror::Error;

use super::{Schedule, ScheduledOperation};
use crate::instance::{Instance, MachineId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleViolation {
    #[error("schedule covers {found} jobs, instance has {expected}")]
    JobCountMismatch { expected: usize, found: usize },
    #[error("schedule covers {found} steps of job {job}, instance has {expected}")]
    StepCountMismatch {
        job: usize,
        expected: usize,
        found: usize,
    },
    #[error("job {job} step {step} runs on {found}, instance says {expected}")]
    MachineMismatch {
        job: usize,
        step: usize,
        expected: MachineId,
        found: MachineId,
    },
    #[error("job {job} step {step} takes {found}, processing time is {expected}")]
    DurationMismatch {
        job: usize,
        step: usize,
        expected: u64,
        found: u64,
    },
    #[error("job {job} step {step} starts before its predecessor ends")]
    PrecedenceViolated { job: usize, step: usize },
    #[error("{machine} runs (job, step) {first:?} and {second:?} at the same time")]
    MachineOverlap {
        machine: MachineId,
        first: (usize, usize),
        second: (usize, usize),
    },
    #[error("makespan is {found}, latest end time is {expected}")]
    MakespanMismatch { expected: u64, found: u64 },
}

impl Schedule {
    /// Checks precedence, mutual exclusion, durations and the makespan against
    /// the instance the schedule was computed for.
    pub fn verify(&self, instance: &Instance) -> Result<(), ScheduleViolation> {
        if self.jobs() != instance.jobs() {
            return Err(ScheduleViolation::JobCountMismatch {
                expected: instance.jobs(),
                found: self.jobs(),
            });
        }

        for job in 0..instance.jobs() {
            self.verify_job(instance, job)?;
        }

        for machine in MachineId::all(instance.machines()) {
            let mut timeline: Vec<ScheduledOperation> = self
                .operations()
                .filter(|operation| operation.machine == machine && operation.duration() > 0)
                .collect();
            timeline.sort_by_key(|operation| (operation.start, operation.end));

            if let Some(pair) = timeline.windows(2).find(|pair| pair[0].end > pair[1].start) {
                return Err(ScheduleViolation::MachineOverlap {
                    machine,
                    first: (pair[0].job, pair[0].step),
                    second: (pair[1].job, pair[1].step),
                });
            }
        }

        let latest_end = self.operations().map(|operation| operation.end).max();
        let expected = latest_end.unwrap_or(0);
        if self.makespan != expected {
            return Err(ScheduleViolation::MakespanMismatch {
                expected,
                found: self.makespan,
            });
        }

        Ok(())
    }

    fn verify_job(&self, instance: &Instance, job: usize) -> Result<(), ScheduleViolation> {
        let steps = self.start_times.get(job).map(Vec::len).unwrap_or_default();
        if steps != instance.machines() {
            return Err(ScheduleViolation::StepCountMismatch {
                job,
                expected: instance.machines(),
                found: steps,
            });
        }

        let mut previous_end = 0;

        for (step, expected) in instance.operations(job).enumerate() {
            let operation =
                self.operation(job, step)
                    .ok_or(ScheduleViolation::StepCountMismatch {
                        job,
                        expected: instance.machines(),
                        found: step,
                    })?;

            if operation.machine != expected.machine {
                return Err(ScheduleViolation::MachineMismatch {
                    job,
                    step,
                    expected: expected.machine,
                    found: operation.machine,
                });
            }

            if operation.end < operation.start || operation.duration() != expected.duration {
                return Err(ScheduleViolation::DurationMismatch {
                    job,
                    step,
                    expected: expected.duration,
                    found: operation.end.saturating_sub(operation.start),
                });
            }

            if operation.start < previous_end {
                return Err(ScheduleViolation::PrecedenceViolated { job, step });
            }

            previous_end = operation.end;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ScheduleViolation;
    use crate::instance::{Instance, MachineId};
    use crate::schedule::Schedule;
    use crate::scheduler::schedule;

    fn two_jobs() -> Instance {
        Instance::new(2, 2, vec![vec![2, 3], vec![4, 1]], vec![vec![1, 2], vec![2, 1]]).unwrap()
    }

    fn machines(instance: &Instance) -> Vec<Vec<MachineId>> {
        instance.machine_order().to_vec()
    }

    #[test]
    fn engine_output_verifies() {
        let instance = two_jobs();

        assert_eq!(schedule(&instance).verify(&instance), Ok(()));
    }

    #[test]
    fn detects_overlap_on_a_machine() {
        let instance = two_jobs();
        // job 0: M1 [0,2) M2 [2,5); job 1: M2 [3,7) M1 [7,8)
        let schedule = Schedule::new(
            vec![0, 1],
            2,
            machines(&instance),
            vec![vec![0, 2], vec![3, 7]],
            vec![vec![2, 5], vec![7, 8]],
        );

        assert!(matches!(
            schedule.verify(&instance),
            Err(ScheduleViolation::MachineOverlap {
                first: (0, 1),
                second: (1, 0),
                ..
            })
        ));
    }

    #[test]
    fn detects_broken_precedence() {
        let instance = two_jobs();
        let schedule = Schedule::new(
            vec![0, 1],
            2,
            machines(&instance),
            vec![vec![0, 1], vec![0, 4]],
            vec![vec![2, 4], vec![4, 5]],
        );

        assert_eq!(
            schedule.verify(&instance),
            Err(ScheduleViolation::PrecedenceViolated { job: 0, step: 1 })
        );
    }

    #[test]
    fn detects_wrong_duration() {
        let instance = two_jobs();
        let schedule = Schedule::new(
            vec![0, 1],
            2,
            machines(&instance),
            vec![vec![0, 2], vec![0, 5]],
            vec![vec![2, 5], vec![5, 6]],
        );

        assert_eq!(
            schedule.verify(&instance),
            Err(ScheduleViolation::DurationMismatch {
                job: 1,
                step: 0,
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn detects_job_count_mismatch() {
        let instance = two_jobs();

        assert_eq!(
            Schedule::default().verify(&instance),
            Err(ScheduleViolation::JobCountMismatch {
                expected: 2,
                found: 0
            })
        );
    }
}
