use log::{debug, info, trace};

use crate::{instance::Instance, schedule::Schedule};

/// Job indices sorted by total processing time, ties kept in index order.
pub fn spt_order(instance: &Instance) -> Vec<usize> {
    let mut order: Vec<usize> = (0..instance.jobs()).collect();
    // stable: equal totals keep ascending job indices
    order.sort_by_key(|&job| instance.total_processing_time(job));
    order
}

/// Builds the SPT schedule of an instance.
///
/// Jobs are committed one at a time in [`spt_order`]. Each job is placed
/// completely, step after step, before the next job is looked at; an operation
/// starts as soon as both its machine and its job are free.
pub fn schedule(instance: &Instance) -> Schedule {
    let job_order = spt_order(instance);
    debug!("spt job order: {job_order:?}");

    let jobs = instance.jobs();
    let machines = instance.machines();

    let mut machine_available = vec![0_u64; machines];
    let mut job_available = vec![0_u64; jobs];
    let mut start_times = vec![vec![0_u64; machines]; jobs];
    let mut end_times = vec![vec![0_u64; machines]; jobs];

    for &job in &job_order {
        for (step, operation) in instance.operations(job).enumerate() {
            let machine = operation.machine.index();

            let start = machine_available[machine].max(job_available[job]);
            let end = start + operation.duration;

            trace!(
                "job {job} step {step} on {}: [{start}, {end})",
                operation.machine
            );

            start_times[job][step] = start;
            end_times[job][step] = end;
            machine_available[machine] = end;
            job_available[job] = end;
        }
    }

    let schedule = Schedule::new(
        job_order,
        machines,
        instance.machine_order().to_vec(),
        start_times,
        end_times,
    );

    info!("spt makespan: {}", schedule.makespan());

    schedule
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{schedule, spt_order};
    use crate::generator::{generate_instance, GeneratorOptions};
    use crate::instance::Instance;

    static TEST_FILE: &str = include_str!("../../../instances/mt06.txt");

    fn three_by_three() -> Instance {
        Instance::new(
            3,
            3,
            vec![vec![3, 2, 2], vec![2, 1, 4], vec![4, 3, 1]],
            vec![vec![1, 2, 3], vec![1, 3, 2], vec![2, 1, 3]],
        )
        .unwrap()
    }

    #[test]
    fn three_by_three_golden_makespan() {
        let instance = three_by_three();

        let schedule = schedule(&instance);

        assert_eq!(schedule.job_order(), &[0, 1, 2]);
        assert_eq!(schedule.makespan(), 20);
        assert_eq!(schedule.start_time(1, 2), Some(8));
        assert_eq!(schedule.end_time(2, 2), Some(20));
        assert_eq!(schedule.verify(&instance), Ok(()));
    }

    #[test]
    fn shorter_jobs_go_first() {
        let instance = Instance::new(
            3,
            2,
            vec![vec![5, 5], vec![1, 2], vec![2, 1]],
            vec![vec![1, 2], vec![1, 2], vec![2, 1]],
        )
        .unwrap();

        assert_eq!(spt_order(&instance), vec![1, 2, 0]);

        let schedule = schedule(&instance);
        // job 1: M1 [0,1) M2 [1,3); job 2: M2 [3,5) M1 [5,6); job 0: M1 [6,11) M2 [11,16)
        assert_eq!(schedule.start_time(2, 0), Some(3));
        assert_eq!(schedule.start_time(0, 0), Some(6));
        assert_eq!(schedule.makespan(), 16);
    }

    #[test]
    fn ties_keep_index_order() {
        let instance = Instance::new(
            3,
            1,
            vec![vec![4], vec![4], vec![4]],
            vec![vec![1], vec![1], vec![1]],
        )
        .unwrap();

        let schedule = schedule(&instance);

        assert_eq!(schedule.job_order(), &[0, 1, 2]);
        assert_eq!(schedule.start_time(0, 0), Some(0));
        assert_eq!(schedule.start_time(1, 0), Some(4));
        assert_eq!(schedule.start_time(2, 0), Some(8));
    }

    #[test]
    fn job_commitment_is_atomic() {
        // Job 0 is committed first even though job 1 could have used M2 at time 0.
        let instance = Instance::new(
            2,
            2,
            vec![vec![1, 1], vec![1, 5]],
            vec![vec![1, 2], vec![2, 1]],
        )
        .unwrap();

        let schedule = schedule(&instance);

        assert_eq!(schedule.job_order(), &[0, 1]);
        assert_eq!(schedule.start_time(0, 1), Some(1));
        assert_eq!(schedule.start_time(1, 0), Some(2));
        assert_eq!(schedule.start_time(1, 1), Some(3));
        assert_eq!(schedule.makespan(), 8);
    }

    #[test]
    fn single_operation() {
        let instance = Instance::new(1, 1, vec![vec![5]], vec![vec![1]]).unwrap();

        let schedule = schedule(&instance);

        assert_eq!(schedule.makespan(), 5);
        assert_eq!(schedule.start_time(0, 0), Some(0));
        assert_eq!(schedule.end_time(0, 0), Some(5));
    }

    #[test]
    fn empty_instance_gives_empty_schedule() {
        let schedule = schedule(&Instance::default());

        assert!(schedule.is_empty());
        assert_eq!(schedule.makespan(), 0);
        assert_eq!(schedule.operations().count(), 0);
    }

    #[test]
    fn zero_durations_do_not_advance_time() {
        let instance = Instance::new(
            2,
            2,
            vec![vec![0, 3], vec![2, 0]],
            vec![vec![1, 2], vec![1, 2]],
        )
        .unwrap();

        let schedule = schedule(&instance);

        // job 1 (total 2) first: M1 [0,2) M2 [2,2); job 0: M1 [2,2) M2 [2,5)
        assert_eq!(schedule.job_order(), &[1, 0]);
        assert_eq!(schedule.start_time(1, 1), Some(2));
        assert_eq!(schedule.end_time(1, 1), Some(2));
        assert_eq!(schedule.start_time(0, 0), Some(2));
        assert_eq!(schedule.end_time(0, 0), Some(2));
        assert_eq!(schedule.makespan(), 5);
        assert_eq!(schedule.verify(&instance), Ok(()));
    }

    #[test]
    fn benchmark_file_golden_makespan() {
        let problem = jsp_lib_parser::parse_jsp_lib(TEST_FILE).unwrap();
        let instance = Instance::try_from(problem).unwrap();

        let schedule = schedule(&instance);

        assert_eq!(schedule.job_order(), &[4, 0, 5, 2, 3, 1]);
        assert_eq!(schedule.makespan(), 154);
        assert_eq!(schedule.difference_to(55), 99);
        assert_eq!(schedule.verify(&instance), Ok(()));
    }

    #[test]
    fn scheduling_is_deterministic() {
        let instance = three_by_three();

        assert_eq!(schedule(&instance), schedule(&instance));
    }

    #[test]
    fn random_instances_keep_all_constraints() {
        let mut rng = StdRng::seed_from_u64(42);

        for (jobs, machines) in [(1, 1), (3, 7), (10, 5), (15, 15), (20, 4)] {
            let options = GeneratorOptions {
                jobs,
                machines,
                min_duration: 0,
                max_duration: 30,
            };
            let instance = generate_instance(&options, &mut rng).unwrap();

            let schedule = schedule(&instance);

            assert_eq!(schedule.verify(&instance), Ok(()), "{jobs}x{machines}");
            for job in 0..jobs {
                for step in 0..machines {
                    let start = schedule.start_time(job, step).unwrap();
                    let end = schedule.end_time(job, step).unwrap();
                    assert_eq!(end - start, instance.processing_time(job, step).unwrap());
                    if step + 1 < machines {
                        assert!(schedule.start_time(job, step + 1).unwrap() >= end);
                    }
                }
            }
        }
    }
}
