use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::instance::{Instance, MalformedInstance};

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub jobs: usize,
    pub machines: usize,
    pub min_duration: u64,
    pub max_duration: u64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            jobs: 10,
            machines: 5,
            min_duration: 1,
            max_duration: 99,
        }
    }
}

/// Random instance where every job visits all machines in a shuffled order.
///
/// Durations are drawn uniformly from `min_duration..=max_duration`; a
/// `max_duration` below `min_duration` is raised to it.
pub fn generate_instance<R: Rng + ?Sized>(
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Instance, MalformedInstance> {
    let min_duration = options.min_duration;
    let max_duration = options.max_duration.max(min_duration);

    let processing_times: Vec<Vec<u64>> = (0..options.jobs)
        .map(|_| {
            (0..options.machines)
                .map(|_| rng.gen_range(min_duration..=max_duration))
                .collect()
        })
        .collect();

    let machine_order: Vec<Vec<u64>> = (0..options.jobs)
        .map(|_| {
            let mut machines: Vec<u64> = (1..=options.machines as u64).collect();
            machines.shuffle(&mut *rng);
            machines
        })
        .collect();

    debug!("generated {options:?}");

    Instance::new(
        options.jobs,
        options.machines,
        processing_times,
        machine_order,
    )
}
