use log::debug;
use rayon::prelude::*;

use crate::{instance::Instance, schedule::Schedule};

mod spt;

pub use spt::{schedule, spt_order};

#[derive(Debug, Clone, Default)]
pub struct SchedulerOptions {
    /// Schedule independent instances on the rayon thread pool.
    pub parallel: bool,
}

/// Schedules every instance on its own. Results keep the input order.
pub fn schedule_batch(instances: &[Instance], options: &SchedulerOptions) -> Vec<Schedule> {
    debug!(
        "scheduling {} instances, parallel: {}",
        instances.len(),
        options.parallel
    );

    if options.parallel {
        instances.par_iter().map(schedule).collect()
    } else {
        instances.iter().map(schedule).collect()
    }
}
