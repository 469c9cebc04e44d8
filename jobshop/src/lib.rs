pub mod dag;
pub mod generator;
pub mod instance;
pub mod schedule;
pub mod scheduler;

pub use instance::{Instance, MachineId, MalformedInstance};
pub use schedule::{Schedule, ScheduleViolation, ScheduledOperation};
pub use scheduler::{schedule, schedule_batch, spt_order, SchedulerOptions};
