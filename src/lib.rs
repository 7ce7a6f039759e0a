pub mod calculations;
pub mod graph;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod sample;
pub mod schedule;
pub mod task;
pub mod task_validation;

pub use graph::GraphError;
pub use persistence::PersistenceError;
pub use sample::sample_project;
pub use schedule::{Schedule, ScheduleError, ScheduleSummary, compute_schedule};
pub use task::{ScheduledTask, Task};
pub use task_validation::ValidationError;
