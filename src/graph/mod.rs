use std::fmt;

pub mod schedule_dag;

pub use schedule_dag::ScheduleDag;

/// The predecessor relation could not be turned into a valid DAG. No
/// schedule is produced: early/late times are undefined without a
/// topological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    UnknownPredecessor {
        task_id: String,
        predecessor_id: String,
    },
    Cycle {
        task_ids: Vec<String>,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::UnknownPredecessor {
                task_id,
                predecessor_id,
            } => write!(
                f,
                "task {task_id} references unknown predecessor {predecessor_id}"
            ),
            GraphError::Cycle { task_ids } => write!(
                f,
                "dependency cycle involving tasks: {}",
                task_ids.join(", ")
            ),
        }
    }
}

impl std::error::Error for GraphError {}
