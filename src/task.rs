use serde::{Deserialize, Serialize};

/// A unit of schedulable work as supplied by the caller. The scheduler
/// never mutates these; it derives one [`ScheduledTask`] per input task on
/// every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub duration: i64,
    #[serde(default)]
    pub predecessors: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessors: Vec::new(),
        }
    }

    pub fn with_predecessors(
        id: impl Into<String>,
        name: impl Into<String>,
        duration: i64,
        predecessors: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessors,
        }
    }
}

/// A task annotated with the times derived by the forward and backward
/// passes. `total_float` is `late_start - early_start`; zero float marks
/// the task critical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: String,
    pub name: String,
    pub duration: i64,
    pub predecessors: Vec<String>,
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    pub total_float: i64,
    pub is_critical: bool,
}

impl ScheduledTask {
    pub(crate) fn from_parts(task: &Task, early: (i64, i64), late: (i64, i64)) -> Self {
        let (early_start, early_finish) = early;
        let (late_start, late_finish) = late;
        let total_float = late_start - early_start;
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            duration: task.duration,
            predecessors: task.predecessors.clone(),
            early_start,
            early_finish,
            late_start,
            late_finish,
            total_float,
            is_critical: total_float == 0,
        }
    }
}
