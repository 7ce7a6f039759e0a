use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if task.id.trim().is_empty() {
        return Err(ValidationError::new("task is missing an id"));
    }

    if task.duration < 0 {
        return Err(ValidationError::new(format!(
            "task {} has negative duration {}",
            task.id, task.duration
        )));
    }

    for predecessor in &task.predecessors {
        if predecessor.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "task {} has a blank predecessor id",
                task.id
            )));
        }
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        validate_task(task)?;
        if !seen_ids.insert(task.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }
    Ok(())
}
