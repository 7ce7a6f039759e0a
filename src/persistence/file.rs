use super::{PersistenceError, PersistenceResult};
use crate::schedule::Schedule;
use crate::task::{ScheduledTask, Task};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Import row: the columns the original upload format requires. Extra
/// columns in the file (for instance a previously exported schedule) are
/// ignored, so exports re-import as plain task lists.
#[derive(Debug, Deserialize)]
struct TaskCsvRecord {
    id: String,
    name: String,
    duration: i64,
    #[serde(default)]
    predecessors: String,
}

impl TaskCsvRecord {
    fn into_task(self) -> Task {
        Task::with_predecessors(
            self.id.trim(),
            self.name.trim(),
            self.duration,
            split_ids(&self.predecessors),
        )
    }
}

/// Export row: id, name, duration, predecessors plus every derived column.
#[derive(Debug, Serialize)]
struct ScheduleCsvRecord<'a> {
    id: &'a str,
    name: &'a str,
    duration: i64,
    predecessors: String,
    early_start: i64,
    early_finish: i64,
    late_start: i64,
    late_finish: i64,
    total_float: i64,
    is_critical: bool,
}

impl<'a> From<&'a ScheduledTask> for ScheduleCsvRecord<'a> {
    fn from(task: &'a ScheduledTask) -> Self {
        Self {
            id: &task.id,
            name: &task.name,
            duration: task.duration,
            predecessors: join_ids(&task.predecessors),
            early_start: task.early_start,
            early_finish: task.early_finish,
            late_start: task.late_start,
            late_finish: task.late_finish,
            total_float: task.total_float,
            is_critical: task.is_critical,
        }
    }
}

pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Task>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskCsvRecord>() {
        tasks.push(record?.into_task());
    }
    if tasks.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no tasks".into(),
        ));
    }
    super::validate_tasks(&tasks)?;
    Ok(tasks)
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(schedule: &Schedule, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for task in schedule.tasks() {
        writer.serialize(ScheduleCsvRecord::from(task))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_tasks_to_json<P: AsRef<Path>>(tasks: &[Task], path: P) -> PersistenceResult<()> {
    super::validate_tasks(tasks)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, tasks)?;
    Ok(())
}

pub fn load_tasks_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Task>> {
    let file = File::open(path)?;
    let tasks: Vec<Task> = serde_json::from_reader(file)?;
    super::validate_tasks(&tasks)?;
    Ok(tasks)
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, schedule)?;
    Ok(())
}

fn join_ids(values: &[String]) -> String {
    values.join(",")
}

fn split_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
