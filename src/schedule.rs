use crate::calculations::{BackwardPass, ForwardPass};
use crate::graph::{GraphError, ScheduleDag};
use crate::task::{ScheduledTask, Task};
use crate::task_validation::{self, ValidationError};
use petgraph::Direction;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    Validation(ValidationError),
    Graph(GraphError),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Validation(err) => write!(f, "validation error: {err}"),
            ScheduleError::Graph(err) => write!(f, "graph error: {err}"),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<ValidationError> for ScheduleError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<GraphError> for ScheduleError {
    fn from(value: GraphError) -> Self {
        Self::Graph(value)
    }
}

/// A fully computed schedule. Tasks keep their input order; the
/// topological order used during computation is internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    tasks: Vec<ScheduledTask>,
    project_duration: i64,
    critical_path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub task_count: usize,
    pub critical_count: usize,
    pub project_duration: i64,
    pub critical_path: Vec<String>,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}", self.project_duration));
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }
}

impl Schedule {
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn project_duration(&self) -> i64 {
        self.project_duration
    }

    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    pub fn find_task(&self, task_id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn critical_tasks(&self) -> Vec<&ScheduledTask> {
        self.tasks.iter().filter(|task| task.is_critical).collect()
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            task_count: self.tasks.len(),
            critical_count: self.tasks.iter().filter(|t| t.is_critical).count(),
            project_duration: self.project_duration,
            critical_path: self.critical_path.clone(),
        }
    }

    /// Tabular projection for rendering and export collaborators: one row
    /// per task in input order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(10);

        let ids: Vec<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
        columns.push(Series::new(PlSmallStr::from_static("id"), ids).into_column());

        let names: Vec<&str> = self.tasks.iter().map(|t| t.name.as_str()).collect();
        columns.push(Series::new(PlSmallStr::from_static("name"), names).into_column());

        let durations: Vec<i64> = self.tasks.iter().map(|t| t.duration).collect();
        columns.push(Series::new(PlSmallStr::from_static("duration"), durations).into_column());

        let predecessor_rows: Vec<Series> = self
            .tasks
            .iter()
            .map(|t| {
                let preds: Vec<&str> = t.predecessors.iter().map(|p| p.as_str()).collect();
                Series::new(PlSmallStr::from_static(""), preds)
            })
            .collect();
        let predecessors: ListChunked = predecessor_rows.into_iter().collect();
        columns.push(
            predecessors
                .into_series()
                .with_name(PlSmallStr::from_static("predecessors"))
                .into_column(),
        );

        let early_starts: Vec<i64> = self.tasks.iter().map(|t| t.early_start).collect();
        columns.push(Series::new(PlSmallStr::from_static("early_start"), early_starts).into_column());

        let early_finishes: Vec<i64> = self.tasks.iter().map(|t| t.early_finish).collect();
        columns.push(
            Series::new(PlSmallStr::from_static("early_finish"), early_finishes).into_column(),
        );

        let late_starts: Vec<i64> = self.tasks.iter().map(|t| t.late_start).collect();
        columns.push(Series::new(PlSmallStr::from_static("late_start"), late_starts).into_column());

        let late_finishes: Vec<i64> = self.tasks.iter().map(|t| t.late_finish).collect();
        columns.push(
            Series::new(PlSmallStr::from_static("late_finish"), late_finishes).into_column(),
        );

        let floats: Vec<i64> = self.tasks.iter().map(|t| t.total_float).collect();
        columns.push(Series::new(PlSmallStr::from_static("total_float"), floats).into_column());

        let critical: Vec<bool> = self.tasks.iter().map(|t| t.is_critical).collect();
        columns.push(Series::new(PlSmallStr::from_static("is_critical"), critical).into_column());

        DataFrame::new(columns)
    }
}

/// Computes a full CPM schedule for `tasks`. Pure function: the input is
/// never mutated and no state survives between calls.
pub fn compute_schedule(tasks: &[Task]) -> Result<Schedule, ScheduleError> {
    task_validation::validate_task_collection(tasks)?;

    let dag = ScheduleDag::build(tasks)?;
    let order = dag.topological_order()?;

    let early = ForwardPass::new(tasks, &dag).execute(&order);
    let project_duration = early.iter().map(|&(_, finish)| finish).max().unwrap_or(0);
    let late = BackwardPass::new(tasks, &dag).execute(&order, project_duration);

    let scheduled: Vec<ScheduledTask> = tasks
        .iter()
        .enumerate()
        .map(|(position, task)| ScheduledTask::from_parts(task, early[position], late[position]))
        .collect();

    let critical_path = extract_critical_path(&dag, &scheduled);

    Ok(Schedule {
        tasks: scheduled,
        project_duration,
        critical_path,
    })
}

/// Walks one maximal chain of critical tasks. The start is the critical
/// task without a critical predecessor that appears earliest in the input;
/// each step follows the earliest-input critical successor whose early
/// start meets the current early finish, so the chain's span always equals
/// the project duration. Parallel critical chains stay visible through the
/// per-task `is_critical` flags.
fn extract_critical_path(dag: &ScheduleDag, scheduled: &[ScheduledTask]) -> Vec<String> {
    let start = scheduled.iter().enumerate().position(|(position, task)| {
        task.is_critical
            && !dag
                .graph
                .neighbors_directed(dag.node(position), Direction::Incoming)
                .any(|pred| scheduled[dag.graph[pred]].is_critical)
    });

    let Some(mut current) = start else {
        return Vec::new();
    };

    let mut path = vec![scheduled[current].id.clone()];
    loop {
        let finish = scheduled[current].early_finish;
        let next = dag
            .graph
            .neighbors_directed(dag.node(current), Direction::Outgoing)
            .map(|succ| dag.graph[succ])
            .filter(|&position| {
                scheduled[position].is_critical && scheduled[position].early_start == finish
            })
            .min();
        match next {
            Some(position) => {
                path.push(scheduled[position].id.clone());
                current = position;
            }
            None => break,
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, duration: i64, preds: &[&str]) -> Task {
        Task::with_predecessors(
            id,
            format!("Task {id}"),
            duration,
            preds.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn critical_path_prefers_earliest_input_position_among_parallel_chains() {
        // Two chains of equal length; both fully critical. The reported
        // chain must start from the earlier input row.
        let tasks = vec![
            task("A", 4, &[]),
            task("B", 4, &[]),
            task("A2", 4, &["A"]),
            task("B2", 4, &["B"]),
        ];
        let schedule = compute_schedule(&tasks).unwrap();
        assert_eq!(schedule.project_duration(), 8);
        assert_eq!(schedule.critical_tasks().len(), 4);
        assert_eq!(schedule.critical_path(), ["A", "A2"]);
    }

    #[test]
    fn critical_path_skips_critical_successors_with_later_starts() {
        // C is critical but only reachable from A across idle time; the
        // chain through B is the one whose durations sum to the total.
        let tasks = vec![
            task("A", 2, &[]),
            task("B", 3, &["A"]),
            task("C", 5, &["A", "B"]),
        ];
        let schedule = compute_schedule(&tasks).unwrap();
        assert_eq!(schedule.critical_path(), ["A", "B", "C"]);
    }

    #[test]
    fn summary_renders_one_line() {
        let tasks = vec![task("A", 3, &[]), task("B", 2, &["A"])];
        let summary = compute_schedule(&tasks).unwrap().summary();
        assert_eq!(
            summary.to_cli_summary(),
            "tasks=2, critical=2, duration=5, crit_path=A->B"
        );
    }
}
