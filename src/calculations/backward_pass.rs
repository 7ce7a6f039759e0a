use crate::graph::ScheduleDag;
use crate::task::Task;
use petgraph::Direction;

pub struct BackwardPass<'a> {
    tasks: &'a [Task],
    dag: &'a ScheduleDag,
}

impl<'a> BackwardPass<'a> {
    pub fn new(tasks: &'a [Task], dag: &'a ScheduleDag) -> Self {
        Self { tasks, dag }
    }

    /// Computes `(late_start, late_finish)` per input position by walking
    /// `order` in reverse. Sink tasks anchor at `project_duration`.
    pub fn execute(&self, order: &[usize], project_duration: i64) -> Vec<(i64, i64)> {
        let mut times = vec![(0i64, 0i64); self.tasks.len()];

        for &position in order.iter().rev() {
            let node = self.dag.node(position);
            let late_finish = self
                .dag
                .graph
                .neighbors_directed(node, Direction::Outgoing)
                .map(|succ| times[self.dag.graph[succ]].0)
                .min()
                .unwrap_or(project_duration);
            let late_start = late_finish - self.tasks[position].duration;
            times[position] = (late_start, late_finish);
        }

        times
    }
}
