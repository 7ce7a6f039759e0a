use crate::graph::ScheduleDag;
use crate::task::Task;
use petgraph::Direction;

pub struct ForwardPass<'a> {
    tasks: &'a [Task],
    dag: &'a ScheduleDag,
}

impl<'a> ForwardPass<'a> {
    pub fn new(tasks: &'a [Task], dag: &'a ScheduleDag) -> Self {
        Self { tasks, dag }
    }

    /// Computes `(early_start, early_finish)` per input position. `order`
    /// must be a topological ordering of the DAG, so every predecessor is
    /// resolved before the tasks that depend on it.
    pub fn execute(&self, order: &[usize]) -> Vec<(i64, i64)> {
        let mut times = vec![(0i64, 0i64); self.tasks.len()];

        for &position in order {
            let node = self.dag.node(position);
            let early_start = self
                .dag
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|pred| times[self.dag.graph[pred]].1)
                .max()
                .unwrap_or(0);
            let early_finish = early_start + self.tasks[position].duration;
            times[position] = (early_start, early_finish);
        }

        times
    }
}
