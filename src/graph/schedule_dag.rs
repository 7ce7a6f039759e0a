use super::GraphError;
use crate::task::Task;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Dependency graph over task input positions. Edges run predecessor ->
/// successor; node weights are positions into the original task slice, so
/// tasks are always addressed by index rather than by reference.
#[derive(Debug)]
pub struct ScheduleDag {
    pub graph: DiGraph<usize, ()>,
    pub id_to_index: HashMap<String, NodeIndex>,
    nodes: Vec<NodeIndex>,
    ids: Vec<String>,
}

impl ScheduleDag {
    pub fn build(tasks: &[Task]) -> Result<Self, GraphError> {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut id_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(tasks.len());
        let mut nodes = Vec::with_capacity(tasks.len());
        let mut ids = Vec::with_capacity(tasks.len());

        for (position, task) in tasks.iter().enumerate() {
            let node_ix = graph.add_node(position);
            id_to_index.insert(task.id.clone(), node_ix);
            nodes.push(node_ix);
            ids.push(task.id.clone());
        }

        for (position, task) in tasks.iter().enumerate() {
            for predecessor in &task.predecessors {
                let Some(&source) = id_to_index.get(predecessor) else {
                    return Err(GraphError::UnknownPredecessor {
                        task_id: task.id.clone(),
                        predecessor_id: predecessor.clone(),
                    });
                };
                graph.add_edge(source, nodes[position], ());
            }
        }

        Ok(Self {
            graph,
            id_to_index,
            nodes,
            ids,
        })
    }

    pub fn node(&self, position: usize) -> NodeIndex {
        self.nodes[position]
    }

    pub fn task_count(&self) -> usize {
        self.nodes.len()
    }

    /// Kahn's algorithm with a min-heap of input positions as the ready
    /// queue, so ties among independent tasks resolve by original input
    /// order and repeated runs produce identical orderings.
    pub fn topological_order(&self) -> Result<Vec<usize>, GraphError> {
        let mut in_degree: Vec<usize> = self
            .nodes
            .iter()
            .map(|&node| {
                self.graph
                    .neighbors_directed(node, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
        for (position, &degree) in in_degree.iter().enumerate() {
            if degree == 0 {
                ready.push(Reverse(position));
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(position)) = ready.pop() {
            order.push(position);
            for successor in self
                .graph
                .neighbors_directed(self.nodes[position], Direction::Outgoing)
            {
                let succ_position = self.graph[successor];
                in_degree[succ_position] -= 1;
                if in_degree[succ_position] == 0 {
                    ready.push(Reverse(succ_position));
                }
            }
        }

        if order.len() < self.nodes.len() {
            let task_ids = in_degree
                .iter()
                .enumerate()
                .filter(|&(_, &degree)| degree > 0)
                .map(|(position, _)| self.ids[position].clone())
                .collect();
            return Err(GraphError::Cycle { task_ids });
        }

        Ok(order)
    }
}
