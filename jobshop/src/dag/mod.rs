use hashbrown::HashMap;
use log::trace;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::instance::MachineId;
use crate::schedule::{Schedule, ScheduledOperation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcKind {
    /// Consecutive steps of one job.
    Job,
    /// Consecutive operations on one machine.
    Machine,
}

type Graph = DiGraph<ScheduledOperation, ArcKind>;

/// A schedule seen as a precedence graph over its operations.
pub struct SolutionGraph {
    graph: Graph,
}

impl SolutionGraph {
    pub fn new(schedule: &Schedule) -> Self {
        let mut graph = Graph::new();
        let mut operation_to_nodes: HashMap<(usize, usize), NodeIndex> = HashMap::new();

        for operation in schedule.committed_operations() {
            let node = graph.add_node(operation);
            operation_to_nodes.insert((operation.job, operation.step), node);
        }

        for operation in schedule.operations().filter(|operation| operation.step > 0) {
            let from = operation_to_nodes.get(&(operation.job, operation.step - 1));
            let to = operation_to_nodes.get(&(operation.job, operation.step));

            if let (Some(&from), Some(&to)) = (from, to) {
                graph.add_edge(from, to, ArcKind::Job);
            }
        }

        for machine in MachineId::all(schedule.machines()) {
            for pair in schedule.machine_timeline(machine).windows(2) {
                let from = operation_to_nodes.get(&(pair[0].job, pair[0].step));
                let to = operation_to_nodes.get(&(pair[1].job, pair[1].step));

                if let (Some(&from), Some(&to)) = (from, to) {
                    graph.add_edge(from, to, ArcKind::Machine);
                }
            }
        }

        trace!(
            "solution graph: {} operations, {} arcs",
            graph.node_count(),
            graph.edge_count()
        );

        Self { graph }
    }

    pub fn operations(&self) -> impl Iterator<Item = &ScheduledOperation> {
        self.graph.node_weights()
    }

    pub fn arcs(&self) -> Vec<(ScheduledOperation, ScheduledOperation, ArcKind)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()],
                    self.graph[edge.target()],
                    *edge.weight(),
                )
            })
            .collect()
    }

    /// Longest chain of operations, weighted by duration.
    ///
    /// For an SPT schedule its length is the makespan. Returns `None` for an
    /// empty schedule or if the arcs contain a cycle.
    pub fn critical_path(&self) -> Option<Vec<ScheduledOperation>> {
        let order = algo::toposort(&self.graph, None).ok()?;

        // finish time along the longest chain ending in a node, plus the node before it
        let mut finish: Vec<(u64, Option<NodeIndex>)> = vec![(0, None); self.graph.node_count()];

        for node in order {
            let (head, predecessor) = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|predecessor| (finish[predecessor.index()].0, Some(predecessor)))
                .max_by_key(|(time, _)| *time)
                .unwrap_or((0, None));

            finish[node.index()] = (head + self.graph[node].duration(), predecessor);
        }

        let (last, _) = finish
            .iter()
            .enumerate()
            .max_by_key(|(_, (time, _))| *time)?;

        let mut path = vec![];
        let mut current = Some(NodeIndex::new(last));

        while let Some(node) = current {
            path.push(self.graph[node]);
            current = finish[node.index()].1;
        }

        path.reverse();
        Some(path)
    }
}

/// Sum of durations along a chain of operations.
pub fn path_length(path: &[ScheduledOperation]) -> u64 {
    path.iter().map(ScheduledOperation::duration).sum()
}
