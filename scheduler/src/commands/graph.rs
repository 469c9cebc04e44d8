use anyhow::{anyhow, Result};
use jobshop::dag::{path_length, ArcKind, SolutionGraph};
use jobshop::{schedule, Schedule, ScheduledOperation};
use log::{debug, info};
use std::{borrow::Cow, collections::HashMap, collections::HashSet, fs, path::PathBuf};

use super::load_instance;

pub fn graph(input_path: PathBuf, output_path: PathBuf) -> Result<()> {
    let instance = load_instance(&input_path)?;
    let schedule = schedule(&instance);

    let name = input_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let edges = Edges::new(&name, &schedule)?;

    let mut output_file = fs::File::create(output_path.clone())?;
    dot::render(&edges, &mut output_file)?;

    info!("Wrote graphviz dot file to: {:?}", output_path);

    Ok(())
}

/// (job, step)
type Nd = (usize, usize);
type Ed = (Nd, Nd, ArcKind);

struct Edges {
    graph_id: dot::Id<'static>,
    operations: HashMap<Nd, ScheduledOperation>,
    critical: HashSet<Nd>,
    arcs: Vec<Ed>,
}

impl Edges {
    fn new(name: &str, schedule: &Schedule) -> Result<Self> {
        let solution_graph = SolutionGraph::new(schedule);

        let critical_path = solution_graph.critical_path().unwrap_or_default();
        debug!(
            "critical path of length {}: {:?}",
            path_length(&critical_path),
            critical_path
                .iter()
                .map(|operation| (operation.job, operation.step))
                .collect::<Vec<_>>()
        );

        let name = name.replace(|c: char| !c.is_ascii_alphanumeric(), "_");
        let graph_id = dot::Id::new(format!("jobshop_{name}"))
            .map_err(|_| anyhow!("could not build a graph id from {name:?}"))?;

        Ok(Self {
            graph_id,
            operations: solution_graph
                .operations()
                .map(|operation| ((operation.job, operation.step), *operation))
                .collect(),
            critical: critical_path
                .iter()
                .map(|operation| (operation.job, operation.step))
                .collect(),
            arcs: solution_graph
                .arcs()
                .into_iter()
                .map(|(from, to, kind)| ((from.job, from.step), (to.job, to.step), kind))
                .collect(),
        })
    }
}

impl<'a> dot::Labeller<'a, Nd, Ed> for Edges {
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new(self.graph_id.as_slice()).expect("graph id was validated on construction")
    }

    fn node_id(&'a self, n: &Nd) -> dot::Id<'a> {
        let id = format!("J{}_S{}", n.0 + 1, n.1 + 1);
        dot::Id::new(id).expect("Failed to label graph node")
    }

    fn node_label(&'a self, n: &Nd) -> dot::LabelText<'a> {
        match self.operations.get(n) {
            Some(operation) => dot::LabelText::label(format!(
                "J{} {} [{}, {})",
                operation.job + 1,
                operation.machine,
                operation.start,
                operation.end
            )),
            None => dot::LabelText::label(format!("J{} step {}", n.0 + 1, n.1 + 1)),
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<dot::LabelText<'a>> {
        self.critical
            .contains(n)
            .then(|| dot::LabelText::label("red"))
    }

    fn edge_style(&'a self, e: &Ed) -> dot::Style {
        match e.2 {
            ArcKind::Job => dot::Style::None,
            ArcKind::Machine => dot::Style::Dashed,
        }
    }
}

impl<'a> dot::GraphWalk<'a, Nd, Ed> for Edges {
    fn nodes(&self) -> dot::Nodes<'a, Nd> {
        let mut nodes: Vec<Nd> = self.operations.keys().copied().collect();
        nodes.sort_unstable();
        Cow::Owned(nodes)
    }

    fn edges(&'a self) -> dot::Edges<'a, Ed> {
        let edges = &self.arcs;
        Cow::Borrowed(&edges[..])
    }

    fn source(&self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&self, e: &Ed) -> Nd {
        e.1
    }
}
