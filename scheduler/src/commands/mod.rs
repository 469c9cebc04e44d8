use std::{fs, path::Path};

use anyhow::{Context, Result};
use jobshop::Instance;
use jsp_lib_parser::parse_jsp_lib;
use log::trace;

mod benchmark;
mod gantt;
mod generate;
mod graph;
mod schedule;

pub use benchmark::benchmark;
pub use gantt::gantt;
pub use generate::generate;
pub use graph::graph;
pub use schedule::schedule;

/// Reads, parses and validates one instance file.
pub(crate) fn load_instance(path: &Path) -> Result<Instance> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("could not read {path:?}"))?;
    trace!("input file contents: {contents}");

    let problem = parse_jsp_lib(&contents).with_context(|| format!("could not parse {path:?}"))?;
    trace!("parsed problem: {problem:#?}");

    Instance::try_from(problem).with_context(|| format!("malformed instance in {path:?}"))
}
