use std::fs;

use anyhow::Result;
use jobshop::generator::{generate_instance, GeneratorOptions};
use jsp_lib_parser::{structs::JspLibProblem, write_jsp_lib};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::Generate;

pub fn generate(generate: Generate) -> Result<()> {
    let mut rng = match generate.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let options = GeneratorOptions {
        jobs: generate.jobs,
        machines: generate.machines,
        min_duration: generate.min_duration,
        max_duration: generate.max_duration,
    };
    let instance = generate_instance(&options, &mut rng)?;

    fs::write(&generate.file, write_jsp_lib(&JspLibProblem::from(&instance)))?;

    info!(
        "Wrote {}x{} instance to: {:?}",
        instance.jobs(),
        instance.machines(),
        generate.file
    );

    Ok(())
}
