#![allow(missing_docs, clippy::print_stdout)]
use std::env;
use std::fs;
use std::path::PathBuf;

use restling_codegen::{ApiDescriptor, ClientGenerator, GeneratorConfig};

const DESCRIPTOR: &str = "todo.yml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo::rerun-if-changed={DESCRIPTOR}");

    let api = ApiDescriptor::from_path(DESCRIPTOR)?;
    let config = GeneratorConfig::default().with_crate_path("::restling_core");
    let generation = ClientGenerator::new(config).generate(&api);

    for diagnostic in &generation.diagnostics {
        println!("cargo::warning={diagnostic}");
    }
    if !generation.is_ok() {
        return Err(format!("cannot generate clients from {DESCRIPTOR}").into());
    }

    let output = PathBuf::from(env::var("OUT_DIR")?).join("todo_client.rs");
    fs::write(output, generation.source().render()?)?;
    Ok(())
}
