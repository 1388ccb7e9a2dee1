#![allow(missing_docs)]
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{Level, error, info, warn};

use restling_codegen::{ApiDescriptor, ClientGenerator, GeneratorConfig};

const HELP: &str = "\
Generates REST clients from a service descriptor

USAGE:
  restling [OPTIONS] <DESCRIPTOR>

ARGS:
  <DESCRIPTOR>          a .yml, .yaml or .json service descriptor

OPTIONS:
  -o, --output <FILE>   write the generated source to FILE instead of stdout
  --crate-path <PATH>   path of the runtime crate in generated code [default: restling_core]
  --type-suffix <NAME>  suffix of generated client types [default: Client]
  --debug               log each generated service and method
  -h, --help            print this help
";

fn main() -> Result<()> {
    let Some(args) = CliArgs::parse(pico_args::Arguments::from_env()).context("parsing arguments")?
    else {
        io::stdout().write_all(HELP.as_bytes())?;
        return Ok(());
    };

    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let api = ApiDescriptor::from_path(&args.descriptor)
        .with_context(|| format!("loading {}", args.descriptor.display()))?;
    let generation = ClientGenerator::new(args.config()).generate(&api);
    let source = generation
        .source()
        .render()
        .context("rendering generated source")?;

    match &args.output {
        Some(output) => {
            fs::write(output, &source)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(
                output = %output.display(),
                clients = generation.clients.len(),
                "clients generated"
            );
        }
        None => io::stdout()
            .lock()
            .write_all(source.as_bytes())
            .context("writing to stdout")?,
    }

    for diagnostic in &generation.diagnostics {
        error!(%diagnostic, "method not generated");
    }
    if !generation.is_ok() {
        bail!(
            "{} method(s) could not be generated",
            generation.diagnostics.len()
        );
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    descriptor: PathBuf,
    output: Option<PathBuf>,
    crate_path: Option<String>,
    type_suffix: Option<String>,
    debug: bool,
}

impl CliArgs {
    /// Parses the arguments, `None` when help is requested.
    fn parse(mut pargs: pico_args::Arguments) -> Result<Option<Self>> {
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let output = pargs
            .opt_value_from_str(["-o", "--output"])
            .context("parsing output argument")?;
        let crate_path = pargs
            .opt_value_from_str("--crate-path")
            .context("parsing crate path argument")?;
        let type_suffix = pargs
            .opt_value_from_str("--type-suffix")
            .context("parsing type suffix argument")?;
        let debug = pargs.contains("--debug");
        let descriptor = pargs
            .free_from_str()
            .context("missing descriptor file, see --help")?;

        let result = Self {
            descriptor,
            output,
            crate_path,
            type_suffix,
            debug,
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            warn!(?remaining, "Warning: unused arguments left");
        }
        Ok(Some(result))
    }

    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        if let Some(crate_path) = &self.crate_path {
            config = config.with_crate_path(crate_path);
        }
        if let Some(type_suffix) = &self.type_suffix {
            config = config.with_type_suffix(type_suffix);
        }
        config
    }
}
