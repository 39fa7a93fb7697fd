use anyhow::Context;
use clap::Parser;
use pystubber::{ModuleDescriptor, Result, StubConfig, StubFile};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Python source file, or a JSON module descriptor with --descriptor
    path: PathBuf,

    /// Module name for the stub header; defaults to the file name
    #[arg(long)]
    module_name: Option<String>,

    /// Read PATH as a module descriptor dumped by live introspection
    #[arg(long, default_value_t = false)]
    descriptor: bool,

    /// pyproject.toml with a [tool.pystubber] table
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the stub to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// `pkg/mod.py` is `mod`, `pkg/__init__.py` is `pkg`.
fn module_name_of(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("cannot derive a module name from {}", path.display()))?;
    if stem != "__init__" {
        return Ok(stem.to_string());
    }
    path.canonicalize()?
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a package name from {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StubConfig::from_pyproject_toml(path)?,
        None => StubConfig::default(),
    };
    let input = fs::read_to_string(&cli.path)
        .with_context(|| format!("cannot read {}", cli.path.display()))?;

    let stub = if cli.descriptor {
        let mut descriptor = ModuleDescriptor::from_json(&input)?;
        if let Some(name) = cli.module_name {
            descriptor.name = name;
        }
        StubFile::from_descriptor(&descriptor, &config)?
    } else {
        let name = match cli.module_name {
            Some(name) => name,
            None => module_name_of(&cli.path)?,
        };
        StubFile::from_source(&name, &input, &config)?
    };

    if !stub.warnings.is_empty() {
        log::info!(
            "{} warning(s) while generating the stub of `{}`",
            stub.warnings.len(),
            stub.module_name
        );
    }
    match &cli.output {
        Some(dest) => stub.write(dest)?,
        None => io::stdout().write_all(stub.text.as_bytes())?,
    }
    Ok(())
}
