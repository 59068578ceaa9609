use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cachegen_core::{CompileOptions, ErrorPolicy, compile};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compile a cache hierarchy description into C++ sources.
#[derive(Parser, Debug)]
#[command(name = "cachegen", version, about, long_about = None)]
struct Cli {
    /// DSL source to compile (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Output base path; BASE.hpp and BASE.cpp are written
    #[arg(short, long, value_name = "BASE")]
    output: String,

    #[arg(long, help = "Log every matched statement with its captures")]
    debug: bool,

    #[arg(
        long,
        help = "Report every rejected statement instead of stopping at the first"
    )]
    keep_going: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    execute(cli)
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "cachegen=debug,cachegen_core=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn execute(cli: Cli) -> Result<()> {
    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {path}"))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let header_path = with_extension(&cli.output, "hpp");
    let source_path = with_extension(&cli.output, "cpp");
    let header_name = header_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid output path {}", cli.output))?
        .to_string();

    let options = CompileOptions {
        debug: cli.debug,
        policy: if cli.keep_going {
            ErrorPolicy::CollectAll
        } else {
            ErrorPolicy::FailFast
        },
    };
    let artifact = match compile(&source, &header_name, &options) {
        Ok(artifact) => artifact,
        Err(cachegen_core::CoreError::Rejected(errors)) => {
            for err in &errors {
                eprintln!("error: {err}");
            }
            anyhow::bail!("{} statement(s) rejected", errors.len());
        }
        Err(err) => return Err(err.into()),
    };

    write_output(&header_path, artifact.header.as_bytes())?;
    write_output(&source_path, artifact.source.as_bytes())?;
    info!(header = %header_path.display(), source = %source_path.display(), "outputs written");
    Ok(())
}

fn with_extension(base: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{base}.{extension}"))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}
