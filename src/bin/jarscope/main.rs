use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use jarscope::{InspectOptions, Inspector, report::UnitReport};

/// Print the structure of every compiled unit in a jar.
#[derive(Debug, Parser)]
#[command(name = "jarscope", version)]
struct Cli {
    /// Jar or zip archive to inspect
    archive: PathBuf,

    /// Debug logging; also prints class file versions
    #[arg(short, long)]
    verbose: bool,

    /// Decode entries in parallel
    #[arg(short = 'j', long)]
    parallel: bool,

    /// Treat unsupported class file versions as errors
    #[arg(long)]
    strict_versions: bool,

    /// Suffix of the entries to decode
    #[arg(long, default_value = ".class")]
    suffix: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // info+ on stderr, --verbose enables debug, RUST_LOG overrides
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("jarscope", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let options = InspectOptions {
        suffix: cli.suffix,
        parallel: cli.parallel,
        strict_versions: cli.strict_versions,
    };
    let inspector = Inspector::open(&cli.archive, options)
        .with_context(|| format!("cannot read {}", cli.archive.display()))?;
    let results = inspector.run();

    let mut out = io::stdout().lock();
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(unit) => writeln!(out, "{}", UnitReport::new(unit).verbose(cli.verbose))?,
            Err(err) => {
                failed += 1;
                log::error!("{err}");
            }
        }
    }
    out.flush()?;

    log::info!(
        "decoded {} of {} units",
        results.len() - failed,
        results.len()
    );
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
