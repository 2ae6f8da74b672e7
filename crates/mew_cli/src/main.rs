//! mew: Command-line driver for the Mew front end.
//!
//! Usage:
//!   mew check [options] [file...]
//!
//! Without files, the nearest mew.json above the working directory names
//! the sources to check.

mod render;

use clap::{Args, Parser as ClapParser, Subcommand};
use mew_compiler::{printer, Compilation, CompilationOptions};
use mew_config::{find_config, load_config, ConfigError, ProjectConfig};
use render::DiagnosticRenderer;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "mew", version, about = "Front end for the Mew scripting language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and bind source files, reporting diagnostics.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Mew source files to check.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to a mew.json project file.
    #[arg(short = 'p', long = "project", value_name = "PATH")]
    project: Option<PathBuf>,

    /// Compilation name, overriding the project file.
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Print the lowered program after checking.
    #[arg(long)]
    dump: bool,

    /// Print each syntax tree after parsing.
    #[arg(long = "dump-syntax")]
    dump_syntax: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Log compiler phases to stderr.
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no input files; pass files or a mew.json project")]
    NoInput,
}

/// The files to check and the configuration that applies to them.
struct Inputs {
    config: ProjectConfig,
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => {
            init_logging(args.verbose);
            match run_check(&args) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::from(1),
                Err(error) => {
                    eprintln!("error: {error}");
                    ExitCode::from(2)
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("MEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether the check finished without errors.
fn run_check(args: &CheckArgs) -> Result<bool, CliError> {
    let start = Instant::now();
    let inputs = resolve_inputs(args)?;
    if inputs.files.is_empty() {
        return Err(CliError::NoInput);
    }

    let sources = read_sources(&inputs.files)?;
    let name = args.name.clone().unwrap_or_else(|| inputs.config.compilation_name());
    let options = CompilationOptions {
        library: inputs.config.library.clone(),
        max_synchronizations: inputs.config.max_sync_errors,
    };
    info!(%name, files = sources.len(), "checking");

    let compilation = Compilation::parse_sources(name, sources, options);

    if args.dump_syntax {
        for tree in compilation.syntax_trees() {
            println!("// {}", tree.path());
            print!("{}", tree.dump());
        }
    }

    let diagnostics = compilation.diagnostics();
    let renderer = DiagnosticRenderer::new(!args.no_color && std::io::stderr().is_terminal());
    for diagnostic in diagnostics {
        let source = compilation
            .syntax_trees()
            .iter()
            .find(|tree| tree.path() == &diagnostic.location.path)
            .map(|tree| tree.source());
        eprint!("{}", renderer.render(diagnostic, source));
    }

    if args.dump {
        print!("{}", printer::print_model(&compilation.semantic_model()));
    }

    let errors = diagnostics.error_count();
    debug!(elapsed = ?start.elapsed(), "check finished");
    if errors > 0 {
        eprintln!("\nFound {} error{}.", errors, if errors == 1 { "" } else { "s" });
        return Ok(false);
    }
    Ok(true)
}

/// Files named on the command line come after those listed by the project.
fn resolve_inputs(args: &CheckArgs) -> Result<Inputs, CliError> {
    if let Some(project) = &args.project {
        return project_inputs(project, &args.files);
    }

    if !args.files.is_empty() {
        return Ok(Inputs {
            config: ProjectConfig::default(),
            files: args.files.clone(),
        });
    }

    let cwd = std::env::current_dir().map_err(|source| CliError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    match find_config(&cwd) {
        Some(project) => project_inputs(&project, &[]),
        None => Err(CliError::NoInput),
    }
}

fn project_inputs(project: &Path, extra: &[PathBuf]) -> Result<Inputs, CliError> {
    let config = load_config(project)?;
    let base = project.parent().unwrap_or_else(|| Path::new("."));
    let mut files = config.source_paths(base);
    files.extend(extra.iter().cloned());
    debug!(project = %project.display(), files = files.len(), "resolved project inputs");
    Ok(Inputs { config, files })
}

fn read_sources(files: &[PathBuf]) -> Result<Vec<(String, String)>, CliError> {
    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}
