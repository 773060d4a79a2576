//! `intcode` — run and format Intcode programs.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use intcode_cli::config::CONFIG_FILE;
use intcode_cli::runner::{self, LineInput, LineOutput};
use intcode_cli::{CliError, IntcodeConfig};
use intcode_vm::{InputSource, OutputSink};

fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}
fn status_label(label: &str) -> String {
    format!("\x1b[1;32m{:>12}\x1b[0m", label)
}

#[derive(Parser)]
#[command(name = "intcode", version, about = "Run Intcode programs")]
struct Cli {
    /// Config file (default: search for intcode.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program file; outputs are printed one per line
    Run {
        /// Path to the comma-separated program
        file: PathBuf,

        /// Input values, comma-separated (default: read lines from stdin)
        #[arg(long)]
        input: Option<String>,

        /// Words of memory to allocate
        #[arg(long)]
        memory: Option<usize>,

        /// Grow memory on writes past the end
        #[arg(long)]
        growable: bool,

        /// Fail after this many instructions
        #[arg(long)]
        max_instructions: Option<u64>,

        /// Print final memory as JSON to stderr
        #[arg(long)]
        dump_memory: bool,
    },
    /// Print a program in canonical form
    Fmt {
        file: PathBuf,

        /// Exit 1 if the file is not already canonical
        #[arg(long)]
        check: bool,
    },
    /// Create an intcode.toml config file in the current directory
    Init,
}

fn main() {
    intcode_cli::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            input,
            memory,
            growable,
            max_instructions,
            dump_memory,
        } => load_config(cli.config.as_deref())
            .map(|cfg| cfg.with_overrides(memory, growable, max_instructions))
            .and_then(|cfg| cmd_run(&file, &cfg, input.as_deref(), dump_memory)),
        Commands::Fmt { file, check } => cmd_fmt(&file, check),
        Commands::Init => cmd_init(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", red("error:"), e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<IntcodeConfig, CliError> {
    match path {
        Some(p) => IntcodeConfig::load_from(p),
        None => IntcodeConfig::load(),
    }
}

fn cmd_run(
    file: &Path,
    cfg: &IntcodeConfig,
    input: Option<&str>,
    dump_memory: bool,
) -> Result<(), CliError> {
    let program = runner::read_program(file)?;
    let input: Arc<dyn InputSource> = match input {
        Some(values) => Arc::new(runner::queue_input(values)?),
        None => Arc::new(LineInput::new(io::BufReader::new(io::stdin()))),
    };
    let output: Arc<dyn OutputSink> = Arc::new(LineOutput::new(io::stdout()));

    let report = runner::execute(program, cfg, input, output);
    if dump_memory {
        eprintln!("{}", runner::memory_json(&report.memory)?);
    }
    Ok(report.result?)
}

fn cmd_fmt(file: &Path, check: bool) -> Result<(), CliError> {
    let source = std::fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let canonical = intcode_core::Program::parse(&source)?.to_string();
    if check {
        if source.trim_end() != canonical {
            eprintln!("{} {}", status_label("Unformatted"), file.display());
            std::process::exit(1);
        }
        return Ok(());
    }
    println!("{}", canonical);
    Ok(())
}

fn cmd_init() -> Result<(), CliError> {
    let path = PathBuf::from(CONFIG_FILE);
    if path.exists() {
        return Err(CliError::AlreadyExists(path));
    }
    std::fs::write(&path, IntcodeConfig::default_template()).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    println!("{} {}", status_label("Created"), CONFIG_FILE);
    Ok(())
}
