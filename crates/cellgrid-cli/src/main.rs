//! cellgrid CLI - drive a labeled cell grid and watch its notifications

mod script;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cellgrid_core::{EventLog, GridConfig, GridModel, GridSnapshot, LoggedEvent};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::script::{parse_script, Op};

#[derive(Parser)]
#[command(name = "cellgrid")]
#[command(
    author,
    version,
    about = "Drive a labeled cell grid and print its change notifications"
)]
struct Cli {
    #[command(flatten)]
    grid: GridArgs,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GridArgs {
    /// JSON file with grid configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Initial rows and columns
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Maximum rows and columns
    #[arg(long, global = true)]
    max_size: Option<usize>,

    /// Letter of the first column
    #[arg(long, global = true)]
    first_letter: Option<char>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a freshly constructed grid
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply commands to a grid, then print it
    Run {
        /// Script file with one command per line ("-" for stdin)
        script: Option<PathBuf>,

        /// Command to run before the script (repeatable)
        #[arg(short = 'e', long = "exec")]
        exec: Vec<String>,

        /// Also print every notification raised
        #[arg(long)]
        events: bool,

        /// Print grid and notifications as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a GridConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<LoggedEvent>>,
    grid: GridSnapshot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.grid)?;
    let model = GridModel::with_config(config).context("Invalid grid configuration")?;

    match cli.command {
        Commands::Show { json } => show(&model, json),
        Commands::Run {
            script,
            exec,
            events,
            json,
        } => run(&model, script.as_deref(), &exec, events, json),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &GridArgs) -> Result<GridConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse '{}'", path.display()))?
        }
        None => GridConfig::default(),
    };

    if let Some(size) = args.size {
        config.initial_size = size;
    }
    if let Some(max) = args.max_size {
        config.max_size = max;
    }
    if let Some(letter) = args.first_letter {
        config.first_letter = letter;
    }
    Ok(config)
}

fn show(model: &GridModel, json: bool) -> Result<()> {
    print_report(model, None, json)
}

fn run(
    model: &GridModel,
    script: Option<&Path>,
    exec: &[String],
    events: bool,
    json: bool,
) -> Result<()> {
    let mut ops = exec
        .iter()
        .map(|line| {
            line.parse::<Op>()
                .with_context(|| format!("Invalid command '{}'", line))
        })
        .collect::<Result<Vec<_>>>()?;
    if let Some(path) = script {
        ops.extend(parse_script(&read_script(path)?)?);
    }
    if ops.is_empty() {
        bail!("No commands given; pass a script file or -e <command>");
    }

    let log = EventLog::new();
    model.subscribe(log.clone());

    for op in &ops {
        let changed = op.apply(model)?;
        tracing::info!(command = %op, changed, "applied");
    }

    let recorded = (events || json).then(|| log.entries());
    print_report(model, recorded, json)
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))
    }
}

fn print_report(model: &GridModel, events: Option<Vec<LoggedEvent>>, json: bool) -> Result<()> {
    let grid = model.snapshot();

    if json {
        let report = Report {
            config: model.config(),
            events,
            grid,
        };
        let text = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", text);
        return Ok(());
    }

    if let Some(events) = events {
        for entry in &events {
            println!(
                "{}  [{}x{}]",
                entry.event, entry.row_count, entry.column_count
            );
        }
        println!();
    }
    print!("{}", grid);
    Ok(())
}
