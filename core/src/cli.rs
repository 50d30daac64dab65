use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::interpreter::{Action, Checkpoint, Instruction, Interpreter, ScriptScope, Stepper, Turn};

#[derive(Parser)]
#[command(name = "gds")]
#[command(about = "GDS - resumable dialogue script interpreter", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a script, printing the dialog of each turn
    Run {
        /// Script file (JSON instruction tree)
        script: PathBuf,

        /// Run every turn without waiting for Enter
        #[arg(short = 'a', long = "all")]
        all: bool,

        /// Checkpoint file written after each turn (overrides config)
        #[arg(long)]
        checkpoint: Option<PathBuf>,

        /// Continue from the checkpoint file instead of starting over
        #[arg(long)]
        resume: bool,
    },

    /// Print every traversal event of a script
    Trace {
        /// Script file (JSON instruction tree)
        script: PathBuf,
    },

    /// Parse a script and count its instructions by kind
    Check {
        /// Script file (JSON instruction tree)
        script: PathBuf,
    },
}

/// Parse arguments, load configuration and dispatch the subcommand
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            script,
            all,
            checkpoint,
            resume,
        } => {
            let checkpoint = checkpoint.or_else(|| config.checkpoint_path.clone());
            run_script(&script, &config, all, checkpoint.as_deref(), resume)
        }
        Commands::Trace { script } => trace_script(&script),
        Commands::Check { script } => check_script(&script),
    }
}

fn load_script(path: &Path) -> Result<Instruction> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    Instruction::from_json(&json)
        .with_context(|| format!("Failed to parse script {}", path.display()))
}

fn run_script(
    path: &Path,
    config: &Config,
    all: bool,
    checkpoint_path: Option<&Path>,
    resume: bool,
) -> Result<()> {
    let script = load_script(path)?;

    let mut interpreter = match (resume, checkpoint_path) {
        (true, Some(checkpoint_path)) => {
            let json = fs::read_to_string(checkpoint_path).with_context(|| {
                format!("Failed to read checkpoint {}", checkpoint_path.display())
            })?;
            let checkpoint: Checkpoint = serde_json::from_str(&json)
                .with_context(|| format!("Invalid checkpoint {}", checkpoint_path.display()))?;
            info!(checkpoint = %checkpoint_path.display(), "Resuming script");
            Interpreter::resume(&script, checkpoint)?
        }
        (true, None) => {
            bail!("--resume needs a checkpoint file (--checkpoint or checkpoint_path in config)")
        }
        (false, _) => Interpreter::new(&script),
    };

    let stdin = io::stdin();
    let mut turn_count = 0usize;

    loop {
        match interpreter.next()? {
            Turn::Done => break,
            Turn::Yielded(scope) => {
                turn_count += 1;
                print_turn(scope, config.echo_vars)?;
            }
        }

        if let Some(checkpoint_path) = checkpoint_path {
            let json = serde_json::to_string_pretty(&interpreter.checkpoint())?;
            fs::write(checkpoint_path, json).with_context(|| {
                format!("Failed to write checkpoint {}", checkpoint_path.display())
            })?;
            debug!(checkpoint = %checkpoint_path.display(), "Checkpoint written");
        }

        if !all && !interpreter.is_done() {
            print!("-- press Enter to continue --");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // stdin closed: leave the run where it paused
                break;
            }
        }
    }

    info!(turns = turn_count, "Script stopped");
    Ok(())
}

fn print_turn(scope: &ScriptScope, echo_vars: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();

    if !scope.dialog.is_empty() {
        writeln!(stdout, "{}", scope.dialog)?;
    }

    if echo_vars {
        let vars: BTreeMap<_, _> = scope.vars.iter().collect();
        for (name, value) in vars {
            writeln!(stdout, "  {} = {}", name, value)?;
        }
    }

    Ok(())
}

fn trace_script(path: &Path) -> Result<()> {
    let script = load_script(path)?;
    let mut stepper = Stepper::new(&script);

    for event in stepper.events() {
        let event = event?;
        let kind = event.node.map(Instruction::kind).unwrap_or("-");
        match event.path {
            Some(path) => println!("{:<6} {:<12} {:?}", format!("{:?}", event.action), kind, path),
            None => println!("{:?}", event.action),
        }
    }

    Ok(())
}

fn check_script(path: &Path) -> Result<()> {
    let script = load_script(path)?;
    let mut stepper = Stepper::new(&script);
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();

    for event in stepper.events() {
        let event = event?;
        // Exit revisits a parent that was already counted
        if matches!(event.action, Action::Start | Action::Enter | Action::Skip) {
            if let Some(node) = event.node {
                *counts.entry(node.kind()).or_default() += 1;
            }
        }
    }

    println!("{}: ok", path.display());
    for (kind, count) in counts {
        println!("  {:<12} {}", kind, count);
    }

    Ok(())
}
