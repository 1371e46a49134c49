use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use fsa_check::{
    automaton::{Language, Verdict, catalog::Catalog, spec::AutomatonSpec},
    batch::BatchValidator,
    config::{EngineConfig, LoggerConfig},
};

#[derive(Parser, Debug)]
#[command(name = "fsa-check")]
#[command(version = "0.1")]
#[command(about = "Check strings against finite automata", long_about = None)]
struct Args {
    /// Path to a text definition of the automaton.
    #[arg(short, long, conflicts_with = "builtin")]
    definition: Option<PathBuf>,

    /// One of the built-in automata: length, pattern, credential, email.
    #[arg(short, long, default_value_t = Catalog::Length)]
    builtin: Catalog,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide whether one string is accepted.
    Check { input: String },
    /// Show every transition taken on one string.
    Trace { input: String },
    /// Check every non-blank line of a file.
    Batch {
        file: PathBuf,
        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the formal definition of the automaton.
    Describe,
}

fn init_logging(config: &LoggerConfig) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(config.get_log_level().to_level_filter())
        .with_target(false);

    if *config.get_log_file() {
        std::fs::create_dir_all("./logs").context("failed to create log directory")?;
        let path = format!(
            "./logs/fsa_check_{}.txt",
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        );
        let file = File::create(&path).with_context(|| format!("failed to create {}", path))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn load_recognizer(args: &Args) -> anyhow::Result<Box<dyn Language + Send + Sync>> {
    match &args.definition {
        Some(path) => Ok(Box::new(AutomatonSpec::from_file(path)?)),
        None => args
            .builtin
            .recognizer()
            .with_context(|| format!("failed to build built-in automaton: {}", args.builtin)),
    }
}

fn colored_verdict(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accepted => verdict.to_string().bright_green().to_string(),
        Verdict::Rejected => verdict.to_string().bright_red().to_string(),
        Verdict::Malformed(fault) => format!("{} ({})", verdict.to_string().yellow(), fault),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = EngineConfig::from_optional_file(args.config.as_ref())?;
    init_logging(config.logger())?;

    match &args.command {
        Command::Describe => match &args.definition {
            Some(path) => print!("{}", AutomatonSpec::from_file(path)?),
            None => {
                println!("{}: {}", args.builtin, args.builtin.description());
                print!("{}", args.builtin.automaton()?);
            }
        },
        Command::Check { input } => {
            let recognizer = load_recognizer(&args)?;
            println!("{}", colored_verdict(&recognizer.evaluate(input.trim())));
        }
        Command::Trace { input } => {
            let recognizer = load_recognizer(&args)?;
            println!("{}", recognizer.trace(input.trim()));
        }
        Command::Batch { file, json } => {
            let recognizer = load_recognizer(&args)?;
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read lines: {}", file.display()))?;
            let lines = content.lines().collect::<Vec<_>>();

            let report =
                BatchValidator::new(recognizer.as_ref(), config.batch().clone()).report(&lines);

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for record in &report.records {
                    println!("{}", record);
                }
                println!("{}", report.summary);
            }
        }
    }

    Ok(())
}
