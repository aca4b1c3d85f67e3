use clap::{Parser as ClapParser, Subcommand};
use querytree::cli::{self, CliError, VisitOptions, WarningsOptions};
use querytree::output::{to_text, to_text_pretty};
use std::collections::HashMap;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "querytree")]
#[command(about = "querytree - rewrite query expression trees and resolve warning configuration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inline parameters and fold constants in an expression tree
    Visit {
        /// Expression tree as JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Parameter value to inline, as name=value (repeatable)
        #[arg(short = 'P', long = "param")]
        params: Vec<String>,

        /// Do not fold constants
        #[arg(long)]
        no_fold: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Print the rewritten tree as query text instead of JSON
        #[arg(short, long)]
        text: bool,
    },

    /// Print the resolved behavior of every known warning event
    Warnings {
        /// Warnings settings JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Event ids that raise an error (repeatable)
        #[arg(long)]
        throw_on: Vec<String>,

        /// Event ids that are logged (repeatable)
        #[arg(long)]
        log_on: Vec<String>,

        /// Event ids that are ignored (repeatable)
        #[arg(long)]
        ignore: Vec<String>,

        /// Register the in-memory provider with this store name
        #[arg(long)]
        in_memory: Option<String>,
    },

    /// List known warning event ids
    Events,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QUERYTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Visit {
            input,
            params,
            no_fold,
            pretty,
            text,
        } => run_visit(input, params, no_fold, pretty, text),
        Commands::Warnings {
            config,
            throw_on,
            log_on,
            ignore,
            in_memory,
        } => run_warnings(config, throw_on, log_on, ignore, in_memory),
        Commands::Events => {
            for (id, name) in cli::list_events() {
                println!("{:>6}  {}", id, name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_visit(
    input: Option<String>,
    params: Vec<String>,
    no_fold: bool,
    pretty: bool,
    text: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let params = params
        .iter()
        .map(|raw| cli::parse_param(raw))
        .collect::<Result<HashMap<_, _>, _>>()?;

    let options = VisitOptions {
        input,
        params,
        no_fold,
    };
    let result = cli::execute_visit(&options)?;

    if text {
        let rendered = if pretty {
            to_text_pretty(&result.expr)
        } else {
            to_text(&result.expr)
        };
        println!("{}", rendered);
    } else {
        let json = if pretty {
            serde_json::to_string_pretty(&result.expr)
        } else {
            serde_json::to_string(&result.expr)
        }?;
        println!("{}", json);
    }

    if !result.unresolved.is_empty() {
        eprintln!("unresolved parameters: {}", result.unresolved.join(", "));
    }
    Ok(())
}

fn run_warnings(
    config: Option<String>,
    throw_on: Vec<String>,
    log_on: Vec<String>,
    ignore: Vec<String>,
    in_memory: Option<String>,
) -> Result<(), CliError> {
    let settings = match config {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };

    let options = WarningsOptions {
        settings,
        throw_on,
        log_on,
        ignore,
        in_memory,
    };
    let behaviors = cli::execute_warnings(&options)?;
    println!("{}", serde_json::to_string_pretty(&behaviors)?);
    Ok(())
}
