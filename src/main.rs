use calltree::cli::{self, CliError, FlattenOptions, RenderOptions};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "calltree")]
#[command(about = "calltree - render engine call chains as query text and flatten responses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON call chain as query text
    Render {
        /// Call chain JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Extract the leaf value from a nested JSON response
    Flatten {
        /// Response JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Input is a {data, errors} response envelope
        #[arg(long)]
        envelope: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { input } => run_render(input),
        Commands::Flatten {
            input,
            pretty,
            envelope,
        } => run_flatten(input, pretty, envelope),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr, filtered by `CALLTREE_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("CALLTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_render(input: Option<String>) -> Result<(), CliError> {
    let options = RenderOptions {
        input: read_input(input)?,
    };
    println!("{}", cli::execute_render(&options)?);
    Ok(())
}

fn run_flatten(input: Option<String>, pretty: bool, envelope: bool) -> Result<(), CliError> {
    let options = FlattenOptions {
        input: read_input(input)?,
        envelope,
    };

    let output = cli::execute_flatten(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}
