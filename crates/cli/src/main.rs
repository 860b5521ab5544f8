use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::Level;

use podium_cli::{
    commands::{check, run},
    config::{DEFAULT_SCENARIO_PATH, load_config, resolve_scenario},
};

#[derive(Debug, Parser)]
#[command(name = "podium", about = "Ranked top-K auction simulator", version)]
struct Cli {
    /// Path to the scenario file
    #[arg(
        short,
        long,
        env = "PODIUM_SCENARIO",
        default_value = DEFAULT_SCENARIO_PATH,
        value_name = "FILE"
    )]
    scenario: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay the scenario and print the outcome of every action
    Run(RunArgs),

    /// Validate the scenario without running it
    Check,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli.scenario) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Run(args) => {
            let scenario = resolve_scenario(&config)?;
            let report = run::run(scenario).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
        }
        Commands::Check => {
            let summary = check::check(&config)?;
            println!("{summary}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
