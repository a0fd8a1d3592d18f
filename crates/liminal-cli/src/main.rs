use chrono::{DateTime, FixedOffset, Local};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "liminal", version, about = "Liminal task engines CLI")]
struct Cli {
    /// Evaluate as of this instant (RFC 3339) instead of the system clock
    #[arg(long, global = true, value_parser = commands::parse_now)]
    now: Option<DateTime<FixedOffset>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a quick-capture line into a task payload
    Capture(commands::capture::CaptureArgs),
    /// Fill in priority, value and effort for a draft
    Defaults(commands::defaults::DefaultsArgs),
    /// Urgency color, level and countdown for a deadline
    Urgency(commands::urgency::UrgencyArgs),
    /// Today's workload against the remaining workday
    Capacity(commands::TasksArgs),
    /// Streak, personal best and impact stats
    Stats(commands::stats::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    // Default to WARN so stdout stays machine-readable.
    // Use RUST_LOG=debug to see engine decisions on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = cli.now.unwrap_or_else(|| Local::now().fixed_offset());

    let result = match cli.command {
        Commands::Capture(args) => commands::capture::run(args),
        Commands::Defaults(args) => commands::defaults::run(args, now),
        Commands::Urgency(args) => commands::urgency::run(args, now),
        Commands::Capacity(args) => commands::capacity::run(args, now),
        Commands::Stats(args) => commands::stats::run(args, now),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
