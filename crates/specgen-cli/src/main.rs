mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specgen",
    about = "Turn a feature description into user stories and engineering tasks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root holding specgen.yaml and data/ (default: auto-detect)
    #[arg(long, global = true, env = "SPECGEN_ROOT")]
    root: Option<PathBuf>,

    /// Upstream provider: groq or anthropic (overrides specgen.yaml)
    #[arg(long, global = true, env = "SPECGEN_PROVIDER")]
    provider: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3000", env = "PORT")]
        port: u16,
    },

    /// Generate tasks for a feature and record them in history
    Generate {
        /// What the feature should achieve
        #[arg(long)]
        goal: String,
        /// Who the feature is for
        #[arg(long)]
        users: String,
        /// Technical or product constraints
        #[arg(long)]
        constraints: String,
        /// Known risks (optional)
        #[arg(long)]
        risks: Option<String>,
    },

    /// List the most recent generations, newest first
    History,

    /// Show one generation in full
    Show { id: String },

    /// Render a generation as Markdown or plain text
    Export {
        id: String,
        /// markdown or text
        #[arg(long, short = 'f', default_value = "markdown")]
        format: String,
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Inspect and validate specgen.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let provider = cli.provider.as_deref();

    let result = match cli.command {
        Commands::Serve { port } => cmd::serve::run(&root, provider, port),
        Commands::Generate {
            goal,
            users,
            constraints,
            risks,
        } => cmd::generate::run(&root, provider, goal, users, constraints, risks, cli.json),
        Commands::History => cmd::history::list(&root, provider, cli.json),
        Commands::Show { id } => cmd::history::show(&root, provider, &id, cli.json),
        Commands::Export { id, format, output } => {
            cmd::export::run(&root, provider, &id, &format, output.as_deref())
        }
        Commands::Config { subcommand } => cmd::config::run(&root, provider, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
