//! Main entry point for the todo command-line client.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::ClientConfig;
use tracing::debug;

mod app;
mod commands;
mod display;
mod logging;

/// Todo CLI
#[derive(Parser)]
#[command(name = "todo", version)]
#[command(about = "Command-line client for the hosted todo list", long_about = None)]
struct Cli {
    /// Path to the configuration file (yaml, json or toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the todo CLI
#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Signup(commands::session::SignupArgs),

    /// Sign in and remember the session token
    Login(commands::session::LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Show which panel a fresh start lands on
    Status,

    /// List your todos
    List,

    /// Add a todo
    Add {
        /// Title of the new todo; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Flip a todo between done and not done
    Toggle {
        /// Identifier shown by `todo list`
        id: String,
    },

    /// Delete a todo
    Delete {
        /// Identifier shown by `todo list`
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Start an interactive session
    Shell,

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell to generate the completion script for
        #[arg(long, short, value_enum)]
        shell: clap_complete::Shell,
    },

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml, json or toml). Defaults to yaml.
        #[arg(long, short)]
        format: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(*shell);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config { format } => {
            commands::config::generate_config(format.as_deref().unwrap_or("yaml"))?;
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = ClientConfig::load_config(cli.config.as_deref())?;
    logging::init(&config.log_level);
    debug!(base_url = %config.base_url, "configuration loaded");

    let mut controller = app::open_controller(&config)?;
    let succeeded = match cli.command {
        Commands::Signup(args) => commands::session::signup(&mut controller, args).await?,
        Commands::Login(args) => commands::session::login(&mut controller, args).await?,
        Commands::Logout => commands::session::logout(&mut controller),
        Commands::Status => commands::session::status(&mut controller).await,
        Commands::List => commands::todos::list(&mut controller).await,
        Commands::Add { title } => commands::todos::add(&mut controller, &title.join(" ")).await,
        Commands::Toggle { id } => commands::todos::toggle(&mut controller, &id).await,
        Commands::Delete { id, yes } => commands::todos::delete(&mut controller, &id, yes).await?,
        Commands::Shell => commands::shell::run(&mut controller).await?,
        Commands::Completion { .. } | Commands::Config { .. } => true,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
