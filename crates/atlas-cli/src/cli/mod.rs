//! CLI entry and dispatch.

use anyhow::{Context, Result};
use atlas_core::api::ApiClient;
use atlas_core::config::Config;
use atlas_core::session::SessionStore;
use clap::Parser;
use tracing::info;

mod commands;

#[derive(Parser)]
#[command(name = "atlas")]
#[command(version)]
#[command(about = "Terminal client for the AtlasList job marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend base URL for this invocation
    #[arg(long, value_name = "URL", env = "ATLAS_BASE_URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,

        /// Password (or set ATLAS_PASSWORD)
        #[arg(short, long, env = "ATLAS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password (or set ATLAS_PASSWORD)
        #[arg(short, long, env = "ATLAS_PASSWORD", hide_env_values = true)]
        password: String,

        /// Account role (client or freelancer)
        #[arg(short, long)]
        role: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Browse and manage jobs
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum JobCommands {
    /// List open jobs
    List,
    /// List jobs you created
    Created,
    /// List jobs you applied to
    Applied,
    /// Post a new job
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Hourly rate in dollars
        #[arg(long)]
        rate: String,

        /// Experience level (entry, intermediate, senior, expert)
        #[arg(long)]
        level: String,
    },
    /// Apply to a job
    Apply {
        #[arg(value_name = "JOB_ID")]
        job_id: u64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Persist the backend base URL in the config file
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Login { .. } => "login",
        Commands::Signup { .. } => "signup",
        Commands::Logout => "logout",
        Commands::Whoami => "whoami",
        Commands::Jobs { .. } => "jobs",
        Commands::Config { .. } => "config",
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    let _log_guard = crate::logging::init(&config).context("init logging")?;

    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let store = SessionStore::open_default();

    // default to the TUI
    let Some(command) = cli.command else {
        info!("launching TUI");
        return commands::tui::run(&config, store);
    };

    info!(command = command_name(&command), "dispatching command");
    match command {
        Commands::Login { username, password } => {
            let client = ApiClient::new(&config, store.clone())?;
            commands::auth::login(&client, &store, username, password).await
        }
        Commands::Signup {
            username,
            email,
            password,
            role,
        } => {
            let client = ApiClient::new(&config, store.clone())?;
            commands::auth::signup(&client, username, email, password, role).await
        }
        Commands::Logout => {
            let client = ApiClient::new(&config, store.clone())?;
            commands::auth::logout(&client, &store).await
        }
        Commands::Whoami => commands::auth::whoami(&store),
        Commands::Jobs { command } => {
            let client = ApiClient::new(&config, store.clone())?;
            match command {
                JobCommands::List => commands::jobs::list(&client, &store).await,
                JobCommands::Created => commands::jobs::created(&client, &store).await,
                JobCommands::Applied => commands::jobs::applied(&client, &store).await,
                JobCommands::Create {
                    title,
                    description,
                    rate,
                    level,
                } => commands::jobs::create(&client, &store, title, description, rate, level).await,
                JobCommands::Apply { job_id } => {
                    commands::jobs::apply(&client, &store, job_id).await
                }
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
