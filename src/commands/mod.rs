mod app;
mod athletes;
mod auth;
mod coaches;
mod config_cmd;
mod entity;
mod sports;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use app::App;
pub use auth::{LoginCommand, LogoutCommand, RegisterCommand, WhoamiCommand};
pub use entity::Prompted;

use crate::models::{Athlete, Coach, Sport};

#[derive(Parser)]
#[command(name = "sports-console")]
#[command(about = "Manage sports, athletes and coaches", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read from the bundled mock data instead of the backend
    #[arg(long, global = true)]
    mock: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "SPORTS_CONSOLE_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the backend
    Login(LoginCommand),

    /// Log out and forget the stored token
    Logout(LogoutCommand),

    /// Create a new account
    Register(RegisterCommand),

    /// Show the logged-in user
    Whoami(WhoamiCommand),

    /// Manage sports
    #[command(subcommand)]
    Sports(EntitySubcommands),

    /// Manage athletes
    #[command(subcommand)]
    Athletes(EntitySubcommands),

    /// Manage coaches
    #[command(subcommand)]
    Coaches(EntitySubcommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum EntitySubcommands {
    /// List all records
    List,

    /// Show one record
    Show {
        /// Record ID
        id: String,
    },

    /// Create a record
    Create,

    /// Edit a record
    Edit {
        /// Record ID
        id: String,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl EntitySubcommands {
    async fn run<E: Prompted>(self, app: &mut App) -> Result<()> {
        match self {
            EntitySubcommands::List => entity::list::<E>(app).await,
            EntitySubcommands::Show { id } => entity::show::<E>(app, &id).await,
            EntitySubcommands::Create => entity::create::<E>(app).await,
            EntitySubcommands::Edit { id } => entity::edit::<E>(app, &id).await,
            EntitySubcommands::Delete { id, force } => entity::delete::<E>(app, &id, force).await,
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        match self.command {
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(self.config.as_deref()).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(self.config.as_deref(), force).await
                }
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            command => {
                let mut app = App::open(self.config.as_deref(), self.mock)?;
                let result = match command {
                    Commands::Login(cmd) => cmd.execute(&mut app).await,
                    Commands::Logout(cmd) => cmd.execute(&mut app).await,
                    Commands::Register(cmd) => cmd.execute(&app).await,
                    Commands::Whoami(cmd) => cmd.execute(&app).await,
                    Commands::Sports(subcmd) => subcmd.run::<Sport>(&mut app).await,
                    Commands::Athletes(subcmd) => subcmd.run::<Athlete>(&mut app).await,
                    Commands::Coaches(subcmd) => subcmd.run::<Coach>(&mut app).await,
                    Commands::Config(_) | Commands::Completions { .. } => Ok(()),
                };
                app.follow_session();
                result
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_entity_delete() {
        let cli = Cli::try_parse_from(["sports-console", "--mock", "athletes", "delete", "3", "-f"])
            .unwrap();
        assert!(cli.mock);
        assert!(matches!(
            cli.command,
            Commands::Athletes(EntitySubcommands::Delete { ref id, force: true }) if id == "3"
        ));
    }
}
