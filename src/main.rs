//! graph-teams - command line access to Teams through Microsoft Graph

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use graph_teams::{auth, GraphClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "graph-teams")]
#[command(about = "Microsoft Teams over the Graph API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with the device code flow
    Login {
        /// Force interactive login even if cached token exists
        #[arg(short, long)]
        force: bool,
    },

    /// Log out and clear cached credentials
    Logout,

    /// Show current authentication status
    Status,

    #[command(flatten)]
    Graph(GraphCommand),
}

/// Commands that need a signed-in client
#[derive(Subcommand)]
enum GraphCommand {
    /// List recent chats
    Chats {
        /// Maximum number of chats to show
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Read messages from a chat
    Read {
        /// Chat ID (from `chats` output)
        chat_id: String,

        /// Maximum number of messages to show
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Send a message
    Send {
        /// Chat ID (from `chats` output)
        #[arg(short, long)]
        to: String,

        /// Message content
        message: String,
    },

    /// List the members of a chat
    Members {
        /// Chat ID (from `chats` output)
        chat_id: String,
    },

    /// Get/set presence status of a user
    Presence {
        /// User object ID
        user_id: String,

        /// New status: available, busy, dnd, brb, away, offline
        #[arg(short, long)]
        set: Option<String>,
    },

    /// Create an online meeting starting now
    Meeting {
        /// Meeting subject
        #[arg(short, long)]
        subject: String,

        /// Meeting length in minutes
        #[arg(short, long, default_value = "30")]
        minutes: i64,
    },

    /// List PSTN calls of the last days
    PstnCalls {
        /// Number of days to look back
        #[arg(short, long, default_value = "7")]
        days: i64,
    },

    /// List Viva Learning providers
    LearningProviders,

    /// Hang up a call the application is in
    HangUp {
        /// Call ID
        call_id: String,
    },

    /// GET any Graph path below the base URL and print the JSON
    Get {
        /// Path such as `chats/{id}/members`
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login { force } => {
            tracing::info!("Starting authentication flow...");
            auth::login(force).await?;
        }
        Commands::Logout => {
            tracing::info!("Logging out...");
            auth::logout().await?;
        }
        Commands::Status => {
            auth::status().await?;
        }
        Commands::Graph(command) => {
            let client = GraphClient::from_stored_credentials().await?;
            run(&client, command).await?;
        }
    }

    Ok(())
}

async fn run(client: &GraphClient, command: GraphCommand) -> Result<()> {
    match command {
        GraphCommand::Chats { limit } => {
            tracing::info!("Fetching chats...");
            commands::list_chats(client, limit).await?;
        }
        GraphCommand::Read { chat_id, limit } => {
            commands::read_messages(client, &chat_id, limit).await?;
        }
        GraphCommand::Send { to, message } => {
            tracing::info!("Sending message...");
            commands::send_message(client, &to, &message).await?;
        }
        GraphCommand::Members { chat_id } => {
            commands::list_members(client, &chat_id).await?;
        }
        GraphCommand::Presence { user_id, set } => match set {
            Some(status) => {
                tracing::info!("Setting presence to {}...", status);
                commands::set_presence(client, &user_id, &status).await?;
            }
            None => {
                commands::get_presence(client, &user_id).await?;
            }
        },
        GraphCommand::Meeting { subject, minutes } => {
            commands::create_meeting(client, &subject, minutes).await?;
        }
        GraphCommand::PstnCalls { days } => {
            commands::pstn_calls(client, days).await?;
        }
        GraphCommand::LearningProviders => {
            commands::learning_providers(client).await?;
        }
        GraphCommand::HangUp { call_id } => {
            commands::hang_up(client, &call_id).await?;
        }
        GraphCommand::Get { path } => {
            commands::get_raw(client, &path).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_graph_commands_parse_at_top_level() {
        let cli = Cli::try_parse_from(["graph-teams", "chats", "--limit", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Graph(GraphCommand::Chats { limit: 5 })
        ));

        let cli = Cli::try_parse_from(["graph-teams", "pstn-calls"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Graph(GraphCommand::PstnCalls { days: 7 })
        ));

        let cli = Cli::try_parse_from(["graph-teams", "-v", "status"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["graph-teams", "graph"]).is_err());
    }
}
