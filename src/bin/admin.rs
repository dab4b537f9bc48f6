use clap::{Parser, Subcommand};
use herald::{
    config::Settings,
    db,
    service::{Integrations, ServiceContext},
};

#[derive(Parser)]
#[command(name = "herald-admin", about = "Maintenance tasks for a Herald deployment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upsert the built-in bot commands and register them with the platform
    SyncCommands,
    /// Ensure the public announcements storage bucket exists
    InitStorage,
    /// Point a bot's webhook at this deployment
    ConfigureBot {
        /// Bot token; defaults to the configured one
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::new()?;
    let db_pool = db::connect(&settings.database).await?;
    let context = ServiceContext::new(db_pool, Integrations::from_settings(&settings), &settings);

    let report = match cli.command {
        Command::SyncCommands => {
            serde_json::to_value(context.bot_service.sync_commands().await?)?
        }
        Command::InitStorage => {
            serde_json::to_value(context.storage_service.ensure_announcements_bucket().await?)?
        }
        Command::ConfigureBot { token } => {
            let token = token.or_else(|| settings.bot.token.clone());
            serde_json::to_value(context.bot_service.configure_webhook(token.as_deref()).await?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
