use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gazette_core::{MaintenanceService, MaintenanceSettings};
use gazette_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "gazette", version, about = "Gazette site administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Toggle or inspect site-wide maintenance mode
    Maintenance {
        #[command(subcommand)]
        action: MaintenanceAction,
    },

    /// Manage administrator accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum MaintenanceAction {
    /// Turn maintenance mode on
    Enable {
        /// Headline shown on the maintenance page
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Turn maintenance mode off
    Disable,
    /// Print the current maintenance settings
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an administrator account
    Create {
        #[arg(short, long)]
        email: String,

        /// Password (reads from GAZETTE_ADMIN_PASSWORD if not provided)
        #[arg(short, long, env = "GAZETTE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List administrator accounts
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gazette=warn".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let db = connect_db().await?;
    let result = run(cli.command, &db).await;
    db.close().await;

    result
}

/// Connect to PostgreSQL using DATABASE_URL and apply pending migrations.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env()?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await?;
    Ok(db)
}

async fn run(command: Commands, db: &Database) -> Result<()> {
    match command {
        Commands::Maintenance { action } => cmd_maintenance(action, db).await,
        Commands::Admin { action } => cmd_admin(action, db).await,
    }
}

async fn cmd_maintenance(action: MaintenanceAction, db: &Database) -> Result<()> {
    let service = MaintenanceService::new(db.settings_repo());

    let settings = match action {
        MaintenanceAction::Enable { title } => service
            .update(true, title.as_deref())
            .await
            .context("Failed to enable maintenance mode")?,
        MaintenanceAction::Disable => service
            .update(false, None)
            .await
            .context("Failed to disable maintenance mode")?,
        MaintenanceAction::Status => service
            .settings()
            .await
            .context("Failed to read maintenance settings")?,
    };

    println!("{}", describe(&settings));
    Ok(())
}

async fn cmd_admin(action: AdminAction, db: &Database) -> Result<()> {
    let repo = db.user_repo();

    match action {
        AdminAction::Create { email, password } => {
            let user = repo
                .create(email.trim(), &password)
                .await
                .context("Failed to create administrator")?;
            println!("Created administrator {}", user.email);
        }
        AdminAction::List => {
            let users = repo.list().await.context("Failed to list administrators")?;
            if users.is_empty() {
                println!("No administrators found");
                return Ok(());
            }
            for user in &users {
                let last_login = user
                    .last_login
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "  {} (created {}, last login {})",
                    user.email,
                    user.created_at.format("%Y-%m-%d"),
                    last_login
                );
            }
            println!("\nTotal: {} administrators", users.len());
        }
    }

    Ok(())
}

fn describe(settings: &MaintenanceSettings) -> String {
    let state = if settings.enabled { "ON" } else { "OFF" };
    match &settings.title {
        Some(title) => format!("Maintenance mode: {state} (title: {title})"),
        None => format!("Maintenance mode: {state}"),
    }
}
