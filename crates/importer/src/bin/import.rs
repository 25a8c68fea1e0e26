use clap::{Parser, Subcommand};
use importer::{TbaClient, TbaSettings, TbaSync, sources::tba::DEFAULT_BASE_URL};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use storage::services::reconciliation::{PgReconciliationStore, SeasonRegistry, reconcile_event};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scouting-import")]
#[command(about = "Scouting data importer and reconciler backed by The Blue Alliance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "TBA_API_KEY")]
    tba_api_key: Option<String>,

    #[arg(long, env = "TBA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    tba_base_url: String,

    #[arg(long, env = "TBA_TIMEOUT_SECS", default_value_t = 30)]
    tba_timeout_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import or refresh the full team list
    Teams,
    /// Import a season's events and their team registrations
    Events {
        #[arg(long)]
        year: i32,
    },
    /// Replace an event's match schedule with TBA's
    Schedule {
        #[arg(long)]
        event: String,
    },
    /// Reconcile an organization's pending submissions at an event
    Reconcile {
        #[arg(long)]
        event: String,

        #[arg(long)]
        organization: i32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "scouting_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = TbaSettings {
        api_key: cli.tba_api_key.clone(),
        base_url: cli.tba_base_url.clone(),
        timeout: Duration::from_secs(cli.tba_timeout_secs),
    };
    let client = TbaClient::new(&settings)?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    let sync = TbaSync::new(&pool, &client);

    let output = match cli.command {
        Commands::Teams => serde_json::to_string_pretty(&sync.update_teams().await?)?,
        Commands::Events { year } => serde_json::to_string_pretty(&sync.import_events(year).await?)?,
        Commands::Schedule { event } => {
            serde_json::to_string_pretty(&sync.sync_schedule(&event).await?)?
        }
        Commands::Reconcile {
            event,
            organization,
        } => {
            let store = PgReconciliationStore::new(&pool);
            let registry = SeasonRegistry::default();
            let summary = reconcile_event(&store, &client, &registry, &event, organization).await?;
            serde_json::to_string_pretty(&summary)?
        }
    };

    println!("{}", output);
    Ok(())
}
