mod cli;
mod config;
mod seed;

use cli::{Cli, Command};
use config::AppConfig;
use emi_axum::start_server;
use emi_core::interpret::Interpreter;
use emi_sqlite::Db;
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;

    match cli.command {
        Command::Serve => start_server(server, db).await?,
        Command::Ask { query } => {
            if query.trim().is_empty() {
                anyhow::bail!("query must not be blank");
            }
            let interpreter = Interpreter::new(db);
            let today = OffsetDateTime::now_utc().date();
            let result = interpreter.process_query(&query, today).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Seed { days } => {
            let inserted = seed::generate(&db, days).await?;
            tracing::info!(days, inserted, "sample data generated");
            println!("Inserted {inserted} rows covering {days} days");
        }
    }

    Ok(())
}
