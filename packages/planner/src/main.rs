// Main entry point for the planner worker

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planner_core::domains::plans::{register_plan_jobs, site_builder_network, PgPlanStore};
use planner_core::kernel::jobs::{EventRegistry, JobEvent, SharedEventRegistry};
use planner_core::kernel::{GeminiClient, PlannerDeps};
use planner_core::Config;

/// Broker subject carrying [`JobEvent`] envelopes. The event name inside the
/// envelope, not the subject, decides which handler runs.
const JOB_SUBJECT: &str = "siteforge.jobs";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,planner_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Siteforge planner worker");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Build dependencies once at startup
    let ai = Arc::new(GeminiClient::new(&config.gemini_api_key));
    let network = Arc::new(site_builder_network(ai, config.max_iterations));
    let plan_store = Arc::new(PgPlanStore::new(pool.clone()));
    let deps = Arc::new(PlannerDeps::new(network, plan_store));

    let mut registry = EventRegistry::new();
    register_plan_jobs(&mut registry);
    let registry: SharedEventRegistry = Arc::new(registry);

    // Subscribe to the job subject; the submitter fire-and-forgets onto it
    let client = async_nats::connect(&config.nats_url)
        .await
        .context("Failed to connect to NATS")?;
    let mut subscriber = client
        .subscribe(JOB_SUBJECT)
        .await
        .context("Failed to subscribe to job subject")?;

    tracing::info!(
        subject = JOB_SUBJECT,
        events = ?registry.registered_events(),
        "Listening for job events"
    );

    // One task per delivered event; jobs share no state and run concurrently
    while let Some(message) = subscriber.next().await {
        let registry = registry.clone();
        let deps = deps.clone();

        tokio::spawn(async move {
            let event = match JobEvent::from_bytes(&message.payload) {
                Ok(event) => event,
                Err(err) => {
                    // Structurally unrecognizable: drop it, retry is the
                    // broker's concern
                    tracing::error!(error = %err, "Dropping unrecognizable job event");
                    return;
                }
            };

            match registry.dispatch(&event, deps).await {
                Ok(result) => tracing::info!(
                    event = %event.name,
                    mode = %result.mode,
                    success = result.success,
                    "Job complete"
                ),
                Err(err) => tracing::error!(
                    event = %event.name,
                    error = %err,
                    "Job failed"
                ),
            }
        });
    }

    Ok(())
}
