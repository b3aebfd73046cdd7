//! # kaddemd: kaddem daemon
//!
//! Composition root that wires the storage adapter into the student service.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the unit of work (adapter) and inject it into `StudentService`
//! - Report the state of the student store
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context;
use kaddem_adapter_storage_sqlite_sqlx::Config as StorageConfig;
use kaddem_app::services::student_service::StudentService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .with_context(|| format!("failed to open database {}", config.database_url()))?;

    // Services
    let student_service = StudentService::new(db.unit_of_work());

    let students = student_service.list_students().await?;
    tracing::info!(
        database = config.database_url(),
        students = students.len(),
        "kaddem store ready"
    );

    Ok(())
}
