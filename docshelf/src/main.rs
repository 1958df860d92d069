// DocShelf - document taxonomy core
// Entry point: seeds the configured user and prints an overview as JSON

use anyhow::{bail, Context};
use docshelf::app::AppState;
use docshelf::config;
use docshelf::services::StaticAuthProvider;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshelf=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting DocShelf");

    let data_dir = std::env::var(config::ENV_DATA_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(config::DEFAULT_DATA_DIR));
    let user_id = std::env::var(config::ENV_USER_ID).ok();

    let auth = Arc::new(StaticAuthProvider::new(user_id));
    let state = AppState::initialize(data_dir, auth)
        .await
        .context("failed to open data directory")?;

    let Some(user_id) = state.sign_in().await? else {
        bail!("no user signed in; set {}", config::ENV_USER_ID);
    };

    // Optional argument: a category id to list its subcategories
    let output = match std::env::args().nth(1) {
        Some(category_id) => serde_json::to_string_pretty(
            &state
                .loader
                .load_subcategories_optimized(&user_id, &category_id)
                .await?,
        )?,
        None => serde_json::to_string_pretty(
            &state.loader.load_categories_optimized(&user_id).await?,
        )?,
    };

    println!("{}", output);
    Ok(())
}
