//! Rising Cache
//!
//! Polls a ranked feed and keeps a pre-rendered snapshot of it in a cache
//! bucket, refreshing often while the feed churns and rarely while it is quiet.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;

#[cfg(test)]
mod test_utils;


use adapters::{FsSnapshotStore, GcsSnapshotStore, RedditFeedClient};
use app::{validate_tuning, PollLoopService, REFRESH_MIN, TUNING_VERSION};
use config::{Config, StoreBackend};
use domain::ports::SnapshotStore;
use feed::TemplateRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rising_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting rising cache...");

    // Broken tuning means a broken build; refuse to start
    validate_tuning().context("Refresh tuning is invalid")?;
    tracing::info!(version = TUNING_VERSION, "Refresh tuning loaded");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow!(e))?;
    if let Some(base) = config.new_item_penalty.fixed_base() {
        tracing::warn!(
            base,
            "Using a fixed new-item penalty base instead of the previous feed size"
        );
    }

    let renderer = Arc::new(
        TemplateRenderer::from_path(&config.template_path).context("Failed to load template")?,
    );
    let feed = Arc::new(
        RedditFeedClient::new(
            config.feed_url.clone(),
            &config.user_agent,
            config.http_timeout,
        )
        .context("Failed to build feed client")?,
    );

    // Ctrl-C stops the loop, mid-cycle or not
    let shutdown = Arc::new(Notify::new());
    tokio::spawn(forward_shutdown(tokio::signal::ctrl_c(), shutdown.clone()));

    match &config.store {
        StoreBackend::Gcs {
            base_url,
            bucket,
            access_token,
        } => {
            tracing::info!(bucket = %bucket, object = %config.cache_object, "Caching to GCS");
            let store = GcsSnapshotStore::new(
                base_url.clone(),
                bucket.clone(),
                config.cache_object.clone(),
                config.http_timeout,
            )
            .context("Failed to build GCS client")?
            .with_access_token(access_token.clone())
            .with_content_type(config.cache_content_type.clone())
            .with_cache_max_age(Duration::from_secs_f64(REFRESH_MIN).as_secs());
            poll(feed, renderer, Arc::new(store), &config, shutdown).await
        }
        StoreBackend::Filesystem { dir } => {
            tracing::info!(dir = %dir.display(), object = %config.cache_object, "Caching to local directory");
            let store = FsSnapshotStore::new(dir.clone(), config.cache_object.clone());
            poll(feed, renderer, Arc::new(store), &config, shutdown).await
        }
    }
}

async fn poll<SS: SnapshotStore>(
    feed: Arc<RedditFeedClient>,
    renderer: Arc<TemplateRenderer>,
    store: Arc<SS>,
    config: &Config,
    shutdown: Arc<Notify>,
) -> Result<()> {
    let mut service =
        PollLoopService::new(feed, renderer, store).with_new_item_penalty(config.new_item_penalty);

    service.run(shutdown).await.context("Poll loop failed")?;

    tracing::info!("Rising cache stopped");
    Ok(())
}

/// Notify `shutdown` once `signal` fires. A listener that fails to register
/// never triggers shutdown.
async fn forward_shutdown(signal: impl Future<Output = io::Result<()>>, shutdown: Arc<Notify>) {
    match signal.await {
        Ok(()) => {
            tracing::info!("Received shutdown signal");
            shutdown.notify_one();
        }
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn signal_triggers_shutdown() {
        let shutdown = Arc::new(Notify::new());

        forward_shutdown(async { Ok(()) }, shutdown.clone()).await;

        let notified = tokio::time::timeout(Duration::from_secs(1), shutdown.notified()).await;
        assert!(notified.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_signal_registration_does_not_stop_the_loop() {
        let shutdown = Arc::new(Notify::new());

        forward_shutdown(
            async { Err(io::Error::new(io::ErrorKind::Other, "no signal driver")) },
            shutdown.clone(),
        )
        .await;

        let notified = tokio::time::timeout(Duration::from_secs(1), shutdown.notified()).await;
        assert!(notified.is_err());
    }
}
