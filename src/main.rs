// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Listing-Tracker poller
//!
//! Polls the configured marketplace on a fixed interval and prints every
//! newly detected listing to stdout as one JSON line.

use listing_tracker::{config::Config, ListingPoller, NormalizedListing, TrackerError};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        marketplace = %config.marketplace,
        interval_secs = config.poll_interval.as_secs(),
        "Starting Listing-Tracker"
    );

    let poller = ListingPoller::from_config(&config)?;

    if config.poll_interval.is_zero() {
        run_once(&poller, &config.marketplace).await;
        return Ok(());
    }

    // Ticks are awaited in sequence, so polls never overlap.
    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => run_once(&poller, &config.marketplace).await,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
        }
    }
}

/// One scheduled poll, with a single retry when the search rejects the token.
async fn run_once(poller: &ListingPoller, marketplace: &str) {
    let result = match poller.poll(marketplace).await {
        Err(e) if e.is_token_rejected() => {
            tracing::warn!("Token rejected during search, re-authenticating once");
            poller.poll(marketplace).await
        }
        other => other,
    };

    match result {
        Ok(listings) => emit(&listings),
        Err(TrackerError::Auth(msg)) => {
            tracing::error!(error = %msg, "Authentication failed, check client credentials");
        }
        Err(TrackerError::Api(msg)) => {
            tracing::warn!(error = %msg, "Search failed, will retry next interval");
        }
    }
}

fn emit(listings: &[NormalizedListing]) {
    for listing in listings {
        match serde_json::to_string(listing) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "Failed to serialize listing"),
        }
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("listing_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
