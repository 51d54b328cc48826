//! Execution Core Binary
//!
//! Wires the execution core from configuration and drives its clock.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin execution-core
//! ```
//!
//! # Environment Variables
//!
//! - `EXECUTION_CORE_CONFIG`: Path to the YAML config (default: `config.yaml`)
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)
//!
//! In `BACKTEST` mode the simulated clock is advanced across one day and the
//! process exits. In `LIVE` mode timers run on the wall clock until SIGINT or
//! SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use chrono::TimeDelta;
use execution_core::config::{Config, EnvironmentMode, load_config};
use execution_core::domain::clock::{Clock, TimerSpec};
use execution_core::domain::order_execution::OrderRepository;
use execution_core::domain::shared::Timestamp;
use execution_core::infrastructure::clock::{LiveClock, SimulatedClock};
use execution_core::infrastructure::config::Container;
use execution_core::infrastructure::persistence::InMemoryOrderRepository;
use execution_core::observability::update_open_orders;
use execution_core::telemetry::init_tracing;
use tokio::signal;

/// Name of the periodic heartbeat timer.
const HEARTBEAT_TIMER: &str = "heartbeat";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::var("EXECUTION_CORE_CONFIG").ok();
    let config = load_config(path.as_deref()).context("loading configuration")?;
    init_tracing(&config.observability.logging).context("initializing tracing")?;

    tracing::info!(
        mode = %config.environment.mode,
        trader_id = %config.identity.trader_id,
        strategy_id = %config.identity.strategy_id,
        instruments = config.instruments.len(),
        "Starting execution core"
    );

    match config.environment.mode {
        EnvironmentMode::Backtest => run_backtest(&config),
        EnvironmentMode::Live => run_live(&config).await,
    }
}

/// Advance a simulated clock across one day, firing every timer due.
fn run_backtest(config: &Config) -> anyhow::Result<()> {
    let start = config
        .clock
        .start
        .unwrap_or_else(|| start_of_day(Timestamp::now()));
    let end = start
        .checked_add(TimeDelta::days(1))
        .context("backtest end overflows")?;

    let clock = Arc::new(SimulatedClock::new(start));
    let container = Container::from_config(config, clock.clone())?;
    register_heartbeat(config, &container)?;

    let events = clock.advance_to(end)?;
    container.clock().cancel_all_timers();

    tracing::info!(
        start = %start,
        end = %end,
        timer_events = events.len(),
        "Backtest complete"
    );
    Ok(())
}

/// Run wall-clock timers until a shutdown signal arrives.
async fn run_live(config: &Config) -> anyhow::Result<()> {
    let clock = Arc::new(LiveClock::new(tokio::runtime::Handle::current()));
    let container = Container::from_config(config, clock)?;
    register_heartbeat(config, &container)?;

    tracing::info!("Execution core ready");
    shutdown_signal().await?;

    container.clock().cancel_all_timers();
    tracing::info!("Execution core stopped");
    Ok(())
}

fn register_heartbeat(config: &Config, container: &Container) -> anyhow::Result<()> {
    let interval = TimeDelta::seconds(
        i64::try_from(config.clock.heartbeat_secs).context("heartbeat_secs out of range")?,
    );
    let repo = container.order_repo();
    container.clock().set_timer(TimerSpec::repeating(
        HEARTBEAT_TIMER,
        interval,
        move |event| heartbeat(&repo, event.fired_at),
    ))?;
    Ok(())
}

fn heartbeat(repo: &InMemoryOrderRepository, at: Timestamp) {
    match repo.find_open() {
        Ok(open) => {
            update_open_orders(open.len());
            tracing::debug!(at = %at, open_orders = open.len(), "Heartbeat");
        }
        Err(e) => tracing::warn!(error = %e, "Heartbeat could not read orders"),
    }
}

fn start_of_day(ts: Timestamp) -> Timestamp {
    ts.utc_date()
        .and_hms_opt(0, 0, 0)
        .map_or(ts, |dt| Timestamp::new(dt.and_utc()))
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("installing SIGTERM handler")?;
        tokio::select! {
            result = signal::ctrl_c() => {
                result.context("installing Ctrl+C handler")?;
                tracing::info!("Received Ctrl+C, initiating shutdown");
            }
            _ = terminate.recv() => {
                tracing::info!("Received SIGTERM, initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c()
            .await
            .context("installing Ctrl+C handler")?;
        tracing::info!("Received Ctrl+C, initiating shutdown");
    }

    Ok(())
}
