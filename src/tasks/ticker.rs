//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{broadcast::error::RecvError, watch},
    task::JoinHandle,
    time::{interval_at, sleep, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Period between recomputes while any timer is counting down
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owner of the running ticker
///
/// Dropping the handle also stops the task, but only
/// [`TickerHandle::shutdown`] waits for it to finish.
#[derive(Debug)]
pub struct TickerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Spawn the ticker onto the current runtime
    pub fn spawn(state: Arc<AppState>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(ticker_task(state, shutdown_rx));
        Self { shutdown_tx, task }
    }

    /// Stop ticking and wait for the task to exit
    pub async fn shutdown(self) {
        if self.shutdown_tx.send(true).is_err() {
            debug!("Ticker already stopped");
        }
        if let Err(e) = self.task.await {
            error!("Ticker task ended abnormally: {}", e);
        }
    }
}

/// Single repeating task that drives every countdown
///
/// While any timer is active it recomputes all timers once per tick. When
/// none is left it drops its schedule and parks until the store changes.
pub async fn ticker_task(state: Arc<AppState>, mut shutdown_rx: watch::Receiver<bool>) {
    info!("Starting ticker task");

    loop {
        // Subscribe before checking so an add racing with the check still wakes us
        let mut changes = state.subscribe();

        let active = match state.active_count() {
            Ok(active) => active,
            Err(e) => {
                error!("Failed to read active timers: {}", e);
                tokio::select! {
                    _ = sleep(TICK_INTERVAL) => {}
                    _ = shutdown_rx.changed() => break,
                }
                continue;
            }
        };

        if active == 0 {
            debug!("No active timers, ticker parked");
            tokio::select! {
                received = changes.recv() => match received {
                    Ok(event) => debug!("Ticker woken by {:?}", event),
                    Err(RecvError::Lagged(skipped)) => warn!("Ticker skipped {} store events", skipped),
                    Err(RecvError::Closed) => break,
                },
                _ = shutdown_rx.changed() => break,
            }
            continue;
        }

        drop(changes);
        info!("{} active timer(s), ticker armed", active);

        let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match state.tick() {
                        Ok(outcome) if outcome.active == 0 => {
                            info!("All timers finished, ticker parked");
                            break;
                        }
                        Ok(outcome) => {
                            debug!("Tick: {} active timer(s)", outcome.active);
                        }
                        Err(e) => {
                            error!("Failed to recompute timers: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    info!("Ticker stopping");
                    return;
                }
            }
        }
    }

    info!("Ticker stopping");
}
