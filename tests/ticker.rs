//! Ticker integration tests
//!
//! Run on a paused tokio clock; the wall clock is a `ManualClock` that each
//! test moves forward alongside the simulated ticks.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use countdown_board::{
    state::{AppState, StoreEvent},
    tasks::{TickerHandle, TICK_INTERVAL},
    utils::ManualClock,
};
use tokio::{sync::broadcast, time::timeout};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
}

fn setup() -> (Arc<ManualClock>, Arc<AppState>) {
    let clock = Arc::new(ManualClock::new(start()));
    let state = Arc::new(AppState::with_clock(0, "127.0.0.1".into(), clock.clone()));
    (clock, state)
}

/// Wait for the next recompute, returning (active count, timers finished on it)
async fn next_tick(events: &mut broadcast::Receiver<StoreEvent>) -> (usize, Vec<u64>) {
    let mut finished = Vec::new();
    loop {
        match events.recv().await.unwrap() {
            StoreEvent::Ticked { active } => return (active, finished),
            StoreEvent::TimerFinished { id } => finished.push(id),
            _ => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_timer_finishes_and_ticker_parks() {
    let (clock, state) = setup();
    let ticker = TickerHandle::spawn(Arc::clone(&state));
    let mut events = state.subscribe();

    let target = (start() + Duration::seconds(2)).to_rfc3339();
    let timer = state.add_timer("Tea", "Reminder", &target).unwrap().unwrap();
    assert_eq!(timer.time_remaining, 2);

    clock.advance(Duration::seconds(1));
    let (active, finished) = next_tick(&mut events).await;
    assert_eq!(active, 1);
    assert!(finished.is_empty());
    assert_eq!(state.get_timer(timer.id).unwrap().unwrap().time_remaining, 1);

    clock.advance(Duration::seconds(1));
    let (active, finished) = next_tick(&mut events).await;
    assert_eq!(active, 0);
    assert_eq!(finished, vec![timer.id]);

    let done = state.get_timer(timer.id).unwrap().unwrap();
    assert_eq!(done.time_remaining, 0);
    assert!(!done.is_running);

    // Parked: no more recomputes even as time keeps passing
    clock.advance(Duration::seconds(10));
    assert!(timeout(TICK_INTERVAL * 10, events.recv()).await.is_err());
    assert_eq!(state.get_timer(timer.id).unwrap().unwrap(), done);

    ticker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_parked_ticker_wakes_on_add() {
    let (clock, state) = setup();
    let ticker = TickerHandle::spawn(Arc::clone(&state));
    let mut events = state.subscribe();

    // Nothing to drive yet
    assert!(timeout(TICK_INTERVAL * 3, events.recv()).await.is_err());
    clock.advance(Duration::seconds(3));

    let target = (start() + Duration::seconds(5)).to_rfc3339();
    let timer = state.add_timer("Oven", "Reminder", &target).unwrap().unwrap();
    assert_eq!(timer.time_remaining, 2);

    clock.advance(Duration::seconds(1));
    let (active, _) = next_tick(&mut events).await;
    assert_eq!(active, 1);

    ticker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_every_timer_is_recomputed_each_tick() {
    let (clock, state) = setup();
    let ticker = TickerHandle::spawn(Arc::clone(&state));
    let mut events = state.subscribe();

    let short = state
        .add_timer("Short", "Meeting", &(start() + Duration::seconds(1)).to_rfc3339())
        .unwrap()
        .unwrap();
    let long = state
        .add_timer("Long", "Birthday", &(start() + Duration::days(2)).to_rfc3339())
        .unwrap()
        .unwrap();

    clock.advance(Duration::seconds(1));
    let (active, finished) = next_tick(&mut events).await;
    assert_eq!(active, 1);
    assert_eq!(finished, vec![short.id]);

    let long_now = state.get_timer(long.id).unwrap().unwrap();
    assert_eq!(long_now.time_remaining, 2 * 86_400 - 1);
    assert!(long_now.is_running);

    clock.advance(Duration::seconds(1));
    let (active, finished) = next_tick(&mut events).await;
    assert_eq!(active, 1);
    assert!(finished.is_empty());
    assert_eq!(state.get_timer(long.id).unwrap().unwrap().time_remaining, 2 * 86_400 - 2);

    ticker.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_ticking() {
    let (clock, state) = setup();
    let ticker = TickerHandle::spawn(Arc::clone(&state));
    let mut events = state.subscribe();

    let target = (start() + Duration::hours(1)).to_rfc3339();
    state.add_timer("Meeting", "Meeting", &target).unwrap().unwrap();

    clock.advance(Duration::seconds(1));
    let (active, _) = next_tick(&mut events).await;
    assert_eq!(active, 1);

    ticker.shutdown().await;

    clock.advance(Duration::seconds(5));
    assert!(timeout(TICK_INTERVAL * 5, events.recv()).await.is_err());
}
