//! Unit tests for PinGuard

use std::sync::Arc;
use std::time::Duration as StdDuration;

use bp_shared::config::PinGuardConfig;
use chrono::{Duration, TimeZone, Utc};

use super::mocks::{MockListener, MockPinStore};
use crate::errors::PinError;
use crate::services::pin::{Clock, LockoutState, ManualClock, PinGuard};

const CORRECT_PIN: &str = "284619";

struct Fixture {
    guard: PinGuard<MockPinStore, MockListener>,
    store: Arc<MockPinStore>,
    listener: Arc<MockListener>,
    clock: Arc<ManualClock>,
}

fn fixture_with(store: MockPinStore, config: PinGuardConfig) -> Fixture {
    let store = Arc::new(store);
    let listener = Arc::new(MockListener::default());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    ));
    let guard = PinGuard::with_clock(
        store.clone(),
        listener.clone(),
        &config,
        "401234567",
        clock.clone(),
    )
    .unwrap();
    Fixture {
        guard,
        store,
        listener,
        clock,
    }
}

fn fixture() -> Fixture {
    fixture_with(MockPinStore::new(CORRECT_PIN), PinGuardConfig::default())
}

async fn lock_out(f: &mut Fixture) {
    for _ in 0..4 {
        let _ = f.guard.submit("000000").await;
    }
    let result = f.guard.submit("000000").await;
    assert_eq!(result.unwrap_err(), PinError::Locked { retry_after_seconds: 1800 });
}

#[tokio::test]
async fn test_correct_pin_succeeds() {
    let mut f = fixture();

    let pin = f.guard.submit(CORRECT_PIN).await.unwrap();

    assert_eq!(pin.as_str(), CORRECT_PIN);
    assert_eq!(f.listener.success_count(), 1);
    assert_eq!(f.guard.state().await, LockoutState::Idle { attempts: 0 });
}

#[tokio::test]
async fn test_wrong_pin_reports_remaining_attempts() {
    let mut f = fixture();

    for remaining in (1..=4).rev() {
        assert_eq!(
            f.guard.submit("000000").await.unwrap_err(),
            PinError::Rejected { remaining_attempts: remaining }
        );
    }
    assert_eq!(f.guard.remaining_attempts().await, 1);
    assert!(f.guard.countdown().is_none());
}

#[tokio::test]
async fn test_success_resets_attempts() {
    let mut f = fixture();
    let _ = f.guard.submit("000000").await;
    let _ = f.guard.submit("000000").await;

    f.guard.submit(CORRECT_PIN).await.unwrap();

    assert_eq!(f.guard.remaining_attempts().await, 5);
}

#[tokio::test]
async fn test_malformed_input_consumes_no_attempt() {
    let mut f = fixture();

    for raw in ["", "12345", "1234567", "12a456"] {
        assert_eq!(f.guard.submit(raw).await.unwrap_err(), PinError::InvalidFormat);
    }

    assert_eq!(f.store.verify_count(), 0);
    assert_eq!(f.guard.remaining_attempts().await, 5);
}

#[tokio::test]
async fn test_store_failure_is_unexpected_and_consumes_no_attempt() {
    let mut f = fixture_with(MockPinStore::failing(), PinGuardConfig::default());

    let result = f.guard.submit(CORRECT_PIN).await;

    assert_eq!(
        result.unwrap_err(),
        PinError::Unexpected { message: "store unavailable".to_string() }
    );
    assert_eq!(f.guard.remaining_attempts().await, 5);
    assert_eq!(f.listener.success_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_locked_guard_rejects_without_checking() {
    let mut f = fixture();
    lock_out(&mut f).await;
    let calls = f.store.verify_count();

    f.clock.advance(Duration::minutes(5));
    let result = f.guard.submit(CORRECT_PIN).await;

    assert_eq!(result.unwrap_err(), PinError::Locked { retry_after_seconds: 1500 });
    assert_eq!(f.store.verify_count(), calls);
    assert_eq!(f.listener.success_count(), 0);
    assert!(matches!(f.guard.state().await, LockoutState::Locked { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_countdown_runs_down_and_unlocks() {
    let mut f = fixture();
    lock_out(&mut f).await;
    assert!(f.guard.countdown_running());

    let mut rx = f.guard.countdown().unwrap();
    assert_eq!(rx.borrow().remaining_seconds, 1800);

    f.clock.advance(Duration::minutes(10));
    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.remaining_seconds, 1200);
    assert_eq!(snapshot.display, "20:00");
    assert!(!snapshot.unlocked);

    f.clock.advance(Duration::minutes(20));
    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert!(snapshot.unlocked);
    assert_eq!(snapshot.remaining_seconds, 0);

    assert_eq!(f.guard.state().await, LockoutState::Idle { attempts: 0 });
    assert_eq!(f.guard.remaining_seconds().await, 0);

    f.guard.submit(CORRECT_PIN).await.unwrap();
    assert_eq!(f.listener.success_count(), 1);
    assert!(f.guard.countdown().is_none());
}

#[tokio::test]
async fn test_lazy_expiry_on_submit() {
    let mut f = fixture();
    lock_out(&mut f).await;

    f.clock.advance(Duration::minutes(31));

    assert_eq!(
        f.guard.submit("000000").await.unwrap_err(),
        PinError::Rejected { remaining_attempts: 4 }
    );
}

#[tokio::test(start_paused = true)]
async fn test_close_stops_countdown_and_notifies() {
    let mut f = fixture();
    lock_out(&mut f).await;
    let mut rx = f.guard.countdown().unwrap();

    f.guard.close();

    assert!(f.listener.was_closed());
    // the sender goes away with the aborted task
    let drained = tokio::time::timeout(StdDuration::from_secs(5), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(drained.is_ok());
    assert!(!rx.borrow().unlocked);
}

#[tokio::test(start_paused = true)]
async fn test_restore_locked_state_starts_countdown() {
    let mut f = fixture();
    let until = f.clock.now() + Duration::minutes(2);

    f.guard.restore_state(LockoutState::Locked { until }).await;

    assert!(f.guard.countdown_running());
    assert_eq!(f.guard.remaining_seconds().await, 120);
    assert_eq!(
        f.guard.submit(CORRECT_PIN).await.unwrap_err(),
        PinError::Locked { retry_after_seconds: 120 }
    );
}

#[tokio::test]
async fn test_restore_expired_lock_is_idle() {
    let mut f = fixture();
    let until = f.clock.now() - Duration::seconds(1);

    f.guard.restore_state(LockoutState::Locked { until }).await;

    assert!(f.guard.countdown().is_none());
    assert_eq!(f.guard.state().await, LockoutState::Idle { attempts: 0 });
}

#[tokio::test]
async fn test_custom_attempt_limit() {
    let config = PinGuardConfig::default().with_max_attempts(2).with_lockout_minutes(1);
    let mut f = fixture_with(MockPinStore::new(CORRECT_PIN), config);

    let _ = f.guard.submit("000000").await;
    assert_eq!(
        f.guard.submit("000000").await.unwrap_err(),
        PinError::Locked { retry_after_seconds: 60 }
    );
}

#[tokio::test]
async fn test_support_link_contains_subject() {
    let f = fixture();
    let link = f.guard.support_link();
    assert!(link.starts_with("https://wa.me/972592106099?text="));
    assert!(link.contains("401234567"));
}

#[tokio::test(start_paused = true)]
async fn test_countdown_gone_after_tick_unlock() {
    let mut f = fixture();
    lock_out(&mut f).await;
    let mut rx = f.guard.countdown().unwrap();

    f.clock.advance(Duration::minutes(30));
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().unlocked);

    while f.guard.countdown_running() {
        tokio::task::yield_now().await;
    }
    assert!(f.guard.countdown().is_none());
    assert_eq!(f.guard.state().await, LockoutState::Idle { attempts: 0 });
}
