use super::test_helpers::test_app_state;
use super::*;
use tokio::time::{Duration, timeout};

#[test]
fn connection_ids_are_sequential() {
    let state = test_app_state();
    assert_eq!(state.next_connection_id(), 1);
    assert_eq!(state.next_connection_id(), 2);
    assert_eq!(state.clone().next_connection_id(), 3);
}

#[test]
fn initial_snapshot_is_an_empty_canvas() {
    let state = test_app_state();
    let snapshot = state.canvas.borrow().clone();
    assert_eq!(&snapshot[..2], &[60.0, 60.0]);
    assert!(snapshot[2..].iter().all(|v| *v == 0.0));
}

#[test]
fn halt_is_idempotent() {
    let state = test_app_state();
    assert!(!state.is_halted());
    state.request_halt();
    state.request_halt();
    assert!(state.is_halted());
}

#[tokio::test]
async fn halted_resolves_after_request() {
    let state = test_app_state();
    let mut rx = state.halt.subscribe();
    let waiter = tokio::spawn(async move { halted(&mut rx).await });

    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    state.request_halt();
    timeout(Duration::from_secs(1), waiter).await.expect("halted timed out").expect("join");
}

#[tokio::test]
async fn halted_returns_immediately_when_already_set() {
    let state = test_app_state();
    state.request_halt();
    let mut rx = state.halt.subscribe();
    timeout(Duration::from_millis(100), halted(&mut rx)).await.expect("already halted");
}
