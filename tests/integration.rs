// SPDX-License-Identifier: MPL-2.0
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tempfile::tempdir;
use tokio::task::LocalSet;
use tokio::time::sleep;
use toast_rack::config::{self, Config};
use toast_rack::diagnostics::{DiagnosticEventKind, DiagnosticsCollector, ToastEvent};
use toast_rack::domain::Capacity;
use toast_rack::notifications::{
    DismissReason, Notification, NotificationId, NotificationOptions, Position, Registry,
    Severity, ToastService, Toasts,
};

fn service_with_capacity(capacity: usize) -> ToastService {
    let mut config = Config::default();
    config.queue.max_capacity = Capacity::new(capacity);
    ToastService::from_config(&config, None)
}

#[test]
fn capacity_evicts_smallest_ids_first() {
    let mut config = Config::default();
    config.queue.max_capacity = Capacity::new(3);
    let mut registry = Registry::from_config(&config);

    let ids: Vec<NotificationId> = (0..8)
        .map(|i| registry.submit(NotificationOptions::new().message(format!("toast {i}"))))
        .collect();

    assert_eq!(registry.len(), 3);
    let live: Vec<_> = registry.iter().map(Notification::id).collect();
    assert_eq!(live, ids[5..].to_vec());
    assert!(live.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn severity_default_durations() {
    let mut registry = Registry::default();
    let durations: Vec<u64> = [
        registry.success("ok", NotificationOptions::new()),
        registry.error("bad", NotificationOptions::new()),
        registry.warning("hmm", NotificationOptions::new()),
        registry.info("fyi", NotificationOptions::new()),
    ]
    .into_iter()
    .filter_map(|id| registry.get(id).map(Notification::duration_ms))
    .collect();

    assert_eq!(durations, vec![5000, 8000, 5000, 5000]);
}

#[test]
fn query_by_position_keeps_submission_order() {
    let mut registry = Registry::default();
    let a = registry.submit(NotificationOptions::new().position(Position::BottomCenter));
    registry.submit(NotificationOptions::new().position(Position::TopLeft));
    let c = registry.submit(NotificationOptions::new().position(Position::BottomCenter));

    let found: Vec<_> = registry
        .query_by_position(Position::BottomCenter)
        .map(Notification::id)
        .collect();
    assert_eq!(found, vec![a, c]);
}

#[test]
fn every_removal_path_closes_exactly_once() {
    let mut config = Config::default();
    config.queue.max_capacity = Capacity::new(2);
    let mut registry = Registry::from_config(&config);
    let closed: Rc<RefCell<Vec<NotificationId>>> = Rc::default();

    let submit = |registry: &mut Registry| {
        let sink = Rc::clone(&closed);
        registry.submit(NotificationOptions::new().on_close(move |n| sink.borrow_mut().push(n.id())))
    };

    let evicted = submit(&mut registry);
    let dismissed = submit(&mut registry);
    let cleared = submit(&mut registry);
    assert!(registry.dismiss(dismissed));
    assert!(!registry.dismiss(dismissed));
    assert_eq!(registry.clear_all(), 1);

    assert_eq!(*closed.borrow(), vec![evicted, dismissed, cleared]);
}

#[tokio::test(start_paused = true)]
async fn expiry_triggers_close_callback() {
    LocalSet::new()
        .run_until(async {
            let toasts = service_with_capacity(5);
            let closed = Rc::new(Cell::new(0));
            let seen = Rc::clone(&closed);
            let id = toasts.submit(
                NotificationOptions::new()
                    .duration_ms(100)
                    .on_close(move |_| seen.set(seen.get() + 1)),
            );

            sleep(Duration::from_millis(150)).await;
            assert_eq!(closed.get(), 1);
            assert!(toasts.get(id).is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_progress_then_resume_expires() {
    LocalSet::new()
        .run_until(async {
            let toasts = service_with_capacity(5);
            let id = toasts.submit(NotificationOptions::new().duration_ms(1000));

            sleep(Duration::from_millis(200)).await;
            toasts.pause(id);
            let frozen = toasts.get(id).map(|n| n.progress_pct());
            assert!(frozen.is_some_and(|pct| pct > 70.0 && pct < 90.0));

            sleep(Duration::from_millis(2000)).await;
            assert_eq!(toasts.get(id).map(|n| n.progress_pct()), frozen);
            assert!(toasts.get(id).is_some_and(|n| n.is_paused()));

            toasts.resume(id);
            sleep(Duration::from_millis(1000)).await;
            assert!(toasts.get(id).is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn persistent_toasts_never_expire() {
    LocalSet::new()
        .run_until(async {
            let mut toasts = service_with_capacity(5);
            let id = toasts.network_error();

            sleep(Duration::from_secs(600)).await;
            assert!(toasts.get(id).is_some_and(|n| n.severity() == Severity::Error));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn hover_pauses_only_when_enabled() {
    LocalSet::new()
        .run_until(async {
            let toasts = service_with_capacity(5);
            let sticky = toasts.submit(NotificationOptions::new().duration_ms(300));
            let plain = toasts.submit(
                NotificationOptions::new()
                    .duration_ms(300)
                    .pause_on_hover(false),
            );

            toasts.hover_enter(sticky);
            toasts.hover_enter(plain);
            sleep(Duration::from_millis(500)).await;

            assert!(toasts.get(sticky).is_some());
            assert!(toasts.get(plain).is_none());

            toasts.hover_leave(sticky);
            sleep(Duration::from_millis(500)).await;
            assert!(toasts.is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn panicking_close_callback_does_not_leak_the_toast() {
    LocalSet::new()
        .run_until(async {
            let toasts = service_with_capacity(5);
            let id = toasts.submit(
                NotificationOptions::new()
                    .duration_ms(50)
                    .on_close(|_| panic!("caller bug")),
            );
            let survivor = toasts.submit(NotificationOptions::new().duration_ms(5000));

            sleep(Duration::from_millis(200)).await;
            assert!(toasts.get(id).is_none());
            assert!(toasts.get(survivor).is_some());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn diagnostics_capture_the_lifecycle() {
    LocalSet::new()
        .run_until(async {
            let mut collector = DiagnosticsCollector::default();
            let toasts = ToastService::from_config(&Config::default(), Some(collector.handle()));

            let id = toasts.submit(NotificationOptions::new().duration_ms(100));
            sleep(Duration::from_millis(200)).await;
            assert!(toasts.get(id).is_none());

            collector.process_pending();
            let expired = collector.iter().any(|event| {
                matches!(
                    &event.kind,
                    DiagnosticEventKind::Toast {
                        event: ToastEvent::Dismissed {
                            reason: DismissReason::Expired,
                            ..
                        }
                    }
                )
            });
            assert!(expired);
            assert_eq!(collector.report().summary.submitted, 1);
        })
        .await;
}

#[test]
fn config_file_drives_registry_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut saved = Config::default();
    saved.toasts.position = Position::BottomLeft;
    saved.toasts.duration_ms = 1500;
    saved.queue.max_capacity = Capacity::new(2);
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let mut registry = Registry::from_config(&loaded);
    let id = registry.submit(NotificationOptions::new());

    let n = registry.get(id).expect("submitted");
    assert_eq!(n.position(), Position::BottomLeft);
    assert_eq!(n.duration_ms(), 1500);
    assert_eq!(registry.capacity(), 2);
}
