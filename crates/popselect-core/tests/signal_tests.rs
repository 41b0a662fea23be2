//! Tests for signals shared across threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use parking_lot::Mutex;
use popselect_core::{Key, Signal};
use tracing_subscriber::EnvFilter;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_signal_emits_from_other_threads() {
    setup();
    let signal = Arc::new(Signal::<Key>::new());
    let escapes = Arc::new(AtomicUsize::new(0));

    let counter = escapes.clone();
    signal.connect(move |key| {
        if key.is_escape() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let signal = signal.clone();
            thread::spawn(move || {
                let key = if i % 2 == 0 { Key::Escape } else { Key::Enter };
                signal.emit(key);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(escapes.load(Ordering::SeqCst), 2);
}

#[test]
fn test_slots_run_in_connection_order() {
    setup();
    let signal = Signal::<Vec<String>>::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut ids = Vec::new();
    for name in ["first", "dropped", "second"] {
        let log = log.clone();
        ids.push(signal.connect(move |values: &Vec<String>| {
            log.lock().push(format!("{name}:{}", values.join(",")));
        }));
    }
    signal.disconnect(ids[1]);
    let late = log.clone();
    signal.connect(move |values: &Vec<String>| {
        late.lock().push(format!("third:{}", values.join(",")));
    });

    signal.emit(vec!["red".to_string(), "blue".to_string()]);
    assert_eq!(
        *log.lock(),
        vec![
            "first:red,blue".to_string(),
            "second:red,blue".to_string(),
            "third:red,blue".to_string(),
        ]
    );
}

#[test]
fn test_key_codes() {
    setup();
    assert_eq!(Key::from_key_code(27), Key::Escape);
    assert!(!Key::from_key_code(13).is_escape());
}
