//! End-to-end tests driving choosers through the registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use popselect::prelude::*;
use popselect::{Configuration, Result};
use tracing_subscriber::EnvFilter;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn colors() -> Vec<Choice> {
    vec![
        Choice::new("red", "Red"),
        Choice::new("green", "Green"),
        Choice::new("blue", "Blue"),
    ]
}

fn letters() -> Vec<Choice> {
    ["A", "B", "C", "D", "E"]
        .iter()
        .map(|text| Choice::new(text.to_lowercase(), *text))
        .collect()
}

fn share(host: MemoryHost) -> Arc<Mutex<MemoryHost>> {
    Arc::new(Mutex::new(host))
}

fn click_value(registry: &mut ChooserRegistry, id: ChooserId, value: &str) -> Result<()> {
    let visual = registry
        .get(id)
        .and_then(|chooser| chooser.panel().find_value(value))
        .expect("value shown in panel");
    registry.dispatch(InputEvent::chooser(
        id,
        ChooserInput::PanelClick(PanelTarget::Item(visual)),
    ))
}

#[test]
fn test_grid_of_five_in_two_columns() {
    setup();
    let host = share(MemoryHost::new("letters", letters()));
    let mut registry = ChooserRegistry::new();
    let options = ChooserOptions::new().with_item_width(80.0).with_columns(2);
    let id = registry.init(host, &options).unwrap();

    let chooser = registry.get(id).unwrap();
    let layout = chooser.layout().unwrap();
    assert_eq!(layout.rows, 3);
    assert_eq!(layout.padding_count(), 1);
    assert_eq!(chooser.panel().padding_count(), 1);

    let padding = chooser.configuration().item_horizontal_padding();
    assert_eq!(chooser.panel().size().width, 2.0 * (80.0 + padding));

    let order: Vec<&str> = chooser
        .panel()
        .items()
        .iter()
        .map(|item| item.text.as_str())
        .collect();
    assert_eq!(order, vec!["A", "D", "B", "E", "C", ""]);
}

#[test]
fn test_single_select_label_follows_click() {
    setup();
    let host = share(MemoryHost::new("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let id = registry.init(host.clone(), &ChooserOptions::new()).unwrap();

    registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick)).unwrap();
    click_value(&mut registry, id, "red").unwrap();

    let chooser = registry.get(id).unwrap();
    assert_eq!(chooser.label().text(), "Red");
    assert!(!chooser.is_open());

    // Exactly one item is selected and it matches the host
    let selected: Vec<_> = chooser.panel().choice_items().filter(|i| i.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value.as_deref(), Some("red"));
    assert_eq!(host.lock().selected_values(), vec!["red".to_string()]);
}

#[test]
fn test_single_select_every_click_leaves_one_selection() {
    setup();
    let host = share(MemoryHost::new("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let id = registry.init(host.clone(), &ChooserOptions::new()).unwrap();

    for value in ["blue", "green", "green", "red", "blue"] {
        registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick)).unwrap();
        click_value(&mut registry, id, value).unwrap();

        let panel = registry.get(id).unwrap().panel();
        assert_eq!(panel.selected_values(), vec![value.to_string()]);
        assert_eq!(host.lock().selected_values(), vec![value.to_string()]);
    }
}

#[test]
fn test_multi_select_truncated_summary() {
    setup();
    let host = share(MemoryHost::multiple("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let options = ChooserOptions::new().with_max_display(2);
    let id = registry.init(host.clone(), &options).unwrap();

    registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick)).unwrap();
    for value in ["red", "green", "blue"] {
        click_value(&mut registry, id, value).unwrap();
    }

    let chooser = registry.get(id).unwrap();
    assert!(chooser.is_open());
    assert_eq!(chooser.label().text(), "Red, Green, ...");
    assert_eq!(host.lock().selected_values().len(), 3);
}

#[test]
fn test_multi_select_never_empties() {
    setup();
    let host = share(MemoryHost::multiple("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let options = ChooserOptions::new().with_disallow_empty(true);
    let id = registry.init(host.clone(), &options).unwrap();
    assert_eq!(host.lock().selected_values(), vec!["red".to_string()]);

    click_value(&mut registry, id, "red").unwrap();
    assert_eq!(host.lock().selected_values(), vec!["red".to_string()]);
    assert_eq!(registry.get(id).unwrap().label().text(), "Red");

    for value in ["green", "red", "blue", "green", "blue", "blue"] {
        click_value(&mut registry, id, value).unwrap();
        assert!(!host.lock().selected_values().is_empty());
        assert!(!registry.get(id).unwrap().panel().selected_values().is_empty());
    }
}

#[test]
fn test_host_change_notification() {
    setup();
    let host = share(MemoryHost::multiple("colors", colors()));
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = notifications.clone();
    host.lock().changed.connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut registry = ChooserRegistry::new();
    let id = registry.init(host.clone(), &ChooserOptions::new()).unwrap();
    click_value(&mut registry, id, "green").unwrap();
    click_value(&mut registry, id, "green").unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 2);

    // Commands never fire the host's notification
    registry.update(id).unwrap();
    registry.clear(id).unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[test]
fn test_clear_respects_disallow_empty() {
    setup();
    let host = share(MemoryHost::new("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let strict = registry
        .init(host.clone(), &ChooserOptions::new().with_disallow_empty(true))
        .unwrap();

    assert!(registry.clear(strict).is_err());
    assert_eq!(host.lock().selected_values(), vec!["red".to_string()]);
    assert_eq!(registry.get(strict).unwrap().label().text(), "Red");

    let loose_host = share(MemoryHost::new("loose", colors()));
    loose_host.lock().set_selected("blue", true);
    let loose = registry
        .init(loose_host.clone(), &ChooserOptions::new().with_prompt("Pick one"))
        .unwrap();
    assert_eq!(registry.get(loose).unwrap().label().text(), "Blue");

    registry.clear(loose).unwrap();
    assert!(loose_host.lock().selected_values().is_empty());
    assert_eq!(registry.get(loose).unwrap().label().text(), "Pick one");
}

#[test]
fn test_escape_and_mouse_out() {
    setup();
    let mut registry = ChooserRegistry::new();
    let single = registry
        .init(
            share(MemoryHost::new("single", colors())),
            &ChooserOptions::new().with_hide_on_mouse_out(false),
        )
        .unwrap();
    let multi = registry
        .init(share(MemoryHost::multiple("multi", colors())), &ChooserOptions::new())
        .unwrap();

    // Multi-select always hides on mouse out
    assert!(registry.get(multi).unwrap().configuration().hide_on_mouse_out);

    for id in [single, multi] {
        registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick)).unwrap();
    }
    registry.dispatch(InputEvent::chooser(single, ChooserInput::PanelLeave)).unwrap();
    registry.dispatch(InputEvent::chooser(multi, ChooserInput::PanelLeave)).unwrap();
    assert!(registry.get(single).unwrap().is_open());
    assert!(!registry.get(multi).unwrap().is_open());

    registry.dispatch(InputEvent::KeyUp(Key::Escape)).unwrap();
    assert!(registry.open_ids().next().is_none());
    assert!(!registry.get(single).unwrap().is_open());
}

#[test]
fn test_open_transition_uses_configured_effect() {
    setup();
    let host = share(MemoryHost::new("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let options = ChooserOptions::from_toml(
        r#"
        openEffect = "fade"
        openSpeed = "fast"
        closeSpeed = 150
        "#,
    )
    .unwrap();
    let id = registry.init(host, &options).unwrap();

    let requests = Arc::new(Mutex::new(Vec::new()));
    let sink = requests.clone();
    registry
        .get(id)
        .unwrap()
        .transition_started
        .connect(move |request| sink.lock().push(*request));

    registry.dispatch(InputEvent::chooser(id, ChooserInput::LabelClick)).unwrap();
    click_value(&mut registry, id, "blue").unwrap();

    let requests = requests.lock();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].effect, Some(Effect::Fade));
    assert_eq!(requests[0].duration, Duration::from_millis(200));
    assert_eq!(requests[1].effect, Some(Effect::Slide));
    assert_eq!(requests[1].duration, Duration::from_millis(150));
}

#[test]
fn test_update_reconciles_out_of_band_writes() {
    setup();
    let host = share(MemoryHost::multiple("colors", colors()));
    let mut registry = ChooserRegistry::new();
    let options = ChooserOptions::new().with_disallow_empty(true);
    let id = registry.init(host.clone(), &options).unwrap();

    let changed = Arc::new(Mutex::new(Vec::new()));
    let sink = changed.clone();
    registry
        .get(id)
        .unwrap()
        .label_text_changed
        .connect(move |text| sink.lock().push(text.clone()));

    {
        let mut host = host.lock();
        host.set_selected("red", false);
        host.set_selected("blue", true);
    }
    registry.update(id).unwrap();

    let chooser = registry.get(id).unwrap();
    assert_eq!(chooser.label().text(), "Blue");
    assert_eq!(chooser.panel().selected_values(), vec!["blue".to_string()]);
    assert!(
        chooser
            .panel()
            .choice_items()
            .all(|item| item.sole_selected == (item.value.as_deref() == Some("blue")))
    );
    assert_eq!(*changed.lock(), vec!["Blue".to_string()]);
}

#[test]
fn test_options_resolve_against_host() {
    setup();
    let empty = MemoryHost::new("empty", Vec::new());
    let options = ChooserOptions::new().with_disallow_empty(true);
    assert_eq!(
        Configuration::resolve(&empty, &options),
        Err(ConfigError::EmptyChoices)
    );

    let mut registry = ChooserRegistry::new();
    let err = registry
        .init(share(MemoryHost::new("empty", Vec::new())), &options)
        .unwrap_err();
    assert_eq!(err, Error::Config(ConfigError::EmptyChoices));
    assert!(registry.is_empty());
}
