//! Selection summaries and the sole-selection marker.

use crate::config::Configuration;
use crate::panel::Panel;

const SEPARATOR: &str = ", ";
const ELLIPSIS: &str = ", ...";

/// The label text for a set of selected display texts.
///
/// Returns the prompt when nothing is selected. When `max_display` is
/// nonzero and exceeded, only the first `max_display` texts are shown,
/// followed by `", ..."`.
pub fn summarize<S: AsRef<str>>(selected: &[S], config: &Configuration) -> String {
    if selected.is_empty() {
        return config.prompt.clone();
    }

    let limit = config.max_display;
    let shown = if limit > 0 && selected.len() > limit {
        &selected[..limit]
    } else {
        selected
    };

    let mut text = shown
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    if shown.len() < selected.len() {
        text.push_str(ELLIPSIS);
    }
    text
}

/// Flag the only selected item of a constrained multi-select panel.
///
/// Every other item is cleared. Nothing is flagged unless the chooser is
/// multi-select with `disallow_empty` and exactly one item is selected.
pub fn mark_sole_selection(panel: &mut Panel, multiple: bool, config: &Configuration) {
    let constrained = multiple && config.disallow_empty;
    let selected = panel.choice_items().filter(|item| item.selected).count();
    let mark = constrained && selected == 1;

    for item in panel.items_mut() {
        item.sole_selected = mark && item.selected;
    }
}
