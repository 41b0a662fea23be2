//! Builds a chooser's label and panel from its host control.

use popselect_core::logging::targets;

use crate::config::Configuration;
use crate::host::HostControl;
use crate::layout::GridLayout;
use crate::panel::{Item, Label, Panel, PanelWidth};
use crate::sync;

/// Everything the builder produces for one host control.
#[derive(Debug, Clone)]
pub struct Presentation {
    /// The stand-in label.
    pub label: Label,
    /// The choice panel, hidden.
    pub panel: Panel,
    /// The grid shape, or `None` for a flat list.
    pub layout: Option<GridLayout>,
}

/// Build the presentation for `host` and hide the host from view.
///
/// The host keeps accepting selection writes while hidden. When
/// `disallow_empty` is set and nothing is selected, the first choice is
/// selected on the host before anything else is read.
pub fn build(host: &mut dyn HostControl, config: &Configuration) -> Presentation {
    let geometry = host.geometry();
    host.set_visible(false);

    if config.disallow_empty && host.selected_values().is_empty() {
        tracing::debug!(
            target: targets::BUILDER,
            host = host.id(),
            "no initial selection, selecting the first choice"
        );
        host.select_index(Some(0));
    }

    let choices = host.choices();
    let layout = GridLayout::compute(choices.len(), config);

    let mut natural: Vec<Option<Item>> = choices
        .iter()
        .enumerate()
        .map(|(index, choice)| Some(Item::from_choice(index, choice)))
        .collect();

    let (items, width, columns) = match layout {
        Some(grid) => {
            // Natural indices past the last choice become padding cells.
            let items = grid
                .visual_order()
                .into_iter()
                .map(|n| natural.get_mut(n).and_then(Option::take).unwrap_or_else(Item::padding))
                .collect();
            (items, PanelWidth::Fixed(grid.panel_width()), grid.columns)
        }
        None => {
            let items = natural.into_iter().flatten().collect();
            let min_width = config.min_width.max(geometry.rect.width());
            (items, PanelWidth::Min(min_width), 1)
        }
    };

    let mut panel = Panel::new(items, width, columns, config.item_height);
    if let Some(title) = &config.title {
        panel = panel.with_title(title.clone(), config.title_height);
    }
    sync::mark_sole_selection(&mut panel, host.is_multiple(), config);

    let label = Label::new(
        sync::summarize(&host.selected_texts(), config),
        geometry.rect,
        geometry.positioning.for_label(),
    );

    tracing::debug!(
        target: targets::BUILDER,
        host = host.id(),
        choices = choices.len(),
        columns,
        padding = panel.padding_count(),
        "built chooser presentation"
    );

    Presentation {
        label,
        panel,
        layout,
    }
}
