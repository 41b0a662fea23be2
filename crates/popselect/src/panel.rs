//! The label and the choice panel.
//!
//! Both are plain data: the builder creates them, the synchronizer and the
//! controller mutate them, and a UI layer reads them to paint. Neither holds
//! selection state of its own beyond the mirrored `selected` flags, which are
//! always re-derivable from the host control.

use popselect_core::{Point, Rect, Size};

use crate::host::{Choice, Positioning};
use crate::transition::{Transition, TransitionDirection};

// ============================================================================
// Label
// ============================================================================

/// The clickable stand-in for the hidden host control.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    highlighted: bool,
    rect: Rect,
    positioning: Positioning,
}

impl Label {
    /// Create a label occupying `rect`.
    pub fn new(text: impl Into<String>, rect: Rect, positioning: Positioning) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
            rect,
            positioning,
        }
    }

    /// The selection summary currently shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the shown text. Returns `true` if it changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    /// Whether the pointer is over the label.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Set the hover highlight.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// The label's rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// How the label is positioned.
    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    /// Where the panel opens: directly below the label, one pixel in.
    pub fn panel_anchor(&self) -> Point {
        Point::new(self.rect.left() + 1.0, self.rect.bottom())
    }
}

// ============================================================================
// Items
// ============================================================================

/// One cell of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The mirrored choice value; `None` for padding cells.
    pub value: Option<String>,
    /// Display text; empty for padding cells.
    pub text: String,
    /// Whether the mirrored choice is selected.
    pub selected: bool,
    /// Set on the only selected item of a constrained multi-select chooser.
    pub sole_selected: bool,
    /// Index of the mirrored choice in the host's choice list.
    pub choice_index: Option<usize>,
}

impl Item {
    /// An item mirroring the choice at `index`.
    pub fn from_choice(index: usize, choice: &Choice) -> Self {
        Self {
            value: Some(choice.value.clone()),
            text: choice.text.clone(),
            selected: choice.selected,
            sole_selected: false,
            choice_index: Some(index),
        }
    }

    /// A padding cell that only fills out a grid.
    pub fn padding() -> Self {
        Self {
            value: None,
            text: String::new(),
            selected: false,
            sole_selected: false,
            choice_index: None,
        }
    }

    /// Whether this is a padding cell.
    #[inline]
    pub fn is_padding(&self) -> bool {
        self.choice_index.is_none()
    }
}

/// What a point inside the panel lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget {
    /// The item at this visual index (padding items included).
    Item(usize),
    /// The title bar.
    Title,
    /// Anything else inside the panel.
    Background,
}

// ============================================================================
// Panel
// ============================================================================

/// How wide the panel is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelWidth {
    /// A grid panel: exactly this wide.
    Fixed(f32),
    /// A flat list: at least this wide.
    Min(f32),
}

impl PanelWidth {
    /// The width used for layout and hit testing.
    pub fn value(self) -> f32 {
        match self {
            Self::Fixed(width) | Self::Min(width) => width,
        }
    }
}

/// The floating container of choices.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Items in visual (row-major) order.
    items: Vec<Item>,
    title: Option<String>,
    width: PanelWidth,
    /// Items per row; 1 for a flat list.
    columns: usize,
    item_height: f32,
    title_height: f32,
    visible: bool,
    position: Point,
    transition: Option<Transition>,
}

impl Panel {
    /// Create a hidden panel.
    pub fn new(items: Vec<Item>, width: PanelWidth, columns: usize, item_height: f32) -> Self {
        Self {
            items,
            title: None,
            width,
            columns: columns.max(1),
            item_height,
            title_height: 0.0,
            visible: false,
            position: Point::ZERO,
            transition: None,
        }
    }

    /// Add a title bar using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>, height: f32) -> Self {
        self.title = Some(title.into());
        self.title_height = height;
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// All items in visual order, padding included.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item at a visual index.
    pub fn item(&self, visual_index: usize) -> Option<&Item> {
        self.items.get(visual_index)
    }

    pub(crate) fn item_mut(&mut self, visual_index: usize) -> Option<&mut Item> {
        self.items.get_mut(visual_index)
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    /// Items that mirror a choice, in visual order.
    pub fn choice_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.is_padding())
    }

    /// Number of padding cells.
    pub fn padding_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_padding()).count()
    }

    /// Selected items ordered like the host's choice list.
    pub fn selected_items(&self) -> Vec<&Item> {
        let mut selected: Vec<&Item> = self.choice_items().filter(|item| item.selected).collect();
        selected.sort_by_key(|item| item.choice_index);
        selected
    }

    /// Values of the selected items, in choice order.
    pub fn selected_values(&self) -> Vec<String> {
        self.selected_items()
            .into_iter()
            .filter_map(|item| item.value.clone())
            .collect()
    }

    /// Texts of the selected items, in choice order.
    pub fn selected_texts(&self) -> Vec<String> {
        self.selected_items()
            .into_iter()
            .map(|item| item.text.clone())
            .collect()
    }

    /// Visual index of the item mirroring `value`.
    pub fn find_value(&self, value: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.value.as_deref() == Some(value))
    }

    /// Set each choice item's `selected` flag from a set of host values.
    pub fn select_values(&mut self, values: &[String]) {
        for item in &mut self.items {
            item.selected = item.value.as_ref().is_some_and(|v| values.contains(v));
        }
    }

    // =========================================================================
    // Title
    // =========================================================================

    /// The title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The panel's width rule.
    pub fn width(&self) -> PanelWidth {
        self.width
    }

    /// Items per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Full size of the panel.
    pub fn size(&self) -> Size {
        let rows = self.items.len().div_ceil(self.columns);
        Size::new(
            self.width.value(),
            self.title_height + rows as f32 * self.item_height,
        )
    }

    /// The panel's rectangle at its current position.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Top-left corner of the panel.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Map a panel-local point to what it lands on.
    ///
    /// Returns `None` for points outside the panel.
    pub fn hit_test(&self, local: Point) -> Option<PanelTarget> {
        let size = self.size();
        if !Rect::from_origin_size(Point::ZERO, size).contains(local) {
            return None;
        }
        if local.y < self.title_height {
            return Some(if self.title.is_some() {
                PanelTarget::Title
            } else {
                PanelTarget::Background
            });
        }

        let row = ((local.y - self.title_height) / self.item_height) as usize;
        let column = if self.columns == 1 {
            0
        } else {
            let cell_width = self.width.value() / self.columns as f32;
            ((local.x / cell_width) as usize).min(self.columns - 1)
        };
        let visual = row * self.columns + column;
        Some(if visual < self.items.len() {
            PanelTarget::Item(visual)
        } else {
            PanelTarget::Background
        })
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether the panel is shown (or being revealed).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The most recent visibility transition.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Reveal the panel at `position`.
    pub(crate) fn show_at(&mut self, position: Point, transition: Transition) {
        debug_assert_eq!(transition.direction(), TransitionDirection::Show);
        self.position = position;
        self.visible = true;
        self.transition = Some(transition);
    }

    /// Hide the panel.
    pub(crate) fn hide(&mut self, transition: Transition) {
        debug_assert_eq!(transition.direction(), TransitionDirection::Hide);
        self.visible = false;
        self.transition = Some(transition);
    }
}
