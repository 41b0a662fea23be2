//! Chooser options and their resolution into a [`Configuration`].
//!
//! [`ChooserOptions`] is what callers supply: every field is optional and may
//! come from code (builder methods), JSON or TOML. [`Configuration::resolve`]
//! merges the options over the documented defaults, validates the
//! combination and applies the multi-select override. The result is
//! immutable for the life of the chooser.
//!
//! # Defaults
//!
//! | option | default |
//! |---|---|
//! | `minWidth` | `100` |
//! | `prompt` | `"Make A Selection"` |
//! | `maxDisplay` | `0` (unlimited) |
//! | `openSpeed`, `closeSpeed` | `400` ms |
//! | `openEffect`, `closeEffect` | `"slide"` |
//! | `disallowEmpty` | `false` |
//! | `hideOnMouseOut` | `true` (always `true` for multi-select hosts) |
//! | `itemWidth`, `columns`, `rows`, `title` | unset |
//!
//! # Example
//!
//! ```
//! use popselect::config::ChooserOptions;
//!
//! let options = ChooserOptions::from_json(
//!     r#"{ "itemWidth": 150, "columns": 3, "openEffect": "fade", "openSpeed": "fast" }"#,
//! )
//! .unwrap();
//! assert_eq!(options.columns, Some(3));
//!
//! let same = ChooserOptions::new()
//!     .with_item_width(150.0)
//!     .with_columns(3)
//!     .with_open_effect("fade")
//!     .with_open_speed("fast");
//! assert_eq!(options, same);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use popselect_core::logging::targets;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::host::HostControl;

/// Default minimum panel width for flat (non-grid) panels.
pub const DEFAULT_MIN_WIDTH: f32 = 100.0;
/// Default label text when nothing is selected.
pub const DEFAULT_PROMPT: &str = "Make A Selection";
/// Default open/close animation duration in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 400;
/// Default padding on each horizontal side of an item.
pub const DEFAULT_ITEM_PADDING: f32 = 5.0;
/// Default item height.
pub const DEFAULT_ITEM_HEIGHT: f32 = 24.0;
/// Default title bar height.
pub const DEFAULT_TITLE_HEIGHT: f32 = 24.0;

// ============================================================================
// Effects and speeds
// ============================================================================

/// The visual transition used to open or close a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    /// Fade the panel's opacity in or out.
    Fade,
    /// Unroll the panel vertically from its top edge.
    #[default]
    Slide,
}

impl Effect {
    /// The option string naming this effect.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fade" => Ok(Self::Fade),
            "slide" => Ok(Self::Slide),
            _ => Err(()),
        }
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        effect.as_str().to_string()
    }
}

/// How long an open or close transition takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// The named "slow" preset (600 ms).
    Slow,
    /// The named "fast" preset (200 ms).
    Fast,
    /// An explicit positive duration.
    Custom(Duration),
}

impl Speed {
    /// Duration of the "slow" preset.
    pub const SLOW: Duration = Duration::from_millis(600);
    /// Duration of the "fast" preset.
    pub const FAST: Duration = Duration::from_millis(200);

    /// The transition duration.
    pub fn duration(self) -> Duration {
        match self {
            Self::Slow => Self::SLOW,
            Self::Fast => Self::FAST,
            Self::Custom(duration) => duration,
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::Custom(Duration::from_millis(DEFAULT_SPEED_MS))
    }
}

/// A speed as written by the caller: a number of milliseconds or a preset name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpeedValue {
    /// Milliseconds.
    Millis(f64),
    /// A named preset.
    Named(String),
}

impl SpeedValue {
    /// Validate into a [`Speed`]. `option` names the option for error messages.
    fn resolve(&self, option: &'static str) -> Result<Speed, ConfigError> {
        match self {
            Self::Millis(ms) => {
                // Must survive rounding to whole nanoseconds.
                let nanos = if ms.is_finite() { (ms * 1_000_000.0).round() } else { 0.0 };
                if nanos < 1.0 {
                    return Err(ConfigError::invalid_speed(option, ms.to_string()));
                }
                Ok(Speed::Custom(Duration::from_nanos(nanos as u64)))
            }
            Self::Named(name) => match name.as_str() {
                "slow" => Ok(Speed::Slow),
                "fast" => Ok(Speed::Fast),
                _ => Err(ConfigError::invalid_speed(option, format!("\"{name}\""))),
            },
        }
    }
}

impl From<u32> for SpeedValue {
    fn from(ms: u32) -> Self {
        Self::Millis(f64::from(ms))
    }
}

impl From<f64> for SpeedValue {
    fn from(ms: f64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for SpeedValue {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Speed> for SpeedValue {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Slow => Self::Named("slow".to_string()),
            Speed::Fast => Self::Named("fast".to_string()),
            Speed::Custom(duration) => Self::Millis(duration.as_secs_f64() * 1000.0),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Caller-supplied options. Every field is optional.
///
/// Field names deserialize in camelCase (`itemWidth`, `hideOnMouseOut`, ...).
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChooserOptions {
    /// Minimum panel width; only used when neither `columns` nor `rows` is set.
    pub min_width: Option<f32>,
    /// Width of each item's content box in a grid.
    pub item_width: Option<f32>,
    /// Number of grid columns.
    pub columns: Option<usize>,
    /// Number of grid rows.
    pub rows: Option<usize>,
    /// Title shown above the choices.
    pub title: Option<String>,
    /// Label text when nothing is selected.
    pub prompt: Option<String>,
    /// Maximum number of selections named in the label; `0` for unlimited.
    pub max_display: Option<usize>,
    /// Opening transition duration.
    pub open_speed: Option<SpeedValue>,
    /// Closing transition duration.
    pub close_speed: Option<SpeedValue>,
    /// Opening transition kind (`"fade"` or `"slide"`).
    pub open_effect: Option<String>,
    /// Closing transition kind (`"fade"` or `"slide"`).
    pub close_effect: Option<String>,
    /// Forbid ending up with nothing selected.
    pub disallow_empty: Option<bool>,
    /// Hide the panel as soon as the pointer leaves it.
    pub hide_on_mouse_out: Option<bool>,
    /// Padding on each horizontal side of an item.
    pub item_padding: Option<f32>,
    /// Height of one item row.
    pub item_height: Option<f32>,
    /// Height of the title bar.
    pub title_height: Option<f32>,
}

impl ChooserOptions {
    /// Create empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object.
    ///
    /// Values of the wrong type (for example a string `hideOnMouseOut`)
    /// are reported as [`ConfigError::InvalidOption`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::invalid_option(e.to_string()))
    }

    /// Convert options from an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_option(e.to_string()))
    }

    /// Parse options from a TOML table.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::invalid_option(e.message().to_string()))
    }

    /// Set the minimum width using builder pattern.
    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Set the item width using builder pattern.
    pub fn with_item_width(mut self, item_width: f32) -> Self {
        self.item_width = Some(item_width);
        self
    }

    /// Set the column count using builder pattern.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the row count using builder pattern.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set the title using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the prompt using builder pattern.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the label truncation limit using builder pattern.
    pub fn with_max_display(mut self, max_display: usize) -> Self {
        self.max_display = Some(max_display);
        self
    }

    /// Set the opening speed using builder pattern.
    pub fn with_open_speed(mut self, speed: impl Into<SpeedValue>) -> Self {
        self.open_speed = Some(speed.into());
        self
    }

    /// Set the closing speed using builder pattern.
    pub fn with_close_speed(mut self, speed: impl Into<SpeedValue>) -> Self {
        self.close_speed = Some(speed.into());
        self
    }

    /// Set the opening effect using builder pattern.
    pub fn with_open_effect(mut self, effect: impl Into<String>) -> Self {
        self.open_effect = Some(effect.into());
        self
    }

    /// Set the closing effect using builder pattern.
    pub fn with_close_effect(mut self, effect: impl Into<String>) -> Self {
        self.close_effect = Some(effect.into());
        self
    }

    /// Set `disallowEmpty` using builder pattern.
    pub fn with_disallow_empty(mut self, disallow_empty: bool) -> Self {
        self.disallow_empty = Some(disallow_empty);
        self
    }

    /// Set `hideOnMouseOut` using builder pattern.
    pub fn with_hide_on_mouse_out(mut self, hide: bool) -> Self {
        self.hide_on_mouse_out = Some(hide);
        self
    }

    /// Set the per-side item padding using builder pattern.
    pub fn with_item_padding(mut self, padding: f32) -> Self {
        self.item_padding = Some(padding);
        self
    }

    /// Set the item height using builder pattern.
    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = Some(height);
        self
    }

    /// Set the title bar height using builder pattern.
    pub fn with_title_height(mut self, height: f32) -> Self {
        self.title_height = Some(height);
        self
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Which grid dimension the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    /// A fixed number of columns; rows follow from the choice count.
    Columns(usize),
    /// A fixed number of rows; columns follow from the choice count.
    Rows(usize),
}

/// A fully resolved, validated chooser configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Minimum width of a flat panel.
    pub min_width: f32,
    /// Item content width; always set when `grid` is set.
    pub item_width: Option<f32>,
    /// Grid shape request, if any.
    pub grid: Option<GridShape>,
    /// Panel title.
    pub title: Option<String>,
    /// Label text when nothing is selected.
    pub prompt: String,
    /// Label truncation limit; `0` for unlimited.
    pub max_display: usize,
    /// Opening transition kind.
    pub open_effect: Effect,
    /// Opening transition duration.
    pub open_speed: Speed,
    /// Closing transition kind.
    pub close_effect: Effect,
    /// Closing transition duration.
    pub close_speed: Speed,
    /// Forbid ending up with nothing selected.
    pub disallow_empty: bool,
    /// Hide the panel when the pointer leaves it.
    pub hide_on_mouse_out: bool,
    /// Padding on each horizontal side of an item.
    pub item_padding: f32,
    /// Height of one item row.
    pub item_height: f32,
    /// Height of the title bar.
    pub title_height: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            item_width: None,
            grid: None,
            title: None,
            prompt: DEFAULT_PROMPT.to_string(),
            max_display: 0,
            open_effect: Effect::Slide,
            open_speed: Speed::default(),
            close_effect: Effect::Slide,
            close_speed: Speed::default(),
            disallow_empty: false,
            hide_on_mouse_out: true,
            item_padding: DEFAULT_ITEM_PADDING,
            item_height: DEFAULT_ITEM_HEIGHT,
            title_height: DEFAULT_TITLE_HEIGHT,
        }
    }
}

impl Configuration {
    /// Merge `options` over the defaults and validate them against `host`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `columns` and `rows` are both set, when
    /// either is set without `itemWidth` (or is zero), when a speed or effect
    /// is unrecognized, or when `disallowEmpty` is set for a host without
    /// choices.
    pub fn resolve(host: &dyn HostControl, options: &ChooserOptions) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let grid = match (options.columns, options.rows) {
            (Some(_), Some(_)) => return Err(ConfigError::ColumnsAndRows),
            (Some(_), None) if options.item_width.is_none() => {
                return Err(ConfigError::missing_item_width("columns"));
            }
            (None, Some(_)) if options.item_width.is_none() => {
                return Err(ConfigError::missing_item_width("rows"));
            }
            (Some(0), None) => return Err(ConfigError::ZeroGridDimension { option: "columns" }),
            (None, Some(0)) => return Err(ConfigError::ZeroGridDimension { option: "rows" }),
            (Some(columns), None) => Some(GridShape::Columns(columns)),
            (None, Some(rows)) => Some(GridShape::Rows(rows)),
            (None, None) => None,
        };

        if let Some(width) = options.item_width
            && !(width.is_finite() && width > 0.0)
        {
            return Err(ConfigError::InvalidItemWidth { value: width });
        }

        let open_speed = match &options.open_speed {
            Some(value) => value.resolve("openSpeed")?,
            None => defaults.open_speed,
        };
        let close_speed = match &options.close_speed {
            Some(value) => value.resolve("closeSpeed")?,
            None => defaults.close_speed,
        };
        let open_effect = resolve_effect("openEffect", options.open_effect.as_deref())?;
        let close_effect = resolve_effect("closeEffect", options.close_effect.as_deref())?;

        let mut hide_on_mouse_out = options.hide_on_mouse_out.unwrap_or(defaults.hide_on_mouse_out);
        if host.is_multiple() && !hide_on_mouse_out {
            // Multi-select panels only close on mouse out or Escape.
            tracing::debug!(
                target: targets::CONFIG,
                host = host.id(),
                "forcing hideOnMouseOut=true for multi-select host"
            );
            hide_on_mouse_out = true;
        }

        let item_padding =
            resolve_metric("itemPadding", options.item_padding, defaults.item_padding, Metric::NonNegative)?;
        let item_height =
            resolve_metric("itemHeight", options.item_height, defaults.item_height, Metric::Positive)?;
        let title_height =
            resolve_metric("titleHeight", options.title_height, defaults.title_height, Metric::NonNegative)?;

        let disallow_empty = options.disallow_empty.unwrap_or(defaults.disallow_empty);
        if disallow_empty && host.choices().is_empty() {
            return Err(ConfigError::EmptyChoices);
        }

        Ok(Self {
            min_width: options.min_width.unwrap_or(defaults.min_width),
            item_width: options.item_width,
            grid,
            title: options.title.clone(),
            prompt: options.prompt.clone().unwrap_or(defaults.prompt),
            max_display: options.max_display.unwrap_or(defaults.max_display),
            open_effect,
            open_speed,
            close_effect,
            close_speed,
            disallow_empty,
            hide_on_mouse_out,
            item_padding,
            item_height,
            title_height,
        })
    }

    /// Requested column count, if the grid is column-driven.
    pub fn columns(&self) -> Option<usize> {
        match self.grid {
            Some(GridShape::Columns(columns)) => Some(columns),
            _ => None,
        }
    }

    /// Requested row count, if the grid is row-driven.
    pub fn rows(&self) -> Option<usize> {
        match self.grid {
            Some(GridShape::Rows(rows)) => Some(rows),
            _ => None,
        }
    }

    /// Total horizontal padding around one item.
    pub fn item_horizontal_padding(&self) -> f32 {
        self.item_padding * 2.0
    }
}

#[derive(Clone, Copy)]
enum Metric {
    Positive,
    NonNegative,
}

fn resolve_metric(
    option: &'static str,
    value: Option<f32>,
    default: f32,
    metric: Metric,
) -> Result<f32, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let (valid, requirement) = match metric {
        Metric::Positive => (value > 0.0, "a positive number"),
        Metric::NonNegative => (value >= 0.0, "zero or a positive number"),
    };
    if value.is_finite() && valid {
        Ok(value)
    } else {
        Err(ConfigError::InvalidMetric {
            option,
            requirement,
            value,
        })
    }
}

fn resolve_effect(option: &'static str, value: Option<&str>) -> Result<Effect, ConfigError> {
    match value {
        None => Ok(Effect::default()),
        Some(name) => name
            .parse()
            .map_err(|()| ConfigError::invalid_effect(option, name)),
    }
}
