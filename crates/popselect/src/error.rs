//! Error types for the chooser.

use crate::registry::ChooserId;

/// Result type alias for chooser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving a chooser.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Invalid or contradictory options, detected at `init`.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An operation that is not allowed in the chooser's current state.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Invalid or contradictory configuration.
///
/// Always raised synchronously from `init`; the host control is left
/// untouched and visible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Both `columns` and `rows` were supplied.
    #[error("cannot supply both 'rows' and 'columns'")]
    ColumnsAndRows,

    /// `columns` or `rows` was supplied without `itemWidth`.
    #[error("'itemWidth' must be supplied if '{option}' is specified")]
    MissingItemWidth { option: &'static str },

    /// `columns` or `rows` was zero.
    #[error("'{option}' must be at least 1")]
    ZeroGridDimension { option: &'static str },

    /// `itemWidth` was zero, negative or not finite.
    #[error("'itemWidth' must be a positive number, got {value}")]
    InvalidItemWidth { value: f32 },

    /// `itemPadding`, `itemHeight` or `titleHeight` was out of range.
    #[error("'{option}' must be {requirement}, got {value}")]
    InvalidMetric {
        option: &'static str,
        requirement: &'static str,
        value: f32,
    },

    /// A speed was neither a positive number nor a named preset.
    #[error("'{option}' must be a positive number or \"slow\" or \"fast\", got {value}")]
    InvalidSpeed { option: &'static str, value: String },

    /// An effect was not one of the recognized kinds.
    #[error("'{option}' must be either 'fade' or 'slide', got '{value}'")]
    InvalidEffect { option: &'static str, value: String },

    /// An option had the wrong type in an untyped option source.
    #[error("invalid option value: {message}")]
    InvalidOption { message: String },

    /// `disallowEmpty` was requested for a host control without choices.
    #[error("'disallowEmpty' conflicts with a host control that has no choices")]
    EmptyChoices,
}

impl ConfigError {
    /// Create a missing item width error.
    pub fn missing_item_width(option: &'static str) -> Self {
        Self::MissingItemWidth { option }
    }

    /// Create a speed error.
    pub fn invalid_speed(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSpeed {
            option,
            value: value.into(),
        }
    }

    /// Create an effect error.
    pub fn invalid_effect(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEffect {
            option,
            value: value.into(),
        }
    }

    /// Create an option type error.
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::InvalidOption {
            message: message.into(),
        }
    }
}

/// An operation that is invalid given the current configuration or registry state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// `clear` was called on a chooser configured with `disallowEmpty`.
    #[error("cannot use 'clear' when disallowEmpty=true")]
    ClearDisallowed,

    /// The chooser id does not refer to a live chooser.
    #[error("no chooser with id {0:?}")]
    UnknownChooser(ChooserId),

    /// The host control already has a chooser attached.
    #[error("host control '{host}' already has a chooser")]
    AlreadyInitialized { host: String },
}
