//! Keyboard input shared by all choosers.
//!
//! UI layers translate their native key events into [`Key`] before handing
//! them to the chooser registry. Only a handful of keys carry meaning for the
//! chooser; everything else is preserved as [`Key::Other`] so it can still be
//! logged.

/// A logical key, as delivered on key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Escape key. Closes every open panel.
    Escape,
    /// The Enter/Return key.
    Enter,
    /// The Tab key.
    Tab,
    /// The space bar.
    Space,
    /// A printable character.
    Char(char),
    /// Any other key, identified by its platform key code.
    Other(u32),
}

impl Key {
    /// Translate a legacy browser-style key code.
    ///
    /// ```
    /// use popselect_core::Key;
    ///
    /// assert_eq!(Key::from_key_code(27), Key::Escape);
    /// assert_eq!(Key::from_key_code(65), Key::Char('A'));
    /// ```
    pub fn from_key_code(code: u32) -> Self {
        match code {
            27 => Self::Escape,
            13 => Self::Enter,
            9 => Self::Tab,
            32 => Self::Space,
            48..=57 | 65..=90 => char::from_u32(code).map_or(Self::Other(code), Self::Char),
            _ => Self::Other(code),
        }
    }

    /// Check whether this is the Escape key.
    #[inline]
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(27), Key::Escape);
        assert_eq!(Key::from_key_code(13), Key::Enter);
        assert_eq!(Key::from_key_code(9), Key::Tab);
        assert_eq!(Key::from_key_code(32), Key::Space);
        assert_eq!(Key::from_key_code(49), Key::Char('1'));
        assert_eq!(Key::from_key_code(112), Key::Other(112));
    }

    #[test]
    fn test_is_escape() {
        assert!(Key::Escape.is_escape());
        assert!(!Key::Char('x').is_escape());
    }
}
