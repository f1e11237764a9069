//! Keyboard key definitions.
//!
//! WebDriver encodes non-printable keys as code points in the Unicode
//! private use area, sent through the element send keys command.
//!
//! # Example
//!
//! ```ignore
//! use remote_webdriver::Key;
//!
//! element.press(Key::Tab).await?;
//!
//! // Modifiers stay down until released with Key::Null
//! element.write_keys(&[Key::Control, Key::Char('a'), Key::Null]).await?;
//! ```

// ============================================================================
// Key Enum
// ============================================================================

/// A key that can be sent to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Releases all held modifiers.
    Null,
    Cancel,
    Help,

    // ========================================================================
    // Navigation & Control
    // ========================================================================
    Backspace,
    Tab,
    Clear,
    Return,
    /// Enter key, also the default terminator of `Element::write`.
    Enter,
    Pause,
    Escape,
    Space,
    Insert,
    Delete,

    // ========================================================================
    // Modifiers
    // ========================================================================
    Shift,
    Control,
    Alt,
    Meta,

    // ========================================================================
    // Arrow & Page Keys
    // ========================================================================
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,

    // ========================================================================
    // Function Keys
    // ========================================================================
    /// `F1` to `F12`. Other numbers map to `Null`.
    F(u8),

    /// A printable character.
    Char(char),
}

impl Key {
    /// Returns the character WebDriver uses for this key.
    #[must_use]
    pub fn code_point(self) -> char {
        let code = match self {
            Key::Char(c) => return c,
            Key::Null => 0xE000,
            Key::Cancel => 0xE001,
            Key::Help => 0xE002,
            Key::Backspace => 0xE003,
            Key::Tab => 0xE004,
            Key::Clear => 0xE005,
            Key::Return => 0xE006,
            Key::Enter => 0xE007,
            Key::Shift => 0xE008,
            Key::Control => 0xE009,
            Key::Alt => 0xE00A,
            Key::Pause => 0xE00B,
            Key::Escape => 0xE00C,
            Key::Space => 0xE00D,
            Key::PageUp => 0xE00E,
            Key::PageDown => 0xE00F,
            Key::End => 0xE010,
            Key::Home => 0xE011,
            Key::ArrowLeft => 0xE012,
            Key::ArrowUp => 0xE013,
            Key::ArrowRight => 0xE014,
            Key::ArrowDown => 0xE015,
            Key::Insert => 0xE016,
            Key::Delete => 0xE017,
            Key::F(n @ 1..=12) => 0xE030 + u32::from(n),
            Key::F(_) => 0xE000,
            Key::Meta => 0xE03D,
        };
        char::from_u32(code).unwrap_or('\u{E000}')
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Char(c)
    }
}

/// Encodes a key sequence as send keys text.
#[must_use]
pub fn encode_keys(keys: &[Key]) -> String {
    keys.iter().map(|key| key.code_point()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_code_point() {
        assert_eq!(Key::Enter.code_point(), '\u{E007}');
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(Key::F(1).code_point(), '\u{E031}');
        assert_eq!(Key::F(12).code_point(), '\u{E03C}');
        assert_eq!(Key::F(13).code_point(), '\u{E000}');
    }

    #[test]
    fn test_encode_keys() {
        let text = encode_keys(&[Key::Control, 'a'.into(), Key::Null]);
        assert_eq!(text, "\u{E009}a\u{E000}");
    }
}
