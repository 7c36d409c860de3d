//! Key and modifier types for Horizon Keybind.
//!
//! This module defines the vocabulary of keys a shortcut can be built from:
//!
//! - [`Key`]: Named non-modifier keys (letters, digits, function keys, ...)
//! - [`KeyboardModifiers`]: The set of modifier keys held alongside a key
//!
//! Only keys that can serve as the base of a chord are represented here;
//! modifier presses are carried exclusively through [`KeyboardModifiers`].
//! Hosts mapping raw input that has no named representation can use
//! [`Key::Unknown`] to produce an event that matches no binding instead of
//! dropping it.

// =============================================================================
// Keyboard Modifiers
// =============================================================================

/// Keyboard modifiers that may be held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta key is held (Command on macOS, Windows key elsewhere).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta + Shift modifiers.
    pub const META_SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: true,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

// =============================================================================
// Key Enum
// =============================================================================

/// A named keyboard key.
///
/// This enum represents the logical keys a shortcut binding can name. It
/// follows a similar structure to web KeyboardEvent.code values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab,

    // Whitespace
    Space,

    // Punctuation and symbols
    Minus, Equal,
    BracketLeft, BracketRight, Backslash,
    Semicolon, Quote,
    Comma, Period, Slash,
    Grave,

    // Control
    Escape,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Check if this is a letter key.
    pub fn is_letter(&self) -> bool {
        matches!(
            self,
            Key::A
                | Key::B
                | Key::C
                | Key::D
                | Key::E
                | Key::F
                | Key::G
                | Key::H
                | Key::I
                | Key::J
                | Key::K
                | Key::L
                | Key::M
                | Key::N
                | Key::O
                | Key::P
                | Key::Q
                | Key::R
                | Key::S
                | Key::T
                | Key::U
                | Key::V
                | Key::W
                | Key::X
                | Key::Y
                | Key::Z
        )
    }

    /// Check if this is a digit key (main keyboard).
    pub fn is_digit(&self) -> bool {
        matches!(
            self,
            Key::Digit0
                | Key::Digit1
                | Key::Digit2
                | Key::Digit3
                | Key::Digit4
                | Key::Digit5
                | Key::Digit6
                | Key::Digit7
                | Key::Digit8
                | Key::Digit9
        )
    }

    /// Check if this is a function key.
    pub fn is_function_key(&self) -> bool {
        matches!(
            self,
            Key::F1
                | Key::F2
                | Key::F3
                | Key::F4
                | Key::F5
                | Key::F6
                | Key::F7
                | Key::F8
                | Key::F9
                | Key::F10
                | Key::F11
                | Key::F12
        )
    }

    /// Convert this key to a lowercase ASCII character, if applicable.
    ///
    /// Returns `Some(char)` for letter keys (A-Z) and digit keys (0-9),
    /// `None` for other keys. Letters are returned in lowercase.
    pub fn to_ascii_char(&self) -> Option<char> {
        match self {
            Key::A => Some('a'),
            Key::B => Some('b'),
            Key::C => Some('c'),
            Key::D => Some('d'),
            Key::E => Some('e'),
            Key::F => Some('f'),
            Key::G => Some('g'),
            Key::H => Some('h'),
            Key::I => Some('i'),
            Key::J => Some('j'),
            Key::K => Some('k'),
            Key::L => Some('l'),
            Key::M => Some('m'),
            Key::N => Some('n'),
            Key::O => Some('o'),
            Key::P => Some('p'),
            Key::Q => Some('q'),
            Key::R => Some('r'),
            Key::S => Some('s'),
            Key::T => Some('t'),
            Key::U => Some('u'),
            Key::V => Some('v'),
            Key::W => Some('w'),
            Key::X => Some('x'),
            Key::Y => Some('y'),
            Key::Z => Some('z'),
            Key::Digit0 => Some('0'),
            Key::Digit1 => Some('1'),
            Key::Digit2 => Some('2'),
            Key::Digit3 => Some('3'),
            Key::Digit4 => Some('4'),
            Key::Digit5 => Some('5'),
            Key::Digit6 => Some('6'),
            Key::Digit7 => Some('7'),
            Key::Digit8 => Some('8'),
            Key::Digit9 => Some('9'),
            _ => None,
        }
    }

    /// Parse a key name token to a `Key`, accepting common synonyms.
    ///
    /// Single characters map to letters and digits ("s", "5"). Multi-character
    /// names are matched case-insensitively ("enter", "Return", "ESC").
    /// Returns `None` for unrecognized tokens; the token is never interpreted
    /// as a modifier here.
    pub fn from_token(token: &str) -> Option<Key> {
        if token.chars().count() == 1 {
            let ch = token.chars().next()?.to_ascii_uppercase();
            return match ch {
                'A' => Some(Key::A),
                'B' => Some(Key::B),
                'C' => Some(Key::C),
                'D' => Some(Key::D),
                'E' => Some(Key::E),
                'F' => Some(Key::F),
                'G' => Some(Key::G),
                'H' => Some(Key::H),
                'I' => Some(Key::I),
                'J' => Some(Key::J),
                'K' => Some(Key::K),
                'L' => Some(Key::L),
                'M' => Some(Key::M),
                'N' => Some(Key::N),
                'O' => Some(Key::O),
                'P' => Some(Key::P),
                'Q' => Some(Key::Q),
                'R' => Some(Key::R),
                'S' => Some(Key::S),
                'T' => Some(Key::T),
                'U' => Some(Key::U),
                'V' => Some(Key::V),
                'W' => Some(Key::W),
                'X' => Some(Key::X),
                'Y' => Some(Key::Y),
                'Z' => Some(Key::Z),
                '0' => Some(Key::Digit0),
                '1' => Some(Key::Digit1),
                '2' => Some(Key::Digit2),
                '3' => Some(Key::Digit3),
                '4' => Some(Key::Digit4),
                '5' => Some(Key::Digit5),
                '6' => Some(Key::Digit6),
                '7' => Some(Key::Digit7),
                '8' => Some(Key::Digit8),
                '9' => Some(Key::Digit9),
                '-' => Some(Key::Minus),
                '=' => Some(Key::Equal),
                '[' => Some(Key::BracketLeft),
                ']' => Some(Key::BracketRight),
                '\\' => Some(Key::Backslash),
                ';' => Some(Key::Semicolon),
                '\'' => Some(Key::Quote),
                ',' => Some(Key::Comma),
                '.' => Some(Key::Period),
                '/' => Some(Key::Slash),
                '`' => Some(Key::Grave),
                _ => None,
            };
        }

        match token.to_lowercase().as_str() {
            // Function keys
            "f1" => Some(Key::F1),
            "f2" => Some(Key::F2),
            "f3" => Some(Key::F3),
            "f4" => Some(Key::F4),
            "f5" => Some(Key::F5),
            "f6" => Some(Key::F6),
            "f7" => Some(Key::F7),
            "f8" => Some(Key::F8),
            "f9" => Some(Key::F9),
            "f10" => Some(Key::F10),
            "f11" => Some(Key::F11),
            "f12" => Some(Key::F12),

            // Navigation
            "up" | "arrowup" => Some(Key::ArrowUp),
            "down" | "arrowdown" => Some(Key::ArrowDown),
            "left" | "arrowleft" => Some(Key::ArrowLeft),
            "right" | "arrowright" => Some(Key::ArrowRight),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" | "pgup" => Some(Key::PageUp),
            "pagedown" | "pgdn" => Some(Key::PageDown),

            // Editing
            "backspace" | "back" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "insert" | "ins" => Some(Key::Insert),
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "space" | "spacebar" => Some(Key::Space),
            "escape" | "esc" => Some(Key::Escape),

            // Punctuation
            "minus" => Some(Key::Minus),
            "equal" | "equals" => Some(Key::Equal),
            "bracketleft" => Some(Key::BracketLeft),
            "bracketright" => Some(Key::BracketRight),
            "backslash" => Some(Key::Backslash),
            "semicolon" => Some(Key::Semicolon),
            "quote" => Some(Key::Quote),
            "comma" => Some(Key::Comma),
            "period" => Some(Key::Period),
            "slash" => Some(Key::Slash),
            "grave" => Some(Key::Grave),

            _ => None,
        }
    }

    /// The canonical display label for this key.
    pub fn label(&self) -> &'static str {
        match self {
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Digit0 => "0",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Insert => "Insert",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Minus => "-",
            Key::Equal => "=",
            Key::BracketLeft => "[",
            Key::BracketRight => "]",
            Key::Backslash => "\\",
            Key::Semicolon => ";",
            Key::Quote => "'",
            Key::Comma => ",",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Grave => "`",
            Key::Escape => "Escape",
            Key::Unknown(_) => "Unknown",
        }
    }
}
