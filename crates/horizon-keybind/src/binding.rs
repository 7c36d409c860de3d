//! Canonical binding types for Horizon Keybind.
//!
//! A binding is the canonical, platform-resolved form of a key specification:
//!
//! - [`KeyChord`]: a single key plus modifiers, like "Ctrl+S"
//! - [`SequenceBinding`]: an ordered series of chords with an inter-step
//!   timeout, like "g then h"
//! - [`Binding`]: the tagged union the registry stores, one of the above
//!
//! Chord equality is structural over the modifier set and base key, so two
//! specs that normalize to the same chord compare equal regardless of how the
//! spec was spelled. Sequences additionally carry their timeout, which is
//! matcher configuration and deliberately excluded from conflict grouping:
//! two components binding the same steps collide no matter what timeouts they
//! asked for.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ParseError;
use crate::key::{Key, KeyboardModifiers};
use crate::parse::{self, Platform};

// =============================================================================
// Key Chord (Single Key + Modifiers)
// =============================================================================

/// A single key combination (one key with modifiers).
///
/// This represents a single chord like "Ctrl+S" or "Alt+F4". For multi-step
/// sequences like "g then h", see [`SequenceBinding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The base key.
    pub key: Key,
    /// The modifier keys that must be held.
    pub modifiers: KeyboardModifiers,
}

impl KeyChord {
    /// Create a new chord from a key and modifiers.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a chord with no modifiers.
    pub fn key_only(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Create a Ctrl+key chord.
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::CTRL,
        }
    }

    /// Create an Alt+key chord.
    pub fn alt(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::ALT,
        }
    }

    /// Create a Shift+key chord.
    pub fn shift(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::SHIFT,
        }
    }

    /// Create a Meta+key chord.
    pub fn meta(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::META,
        }
    }

    /// Create a Ctrl+Shift+key chord.
    pub fn ctrl_shift(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::CTRL_SHIFT,
        }
    }

    /// Check if this chord matches the given key and modifiers.
    pub fn matches(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.control {
            parts.push("Ctrl");
        }
        if self.modifiers.alt {
            parts.push("Alt");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }
        if self.modifiers.meta {
            parts.push("Meta");
        }

        parts.push(self.key.label());

        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for KeyChord {
    type Err = ParseError;

    /// Parse a chord spec like "ctrl+s" using the current platform's
    /// resolution for the generic "mod" modifier.
    ///
    /// Use [`parse::parse_chord`] directly to parse against an explicit
    /// [`Platform`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_chord(s, Platform::current())
    }
}

// =============================================================================
// Sequence Binding (Ordered Chord Steps + Timeout)
// =============================================================================

/// Maximum number of steps in a sequence binding.
pub const MAX_SEQUENCE_STEPS: usize = 8;

/// Default timeout between consecutive sequence steps (in milliseconds).
pub const DEFAULT_SEQUENCE_TIMEOUT_MS: u64 = 1000;

/// An ordered series of chords that must be pressed within a timeout window.
///
/// Each step must arrive within `timeout` of the previous step, or the
/// partial match is abandoned. Unlike a chord, the steps of a sequence are
/// discrete presses ("g" then "h"), not simultaneously held keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SequenceBinding {
    /// The chord steps, in press order (1 to [`MAX_SEQUENCE_STEPS`]).
    steps: Vec<KeyChord>,
    /// Maximum gap allowed between consecutive steps.
    timeout: Duration,
}

impl SequenceBinding {
    /// Create a sequence binding from chord steps and an inter-step timeout.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is empty or has more than [`MAX_SEQUENCE_STEPS`]
    /// elements. Parsed sequences are validated before construction; use
    /// [`parse::parse_sequence`] for fallible construction from specs.
    pub fn new(steps: Vec<KeyChord>, timeout: Duration) -> Self {
        assert!(
            !steps.is_empty() && steps.len() <= MAX_SEQUENCE_STEPS,
            "SequenceBinding must have 1-{MAX_SEQUENCE_STEPS} steps"
        );
        Self { steps, timeout }
    }

    /// The chord steps in press order.
    pub fn steps(&self) -> &[KeyChord] {
        &self.steps
    }

    /// The number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this sequence has a single step.
    pub fn is_single(&self) -> bool {
        self.steps.len() == 1
    }

    /// The first chord step.
    pub fn first(&self) -> KeyChord {
        self.steps[0]
    }

    /// The maximum gap allowed between consecutive steps.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Display for SequenceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step_strs: Vec<String> = self.steps.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", step_strs.join(", "))
    }
}

// =============================================================================
// Binding (Tagged Union)
// =============================================================================

/// The canonical binding stored for a registered handler.
///
/// Dispatch branches on the tag: chords are matched directly against the
/// incoming event, sequences are advanced through the sequence matcher.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A single-chord binding.
    Chord(KeyChord),
    /// A multi-step sequence binding.
    Sequence(SequenceBinding),
}

impl Binding {
    /// Whether this is a single-chord binding.
    pub fn is_chord(&self) -> bool {
        matches!(self, Binding::Chord(_))
    }

    /// Whether this is a sequence binding.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Binding::Sequence(_))
    }

    /// The canonical identity used for conflict grouping.
    ///
    /// Sequence timeouts do not participate: same-step sequences collide
    /// whatever their timeouts.
    pub(crate) fn conflict_key(&self) -> BindingKey {
        match self {
            Binding::Chord(chord) => BindingKey::Chord(*chord),
            Binding::Sequence(seq) => BindingKey::Sequence(seq.steps().to_vec()),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Chord(chord) => chord.fmt(f),
            Binding::Sequence(seq) => seq.fmt(f),
        }
    }
}

/// Canonical binding identity for conflict grouping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum BindingKey {
    Chord(KeyChord),
    Sequence(Vec<KeyChord>),
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // KeyChord Tests
    // =========================================================================

    #[test]
    fn test_chord_constructors() {
        let chord = KeyChord::ctrl(Key::S);
        assert_eq!(chord.key, Key::S);
        assert!(chord.modifiers.control);
        assert!(!chord.modifiers.shift);

        let plain = KeyChord::key_only(Key::G);
        assert!(plain.modifiers.none());
    }

    #[test]
    fn test_chord_matches() {
        let chord = KeyChord::ctrl(Key::S);
        assert!(chord.matches(Key::S, KeyboardModifiers::CTRL));
        assert!(!chord.matches(Key::S, KeyboardModifiers::NONE));
        assert!(!chord.matches(Key::A, KeyboardModifiers::CTRL));
    }

    #[test]
    fn test_chord_display() {
        assert_eq!(KeyChord::ctrl(Key::S).to_string(), "Ctrl+S");
        assert_eq!(KeyChord::alt(Key::F4).to_string(), "Alt+F4");
        assert_eq!(KeyChord::ctrl_shift(Key::N).to_string(), "Ctrl+Shift+N");
        assert_eq!(KeyChord::key_only(Key::F1).to_string(), "F1");
        assert_eq!(
            KeyChord::new(Key::S, KeyboardModifiers::META_SHIFT).to_string(),
            "Shift+Meta+S"
        );
    }

    #[test]
    fn test_chord_from_str_uses_current_platform() {
        let chord: KeyChord = "ctrl+shift+n".parse().unwrap();
        assert_eq!(chord, KeyChord::ctrl_shift(Key::N));
        assert!("nosuch+s".parse::<KeyChord>().is_err());
    }

    // =========================================================================
    // SequenceBinding Tests
    // =========================================================================

    #[test]
    fn test_sequence_accessors() {
        let seq = SequenceBinding::new(
            vec![KeyChord::key_only(Key::G), KeyChord::key_only(Key::H)],
            Duration::from_millis(500),
        );
        assert_eq!(seq.len(), 2);
        assert!(!seq.is_single());
        assert_eq!(seq.first(), KeyChord::key_only(Key::G));
        assert_eq!(seq.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_sequence_display() {
        let seq = SequenceBinding::new(
            vec![KeyChord::ctrl(Key::K), KeyChord::ctrl(Key::C)],
            Duration::from_millis(DEFAULT_SEQUENCE_TIMEOUT_MS),
        );
        assert_eq!(seq.to_string(), "Ctrl+K, Ctrl+C");
    }

    #[test]
    #[should_panic(expected = "1-8 steps")]
    fn test_sequence_rejects_empty_steps() {
        let _ = SequenceBinding::new(Vec::new(), Duration::from_millis(100));
    }

    // =========================================================================
    // Binding Tests
    // =========================================================================

    #[test]
    fn test_binding_tags() {
        let chord = Binding::Chord(KeyChord::ctrl(Key::S));
        let seq = Binding::Sequence(SequenceBinding::new(
            vec![KeyChord::key_only(Key::G)],
            Duration::from_millis(1000),
        ));
        assert!(chord.is_chord() && !chord.is_sequence());
        assert!(seq.is_sequence() && !seq.is_chord());
    }

    #[test]
    fn test_conflict_key_ignores_sequence_timeout() {
        let steps = vec![KeyChord::key_only(Key::G), KeyChord::key_only(Key::H)];
        let fast =
            Binding::Sequence(SequenceBinding::new(steps.clone(), Duration::from_millis(200)));
        let slow = Binding::Sequence(SequenceBinding::new(steps, Duration::from_millis(2000)));
        assert_ne!(fast, slow);
        assert_eq!(fast.conflict_key(), slow.conflict_key());
    }

    #[test]
    fn test_conflict_key_separates_chord_from_single_step_sequence() {
        let chord = Binding::Chord(KeyChord::key_only(Key::G));
        let seq = Binding::Sequence(SequenceBinding::new(
            vec![KeyChord::key_only(Key::G)],
            Duration::from_millis(1000),
        ));
        assert_ne!(chord.conflict_key(), seq.conflict_key());
    }
}
