//! Shortcut spec parsing and platform resolution.
//!
//! Specs are written as "+"-joined tokens, for example `"ctrl+shift+n"` or
//! `"mod+s"`. Tokens are matched case-insensitively and surrounding
//! whitespace is ignored, so `"Ctrl + S"` and `"ctrl+s"` parse to the same
//! chord. Modifier order is irrelevant: `"ctrl+shift+s"` and
//! `"shift+ctrl+s"` are the same binding.
//!
//! The generic `"mod"` modifier resolves per platform: Command on macOS,
//! Control everywhere else. This lets one spec serve both worlds:
//!
//! ```
//! use horizon_keybind::{parse_chord, Key, KeyboardModifiers, Platform};
//!
//! let mac = parse_chord("mod+s", Platform::MacOs).unwrap();
//! assert_eq!(mac.modifiers, KeyboardModifiers::META);
//!
//! let win = parse_chord("mod+s", Platform::Windows).unwrap();
//! assert_eq!(win.modifiers, KeyboardModifiers::CTRL);
//! assert_eq!(win.key, Key::S);
//! ```

use std::time::Duration;

use crate::binding::{KeyChord, MAX_SEQUENCE_STEPS, SequenceBinding};
use crate::error::ParseError;
use crate::key::{Key, KeyboardModifiers};

// =============================================================================
// Platform
// =============================================================================

/// Target platform for resolving the generic "mod" modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Apple platforms; "mod" resolves to Command (meta).
    MacOs,
    /// Windows; "mod" resolves to Control.
    Windows,
    /// Linux and other platforms; "mod" resolves to Control.
    Linux,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Whether "mod" resolves to the Command (meta) modifier here.
    pub fn mod_is_meta(&self) -> bool {
        matches!(self, Platform::MacOs)
    }
}

// =============================================================================
// Chord Parsing
// =============================================================================

/// Parse a "+"-joined chord spec into a canonical [`KeyChord`].
///
/// Recognized modifier tokens (case-insensitive):
///
/// - `ctrl`, `control`
/// - `alt`, `option`
/// - `shift`
/// - `meta`, `cmd`, `command`, `super`, `win`, `windows`
/// - `mod` (resolves per `platform`)
///
/// Exactly one non-modifier token must be present and must name a key.
///
/// # Errors
///
/// - [`ParseError::EmptySpec`] if the spec is empty or whitespace
/// - [`ParseError::UnknownToken`] if a token is neither modifier nor key
/// - [`ParseError::MissingBaseKey`] if only modifiers are given
/// - [`ParseError::DuplicateBaseKey`] if two key tokens are given
pub fn parse_chord(spec: &str, platform: Platform) -> Result<KeyChord, ParseError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ParseError::EmptySpec);
    }

    let mut modifiers = KeyboardModifiers::NONE;
    let mut key: Option<Key> = None;

    for part in spec.split('+') {
        let part = part.trim();
        let lower = part.to_lowercase();

        match lower.as_str() {
            "ctrl" | "control" => modifiers.control = true,
            "alt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "meta" | "cmd" | "command" | "super" | "win" | "windows" => modifiers.meta = true,
            "mod" => {
                if platform.mod_is_meta() {
                    modifiers.meta = true;
                } else {
                    modifiers.control = true;
                }
            }
            "" => {
                // A dangling "+" leaves no key token to consume.
                return Err(ParseError::MissingBaseKey {
                    spec: spec.to_string(),
                });
            }
            _ => {
                let parsed = Key::from_token(part).ok_or_else(|| ParseError::UnknownToken {
                    token: part.to_string(),
                })?;
                if key.is_some() {
                    return Err(ParseError::DuplicateBaseKey {
                        spec: spec.to_string(),
                    });
                }
                key = Some(parsed);
            }
        }
    }

    match key {
        Some(key) => Ok(KeyChord { key, modifiers }),
        None => Err(ParseError::MissingBaseKey {
            spec: spec.to_string(),
        }),
    }
}

// =============================================================================
// Sequence Parsing
// =============================================================================

/// Parse a series of chord specs into a [`SequenceBinding`].
///
/// Each element of `steps` is parsed with [`parse_chord`]. The sequence must
/// have 1 to [`MAX_SEQUENCE_STEPS`] steps.
///
/// # Errors
///
/// - [`ParseError::EmptySequence`] if `steps` is empty
/// - [`ParseError::TooManySteps`] if `steps` exceeds the limit
/// - Any chord-level error from the offending step
pub fn parse_sequence(
    steps: &[&str],
    platform: Platform,
    timeout: Duration,
) -> Result<SequenceBinding, ParseError> {
    if steps.is_empty() {
        return Err(ParseError::EmptySequence);
    }
    if steps.len() > MAX_SEQUENCE_STEPS {
        return Err(ParseError::TooManySteps { count: steps.len() });
    }

    let chords = steps
        .iter()
        .map(|spec| parse_chord(spec, platform))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SequenceBinding::new(chords, timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Chord Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_simple_chord() {
        let chord = parse_chord("ctrl+s", Platform::Linux).unwrap();
        assert_eq!(chord, KeyChord::ctrl(Key::S));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let lower = parse_chord("ctrl+shift+n", Platform::Linux).unwrap();
        let upper = parse_chord("CTRL+SHIFT+N", Platform::Linux).unwrap();
        let mixed = parse_chord("Ctrl+Shift+n", Platform::Linux).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_parse_ignores_whitespace() {
        let chord = parse_chord("  ctrl + shift + s  ", Platform::Linux).unwrap();
        assert_eq!(chord, KeyChord::ctrl_shift(Key::S));
    }

    #[test]
    fn test_modifier_order_is_irrelevant() {
        let a = parse_chord("ctrl+shift+s", Platform::Linux).unwrap();
        let b = parse_chord("shift+ctrl+s", Platform::Linux).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_modifier_synonyms() {
        let control = parse_chord("control+s", Platform::Linux).unwrap();
        assert_eq!(control, KeyChord::ctrl(Key::S));

        let option = parse_chord("option+s", Platform::Linux).unwrap();
        assert_eq!(option, KeyChord::alt(Key::S));

        for spec in ["meta+s", "cmd+s", "command+s", "super+s", "win+s"] {
            let chord = parse_chord(spec, Platform::Linux).unwrap();
            assert_eq!(chord, KeyChord::meta(Key::S), "spec {spec:?}");
        }
    }

    #[test]
    fn test_mod_resolves_per_platform() {
        let mac = parse_chord("mod+s", Platform::MacOs).unwrap();
        assert_eq!(mac.modifiers, KeyboardModifiers::META);

        let win = parse_chord("mod+s", Platform::Windows).unwrap();
        assert_eq!(win.modifiers, KeyboardModifiers::CTRL);

        let linux = parse_chord("mod+s", Platform::Linux).unwrap();
        assert_eq!(linux.modifiers, KeyboardModifiers::CTRL);
    }

    #[test]
    fn test_mod_combines_with_explicit_modifiers() {
        let chord = parse_chord("mod+shift+z", Platform::MacOs).unwrap();
        assert_eq!(chord.modifiers, KeyboardModifiers::META_SHIFT);
        assert_eq!(chord.key, Key::Z);
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(
            parse_chord("ctrl+enter", Platform::Linux).unwrap().key,
            Key::Enter
        );
        assert_eq!(
            parse_chord("alt+F4", Platform::Linux).unwrap().key,
            Key::F4
        );
        assert_eq!(
            parse_chord("escape", Platform::Linux).unwrap(),
            KeyChord::key_only(Key::Escape)
        );
    }

    #[test]
    fn test_parse_bare_key() {
        let chord = parse_chord("g", Platform::Linux).unwrap();
        assert_eq!(chord, KeyChord::key_only(Key::G));
    }

    // =========================================================================
    // Chord Error Tests
    // =========================================================================

    #[test]
    fn test_empty_spec_is_rejected() {
        assert_eq!(parse_chord("", Platform::Linux), Err(ParseError::EmptySpec));
        assert_eq!(
            parse_chord("   ", Platform::Linux),
            Err(ParseError::EmptySpec)
        );
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = parse_chord("ctrl+blorp", Platform::Linux).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownToken {
                token: "blorp".to_string()
            }
        );
    }

    #[test]
    fn test_modifiers_without_key_are_rejected() {
        let err = parse_chord("ctrl+shift", Platform::Linux).unwrap_err();
        assert!(matches!(err, ParseError::MissingBaseKey { .. }));
    }

    #[test]
    fn test_dangling_separator_is_rejected() {
        let err = parse_chord("ctrl+", Platform::Linux).unwrap_err();
        assert!(matches!(err, ParseError::MissingBaseKey { .. }));
    }

    #[test]
    fn test_two_base_keys_are_rejected() {
        let err = parse_chord("ctrl+a+b", Platform::Linux).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateBaseKey { .. }));
    }

    // =========================================================================
    // Sequence Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_sequence() {
        let seq = parse_sequence(&["g", "h"], Platform::Linux, Duration::from_millis(750))
            .unwrap();
        assert_eq!(
            seq.steps(),
            &[KeyChord::key_only(Key::G), KeyChord::key_only(Key::H)]
        );
        assert_eq!(seq.timeout(), Duration::from_millis(750));
    }

    #[test]
    fn test_parse_sequence_with_modified_steps() {
        let seq = parse_sequence(
            &["ctrl+k", "ctrl+c"],
            Platform::Linux,
            Duration::from_millis(1000),
        )
        .unwrap();
        assert_eq!(seq.steps(), &[KeyChord::ctrl(Key::K), KeyChord::ctrl(Key::C)]);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let err = parse_sequence(&[], Platform::Linux, Duration::from_millis(1000)).unwrap_err();
        assert_eq!(err, ParseError::EmptySequence);
    }

    #[test]
    fn test_oversized_sequence_is_rejected() {
        let steps = ["a"; MAX_SEQUENCE_STEPS + 1];
        let err =
            parse_sequence(&steps, Platform::Linux, Duration::from_millis(1000)).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooManySteps {
                count: MAX_SEQUENCE_STEPS + 1
            }
        );
    }

    #[test]
    fn test_sequence_step_error_propagates() {
        let err = parse_sequence(&["g", "wat"], Platform::Linux, Duration::from_millis(1000))
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownToken {
                token: "wat".to_string()
            }
        );
    }
}
