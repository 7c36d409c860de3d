//! Horizon Keybind - keyboard shortcut management for component-based UIs.
//!
//! This crate lets independent UI components register keyboard shortcuts
//! against a shared registry without coordinating with each other. The
//! registry normalizes shortcut specs per platform, detects and arbitrates
//! conflicts, tracks multi-step sequences like "g then h", dispatches key
//! events to the right callbacks, and renders grouped help listings.
//!
//! # Architecture
//!
//! - [`key`] - keys and modifier flags
//! - [`binding`] - canonical chord and sequence bindings
//! - [`parse`] - spec parsing and per-platform "mod" resolution
//! - [`registry`] - registration, conflict policies, change notification
//! - [`dispatch`] - key event dispatch and sequence completion
//! - [`help`] - display-ready grouped shortcut listings
//! - [`error`] - parse and conflict error types
//!
//! The signal/slot layer lives in `horizon-keybind-core` and is re-exported
//! here.
//!
//! # Example
//!
//! ```
//! use horizon_keybind::{Key, KeyEvent, KeyboardModifiers, Shortcut, ShortcutRegistry};
//!
//! let registry = ShortcutRegistry::new();
//!
//! registry
//!     .register(
//!         Shortcut::chord("mod+s", "Save file", || println!("saving"))
//!             .with_component("Editor")
//!             .with_category("File"),
//!     )
//!     .unwrap();
//!
//! registry
//!     .register(
//!         Shortcut::sequence(&["g", "h"], "Go to home view", || println!("home"))
//!             .with_component("Navigator")
//!             .with_category("Navigation"),
//!     )
//!     .unwrap();
//!
//! // Feed key events from the host toolkit.
//! let outcome = registry.dispatch(&mut KeyEvent::new(Key::G, KeyboardModifiers::NONE));
//! assert!(outcome.pending_sequence);
//!
//! for group in registry.help_groups() {
//!     println!("{}", group.category);
//! }
//! ```

pub use horizon_keybind_core::*;

pub mod binding;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod key;
pub mod parse;
pub mod prelude;
pub mod registry;

mod matcher;

pub use binding::{
    Binding, DEFAULT_SEQUENCE_TIMEOUT_MS, KeyChord, MAX_SEQUENCE_STEPS, SequenceBinding,
};
pub use dispatch::{DispatchOutcome, KeyEvent, KeyPhase};
pub use error::{ConflictError, ParseError, ShortcutError, ShortcutResult};
pub use help::{CategoryGroup, ShortcutEntry};
pub use key::{Key, KeyboardModifiers};
pub use parse::{Platform, parse_chord, parse_sequence};
pub use registry::{
    ConflictGroup, ConflictPolicy, HandlerId, HandlerInfo, RegistryConfig, RegistryEvent,
    ScopedRegistration, Shortcut, ShortcutRegistry,
};
