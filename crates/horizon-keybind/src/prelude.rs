//! Prelude module for Horizon Keybind.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_keybind::prelude::*;
//! ```
//!
//! This provides access to:
//! - The registry and registration builder (`ShortcutRegistry`, `Shortcut`)
//! - Event dispatch (`KeyEvent`, `KeyPhase`, `DispatchOutcome`)
//! - Binding and key types (`Binding`, `KeyChord`, `Key`, `KeyboardModifiers`)
//! - Conflict handling (`ConflictPolicy`, `ConflictError`)
//! - Change notification (`Signal`, `ConnectionId`, `RegistryEvent`)

// ============================================================================
// Registry
// ============================================================================

pub use crate::registry::{
    ConflictGroup, ConflictPolicy, HandlerId, HandlerInfo, RegistryConfig, RegistryEvent,
    ScopedRegistration, Shortcut, ShortcutRegistry,
};

// ============================================================================
// Dispatch
// ============================================================================

pub use crate::dispatch::{DispatchOutcome, KeyEvent, KeyPhase};

// ============================================================================
// Bindings and Keys
// ============================================================================

pub use crate::binding::{Binding, KeyChord, SequenceBinding};
pub use crate::key::{Key, KeyboardModifiers};
pub use crate::parse::Platform;

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{ConflictError, ParseError, ShortcutError, ShortcutResult};

// ============================================================================
// Help Listings
// ============================================================================

pub use crate::help::{CategoryGroup, ShortcutEntry};

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use horizon_keybind_core::{ConnectionGuard, ConnectionId, Signal};

#[cfg(test)]
mod tests {
    #![allow(unused)]
    use super::*;

    /// Verify that the prelude exports are accessible and fit together.
    #[test]
    fn test_prelude_types_exist() {
        let _signal: Signal<i32> = Signal::new();
        let _chord = KeyChord::ctrl(Key::S);
        let _modifiers = KeyboardModifiers::CTRL_SHIFT;
        let _platform = Platform::current();
        let _policy = ConflictPolicy::default();
        let _registry = ShortcutRegistry::new();
        let _event = KeyEvent::new(Key::A, KeyboardModifiers::NONE);
    }

    /// Verify builder and registry signatures line up (compile-time check).
    #[allow(dead_code)]
    fn _registration_check(registry: &ShortcutRegistry) -> ShortcutResult<HandlerId> {
        registry.register(
            Shortcut::chord("mod+s", "Save", || {})
                .with_component("Editor")
                .with_phase(KeyPhase::Down),
        )
    }
}
