//! Key event dispatch.
//!
//! [`ShortcutRegistry::dispatch`] feeds one [`KeyEvent`] through the library's
//! two matching stages. Sequences run first: if the event completes any
//! multi-step sequence, those handlers fire and the event is consumed.
//! Otherwise the event is matched against single-chord handlers. Either way
//! the surviving callbacks run synchronously, in registration order, on the
//! dispatching thread.
//!
//! Dispatch never sleeps or schedules timers. Sequence timeouts are judged
//! against event timestamps, so hosts that replay recorded input (or tests)
//! can drive the registry deterministically via
//! [`KeyEvent::with_timestamp`].
//!
//! # Example
//!
//! ```
//! use horizon_keybind::{Key, KeyEvent, KeyboardModifiers, Shortcut, ShortcutRegistry};
//!
//! let registry = ShortcutRegistry::new();
//! registry
//!     .register(Shortcut::chord("ctrl+s", "Save file", || println!("saving")))
//!     .unwrap();
//!
//! let mut event = KeyEvent::new(Key::S, KeyboardModifiers::CTRL);
//! let outcome = registry.dispatch(&mut event);
//! assert!(outcome.is_match());
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::binding::{Binding, BindingKey, KeyChord};
use crate::key::{Key, KeyboardModifiers};
use crate::registry::{ConflictPolicy, HandlerId, RegistryState, ShortcutRegistry};

// =============================================================================
// Key Phase
// =============================================================================

/// The phase of a key's lifecycle an event belongs to.
///
/// Handlers listen to exactly one phase; events of other phases pass them by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    /// The key was pressed. The default phase for handlers and events.
    #[default]
    Down,
    /// The key was released.
    Up,
    /// A completed press (down followed by up), as reported by hosts that
    /// synthesize click-like semantics.
    Press,
}

// =============================================================================
// Key Event
// =============================================================================

/// A keyboard event fed to [`ShortcutRegistry::dispatch`].
///
/// Carries the pressed key, held modifiers, phase, and a timestamp that
/// drives sequence timeout decisions. The acceptance flag mirrors the
/// host toolkit's default-action suppression: dispatch sets it for handlers
/// registered with `prevent_default`, and the host checks it afterwards.
#[derive(Clone, Copy, Debug)]
pub struct KeyEvent {
    /// The key that changed state.
    pub key: Key,
    /// Modifiers held when the event fired.
    pub modifiers: KeyboardModifiers,
    /// Lifecycle phase of the event.
    pub phase: KeyPhase,
    /// When the event occurred. Sequence deadlines are computed from this,
    /// never from wall-clock reads inside the library.
    pub timestamp: Instant,
    /// Whether the event has been accepted (default action suppressed).
    accepted: bool,
}

impl KeyEvent {
    /// Create a key-down event stamped with the current time.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key,
            modifiers,
            phase: KeyPhase::Down,
            timestamp: Instant::now(),
            accepted: false,
        }
    }

    /// Builder pattern for the event phase.
    pub fn with_phase(mut self, phase: KeyPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Builder pattern for the event timestamp.
    pub fn with_timestamp(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The event's key and modifiers as a chord.
    pub fn chord(&self) -> KeyChord {
        KeyChord::new(self.key, self.modifiers)
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, suppressing the host's default action.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing the host's default action.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

// =============================================================================
// Dispatch Outcome
// =============================================================================

/// What one call to [`ShortcutRegistry::dispatch`] did.
#[derive(Clone, Debug, Default)]
pub struct DispatchOutcome {
    /// Handlers whose callbacks ran, in invocation order.
    pub invoked: Vec<HandlerId>,
    /// Whether the event completed at least one sequence.
    pub completed_sequence: bool,
    /// Whether at least one sequence is mid-progress after the event.
    pub pending_sequence: bool,
    /// Whether any invoked handler accepted the event.
    pub default_prevented: bool,
}

impl DispatchOutcome {
    /// Whether any handler fired.
    pub fn is_match(&self) -> bool {
        !self.invoked.is_empty()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

impl ShortcutRegistry {
    /// Dispatch one key event to the matching handlers.
    ///
    /// The event is first offered to every sequence cursor. If it completes
    /// one or more sequences, those handlers fire and single-chord matching
    /// is skipped for this event. Otherwise the event is matched against
    /// enabled single-chord handlers of the same phase. In both stages the
    /// [`ConflictPolicy`] decides which of several same-binding handlers
    /// actually run: `FirstWins` keeps the earliest registration per binding,
    /// `LastWins` the latest, and `Warn`/`Error` keep all of them.
    ///
    /// For each surviving handler registered with `prevent_default`, the
    /// event is accepted before its callback runs. Callbacks execute
    /// synchronously in registration order; the internal lock is released
    /// first, so callbacks may freely call back into the registry.
    #[tracing::instrument(skip_all, target = "horizon_keybind::dispatch", level = "trace")]
    pub fn dispatch(&self, event: &mut KeyEvent) -> DispatchOutcome {
        let chord = event.chord();
        let mut outcome = DispatchOutcome::default();

        let survivors = {
            let mut state = self.state.write();
            let advance = state.matcher.advance(chord, event.phase, event.timestamp);
            outcome.pending_sequence = advance.pending;

            if !advance.completed.is_empty() {
                // A completed sequence consumes the event outright.
                outcome.completed_sequence = true;
                let kept = filter_by_policy(&state, advance.completed, self.config.conflict_policy);
                snapshot_callbacks(&state, kept)
            } else {
                let matched: Vec<HandlerId> = state
                    .order
                    .iter()
                    .copied()
                    .filter(|&id| {
                        state.handlers.get(id).is_some_and(|handler| {
                            handler.enabled
                                && handler.phase == event.phase
                                && matches!(&handler.binding, Binding::Chord(c) if *c == chord)
                        })
                    })
                    .collect();
                let kept = filter_by_policy(&state, matched, self.config.conflict_policy);
                snapshot_callbacks(&state, kept)
            }
        };

        tracing::trace!(
            target: "horizon_keybind::dispatch",
            chord = %chord,
            phase = ?event.phase,
            matched = survivors.len(),
            completed_sequence = outcome.completed_sequence,
            pending_sequence = outcome.pending_sequence,
            "dispatching key event"
        );

        for (id, prevent_default, callback) in survivors {
            if prevent_default {
                event.accept();
                outcome.default_prevented = true;
            }
            callback();
            outcome.invoked.push(id);
        }

        outcome
    }
}

/// Reduce a matched set to the handlers the conflict policy lets fire,
/// preserving registration order.
fn filter_by_policy(
    state: &RegistryState,
    matched: Vec<HandlerId>,
    policy: ConflictPolicy,
) -> Vec<HandlerId> {
    match policy {
        ConflictPolicy::Warn | ConflictPolicy::Error => matched,
        ConflictPolicy::FirstWins | ConflictPolicy::LastWins => {
            let mut winners: Vec<(BindingKey, HandlerId)> = Vec::new();
            for &id in &matched {
                let Some(handler) = state.handlers.get(id) else {
                    continue;
                };
                let key = handler.binding.conflict_key();
                match winners.iter_mut().find(|(existing, _)| *existing == key) {
                    Some((_, winner)) => {
                        if policy == ConflictPolicy::LastWins {
                            *winner = id;
                        }
                    }
                    None => winners.push((key, id)),
                }
            }
            matched
                .into_iter()
                .filter(|id| winners.iter().any(|(_, winner)| winner == id))
                .collect()
        }
    }
}

/// Clone out the callbacks so they can run after the registry lock drops.
fn snapshot_callbacks(
    state: &RegistryState,
    ids: Vec<HandlerId>,
) -> Vec<(HandlerId, bool, Arc<dyn Fn() + Send + Sync>)> {
    ids.into_iter()
        .filter_map(|id| {
            state
                .handlers
                .get(id)
                .map(|handler| (id, handler.prevent_default, handler.callback.clone()))
        })
        .collect()
}
