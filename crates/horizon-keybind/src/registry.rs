//! Shortcut registration, ownership, and conflict handling.
//!
//! The [`ShortcutRegistry`] is the hub of the library: components register
//! [`Shortcut`]s against it, the registry parses their specs into canonical
//! bindings, detects collisions according to its [`ConflictPolicy`], and
//! notifies observers of every change through the [`changed`]
//! signal.
//!
//! Registrations are identity-based: registering the same spec twice creates
//! two live handlers with distinct [`HandlerId`]s. Removal is by id and
//! idempotent, so double-unregistration in component teardown paths is
//! harmless.
//!
//! [`changed`]: ShortcutRegistry::changed
//!
//! # Example
//!
//! ```
//! use horizon_keybind::{Shortcut, ShortcutRegistry};
//!
//! let registry = ShortcutRegistry::new();
//!
//! let save = registry
//!     .register(
//!         Shortcut::chord("mod+s", "Save file", || println!("saving"))
//!             .with_component("Editor")
//!             .with_category("File"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(registry.len(), 1);
//! assert!(registry.unregister(save));
//! assert!(!registry.unregister(save)); // already gone, not an error
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use horizon_keybind_core::{ConnectionGuard, ConnectionId, Signal};

use crate::binding::{Binding, BindingKey, DEFAULT_SEQUENCE_TIMEOUT_MS};
use crate::dispatch::KeyPhase;
use crate::error::{ConflictError, ParseError, ShortcutError, ShortcutResult};
use crate::matcher::SequenceMatcher;
use crate::parse::{self, Platform};

new_key_type! {
    /// Stable identity of a registered shortcut handler.
    ///
    /// Returned by [`ShortcutRegistry::register`] and used for removal and
    /// lookup. Ids are never reused by a registry instance.
    pub struct HandlerId;
}

// =============================================================================
// Conflict Policy
// =============================================================================

/// How a registry treats two handlers bound to the same chord or sequence.
///
/// The policy is fixed per registry instance at construction. `Warn`,
/// `FirstWins`, and `LastWins` all accept the registration and keep every
/// handler; they differ only in diagnostics and in which handlers
/// [`dispatch`](ShortcutRegistry::dispatch) actually invokes. `Error` rejects
/// the colliding registration outright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConflictPolicy {
    /// Accept and invoke every handler, logging one warning per colliding
    /// registration.
    #[default]
    Warn,
    /// Accept every handler but invoke only the earliest-registered one per
    /// binding.
    FirstWins,
    /// Accept every handler but invoke only the latest-registered one per
    /// binding.
    LastWins,
    /// Reject a registration whose binding is already taken.
    Error,
}

/// Construction-time configuration for a [`ShortcutRegistry`].
#[derive(Clone, Copy, Debug)]
pub struct RegistryConfig {
    /// How colliding registrations are handled.
    pub conflict_policy: ConflictPolicy,
    /// Platform used to resolve the generic "mod" modifier in specs.
    pub platform: Platform,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::default(),
            platform: Platform::current(),
        }
    }
}

// =============================================================================
// Shortcut Builder
// =============================================================================

/// Unparsed binding spec carried by a [`Shortcut`] until registration.
#[derive(Clone, Debug)]
enum BindingSpec {
    Chord(String),
    Sequence(Vec<String>),
}

/// A shortcut registration request.
///
/// Built by a component and handed to [`ShortcutRegistry::register`], which
/// parses the spec against the registry's platform and stores the handler.
/// The spec is not validated before registration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use horizon_keybind::{KeyPhase, Shortcut};
///
/// let go_home = Shortcut::sequence(&["g", "h"], "Go to home view", || {})
///     .with_component("Navigator")
///     .with_category("Navigation")
///     .with_timeout(Duration::from_millis(750));
///
/// let release = Shortcut::chord("space", "Stop preview", || {})
///     .with_phase(KeyPhase::Up)
///     .with_enabled(false);
/// ```
pub struct Shortcut {
    spec: BindingSpec,
    /// Sequence step timeout; `None` means [`DEFAULT_SEQUENCE_TIMEOUT_MS`].
    timeout: Option<Duration>,
    description: String,
    category: String,
    component: String,
    enabled: bool,
    prevent_default: bool,
    phase: KeyPhase,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl Shortcut {
    /// Create a single-chord shortcut from a spec like `"mod+s"`.
    ///
    /// The callback runs every time the chord is dispatched to this handler.
    pub fn chord<F>(spec: impl Into<String>, description: impl Into<String>, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::with_spec(BindingSpec::Chord(spec.into()), description, callback)
    }

    /// Create a multi-step sequence shortcut from chord specs like
    /// `&["g", "h"]`.
    ///
    /// Steps must arrive within the timeout of each other; see
    /// [`with_timeout`](Self::with_timeout).
    pub fn sequence<F>(steps: &[&str], description: impl Into<String>, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let steps = steps.iter().map(|s| s.to_string()).collect();
        Self::with_spec(BindingSpec::Sequence(steps), description, callback)
    }

    fn with_spec<F>(spec: BindingSpec, description: impl Into<String>, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            spec,
            timeout: None,
            description: description.into(),
            category: "General".to_string(),
            component: "unknown".to_string(),
            enabled: true,
            prevent_default: false,
            phase: KeyPhase::Down,
            callback: Arc::new(callback),
        }
    }

    /// Builder pattern for the help category (default `"General"`).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder pattern for the owning component name (default `"unknown"`).
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Builder pattern for the enabled state (default `true`).
    ///
    /// Disabled handlers are stored and listed in help, but never matched.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder pattern for default-action suppression (default `false`).
    ///
    /// When set, dispatch marks the triggering event accepted before the
    /// callback runs.
    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    /// Builder pattern for the key phase this handler listens to (default
    /// [`KeyPhase::Down`]).
    pub fn with_phase(mut self, phase: KeyPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Builder pattern for the inter-step timeout of a sequence (default
    /// 1000 ms). Ignored for single-chord shortcuts.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Parse the spec into a canonical binding for the given platform.
    fn resolve_binding(&self, platform: Platform) -> Result<Binding, ParseError> {
        match &self.spec {
            BindingSpec::Chord(spec) => Ok(Binding::Chord(parse::parse_chord(spec, platform)?)),
            BindingSpec::Sequence(steps) => {
                let refs: Vec<&str> = steps.iter().map(String::as_str).collect();
                let timeout = self
                    .timeout
                    .unwrap_or(Duration::from_millis(DEFAULT_SEQUENCE_TIMEOUT_MS));
                Ok(Binding::Sequence(parse::parse_sequence(
                    &refs, platform, timeout,
                )?))
            }
        }
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("spec", &self.spec)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("component", &self.component)
            .field("enabled", &self.enabled)
            .field("prevent_default", &self.prevent_default)
            .field("phase", &self.phase)
            .finish()
    }
}

// =============================================================================
// Handler Metadata
// =============================================================================

/// Metadata snapshot of one registered handler.
///
/// Returned by [`ShortcutRegistry::handlers`] and related queries. The
/// callback itself is not exposed.
#[derive(Clone, Debug)]
pub struct HandlerInfo {
    /// The handler's registry identity.
    pub id: HandlerId,
    /// The canonical, platform-resolved binding.
    pub binding: Binding,
    /// Human-readable action description.
    pub description: String,
    /// Help category.
    pub category: String,
    /// Owning component name.
    pub component: String,
    /// Whether the handler participates in matching.
    pub enabled: bool,
    /// Whether dispatch accepts the event before invoking the callback.
    pub prevent_default: bool,
    /// The key phase the handler listens to.
    pub phase: KeyPhase,
}

/// A set of handlers sharing one binding.
#[derive(Clone, Debug)]
pub struct ConflictGroup {
    /// The contested binding.
    pub binding: Binding,
    /// Every holder of the binding, in registration order.
    pub handlers: Vec<HandlerInfo>,
}

/// Change notification emitted by [`ShortcutRegistry::changed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A handler was added.
    Registered(HandlerId),
    /// A handler was removed.
    Unregistered(HandlerId),
    /// All handlers were removed at once.
    Cleared,
}

/// Stored form of a registered handler.
pub(crate) struct Handler {
    pub(crate) binding: Binding,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) component: String,
    pub(crate) enabled: bool,
    pub(crate) prevent_default: bool,
    pub(crate) phase: KeyPhase,
    pub(crate) callback: Arc<dyn Fn() + Send + Sync>,
}

impl Handler {
    pub(crate) fn info(&self, id: HandlerId) -> HandlerInfo {
        HandlerInfo {
            id,
            binding: self.binding.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            component: self.component.clone(),
            enabled: self.enabled,
            prevent_default: self.prevent_default,
            phase: self.phase,
        }
    }
}

/// Everything guarded by the registry lock.
pub(crate) struct RegistryState {
    pub(crate) handlers: SlotMap<HandlerId, Handler>,
    /// Registration order of live handlers; drives every ordered traversal.
    pub(crate) order: Vec<HandlerId>,
    pub(crate) matcher: SequenceMatcher,
}

// =============================================================================
// Shortcut Registry
// =============================================================================

/// Owns all registered shortcuts and resolves conflicts between them.
///
/// The registry is `Send + Sync`; all methods take `&self` and may be called
/// from any thread. Callbacks and observers always run synchronously on the
/// calling thread, after internal locks have been released, so they are free
/// to call back into the registry.
pub struct ShortcutRegistry {
    pub(crate) config: RegistryConfig,
    pub(crate) state: RwLock<RegistryState>,

    /// Signal emitted after every successful mutation of the handler set.
    pub changed: Signal<RegistryEvent>,
}

impl ShortcutRegistry {
    /// Create a registry with the default configuration (`Warn` policy,
    /// current platform).
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with an explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            state: RwLock::new(RegistryState {
                handlers: SlotMap::with_key(),
                order: Vec::new(),
                matcher: SequenceMatcher::new(),
            }),
            changed: Signal::new(),
        }
    }

    /// This registry's configuration.
    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Register a shortcut and return its handler id.
    ///
    /// The spec is parsed against the registry's platform. If the resulting
    /// binding is already held, the outcome depends on the conflict policy:
    /// under [`ConflictPolicy::Error`] the registration is rejected and
    /// nothing is stored; under every other policy the handler is stored
    /// alongside the existing ones.
    ///
    /// Observers of [`changed`](Self::changed) are notified after the handler
    /// is in place. Rejected registrations emit nothing.
    ///
    /// # Errors
    ///
    /// - [`ShortcutError::Parse`] if the spec is malformed
    /// - [`ShortcutError::Conflict`] under the `Error` policy
    pub fn register(&self, shortcut: Shortcut) -> ShortcutResult<HandlerId> {
        let binding = shortcut.resolve_binding(self.config.platform)?;
        let key = binding.conflict_key();

        let mut state = self.state.write();

        // Snapshot current holders of this binding before inserting.
        let existing: Vec<HandlerInfo> = state
            .order
            .iter()
            .filter_map(|&id| state.handlers.get(id).map(|handler| (id, handler)))
            .filter(|(_, handler)| handler.binding.conflict_key() == key)
            .map(|(id, handler)| handler.info(id))
            .collect();

        if !existing.is_empty() && self.config.conflict_policy == ConflictPolicy::Error {
            drop(state);
            let first = &existing[0];
            return Err(ShortcutError::Conflict(ConflictError {
                binding: binding.to_string(),
                existing_component: first.component.clone(),
                existing_description: first.description.clone(),
                incoming_component: shortcut.component,
                incoming_description: shortcut.description,
            }));
        }

        let conflict_note = if existing.is_empty() {
            None
        } else {
            Some((shortcut.component.clone(), shortcut.description.clone()))
        };

        let Shortcut {
            description,
            category,
            component,
            enabled,
            prevent_default,
            phase,
            callback,
            ..
        } = shortcut;

        let id = state.handlers.insert(Handler {
            binding: binding.clone(),
            description,
            category,
            component,
            enabled,
            prevent_default,
            phase,
            callback,
        });
        state.order.push(id);
        if let Binding::Sequence(seq) = &binding {
            state.matcher.insert(id, seq, phase, enabled);
        }
        drop(state);

        if let Some((incoming_component, incoming_description)) = conflict_note {
            match self.config.conflict_policy {
                ConflictPolicy::Warn => {
                    let holders: Vec<String> = existing
                        .iter()
                        .map(|info| format!("`{}` ({})", info.component, info.description))
                        .collect();
                    tracing::warn!(
                        target: "horizon_keybind::registry",
                        binding = %binding,
                        "shortcut conflict: `{incoming_component}` ({incoming_description}) \
                         also bound by {}",
                        holders.join(", ")
                    );
                }
                ConflictPolicy::FirstWins | ConflictPolicy::LastWins => {
                    tracing::debug!(
                        target: "horizon_keybind::registry",
                        binding = %binding,
                        policy = ?self.config.conflict_policy,
                        "shortcut conflict resolved by policy"
                    );
                }
                // Rejected before insertion.
                ConflictPolicy::Error => {}
            }
        }

        tracing::trace!(
            target: "horizon_keybind::registry",
            ?id,
            binding = %binding,
            "registered shortcut handler"
        );
        self.changed.emit(RegistryEvent::Registered(id));
        Ok(id)
    }

    /// Register a shortcut that unregisters itself when the returned guard is
    /// dropped.
    ///
    /// This is the RAII form of [`register`](Self::register) for components
    /// whose shortcuts should live exactly as long as the component does.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_scoped(&self, shortcut: Shortcut) -> ShortcutResult<ScopedRegistration<'_>> {
        let id = self.register(shortcut)?;
        Ok(ScopedRegistration { registry: self, id })
    }

    /// Remove a handler by id.
    ///
    /// Returns `true` if the handler existed. Unknown or already-removed ids
    /// are a silent no-op, so teardown paths may unregister unconditionally.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let removed = {
            let mut state = self.state.write();
            match state.handlers.remove(id) {
                Some(_) => {
                    state.order.retain(|&other| other != id);
                    state.matcher.remove(id);
                    true
                }
                None => false,
            }
        };

        if removed {
            tracing::trace!(
                target: "horizon_keybind::registry",
                ?id,
                "unregistered shortcut handler"
            );
            self.changed.emit(RegistryEvent::Unregistered(id));
        }
        removed
    }

    /// Remove every handler and abandon all pending sequence progress.
    ///
    /// Emits a single [`RegistryEvent::Cleared`] if anything was removed.
    pub fn clear(&self) {
        let removed = {
            let mut state = self.state.write();
            let removed = !state.handlers.is_empty();
            state.handlers.clear();
            state.order.clear();
            state.matcher.clear();
            removed
        };

        if removed {
            tracing::trace!(target: "horizon_keybind::registry", "cleared all handlers");
            self.changed.emit(RegistryEvent::Cleared);
        }
    }

    /// Metadata for every registered handler, in registration order.
    ///
    /// The returned snapshot is independent of the registry; later mutations
    /// do not affect it.
    pub fn handlers(&self) -> Vec<HandlerInfo> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|&id| state.handlers.get(id).map(|handler| handler.info(id)))
            .collect()
    }

    /// Metadata for a single handler, if it is still registered.
    pub fn handler(&self, id: HandlerId) -> Option<HandlerInfo> {
        self.state
            .read()
            .handlers
            .get(id)
            .map(|handler| handler.info(id))
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.state.read().handlers.len()
    }

    /// Whether the registry has no handlers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every binding currently held by more than one handler.
    ///
    /// Groups appear in order of their earliest registration, with holders in
    /// registration order. Sequence timeouts are not part of a binding's
    /// identity, so same-step sequences group together whatever their
    /// timeouts.
    pub fn conflicts(&self) -> Vec<ConflictGroup> {
        let state = self.state.read();
        let mut groups: Vec<(BindingKey, ConflictGroup)> = Vec::new();

        for &id in &state.order {
            let Some(handler) = state.handlers.get(id) else {
                continue;
            };
            let key = handler.binding.conflict_key();
            match groups.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, group)) => group.handlers.push(handler.info(id)),
                None => groups.push((
                    key,
                    ConflictGroup {
                        binding: handler.binding.clone(),
                        handlers: vec![handler.info(id)],
                    },
                )),
            }
        }

        groups
            .into_iter()
            .filter(|(_, group)| group.handlers.len() > 1)
            .map(|(_, group)| group)
            .collect()
    }

    /// Abandon all partial sequence progress without touching registrations.
    ///
    /// Useful when input focus moves away mid-sequence.
    pub fn cancel_pending(&self) {
        self.state.write().matcher.reset_all();
    }

    /// Subscribe to registry change notifications.
    ///
    /// Observers run synchronously, in subscription order, after each
    /// mutation completes. Returns an id for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, observer: F) -> ConnectionId
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        self.changed.connect(observer)
    }

    /// Subscribe with automatic unsubscription when the guard is dropped.
    pub fn subscribe_scoped<F>(&self, observer: F) -> ConnectionGuard<RegistryEvent>
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        self.changed.connect_scoped(observer)
    }

    /// Remove a change observer. Returns `false` for unknown ids.
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShortcutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("config", &self.config)
            .field("handlers", &self.len())
            .finish()
    }
}

/// RAII registration that unregisters its handler on drop.
///
/// Created by [`ShortcutRegistry::register_scoped`]. The borrow ties the
/// guard's lifetime to the registry, so a guard can never outlive the
/// registry it cleans up.
#[must_use = "dropping the guard immediately unregisters the shortcut"]
pub struct ScopedRegistration<'a> {
    registry: &'a ShortcutRegistry,
    id: HandlerId,
}

impl ScopedRegistration<'_> {
    /// The id of the guarded handler.
    pub fn id(&self) -> HandlerId {
        self.id
    }
}

impl Drop for ScopedRegistration<'_> {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

impl fmt::Debug for ScopedRegistration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedRegistration")
            .field("id", &self.id)
            .finish()
    }
}

static_assertions::assert_impl_all!(ShortcutRegistry: Send, Sync);
