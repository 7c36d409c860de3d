//! Core systems for Horizon Keybind.
//!
//! This crate provides the foundational pieces of the Horizon Keybind shortcut
//! library:
//!
//! - **Signal/Slot System**: Type-safe change notification with synchronous,
//!   insertion-ordered delivery
//! - **Connection Management**: Manual disconnection by id, or RAII guards
//!   that disconnect when dropped
//!
//! The signal system is deliberately small: every consumer in Horizon Keybind
//! observes state that mutates synchronously on the UI thread, so there is no
//! queuing, no thread-affinity bookkeeping, and no event loop. Slots run in
//! the order they were connected, against a snapshot of the connection list,
//! which makes it safe for a slot to connect or disconnect other slots while
//! a signal is being emitted.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_keybind_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```
//!
//! # Scoped Connections
//!
//! ```
//! use horizon_keybind_core::Signal;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let saved = Signal::<()>::new();
//! let count = Arc::new(AtomicUsize::new(0));
//! {
//!     let count = count.clone();
//!     let _guard = saved.connect_scoped(move |_| {
//!         count.fetch_add(1, Ordering::SeqCst);
//!     });
//!     saved.emit(());
//! } // guard dropped, connection removed
//! saved.emit(());
//! assert_eq!(count.load(Ordering::SeqCst), 1);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
