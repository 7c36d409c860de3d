//! Logging facilities for Horizon Keybind.
//!
//! Horizon Keybind uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every log line carries an explicit target so subsystems can be filtered
//! independently, e.g. `RUST_LOG=horizon_keybind_core::signal=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_keybind_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_keybind_core::signal";
}
