//! Core primitives for the clear button toolkit.
//!
//! This crate provides the foundational pieces the widgets are built on:
//!
//! - **Signal/Slot System**: Type-safe notification with identifiable connections
//! - **Property System**: Interior-mutable values with change detection
//! - **Logging**: `tracing` target names for filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use clearbutton_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionId, Signal};
