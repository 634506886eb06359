//! Logging facilities.
//!
//! The toolkit is instrumented with the `tracing` crate. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("clearbutton=debug,clearbutton_core::signal=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "clearbutton_core::signal";
    /// Clear button control target (binding, visibility, activation).
    pub const CLEAR_BUTTON: &str = "clearbutton::clear_button";
    /// Field collaborators target.
    pub const FIELD: &str = "clearbutton::field";
    /// Visual element target.
    pub const ELEMENT: &str = "clearbutton::element";
}
