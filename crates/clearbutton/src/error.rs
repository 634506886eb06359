//! Error types for the clear button control.

/// Result type alias for clear button operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring a clear button.
///
/// Operations on a control without a bound field are not errors; they are
/// silent no-ops so the control stays usable before a field is attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The binding target cannot be observed for focus, blur and value changes.
    #[error("Unsupported binding target '{target}': focus, blur and value-change events are not observable")]
    UnsupportedTarget {
        /// Type name of the rejected field.
        target: &'static str,
    },
}

impl Error {
    /// Create an unsupported-target error for the given field type name.
    pub fn unsupported_target(target: &'static str) -> Self {
        Self::UnsupportedTarget { target }
    }
}
