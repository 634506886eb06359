//! Text fields the clear button can bind to.
//!
//! [`Field`] is the capability contract the control consumes: read and write
//! the value, move focus to the field, and (optionally) observe focus, blur and
//! value changes through [`FieldEvents`]. [`TextField`] is a ready-made
//! single-line field implementing it.

use clearbutton_core::logging::targets;
use clearbutton_core::{Property, Signal};

/// The observable events of a field.
///
/// Focus and blur carry no payload. `value_changed` is emitted for user edits
/// made while the field has focus and carries the new value; programmatic
/// writes through [`Field::set_value`] do not emit it.
#[derive(Debug, Default)]
pub struct FieldEvents {
    /// Emitted when the field gains focus.
    pub focused: Signal<()>,
    /// Emitted when the field loses focus.
    pub blurred: Signal<()>,
    /// Emitted when the user changes the value while the field is focused.
    pub value_changed: Signal<String>,
}

impl FieldEvents {
    /// Create an event set with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of live connections across the three events.
    pub fn connection_count(&self) -> usize {
        self.focused.connection_count()
            + self.blurred.connection_count()
            + self.value_changed.connection_count()
    }
}

/// A text-input-like collaborator that a clear button can be bound to.
///
/// Implementations are owned by the host; the clear button never extends a
/// field's lifetime.
pub trait Field: Send + Sync {
    /// The current value.
    fn value(&self) -> String;

    /// Replace the value programmatically.
    fn set_value(&self, value: &str);

    /// Move keyboard focus to the field.
    fn focus(&self);

    /// Whether the field currently has keyboard focus.
    fn has_focus(&self) -> bool;

    /// The field's observable events, or `None` if it cannot be observed.
    ///
    /// Fields returning `None` are rejected by `ClearButton::bind`.
    fn events(&self) -> Option<&FieldEvents>;

    /// A human-readable type name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A single-line editable text field.
///
/// # Example
///
/// ```
/// use clearbutton::{Field, TextField};
///
/// let field = TextField::new();
/// field.focus();
/// field.input("Hello");
/// assert_eq!(field.value(), "Hello");
/// ```
#[derive(Debug, Default)]
pub struct TextField {
    value: Property<String>,
    focused: Property<bool>,
    events: FieldEvents,
}

impl TextField {
    /// Create an empty, unfocused field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value using builder pattern.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.value.set_silent(value.into());
        self
    }

    /// Apply a user edit.
    ///
    /// The value is stored unconditionally; `value_changed` is emitted only if
    /// the field has focus and the value actually changed.
    pub fn input(&self, text: impl Into<String>) {
        let text = text.into();
        if self.value.set(text.clone()) && self.focused.get() {
            tracing::trace!(target: targets::FIELD, "value edited");
            self.events.value_changed.emit(text);
        }
    }

    /// Remove keyboard focus from the field.
    pub fn blur(&self) {
        if self.focused.set(false) {
            tracing::trace!(target: targets::FIELD, "field blurred");
            self.events.blurred.emit(());
        }
    }

    /// The field's events.
    pub fn field_events(&self) -> &FieldEvents {
        &self.events
    }
}

impl Field for TextField {
    fn value(&self) -> String {
        self.value.get()
    }

    fn set_value(&self, value: &str) {
        self.value.set_silent(value.to_string());
    }

    fn focus(&self) {
        if self.focused.set(true) {
            tracing::trace!(target: targets::FIELD, "field focused");
            self.events.focused.emit(());
        }
    }

    fn has_focus(&self) -> bool {
        self.focused.get()
    }

    fn events(&self) -> Option<&FieldEvents> {
        Some(&self.events)
    }
}

static_assertions::assert_impl_all!(TextField: Send, Sync);
