//! Construction options for [`ClearButton`](crate::ClearButton).

use std::fmt;
use std::sync::Arc;

use crate::element::ElementRef;
use crate::field::Field;

/// Options recognized by [`ClearButton::with_options`](crate::ClearButton::with_options).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use clearbutton::{ClearButton, ClearButtonOptions, Element, Field, TextField};
///
/// let field: Arc<dyn Field> = Arc::new(TextField::new());
/// let root = Element::new("a");
///
/// let button = ClearButton::with_options(
///     ClearButtonOptions::new()
///         .with_field(field)
///         .with_root_element(root),
/// )?;
/// assert!(button.is_bound());
/// assert!(button.is_root_overridden());
/// # Ok::<(), clearbutton::Error>(())
/// ```
#[derive(Default, Clone)]
pub struct ClearButtonOptions {
    /// Field to bind at construction.
    pub field: Option<Arc<dyn Field>>,
    /// Existing node to use as the root instead of creating a button.
    ///
    /// Its contents are left untouched; it only gains the hidden class.
    pub root_element: Option<ElementRef>,
}

impl ClearButtonOptions {
    /// Create options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-bind a field.
    pub fn with_field(mut self, field: Arc<dyn Field>) -> Self {
        self.field = Some(field);
        self
    }

    /// Use an existing element as the root.
    pub fn with_root_element(mut self, root: ElementRef) -> Self {
        self.root_element = Some(root);
        self
    }
}

impl fmt::Debug for ClearButtonOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearButtonOptions")
            .field("field", &self.field.as_ref().map(|field| field.type_name()))
            .field("root_element", &self.root_element)
            .finish()
    }
}
