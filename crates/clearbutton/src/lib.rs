//! A clear button for text fields.
//!
//! [`ClearButton`] binds to a [`Field`], shows itself while the field is
//! focused and has content, and empties the field when activated.
//!
//! - [`field`]: the field capability contract and [`TextField`]
//! - [`element`]: the retained visual node the button renders into
//! - [`event`]: activation events
//! - [`options`]: construction options
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use clearbutton::{ClearButton, Element, Field, TextField};
//!
//! let form = Element::new("form");
//! let field = Arc::new(TextField::new());
//!
//! let button = ClearButton::new();
//! button.bind(field.clone())?;
//! button.attach_to(&form);
//!
//! field.focus();
//! field.input("Hello");
//! assert!(button.is_visible());
//!
//! field.blur();
//! assert!(!button.is_visible());
//!
//! button.dispose();
//! assert!(form.is_empty());
//! # Ok::<(), clearbutton::Error>(())
//! ```

mod clear_button;
pub mod element;
mod error;
pub mod event;
pub mod field;
pub mod options;

pub use clear_button::{ClearButton, Visibility, HIDDEN_CLASS, ROOT_CLASS};
pub use element::{Element, ElementRef};
pub use error::{Error, Result};
pub use event::{ActivationEvent, EventBase};
pub use field::{Field, FieldEvents, TextField};
pub use options::ClearButtonOptions;

pub use clearbutton_core::{ConnectionId, Property, Signal};
