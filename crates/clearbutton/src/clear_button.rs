//! Clear button control.
//!
//! This module provides [`ClearButton`], a small button that sits next to a
//! text field, shows itself while the field is focused and non-empty, and
//! empties the field when activated.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use clearbutton::{ClearButton, Field, TextField, Visibility};
//!
//! let field = Arc::new(TextField::new().with_value("testing"));
//! let button = ClearButton::new();
//! button.bind(field.clone())?;
//!
//! button.cleared().connect(|_| println!("field cleared"));
//!
//! field.focus();
//! assert_eq!(button.visibility(), Visibility::Visible);
//!
//! button.clear();
//! assert_eq!(field.value(), "");
//! assert_eq!(button.visibility(), Visibility::Hidden);
//! # Ok::<(), clearbutton::Error>(())
//! ```
//!
//! # Visibility
//!
//! | Trigger | Guard | Result |
//! |---|---|---|
//! | field gains focus | value non-empty | `Visible` |
//! | field loses focus | | `Hidden` |
//! | value edited while focused | value non-empty | `Visible` |
//! | value edited while focused | value empty | `Hidden` |
//! | activation | | `Hidden`, field emptied and refocused |

use std::fmt;
use std::sync::{Arc, Weak};

use clearbutton_core::logging::targets;
use clearbutton_core::{ConnectionId, Property, Signal};
use parking_lot::Mutex;

use crate::element::{Element, ElementRef};
use crate::error::{Error, Result};
use crate::event::ActivationEvent;
use crate::field::{Field, FieldEvents};
use crate::options::ClearButtonOptions;

/// Class applied to the root element while the button is hidden.
pub const HIDDEN_CLASS: &str = "hidden";

/// Class identifying a created clear button root.
pub const ROOT_CLASS: &str = "clear-button";

/// The two states of the visibility machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// The button is not shown. Initial state.
    #[default]
    Hidden,
    /// The button is shown next to its field.
    Visible,
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// The control's permanent handlers.
///
/// Created once per control. Every binding connects these same slots, so the
/// connection ids recorded in [`FieldBinding`] always refer to them.
struct Listeners {
    focus: Slot<()>,
    blur: Slot<()>,
    value_changed: Slot<String>,
}

impl Listeners {
    fn new(control: Weak<Inner>) -> Self {
        let on_focus = control.clone();
        let on_blur = control.clone();
        let on_value_changed = control;
        Self {
            focus: Arc::new(move |_: &()| {
                if let Some(control) = on_focus.upgrade() {
                    control.on_focus();
                }
            }),
            blur: Arc::new(move |_: &()| {
                if let Some(control) = on_blur.upgrade() {
                    control.on_blur();
                }
            }),
            value_changed: Arc::new(move |_: &String| {
                if let Some(control) = on_value_changed.upgrade() {
                    control.on_value_changed();
                }
            }),
        }
    }
}

/// A live association with a field.
struct FieldBinding {
    field: Weak<dyn Field>,
    focus: ConnectionId,
    blur: ConnectionId,
    value_changed: ConnectionId,
}

impl FieldBinding {
    fn is(&self, field: &Arc<dyn Field>) -> bool {
        std::ptr::addr_eq(self.field.as_ptr(), Arc::as_ptr(field))
    }

    /// Disconnect exactly the slots this binding connected.
    fn release(self) {
        let Some(field) = self.field.upgrade() else {
            return;
        };
        if let Some(events) = field.events() {
            events.focused.disconnect(self.focus);
            events.blurred.disconnect(self.blur);
            events.value_changed.disconnect(self.value_changed);
        }
        tracing::debug!(target: targets::CLEAR_BUTTON, field = field.type_name(), "field unbound");
    }
}

struct Inner {
    root: ElementRef,
    root_overridden: bool,
    visibility: Property<Visibility>,
    binding: Mutex<Option<FieldBinding>>,
    listeners: Listeners,
    cleared: Signal<()>,
    visibility_changed: Signal<Visibility>,
}

impl Inner {
    fn bound_field(&self) -> Option<Arc<dyn Field>> {
        self.binding.lock().as_ref().and_then(|b| b.field.upgrade())
    }

    fn set_visibility(&self, visibility: Visibility) {
        // The class is a projection of state and is re-applied every time.
        self.root.toggle_class(HIDDEN_CLASS, visibility == Visibility::Hidden);
        if self.visibility.set(visibility) {
            tracing::trace!(target: targets::CLEAR_BUTTON, ?visibility, "visibility changed");
            self.visibility_changed.emit(visibility);
        }
    }

    fn on_focus(&self) {
        let Some(field) = self.bound_field() else {
            return;
        };
        if !field.value().is_empty() {
            self.set_visibility(Visibility::Visible);
        }
    }

    fn on_blur(&self) {
        self.set_visibility(Visibility::Hidden);
    }

    fn on_value_changed(&self) {
        let Some(field) = self.bound_field() else {
            return;
        };
        if !field.has_focus() {
            return;
        }
        if field.value().is_empty() {
            self.set_visibility(Visibility::Hidden);
        } else {
            self.set_visibility(Visibility::Visible);
        }
    }

    fn bind(&self, field: Arc<dyn Field>) -> Result<()> {
        let events = observed_events(field.as_ref())?;

        let mut binding = self.binding.lock();
        if binding.as_ref().is_some_and(|current| current.is(&field)) {
            tracing::trace!(target: targets::CLEAR_BUTTON, "field already bound");
            return Ok(());
        }

        // Old listeners go before new ones are installed.
        if let Some(previous) = binding.take() {
            previous.release();
        }

        *binding = Some(FieldBinding {
            field: Arc::downgrade(&field),
            focus: events.focused.connect_shared(self.listeners.focus.clone()),
            blur: events.blurred.connect_shared(self.listeners.blur.clone()),
            value_changed: events
                .value_changed
                .connect_shared(self.listeners.value_changed.clone()),
        });
        drop(binding);

        tracing::debug!(target: targets::CLEAR_BUTTON, field = field.type_name(), "field bound");
        Ok(())
    }

    fn unbind(&self) {
        let binding = self.binding.lock().take();
        if let Some(binding) = binding {
            binding.release();
        }
    }

    fn clear(&self, event: Option<&mut ActivationEvent>) {
        if let Some(event) = event {
            event.base.prevent_default();
            event.base.stop_propagation();
        }

        let field = self.bound_field();
        if let Some(field) = &field {
            if !field.value().is_empty() {
                field.set_value("");
            }
        }

        self.set_visibility(Visibility::Hidden);

        if let Some(field) = &field {
            field.focus();
        }

        tracing::debug!(target: targets::CLEAR_BUTTON, bound = field.is_some(), "cleared");
        self.cleared.emit(());
    }
}

/// The field's event signals, or `UnsupportedTarget` if it has none.
fn observed_events(field: &dyn Field) -> Result<&FieldEvents> {
    field.events().ok_or_else(|| {
        tracing::warn!(
            target: targets::CLEAR_BUTTON,
            field = field.type_name(),
            "rejecting unobservable binding target"
        );
        Error::unsupported_target(field.type_name())
    })
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.get_mut().take() {
            binding.release();
        }
    }
}

/// A button that empties its bound text field.
///
/// The button is hidden by default. While bound to a [`Field`] it shows itself
/// when the field is focused with a non-empty value and hides again on blur.
/// Activating it empties the field, hides the button, returns focus to the
/// field and emits [`cleared`](Self::cleared).
///
/// A control holds at most one binding. Binding a different field removes the
/// listeners from the previous one first; binding the same field again does
/// nothing. Dropping the control (or calling [`dispose`](Self::dispose))
/// removes its listeners from the field.
///
/// # Signals
///
/// - `cleared`: Emitted after every clear action
/// - `visibility_changed`: Emitted when the visibility state changes
pub struct ClearButton {
    inner: Arc<Inner>,
}

impl ClearButton {
    /// Create an unbound clear button with a freshly rendered root.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a clear button from options.
    ///
    /// Fails with [`Error::UnsupportedTarget`] if `options.field` cannot be
    /// observed. A rejected field leaves `options.root_element` untouched.
    pub fn with_options(options: ClearButtonOptions) -> Result<Self> {
        if let Some(field) = &options.field {
            observed_events(field.as_ref())?;
        }
        let button = Self::build(options.root_element);
        if let Some(field) = options.field {
            button.bind(field)?;
        }
        Ok(button)
    }

    fn build(root_element: Option<ElementRef>) -> Self {
        let root_overridden = root_element.is_some();
        let root = match root_element {
            Some(root) => {
                root.add_class(HIDDEN_CLASS);
                root
            }
            None => {
                let root = Element::new("button");
                root.add_class(ROOT_CLASS);
                root.add_class(HIDDEN_CLASS);
                // Kept out of the tab order so focus stays in the field.
                root.set_attribute("tabindex", "-1");
                root
            }
        };

        let inner = Arc::new_cyclic(|weak| Inner {
            root,
            root_overridden,
            visibility: Property::new(Visibility::Hidden),
            binding: Mutex::new(None),
            listeners: Listeners::new(weak.clone()),
            cleared: Signal::new(),
            visibility_changed: Signal::new(),
        });

        let button = Self { inner };
        button.render();
        button
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Bind the button to `field`.
    ///
    /// Idempotent for the field that is already bound. Any other previously
    /// bound field is released before the new listeners are connected. If the
    /// field cannot be observed, [`Error::UnsupportedTarget`] is returned and
    /// the current binding is left as it was.
    pub fn bind(&self, field: Arc<dyn Field>) -> Result<()> {
        self.inner.bind(field)
    }

    /// Remove the listeners from the bound field, if any.
    pub fn unbind(&self) {
        self.inner.unbind();
    }

    /// The bound field, if one is bound and still alive.
    pub fn bound_field(&self) -> Option<Arc<dyn Field>> {
        self.inner.bound_field()
    }

    /// Whether a live field is bound.
    pub fn is_bound(&self) -> bool {
        self.bound_field().is_some()
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Empty the bound field, hide the button and return focus to the field.
    ///
    /// Works without a bound field too: the button is hidden and `cleared`
    /// is still emitted.
    pub fn clear(&self) {
        self.inner.clear(None);
    }

    /// Handle a press on the root element.
    ///
    /// The event's default action and propagation are suppressed before the
    /// clear action runs.
    pub fn handle_activation(&self, event: &mut ActivationEvent) {
        self.inner.clear(Some(event));
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Show the button.
    pub fn show(&self) {
        self.inner.set_visibility(Visibility::Visible);
    }

    /// Hide the button.
    pub fn hide(&self) {
        self.inner.set_visibility(Visibility::Hidden);
    }

    /// The current visibility state.
    pub fn visibility(&self) -> Visibility {
        self.inner.visibility.get()
    }

    /// Whether the button is currently visible.
    pub fn is_visible(&self) -> bool {
        self.visibility() == Visibility::Visible
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal emitted after every clear action.
    pub fn cleared(&self) -> &Signal<()> {
        &self.inner.cleared
    }

    /// Signal emitted when the visibility state changes.
    pub fn visibility_changed(&self) -> &Signal<Visibility> {
        &self.inner.visibility_changed
    }

    // =========================================================================
    // Visual Tree
    // =========================================================================

    /// The root element.
    pub fn root(&self) -> &ElementRef {
        &self.inner.root
    }

    /// Whether the root element was supplied through the options.
    pub fn is_root_overridden(&self) -> bool {
        self.inner.root_overridden
    }

    /// Fill a created root with the icon markup.
    ///
    /// A supplied root element is never touched.
    pub fn render(&self) -> &Self {
        if !self.inner.root_overridden {
            let icon = Element::new("i");
            icon.add_class("icon-remove");
            icon.add_class("icon-white");
            let wrapper = Element::new("div");
            wrapper.append_child(icon);
            self.inner.root.replace_children(vec![wrapper]);
        }
        self
    }

    /// Mount the root element inside `container`.
    pub fn attach_to(&self, container: &ElementRef) {
        container.append_child(self.inner.root.clone());
    }

    /// Release the field binding and unmount the root.
    ///
    /// Safe to call any number of times, with or without a binding.
    pub fn dispose(&self) {
        self.inner.unbind();
        if self.inner.root.detach() {
            tracing::debug!(target: targets::CLEAR_BUTTON, "root detached");
        }
    }
}

impl Default for ClearButton {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClearButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearButton")
            .field("visibility", &self.visibility())
            .field("bound", &self.is_bound())
            .field("root", &self.inner.root)
            .finish()
    }
}

static_assertions::assert_impl_all!(ClearButton: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldEvents, TextField};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bound(value: &str) -> (ClearButton, Arc<TextField>) {
        let field = Arc::new(TextField::new().with_value(value));
        let button = ClearButton::new();
        button.bind(field.clone()).unwrap();
        (button, field)
    }

    struct Unobservable;

    impl Field for Unobservable {
        fn value(&self) -> String {
            String::new()
        }
        fn set_value(&self, _value: &str) {}
        fn focus(&self) {}
        fn has_focus(&self) -> bool {
            false
        }
        fn events(&self) -> Option<&FieldEvents> {
            None
        }
    }

    #[test]
    fn test_hidden_by_default() {
        let button = ClearButton::new();
        assert_eq!(button.visibility(), Visibility::Hidden);
        assert!(button.root().has_class(HIDDEN_CLASS));
        assert!(!button.is_bound());
    }

    #[test]
    fn test_created_root_markup() {
        let button = ClearButton::new();
        assert_eq!(
            button.root().to_markup(),
            "<button class=\"clear-button hidden\" tabindex=\"-1\">\
             <div><i class=\"icon-remove icon-white\"></i></div></button>"
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let button = ClearButton::new();
        button.render().render();
        assert_eq!(button.root().children().len(), 1);
    }

    #[test]
    fn test_focus_with_value_shows() {
        let (button, field) = bound("Hello");
        field.focus();
        assert!(button.is_visible());
        assert!(!button.root().has_class(HIDDEN_CLASS));
    }

    #[test]
    fn test_focus_without_value_stays_hidden() {
        let (button, field) = bound("");
        field.focus();
        assert_eq!(button.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_blur_hides_regardless_of_value() {
        let (button, field) = bound("Hello");
        field.focus();
        assert!(button.is_visible());

        field.blur();
        assert_eq!(button.visibility(), Visibility::Hidden);
        assert_eq!(field.value(), "Hello");
    }

    #[test]
    fn test_typing_shows() {
        let (button, field) = bound("");
        field.focus();
        assert!(!button.is_visible());

        field.input("Hello");
        assert!(button.is_visible());
    }

    #[test]
    fn test_emptied_while_focused_hides() {
        let (button, field) = bound("Hello");
        field.focus();
        field.input("");
        assert_eq!(button.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_value_change_without_focus_is_ignored() {
        let field = Arc::new(TextField::new());
        let button = ClearButton::new();
        button.bind(field.clone()).unwrap();

        // Emitted directly, as a host might do for an unfocused field.
        field.field_events().value_changed.emit("Hello".to_string());
        assert!(!button.is_visible());
    }

    #[test]
    fn test_reads_live_value_on_focus() {
        let (button, field) = bound("");
        field.set_value("changed elsewhere");
        field.focus();
        assert!(button.is_visible());
    }

    #[test]
    fn test_clear_side_effects() {
        let (button, field) = bound("testing");
        field.focus();
        assert!(button.is_visible());

        let cleared = Arc::new(AtomicUsize::new(0));
        let cleared_clone = cleared.clone();
        button.cleared().connect(move |_| {
            cleared_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.clear();

        assert_eq!(field.value(), "");
        assert_eq!(button.visibility(), Visibility::Hidden);
        assert!(button.root().has_class(HIDDEN_CLASS));
        assert!(field.has_focus());
        assert_eq!(cleared.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_refocuses_blurred_field() {
        let (button, field) = bound("testing");
        button.clear();
        assert!(field.has_focus());
        // Refocusing an empty field must not re-show the button.
        assert!(!button.is_visible());
    }

    #[test]
    fn test_handle_activation_suppresses_event() {
        let (button, field) = bound("testing");
        let mut event = ActivationEvent::new();

        button.handle_activation(&mut event);

        assert!(event.base.is_default_prevented());
        assert!(event.base.is_propagation_stopped());
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_clear_unbound() {
        let button = ClearButton::new();
        button.show();

        let cleared = Arc::new(AtomicUsize::new(0));
        let cleared_clone = cleared.clone();
        button.cleared().connect(move |_| {
            cleared_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.clear();
        assert_eq!(button.visibility(), Visibility::Hidden);
        assert_eq!(cleared.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_show_hide() {
        let button = ClearButton::new();
        button.show();
        assert!(button.is_visible());
        assert!(!button.root().has_class(HIDDEN_CLASS));

        button.hide();
        assert!(!button.is_visible());
        assert!(button.root().has_class(HIDDEN_CLASS));
    }

    #[test]
    fn test_visibility_changed_only_on_transitions() {
        let (button, field) = bound("Hello");
        let transitions = Arc::new(Mutex::new(Vec::new()));

        let transitions_clone = transitions.clone();
        button.visibility_changed().connect(move |&v| {
            transitions_clone.lock().push(v);
        });

        field.focus();
        field.input("Hello, world");
        field.blur();
        button.hide();

        assert_eq!(
            *transitions.lock(),
            vec![Visibility::Visible, Visibility::Hidden]
        );
    }

    #[test]
    fn test_bind_same_field_is_idempotent() {
        let (button, field) = bound("Hello");
        button.bind(field.clone()).unwrap();

        let events = field.field_events();
        assert_eq!(events.focused.connection_count(), 1);
        assert_eq!(events.blurred.connection_count(), 1);
        assert_eq!(events.value_changed.connection_count(), 1);
    }

    #[test]
    fn test_rebind_moves_listeners() {
        let (button, first) = bound("first");
        let second = Arc::new(TextField::new().with_value("second"));
        button.bind(second.clone()).unwrap();

        assert_eq!(first.field_events().connection_count(), 0);
        assert_eq!(second.field_events().connection_count(), 3);

        first.focus();
        assert!(!button.is_visible());
        second.focus();
        assert!(button.is_visible());
    }

    #[test]
    fn test_bind_unobservable_is_rejected() {
        let (button, field) = bound("Hello");

        let err = button.bind(Arc::new(Unobservable)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTarget { .. }));

        // The existing binding survives.
        assert_eq!(field.field_events().connection_count(), 3);
        field.focus();
        assert!(button.is_visible());
    }

    #[test]
    fn test_unbind_without_binding() {
        let button = ClearButton::new();
        button.unbind();
        button.unbind();
        assert!(!button.is_bound());
    }

    #[test]
    fn test_drop_releases_binding() {
        let (button, field) = bound("Hello");
        drop(button);
        assert_eq!(field.field_events().connection_count(), 0);
        field.focus();
    }

    #[test]
    fn test_dropped_field_reads_as_unbound() {
        let (button, field) = bound("Hello");
        drop(field);
        assert!(!button.is_bound());
        button.clear();
        button.unbind();
    }

    #[test]
    fn test_two_controls_do_not_alias() {
        let field = Arc::new(TextField::new().with_value("Hello"));
        let a = ClearButton::new();
        let b = ClearButton::new();
        a.bind(field.clone()).unwrap();
        b.bind(field.clone()).unwrap();
        assert_eq!(field.field_events().focused.connection_count(), 2);

        a.unbind();
        assert_eq!(field.field_events().focused.connection_count(), 1);

        field.focus();
        assert!(!a.is_visible());
        assert!(b.is_visible());
    }
}
