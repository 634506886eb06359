//! Retained visual nodes.
//!
//! [`Element`] is the minimal rendering surface the clear button needs: a tag,
//! a class list, attributes, children, text content and a parent link for
//! mounting. A host toolkit mirrors these nodes into its own scene; the clear
//! button only ever toggles a class on its root and mounts/unmounts it.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Weak};

use clearbutton_core::logging::targets;
use parking_lot::{Mutex, RwLock};

/// Shared handle to an [`Element`].
pub type ElementRef = Arc<Element>;

/// A node in the visual tree.
pub struct Element {
    tag: String,
    classes: RwLock<Vec<String>>,
    attributes: RwLock<BTreeMap<String, String>>,
    children: RwLock<Vec<ElementRef>>,
    text: RwLock<String>,
    parent: Mutex<Weak<Element>>,
}

impl Element {
    /// Create a detached element with the given tag name.
    pub fn new(tag: impl Into<String>) -> ElementRef {
        Arc::new(Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: RwLock::new(Vec::new()),
            attributes: RwLock::new(BTreeMap::new()),
            children: RwLock::new(Vec::new()),
            text: RwLock::new(String::new()),
            parent: Mutex::new(Weak::new()),
        })
    }

    /// The lowercase tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&self, class: &str) -> bool {
        let mut classes = self.classes.write();
        if classes.iter().any(|c| c == class) {
            return false;
        }
        classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns `false` if it was not present.
    pub fn remove_class(&self, class: &str) -> bool {
        let mut classes = self.classes.write();
        let before = classes.len();
        classes.retain(|c| c != class);
        classes.len() != before
    }

    /// Add or remove a class depending on `enabled`.
    pub fn toggle_class(&self, class: &str, enabled: bool) {
        if enabled {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Check whether the class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.read().iter().any(|c| c == class)
    }

    /// All classes joined by spaces, in insertion order.
    pub fn class_name(&self) -> String {
        self.classes.read().join(" ")
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Set an attribute value.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.write().insert(name.into(), value.into());
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.read().get(name).cloned()
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Set the text content.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.write() = text.into();
    }

    /// The text content.
    pub fn text(&self) -> String {
        self.text.read().clone()
    }

    /// Snapshot of the child list.
    pub fn children(&self) -> Vec<ElementRef> {
        self.children.read().clone()
    }

    /// Whether the element has neither children nor text.
    pub fn is_empty(&self) -> bool {
        self.children.read().is_empty() && self.text.read().is_empty()
    }

    /// Append `child`, moving it out of its previous parent if it had one.
    ///
    /// Appending an element to itself or to one of its descendants would
    /// create a cycle; such calls are logged and ignored.
    pub fn append_child(self: &Arc<Self>, child: ElementRef) {
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if Arc::ptr_eq(&node, &child) {
                tracing::warn!(
                    target: targets::ELEMENT,
                    tag = %child.tag,
                    "refusing to append element to itself or a descendant"
                );
                return;
            }
            cursor = node.parent();
        }
        child.detach();
        *child.parent.lock() = Arc::downgrade(self);
        self.children.write().push(child);
    }

    /// Remove `child` from this element. Returns `false` if it was not a child.
    pub fn remove_child(&self, child: &ElementRef) -> bool {
        let removed = {
            let mut children = self.children.write();
            let before = children.len();
            children.retain(|c| !Arc::ptr_eq(c, child));
            children.len() != before
        };
        if removed {
            *child.parent.lock() = Weak::new();
        }
        removed
    }

    /// Replace all children and text with `children`.
    pub fn replace_children(self: &Arc<Self>, children: Vec<ElementRef>) {
        let previous = std::mem::take(&mut *self.children.write());
        for old in previous {
            *old.parent.lock() = Weak::new();
        }
        self.text.write().clear();
        for child in children {
            self.append_child(child);
        }
    }

    /// The current parent, if mounted and the parent is still alive.
    pub fn parent(&self) -> Option<ElementRef> {
        self.parent.lock().upgrade()
    }

    /// Remove this element from its parent. Returns `false` if it was not mounted.
    pub fn detach(self: &Arc<Self>) -> bool {
        let parent = std::mem::take(&mut *self.parent.lock()).upgrade();
        match parent {
            Some(parent) => {
                parent.children.write().retain(|c| !Arc::ptr_eq(c, self));
                true
            }
            None => false,
        }
    }

    /// Serialize this subtree as markup, mostly for diagnostics and tests.
    ///
    /// Attribute values and text are written as-is, without escaping, so the
    /// output is not safe to feed back into an HTML parser.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        let class_name = self.class_name();
        if !class_name.is_empty() {
            let _ = write!(out, " class=\"{class_name}\"");
        }
        for (name, value) in self.attributes.read().iter() {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        out.push('>');
        out.push_str(&self.text.read());
        for child in self.children.read().iter() {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("classes", &*self.classes.read())
            .field("children", &self.children.read().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Element: Send, Sync);
