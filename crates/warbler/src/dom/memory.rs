//! In-memory element tree.
//!
//! Enough of a DOM to host a message list outside the browser: elements with
//! an id, a class list, `data-*` attributes, and parent/child links.

use smol_str::SmolStr;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::DomElement;

#[derive(Default)]
struct Node {
    tag: SmolStr,
    id: Mutex<Option<SmolStr>>,
    classes: Mutex<BTreeSet<SmolStr>>,
    data: Mutex<BTreeMap<SmolStr, String>>,
    parent: Mutex<Weak<Node>>,
    children: Mutex<Vec<MemoryElement>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to an in-memory element.
#[derive(Clone)]
pub struct MemoryElement(Arc<Node>);

impl MemoryElement {
    /// A detached element with the given tag name.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(Arc::new(Node {
            tag: SmolStr::new(tag.as_ref()),
            ..Default::default()
        }))
    }

    /// Set the `id` attribute.
    pub fn with_id(self, id: impl AsRef<str>) -> Self {
        *lock(&self.0.id) = Some(SmolStr::new(id.as_ref()));
        self
    }

    /// Add a class.
    pub fn with_class(self, class: impl AsRef<str>) -> Self {
        self.set_class(class.as_ref(), true);
        self
    }

    /// Set a `data-{key}` attribute.
    pub fn with_data(self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_data(key, value);
        self
    }

    /// Set a `data-{key}` attribute in place.
    pub fn set_data(&self, key: impl AsRef<str>, value: impl Into<String>) {
        lock(&self.0.data).insert(SmolStr::new(key.as_ref()), value.into());
    }

    /// Remove a `data-{key}` attribute.
    pub fn remove_data(&self, key: &str) -> Option<String> {
        lock(&self.0.data).remove(key)
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    /// Snapshot of the class list, in sorted order.
    pub fn classes(&self) -> Vec<SmolStr> {
        lock(&self.0.classes).iter().cloned().collect()
    }

    /// Snapshot of the children.
    pub fn children(&self) -> Vec<MemoryElement> {
        lock(&self.0.children).clone()
    }

    /// Append `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &MemoryElement) {
        if let Some(old) = child.parent() {
            old.remove_child(child);
        }
        *lock(&child.0.parent) = Arc::downgrade(&self.0);
        lock(&self.0.children).push(child.clone());
    }

    /// Detach `child`. Returns false when it was not a child of this element.
    pub fn remove_child(&self, child: &MemoryElement) -> bool {
        let mut children = lock(&self.0.children);
        let before = children.len();
        children.retain(|c| !c.same_node(child));
        let removed = children.len() != before;
        if removed {
            *lock(&child.0.parent) = Weak::new();
        }
        removed
    }

    /// Depth-first search for the element with `id`, including `self`.
    pub fn find_by_id(&self, id: &str) -> Option<MemoryElement> {
        if DomElement::id(self).as_deref() == Some(id) {
            return Some(self.clone());
        }
        self.children().iter().find_map(|c| c.find_by_id(id))
    }
}

impl DomElement for MemoryElement {
    fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn parent(&self) -> Option<Self> {
        lock(&self.0.parent).upgrade().map(MemoryElement)
    }

    fn id(&self) -> Option<SmolStr> {
        lock(&self.0.id).clone()
    }

    fn has_class(&self, class: &str) -> bool {
        lock(&self.0.classes).contains(class)
    }

    fn toggle_class(&self, class: &str) {
        let mut classes = lock(&self.0.classes);
        if !classes.remove(class) {
            classes.insert(SmolStr::new(class));
        }
    }

    fn set_class(&self, class: &str, present: bool) {
        let mut classes = lock(&self.0.classes);
        if present {
            classes.insert(SmolStr::new(class));
        } else {
            classes.remove(class);
        }
    }

    fn data(&self, key: &str) -> Option<String> {
        lock(&self.0.data).get(key).cloned()
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.0.tag)
            .field("id", &*lock(&self.0.id))
            .field("classes", &*lock(&self.0.classes))
            .field("data", &*lock(&self.0.data))
            .finish()
    }
}
