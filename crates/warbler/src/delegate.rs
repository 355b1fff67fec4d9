//! Event delegation.
//!
//! One listener lives on a stable container. Each click is resolved at
//! dispatch time by walking up from the event target, so elements added to
//! the container after binding are handled without re-binding.

use warbler_common::types::like::HEART_CLASS;

use crate::dom::{DomElement, Selector};

/// Id of the container holding the message list.
pub const MESSAGES_CONTAINER_ID: &str = "messages";

/// A single registration on `container`, filtering clicks by `selector`.
#[derive(Debug, Clone)]
pub struct Delegate<E> {
    container: E,
    selector: Selector,
}

impl<E: DomElement> Delegate<E> {
    /// Delegate clicks inside `container` to descendants matching `selector`.
    pub fn new(container: E, selector: Selector) -> Self {
        Self {
            container,
            selector,
        }
    }

    /// Heart icons inside the message list.
    pub fn messages(container: E) -> Self {
        Self::new(container, Selector::class(HEART_CLASS))
    }

    /// The element the listener is bound to.
    pub fn container(&self) -> &E {
        &self.container
    }

    /// The filter applied to each click.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Resolve a click on `target` to the element it should be handled for.
    ///
    /// Returns the nearest ancestor-or-self of `target` matching the
    /// selector, provided it sits strictly inside the container. Clicks on
    /// the container itself or outside it resolve to `None`.
    pub fn resolve(&self, target: &E) -> Option<E> {
        let mut matched = None;
        let mut current = Some(target.clone());
        while let Some(el) = current {
            if el.same_node(&self.container) {
                return matched;
            }
            if matched.is_none() && el.matches(&self.selector) {
                matched = Some(el.clone());
            }
            current = el.parent();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryElement;

    fn heart(id: &str) -> MemoryElement {
        MemoryElement::new("i")
            .with_class("fa-heart")
            .with_class("far")
            .with_data("msg-id", id)
    }

    #[test]
    fn resolves_icon_inside_container() {
        let messages = MemoryElement::new("ul").with_id(MESSAGES_CONTAINER_ID);
        let item = MemoryElement::new("li");
        let icon = heart("1");
        messages.append_child(&item);
        item.append_child(&icon);

        let delegate = Delegate::messages(messages);
        assert!(delegate.resolve(&icon).unwrap().same_node(&icon));
    }

    #[test]
    fn resolves_from_nested_target_to_nearest_match() {
        let messages = MemoryElement::new("ul");
        let icon = heart("1");
        let glyph = MemoryElement::new("span");
        messages.append_child(&icon);
        icon.append_child(&glyph);

        let delegate = Delegate::messages(messages);
        assert!(delegate.resolve(&glyph).unwrap().same_node(&icon));
    }

    #[test]
    fn ignores_non_matching_targets_and_the_container() {
        let messages = MemoryElement::new("ul").with_class("fa-heart");
        let text = MemoryElement::new("p");
        messages.append_child(&text);

        let delegate = Delegate::messages(messages.clone());
        assert!(delegate.resolve(&text).is_none());
        assert!(delegate.resolve(&messages).is_none());
    }

    #[test]
    fn ignores_icons_outside_the_container() {
        let body = MemoryElement::new("body");
        let messages = MemoryElement::new("ul");
        let stray = heart("9");
        body.append_child(&messages);
        body.append_child(&stray);

        let delegate = Delegate::messages(messages);
        assert!(delegate.resolve(&stray).is_none());
    }

    #[test]
    fn covers_icons_added_after_binding() {
        let messages = MemoryElement::new("ul");
        let delegate = Delegate::messages(messages.clone());

        let late = heart("late");
        assert!(delegate.resolve(&late).is_none());
        messages.append_child(&late);
        assert!(delegate.resolve(&late).unwrap().same_node(&late));
    }
}
