//! Seam over the page's element tree.
//!
//! The like handler never owns elements. It reads the message id from a data
//! attribute and mutates the class list, so that is all [`DomElement`] asks
//! for, plus the parent walk event delegation needs.

use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use warbler_common::LikeState;
use warbler_common::types::like::{FILLED_CLASS, OUTLINE_CLASS};

pub mod memory;
#[cfg(target_family = "wasm")]
pub mod web;

/// An element handle. Clones refer to the same underlying node.
pub trait DomElement: Clone {
    /// True when both handles point at the same node.
    fn same_node(&self, other: &Self) -> bool;

    /// Parent element, if any.
    fn parent(&self) -> Option<Self>;

    /// The element's `id` attribute.
    fn id(&self) -> Option<SmolStr>;

    /// Whether the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` if absent, remove it if present.
    fn toggle_class(&self, class: &str);

    /// Force `class` to be present or absent.
    fn set_class(&self, class: &str, present: bool);

    /// Value of the `data-{key}` attribute.
    fn data(&self, key: &str) -> Option<String>;

    /// Whether the element matches `selector`.
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(class) => self.has_class(class),
            Selector::Id(id) => self.id().as_deref() == Some(id.as_str()),
        }
    }

    /// Like state as currently rendered.
    fn like_state(&self) -> LikeState {
        LikeState::from_classes(|class| self.has_class(class))
    }

    /// Flip the outline and filled classes independently.
    fn flip_like(&self) {
        self.toggle_class(OUTLINE_CLASS);
        self.toggle_class(FILLED_CLASS);
    }

    /// Render exactly `state`.
    fn set_like(&self, state: LikeState) {
        self.set_class(OUTLINE_CLASS, state == LikeState::Outline);
        self.set_class(FILLED_CLASS, state == LikeState::Filled);
    }
}

/// The subset of CSS selectors delegation needs: a single class or id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `.name`
    Class(SmolStr),
    /// `#name`
    Id(SmolStr),
}

impl Selector {
    /// Selector matching every element carrying `class`.
    pub fn class(class: impl AsRef<str>) -> Self {
        Selector::Class(SmolStr::new(class.as_ref()))
    }

    /// Selector matching the element with the given id.
    pub fn id(id: impl AsRef<str>) -> Self {
        Selector::Id(SmolStr::new(id.as_ref()))
    }
}

/// Error for selectors outside the supported subset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("unsupported selector `{0}`")]
#[diagnostic(help("use a single `.class` or `#id` selector"))]
pub struct SelectorError(pub SmolStr);

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        match s.split_at_checked(1) {
            Some((".", name)) if valid(name) => Ok(Selector::class(name)),
            Some(("#", name)) if valid(name) => Ok(Selector::id(name)),
            _ => Err(SelectorError(SmolStr::new(s))),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Id(id) => write!(f, "#{id}"),
        }
    }
}
