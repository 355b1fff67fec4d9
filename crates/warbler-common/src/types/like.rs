//! Like presentation state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class carried by an icon in the "outline" (not liked) state.
pub const OUTLINE_CLASS: &str = "far";
/// Class carried by an icon in the "filled" (liked) state.
pub const FILLED_CLASS: &str = "fas";
/// Marker class shared by every like icon.
pub const HEART_CLASS: &str = "fa-heart";

/// The two mutually exclusive renderings of a like icon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    /// Not liked, drawn as an outlined heart.
    #[default]
    Outline,
    /// Liked, drawn as a filled heart.
    Filled,
}

impl LikeState {
    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            LikeState::Outline => LikeState::Filled,
            LikeState::Filled => LikeState::Outline,
        }
    }

    /// CSS class that renders this state.
    pub fn class_name(self) -> &'static str {
        match self {
            LikeState::Outline => OUTLINE_CLASS,
            LikeState::Filled => FILLED_CLASS,
        }
    }

    /// Reads the state back from an element's class list.
    ///
    /// `has_class` answers whether the element carries a given class. The
    /// filled class wins; anything else reads as outline.
    pub fn from_classes(has_class: impl Fn(&str) -> bool) -> Self {
        if has_class(FILLED_CLASS) {
            LikeState::Filled
        } else {
            LikeState::Outline
        }
    }

    /// Whether this state means the message is liked.
    pub fn is_liked(self) -> bool {
        matches!(self, LikeState::Filled)
    }
}

impl From<bool> for LikeState {
    fn from(liked: bool) -> Self {
        if liked {
            LikeState::Filled
        } else {
            LikeState::Outline
        }
    }
}

impl fmt::Display for LikeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikeState::Outline => f.write_str("outline"),
            LikeState::Filled => f.write_str("filled"),
        }
    }
}
