//! # Warbler
//!
//! Like toggling for Warbler message feeds.
//!
//! A click on a heart icon inside the `#messages` container sends
//! `POST /api/messages/{msgId}/toggle_like` and, when the server accepts it,
//! flips the icon between its outline (`far`) and filled (`fas`) rendering.
//!
//! The pieces:
//!
//! - [`dom::DomElement`] is the seam over the page. [`dom::memory`] is an
//!   in-memory tree for native use and tests; `dom::web` wraps
//!   `web_sys::Element` when compiled to wasm.
//! - [`delegate::Delegate`] implements event delegation: one registration on
//!   the container, target resolution at dispatch time.
//! - [`handler::LikeToggleHandler`] performs the call and updates the icon.
//! - [`ledger::LikeLedger`] keeps the like state of every message the
//!   handler has touched.
//!
//! ## Example
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> miette::Result<()> {
//! use warbler::delegate::Delegate;
//! use warbler::dom::memory::MemoryElement;
//! use warbler::handler::{LikeToggleHandler, ToggleOptions};
//!
//! let handler = LikeToggleHandler::new(reqwest::Client::new(), ToggleOptions::default());
//!
//! let messages = MemoryElement::new("ul").with_id("messages");
//! let delegate = Delegate::messages(messages.clone());
//!
//! let icon = MemoryElement::new("i")
//!     .with_class("fa-heart")
//!     .with_class("far")
//!     .with_data("msg-id", "42");
//! messages.append_child(&icon);
//!
//! if let Some(outcome) = handler.on_click(&delegate, &icon).await {
//!     println!("{}", outcome?);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use warbler_common as common;
pub use warbler_common::{
    ClientError, ClientResult, LikeState, MessageId, Rejection, ToggleResponse, ToggleVerdict,
    http_client, toggle,
};

pub mod delegate;
pub mod dom;
pub mod handler;
pub mod ledger;

#[cfg(target_family = "wasm")]
pub use dom::web::{bind_like_toggles, bind_messages};
