//! Common types for Warbler like toggling
//!
//! Holds the pieces shared between the browser binding and native callers:
//! the [`HttpClient`](http_client::HttpClient) seam, the error taxonomy, and
//! the wire shape of the `toggle_like` endpoint.

#![warn(missing_docs)]
pub use smol_str;
pub use url;

pub mod error;
/// HTTP client abstraction used by warbler crates.
pub mod http_client;
pub mod toggle;
/// Message identifiers and like presentation state.
pub mod types;

pub use error::{ClientError, ClientResult};
pub use toggle::{Rejection, ToggleResponse, ToggleVerdict};
pub use types::like::LikeState;
pub use types::message_id::MessageId;
