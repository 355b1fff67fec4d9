//! The like toggle handler.
//!
//! [`LikeToggleHandler::toggle`] reads the message id off an icon, posts to
//! the toggle endpoint, and updates the icon unless the server rejected the
//! like. There is exactly one suspension point (the HTTP call); nothing
//! dedupes, debounces, retries or times out overlapping clicks.

use bon::Builder;
use http::{HeaderName, HeaderValue};
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;
use url::Url;
use warbler_common::error::TransportError;
use warbler_common::http_client::HttpClient;
use warbler_common::toggle::{build_toggle_request, process_response};
use warbler_common::{ClientResult, LikeState, MessageId, Rejection, ToggleResponse, ToggleVerdict};

use crate::delegate::Delegate;
use crate::dom::DomElement;
use crate::ledger::LikeLedger;

/// Server the handler talks to when none is configured.
pub const DEFAULT_BASE: &str = "http://localhost:5000/";
/// Data attribute (without the `data-` prefix) holding the message id.
pub const DEFAULT_ID_ATTRIBUTE: &str = "msg-id";

/// How an accepted toggle is reflected on the icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TogglePolicy {
    /// Flip the icon without looking at what the server recorded.
    #[default]
    Optimistic,
    /// Render the state the server reports; leave the icon alone when the
    /// reply does not say.
    ServerAuthoritative,
}

fn default_base() -> Url {
    Url::parse(DEFAULT_BASE).expect("DEFAULT_BASE is a valid URL")
}

/// Configuration for [`LikeToggleHandler`].
///
/// ```
/// use warbler::handler::{ToggleOptions, TogglePolicy};
///
/// let opts = ToggleOptions::new()
///     .base(url::Url::parse("https://warbler.example").unwrap())
///     .policy(TogglePolicy::ServerAuthoritative)
///     .build();
/// assert_eq!(opts.id_attribute, "msg-id");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = new)]
pub struct ToggleOptions {
    /// Base URL the endpoint path is appended to
    #[builder(default = default_base())]
    pub base: Url,
    /// How accepted toggles update the icon
    #[builder(default)]
    pub policy: TogglePolicy,
    /// Headers added to every request (a session cookie, for instance)
    #[builder(default)]
    pub extra_headers: Vec<(HeaderName, HeaderValue)>,
    /// Name of the `data-*` attribute carrying the message id
    #[builder(into, default = SmolStr::new_static(DEFAULT_ID_ATTRIBUTE))]
    pub id_attribute: SmolStr,
}

impl Default for ToggleOptions {
    fn default() -> Self {
        Self::new().build()
    }
}

/// Result of handling one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The icon now renders `state`.
    Applied {
        /// Message the toggle was sent for
        id: MessageId,
        /// Rendered state after the update
        state: LikeState,
    },
    /// Accepted by the server, but the reply named no resulting state, so
    /// the icon was left alone. Only produced by
    /// [`TogglePolicy::ServerAuthoritative`].
    Unconfirmed {
        /// Message the toggle was sent for
        id: MessageId,
        /// The server's message, if any
        message: Option<SmolStr>,
    },
    /// Absorbed without touching the icon.
    Rejected {
        /// Message the toggle was sent for
        id: MessageId,
        /// Why the server refused
        reason: Rejection,
    },
}

impl ToggleOutcome {
    /// Message the toggle was sent for.
    pub fn id(&self) -> &MessageId {
        match self {
            ToggleOutcome::Applied { id, .. }
            | ToggleOutcome::Unconfirmed { id, .. }
            | ToggleOutcome::Rejected { id, .. } => id,
        }
    }

    /// True when the icon was updated.
    pub fn is_applied(&self) -> bool {
        matches!(self, ToggleOutcome::Applied { .. })
    }
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleOutcome::Applied { id, state } => write!(f, "message {id}: {state}"),
            ToggleOutcome::Unconfirmed { id, message } => match message {
                Some(m) => write!(f, "message {id}: unchanged ({m})"),
                None => write!(f, "message {id}: unchanged"),
            },
            ToggleOutcome::Rejected { id, reason } => {
                write!(f, "message {id}: rejected ({reason})")
            }
        }
    }
}

/// Toggles likes through an [`HttpClient`] and reflects them on icons.
pub struct LikeToggleHandler<C> {
    client: Arc<C>,
    options: Arc<ToggleOptions>,
    ledger: LikeLedger,
}

impl<C> Clone for LikeToggleHandler<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            options: self.options.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

impl<C: HttpClient> LikeToggleHandler<C> {
    /// Create a handler with its own empty ledger.
    pub fn new(client: C, options: ToggleOptions) -> Self {
        Self::with_ledger(client, options, LikeLedger::new())
    }

    /// Create a handler recording into an existing ledger.
    pub fn with_ledger(client: C, options: ToggleOptions, ledger: LikeLedger) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            base = %options.base,
            policy = ?options.policy,
            "like toggle handler created"
        );

        Self {
            client: Arc::new(client),
            options: Arc::new(options),
            ledger,
        }
    }

    /// Active configuration.
    pub fn options(&self) -> &ToggleOptions {
        &self.options
    }

    /// States applied so far.
    pub fn ledger(&self) -> &LikeLedger {
        &self.ledger
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Toggle the like behind `icon`.
    ///
    /// Rejections (`"Bad like"`, 401) come back as
    /// [`ToggleOutcome::Rejected`] and leave the icon as it was. Transport
    /// failures, other error statuses and undecodable bodies are returned as
    /// errors, also without touching the icon.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(msg_id)))]
    pub async fn toggle<E: DomElement>(&self, icon: &E) -> ClientResult<ToggleOutcome> {
        let id = MessageId::from_attribute(icon.data(&self.options.id_attribute));
        #[cfg(feature = "tracing")]
        tracing::Span::current().record("msg_id", id.as_str());

        let request = build_toggle_request(&self.options.base, &id, &self.options.extra_headers)?;

        let client: &C = &self.client;
        let response = client
            .send_http(request)
            .await
            .map_err(TransportError::from_client)?;

        match process_response(response)? {
            ToggleVerdict::Rejected(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%reason, "toggle rejected");
                Ok(ToggleOutcome::Rejected { id, reason })
            }
            ToggleVerdict::Accepted(response) => Ok(self.apply(id, icon, response).await),
        }
    }

    /// Resolve a click through `delegate` and toggle the matched icon.
    ///
    /// `None` when the click did not land on a matching element inside the
    /// delegate's container.
    pub async fn on_click<E: DomElement>(
        &self,
        delegate: &Delegate<E>,
        target: &E,
    ) -> Option<ClientResult<ToggleOutcome>> {
        let icon = delegate.resolve(target)?;
        Some(self.toggle(&icon).await)
    }

    async fn apply<E: DomElement>(
        &self,
        id: MessageId,
        icon: &E,
        response: ToggleResponse,
    ) -> ToggleOutcome {
        let state = match self.options.policy {
            TogglePolicy::Optimistic => {
                icon.flip_like();
                icon.like_state()
            }
            TogglePolicy::ServerAuthoritative => match response.reported_state() {
                Some(state) => {
                    icon.set_like(state);
                    state
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(message = ?response.message, "server reported no like state");
                    return ToggleOutcome::Unconfirmed {
                        id,
                        message: response.message,
                    };
                }
            },
        };

        self.ledger.set(id.clone(), state).await;
        ToggleOutcome::Applied { id, state }
    }
}
