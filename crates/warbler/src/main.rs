use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;
use url::Url;
use warbler::delegate::{Delegate, MESSAGES_CONTAINER_ID};
use warbler::dom::DomElement;
use warbler::dom::memory::MemoryElement;
use warbler::handler::{LikeToggleHandler, ToggleOptions, TogglePolicy};
use warbler::{LikeState, MessageId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Warbler - toggle likes on messages")]
struct Args {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:5000")]
    base: Url,

    /// Cookie header to send, e.g. `session=...`
    #[arg(long)]
    cookie: Option<String>,

    /// Render the state the server reports instead of flipping blindly
    #[arg(long)]
    authoritative: bool,

    /// Start every icon in the liked state
    #[arg(long)]
    liked: bool,

    /// Message ids to toggle, in order
    #[arg(required = true)]
    ids: Vec<MessageId>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(EnvFilter::from_env("WARBLER_LOG"))
        .init();
    let args = Args::parse();

    let mut extra_headers = Vec::new();
    if let Some(cookie) = &args.cookie {
        extra_headers.push((
            http::header::COOKIE,
            http::HeaderValue::from_str(cookie).into_diagnostic()?,
        ));
    }
    let policy = if args.authoritative {
        TogglePolicy::ServerAuthoritative
    } else {
        TogglePolicy::Optimistic
    };
    let options = ToggleOptions::new()
        .base(args.base)
        .policy(policy)
        .extra_headers(extra_headers)
        .build();
    let handler = LikeToggleHandler::new(reqwest::Client::new(), options);

    let messages = MemoryElement::new("ul").with_id(MESSAGES_CONTAINER_ID);
    let delegate = Delegate::messages(messages.clone());
    let initial = LikeState::from(args.liked);

    for id in args.ids {
        let icon = MemoryElement::new("i")
            .with_class("fa-heart")
            .with_class(initial.class_name())
            .with_data("msg-id", id.as_str());
        messages.append_child(&icon);

        let Some(result) = handler.on_click(&delegate, &icon).await else {
            continue;
        };
        let outcome = result?;
        println!("{outcome} (icon: {})", icon.like_state());
    }

    Ok(())
}
