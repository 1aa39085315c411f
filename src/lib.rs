//! request-intl
//!
//! Per-request locale resolution and cached message formatting for HTTP
//! services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use request_intl::{Intl, IntlConfig, t};
//!
//! let config = IntlConfig::builder().accept_language("en-US,zh-CN").build();
//! let intl = std::sync::Arc::new(Intl::new(config).await?);
//!
//! // In the request hook:
//! let ctx = intl.localize(&mut request).await;
//! let msg = t!(ctx, "greeting", "name" => "John");
//! ```
//!
//! A request's locale is taken from, in order: the `lang` and `language`
//! query parameters, the `x-user-locale` and `x-client-language` cookies,
//! the same two headers, the first `accept-language` entry, and finally the
//! configured default locale.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod i18n;
pub mod intl;
pub mod loader;
pub mod store;

pub use cache::FormatterCache;
pub use cli::Cli;
pub use config::IntlConfig;
pub use error::{Error, Result};
pub use i18n::{Formatter, LocaleSignals};
pub use intl::{FormatterContext, Intl, IntlBuilder, RequestContext, ResolvedLocale};
pub use loader::{LoadRequest, RemoteLoader};
pub use store::{LocaleMessages, MessageMap, MessageStore};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI with the given arguments.
pub async fn run(args: Vec<String>) -> Result<()> {
    use clap::Parser;
    use clap::error::ErrorKind;

    let cli_args = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            // Print clap error (includes help/version)
            e.print().ok();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return Ok(()),
                _ => return Err(Error::invalid_arg("")),
            }
        },
    };

    if cli_args.debug {
        init_logging();
    }

    let config = match &cli_args.config {
        Some(path) => IntlConfig::load_from_file(path)?,
        None => IntlConfig::default(),
    };

    commands::execute(config, &cli_args.command).await
}

/// Initialize tracing/logging for debug mode.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("request_intl=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}
