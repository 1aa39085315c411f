//! Command implementations for the request-intl CLI.

mod resolve;
mod translate;

pub use resolve::resolve;
pub use translate::{locales, translate};

use crate::cli::{Commands, SignalArgs};
use crate::config::IntlConfig;
use crate::error::{Error, Result};
use crate::i18n::LocaleSignals;
use crate::intl::Intl;

/// Execute a CLI command.
pub async fn execute(config: IntlConfig, command: &Commands) -> Result<()> {
    let intl = Intl::new(config).await?;

    match command {
        Commands::Resolve { signals } => resolve(&intl, signals),
        Commands::Translate { id, locale, module, args, signals } => {
            translate(&intl, id, locale.as_deref(), module.as_deref(), args, signals).await
        },
        Commands::Locales => {
            locales(&intl);
            Ok(())
        },
    }
}

/// Split a `NAME=VALUE` argument.
pub fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| Error::invalid_arg(format!("expected NAME=VALUE, got {raw:?}")))
}

/// Build request signals from command-line arguments.
pub fn signals_from_args(args: &SignalArgs) -> Result<LocaleSignals> {
    let mut signals = LocaleSignals::new();

    if let Some(lang) = &args.lang {
        signals = signals.with_query("lang", lang);
    }
    if let Some(language) = &args.language {
        signals = signals.with_query("language", language);
    }
    for raw in &args.cookies {
        let (name, value) = parse_pair(raw)?;
        signals = signals.with_cookie(name, value);
    }
    for raw in &args.headers {
        let (name, value) = parse_pair(raw)?;
        signals = signals.with_header(name, value);
    }

    Ok(signals)
}
