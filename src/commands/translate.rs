//! Translation commands.

use super::{parse_pair, signals_from_args};
use crate::cli::SignalArgs;
use crate::error::Result;
use crate::intl::{Intl, RequestContext};

/// Translate one message and print it.
pub async fn translate(
    intl: &Intl,
    id: &str,
    locale: Option<&str>,
    module: Option<&str>,
    args: &[String],
    signals: &SignalArgs,
) -> Result<()> {
    let pairs = args.iter().map(|raw| parse_pair(raw)).collect::<Result<Vec<_>>>()?;

    let context = if let Some(locale) = locale {
        intl.create_formatter_context(locale, module).await
    } else {
        let request = RequestContext::new("cli", signals_from_args(signals)?);
        intl.with_locale(&request, module).await
    };

    let args = if pairs.is_empty() { None } else { Some(pairs.as_slice()) };
    println!("{}", context.translate(id, args));
    Ok(())
}

/// List the locales with configured messages, one per line.
pub fn locales(intl: &Intl) {
    for locale in intl.store().locales() {
        let marker = if locale == intl.config().default_locale { " (default)" } else { "" };
        println!("{locale}{marker}");
    }
}
