//! Locale resolution command.

use super::signals_from_args;
use crate::cli::SignalArgs;
use crate::error::Result;
use crate::intl::{Intl, RequestContext};

/// Print the locale a request carrying `signals` resolves to.
pub fn resolve(intl: &Intl, signals: &SignalArgs) -> Result<()> {
    let request = RequestContext::new("cli", signals_from_args(signals)?);
    println!("{}", intl.resolve_locale(&request));
    Ok(())
}
