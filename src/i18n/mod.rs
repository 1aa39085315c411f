//! Formatting and locale resolution.
//!
//! Uses Project Fluent to compile message maps into formatters, and resolves
//! the locale of each request from its query, cookie and header signals.
//!
//! # Usage
//!
//! ```rust,ignore
//! use request_intl::t;
//!
//! let ctx = intl.create_formatter_context("zh-CN", None).await;
//! let msg = t!(ctx, "hello");
//! let msg = t!(ctx, "greeting", "name" => "John");
//! ```

mod bundle;
mod resolve;

pub use bundle::Formatter;
pub use resolve::{
    AcceptList, COOKIE_NAMES, HEADER_NAMES, LocaleSignals, QUERY_PARAMS, resolve_locale,
};

/// Translation macro over anything with a `translate(id, args)` method:
/// [`Formatter`], [`FormatterContext`](crate::FormatterContext) or
/// [`Intl`](crate::Intl).
///
/// # Examples
///
/// ```rust,ignore
/// // Simple translation
/// let msg = t!(ctx, "hello");
///
/// // Translation with arguments
/// let msg = t!(ctx, "greeting", "name" => "John");
/// ```
#[macro_export]
macro_rules! t {
    ($ctx:expr, $key:expr) => {
        $ctx.translate($key, None)
    };
    ($ctx:expr, $key:expr, $($k:expr => $v:expr),+ $(,)?) => {{
        let args: &[(&str, &str)] = &[$(($k, $v)),+];
        $ctx.translate($key, Some(args))
    }};
}
