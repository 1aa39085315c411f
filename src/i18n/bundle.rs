//! Formatter construction on top of a concurrent `FluentBundle`.

use std::collections::HashMap;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;

use crate::store::MessageMap;

/// A compiled message set for one locale.
///
/// Built once from a snapshot of a [`MessageMap`] and never mutated again, so
/// a single instance is shared between all requests through an `Arc`.
///
/// Message identifiers are arbitrary strings (`app.title`, `common:ok`). Each
/// one is compiled under a generated Fluent identifier. Templates are literal
/// text with `{name}` placeholders. Every other brace, leading or trailing
/// whitespace and Fluent's line-start markers are kept verbatim.
pub struct Formatter {
    bundle: FluentBundle<FluentResource>,
    /// Message identifier to the Fluent identifier it was compiled under.
    ids: HashMap<String, String>,
    /// Templates Fluent rejected, returned verbatim.
    raw: HashMap<String, String>,
    locale: String,
}

impl Formatter {
    /// Build a formatter for `locale` from a message snapshot.
    ///
    /// `default_locale` is appended to the bundle's locale chain and is used
    /// for plural and number rules when `locale` cannot be parsed.
    pub fn new(locale: &str, default_locale: &LanguageIdentifier, messages: &MessageMap) -> Self {
        let langid = locale.parse::<LanguageIdentifier>().unwrap_or_else(|_| {
            tracing::warn!(locale, fallback = %default_locale, "Unparsable locale tag");
            default_locale.clone()
        });

        let mut locales = vec![langid];
        if &locales[0] != default_locale {
            locales.push(default_locale.clone());
        }

        let mut bundle = FluentBundle::new_concurrent(locales);
        bundle.set_use_isolating(false);

        let mut ids = HashMap::with_capacity(messages.len());
        let mut raw = HashMap::new();
        for (index, (id, template)) in messages.iter().enumerate() {
            let fluent_id = format!("m{index}");
            let source = format!("{fluent_id} = {}\n", to_fluent_source(template));

            let added = match FluentResource::try_new(source) {
                Ok(resource) => {
                    bundle.add_resource(resource).map_err(|errors| format!("{errors:?}"))
                },
                Err((_, errors)) => Err(format!("{errors:?}")),
            };

            match added {
                Ok(()) => {
                    ids.insert(id.clone(), fluent_id);
                },
                Err(errors) => {
                    tracing::warn!(
                        locale,
                        id = id.as_str(),
                        errors = errors.as_str(),
                        "Keeping message template uncompiled"
                    );
                    raw.insert(id.clone(), template.clone());
                },
            }
        }

        Self { bundle, ids, raw, locale: locale.to_string() }
    }

    /// The locale tag this formatter was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Number of messages held.
    pub fn len(&self) -> usize {
        self.ids.len() + self.raw.len()
    }

    /// Whether the formatter holds no messages at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a message with this identifier exists.
    pub fn has_message(&self, id: &str) -> bool {
        self.ids.contains_key(id) || self.raw.contains_key(id)
    }

    /// Translate a message by identifier.
    ///
    /// If the identifier is not found, returns the identifier itself.
    pub fn translate(&self, id: &str, args: Option<&[(&str, &str)]>) -> String {
        let Some(msg) = self.ids.get(id).and_then(|fluent_id| self.bundle.get_message(fluent_id))
        else {
            if let Some(template) = self.raw.get(id) {
                return template.clone();
            }
            tracing::warn!(locale = self.locale.as_str(), key = id, "Missing translation key");
            return id.to_string();
        };

        let Some(pattern) = msg.value() else {
            return id.to_string();
        };

        let mut errors = vec![];

        let result = if let Some(args) = args {
            let mut fluent_args = FluentArgs::new();
            for (k, v) in args {
                fluent_args.set(*k, FluentValue::from(*v));
            }
            self.bundle.format_pattern(pattern, Some(&fluent_args), &mut errors)
        } else {
            self.bundle.format_pattern(pattern, None, &mut errors)
        };

        if !errors.is_empty() {
            tracing::warn!(key = id, errors = ?errors, "Translation errors");
        }

        result.into_owned()
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("locale", &self.locale)
            .field("messages", &self.len())
            .finish()
    }
}

fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Rewrite a template into the value part of a Fluent message.
///
/// Each line is written as its own continuation line. Fluent would strip
/// whitespace at the edges of a line, drop empty lines and treat `[`, `*` and
/// `.` at the start of a line as syntax, so those parts become string literal
/// placeables.
fn to_fluent_source(template: &str) -> String {
    let lines: Vec<String> = template.split('\n').map(line_source).collect();
    lines.join("\n    ")
}

fn line_source(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    if line.is_empty() {
        push_literal(&mut out, "");
        return out;
    }

    let body = line.trim_start();
    let lead = &line[..line.len() - body.len()];
    let text = body.trim_end();
    let trail = &body[text.len()..];

    if !lead.is_empty() {
        push_literal(&mut out, lead);
    }

    let mut rest = text;
    if let Some(first) = rest.chars().next()
        && matches!(first, '[' | '*' | '.')
    {
        push_literal(&mut out, &rest[..1]);
        rest = &rest[1..];
    }
    push_text(&mut out, rest);

    if !trail.is_empty() {
        push_literal(&mut out, trail);
    }
    out
}

/// Copy text, turning `{name}` into a variable and escaping other braces.
fn push_text(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(pos) = rest.find(['{', '}', '\r']) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match rest.as_bytes()[pos] {
            b'{' => match after.find('}') {
                Some(end) if is_placeholder_name(after[..end].trim()) => {
                    out.push_str("{ $");
                    out.push_str(after[..end].trim());
                    out.push_str(" }");
                    rest = &after[end + 1..];
                    continue;
                },
                _ => push_literal(out, "{"),
            },
            b'}' => push_literal(out, "}"),
            _ => push_literal(out, "\r"),
        }
        rest = after;
    }
    out.push_str(rest);
}

/// Append `{ "..." }`, escaping what a Fluent string literal cannot hold.
fn push_literal(out: &mut String, value: &str) {
    out.push_str("{ \"");
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push_str("\" }");
}
