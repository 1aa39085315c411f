//! In-memory message storage keyed by locale and module.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

/// Message identifier to template string, for one `(locale, module)` pair.
pub type MessageMap = BTreeMap<String, String>;

/// Locale to [`MessageMap`], the shape of a module's message declaration.
pub type LocaleMessages = BTreeMap<String, MessageMap>;

/// Aggregated messages: `locale -> module -> MessageMap`.
///
/// The store only grows by merging. A merge never drops keys contributed by
/// an earlier merge unless the new partial map overwrites them.
#[derive(Debug, Default)]
pub struct MessageStore {
    inner: RwLock<HashMap<String, HashMap<String, MessageMap>>>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `partial` into the map stored for `(locale, module)`.
    ///
    /// Keys present in both maps take the value from `partial`.
    pub fn merge(&self, locale: &str, module: &str, partial: MessageMap) {
        let count = partial.len();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let existing = inner
            .entry(locale.to_string())
            .or_default()
            .entry(module.to_string())
            .or_default();
        existing.extend(partial);
        tracing::debug!(locale, module, merged = count, total = existing.len(), "Merged messages");
    }

    /// Merge every locale of a module declaration.
    pub fn merge_locales(&self, module: &str, locales: LocaleMessages) {
        for (locale, messages) in locales {
            self.merge(&locale, module, messages);
        }
    }

    /// Snapshot of the messages for `(locale, module)`, empty when unknown.
    pub fn get(&self, locale: &str, module: &str) -> MessageMap {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.get(locale).and_then(|modules| modules.get(module)).cloned().unwrap_or_default()
    }

    /// Whether the specific pair has at least one message.
    pub fn contains(&self, locale: &str, module: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .get(locale)
            .and_then(|modules| modules.get(module))
            .is_some_and(|messages| !messages.is_empty())
    }

    /// Locales with at least one module registered, sorted.
    pub fn locales(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut locales: Vec<String> = inner.keys().cloned().collect();
        locales.sort();
        locales
    }
}
