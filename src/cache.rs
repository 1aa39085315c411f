//! Bounded cache of compiled formatters keyed by `(locale, module)`.
//!
//! # Design
//!
//! - **LRU eviction**: every hit or insert touches the entry, and the least
//!   recently used formatter is dropped once capacity is exceeded.
//! - **Single-flight**: each key owns a `tokio::sync::OnceCell`, so concurrent
//!   misses on one key share a single remote load and a single construction.
//! - **Stale until evicted**: a cached formatter is never rebuilt because the
//!   store changed underneath it. Use [`FormatterCache::invalidate`] to force it.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tokio::sync::OnceCell;
use unic_langid::LanguageIdentifier;

use crate::error::Error;
use crate::i18n::Formatter;
use crate::loader::{LoadRequest, RemoteLoader};
use crate::store::MessageStore;

/// Default number of formatters kept alive.
pub const DEFAULT_CACHE_SIZE: usize = 100;

type Slot = Arc<OnceCell<Arc<Formatter>>>;

/// Build the cache key for a pair.
pub fn cache_key(locale: &str, module: &str) -> String {
    format!("{locale}:{module}")
}

/// LRU cache of formatters backed by a [`MessageStore`] and an optional
/// [`RemoteLoader`].
pub struct FormatterCache {
    entries: Mutex<LruCache<String, Slot>>,
    store: Arc<MessageStore>,
    loader: Option<Arc<dyn RemoteLoader>>,
    default_locale: LanguageIdentifier,
}

impl FormatterCache {
    /// Create an empty cache.
    pub fn new(
        capacity: NonZeroUsize,
        store: Arc<MessageStore>,
        loader: Option<Arc<dyn RemoteLoader>>,
        default_locale: LanguageIdentifier,
    ) -> Self {
        Self { entries: Mutex::new(LruCache::new(capacity)), store, loader, default_locale }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the formatter for `(locale, module)`, building it on a miss.
    ///
    /// Never fails: a broken remote loader degrades to an empty formatter.
    pub async fn get_or_create(&self, locale: &str, module: &str) -> Arc<Formatter> {
        let key = cache_key(locale, module);

        let slot = {
            let mut entries = self.lock();
            if let Some(slot) = entries.get(&key) {
                if let Some(formatter) = slot.get() {
                    return Arc::clone(formatter);
                }
                Arc::clone(slot)
            } else {
                let slot: Slot = Arc::new(OnceCell::new());
                if let Some((evicted, _)) = entries.push(key.clone(), Arc::clone(&slot)) {
                    tracing::debug!(key = evicted.as_str(), "Evicted formatter");
                }
                slot
            }
        };

        let formatter = slot.get_or_init(|| self.build(locale, module)).await;
        self.lock().promote(&key);
        Arc::clone(formatter)
    }

    async fn build(&self, locale: &str, module: &str) -> Arc<Formatter> {
        tracing::debug!(locale, module, "Formatter cache miss");

        if !self.store.contains(locale, module)
            && let Some(loader) = &self.loader
        {
            let request = LoadRequest { locale: locale.to_string(), module: module.to_string() };
            match loader.load(request).await {
                Ok(messages) => self.store.merge(locale, module, messages),
                Err(source) => {
                    let err = Error::remote_load(locale, module, source);
                    tracing::error!(error = %err, "Remote message load failed, serving empty messages");
                }
            }
        }

        let messages = self.store.get(locale, module);
        Arc::new(Formatter::new(locale, &self.default_locale, &messages))
    }

    /// Whether a formatter slot exists for the pair. Does not touch the entry.
    pub fn contains(&self, locale: &str, module: &str) -> bool {
        self.lock().contains(&cache_key(locale, module))
    }

    /// Drop the cached formatter for the pair, if any.
    pub fn invalidate(&self, locale: &str, module: &str) -> bool {
        self.lock().pop(&cache_key(locale, module)).is_some()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }
}

impl std::fmt::Debug for FormatterCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("remote_loader", &self.loader.is_some())
            .finish()
    }
}
