//! The localization handle shared by a service and its request handlers.
//!
//! An [`Intl`] owns the message store and the formatter cache. Build one at
//! startup, wrap it in an `Arc`, and hand it to whatever needs translations.

use std::num::NonZeroUsize;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::cache::FormatterCache;
use crate::config::IntlConfig;
use crate::error::{Error, Result};
use crate::i18n::{AcceptList, Formatter, LocaleSignals, resolve_locale};
use crate::loader::RemoteLoader;
use crate::store::{LocaleMessages, MessageStore};

/// A formatter bound to the locale and module it was requested for.
///
/// Cheap to clone; inserted into request extensions by [`Intl::localize`].
#[derive(Debug, Clone)]
pub struct FormatterContext {
    /// Resolved locale.
    pub locale: String,
    /// Module the messages come from.
    pub module: String,
    /// Shared formatter for `(locale, module)`.
    pub formatter: Arc<Formatter>,
}

impl FormatterContext {
    /// Translate a message by identifier.
    pub fn translate(&self, id: &str, args: Option<&[(&str, &str)]>) -> String {
        self.formatter.translate(id, args)
    }
}

/// Locale stored in request extensions once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

/// Request-scoped state for callers that do not work with `http::Request`.
///
/// The resolved locale lives here, so it is dropped together with the request.
#[derive(Debug)]
pub struct RequestContext {
    id: String,
    signals: LocaleSignals,
    locale: OnceLock<String>,
}

impl RequestContext {
    /// Create a context for one request.
    pub fn new(id: impl Into<String>, signals: LocaleSignals) -> Self {
        Self { id: id.into(), signals, locale: OnceLock::new() }
    }

    /// Create a context from an HTTP request.
    pub fn from_http<B>(id: impl Into<String>, request: &http::Request<B>) -> Self {
        Self::new(id, LocaleSignals::from_http(request))
    }

    /// Request identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Signals the locale is resolved from.
    pub const fn signals(&self) -> &LocaleSignals {
        &self.signals
    }
}

/// Builder for [`Intl`].
pub struct IntlBuilder {
    config: IntlConfig,
    modules: Vec<(String, LocaleMessages)>,
    loader: Option<Arc<dyn RemoteLoader>>,
}

impl IntlBuilder {
    /// Register a module's messages. Modules are merged in registration order,
    /// after the default messages.
    pub fn module(mut self, name: impl Into<String>, locales: LocaleMessages) -> Self {
        self.modules.push((name.into(), locales));
        self
    }

    /// Set the loader consulted for pairs with no local messages.
    pub fn remote_loader(mut self, loader: impl RemoteLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Validate the configuration, ingest messages and build the default
    /// formatter.
    pub async fn build(self) -> Result<Intl> {
        let Self { config, modules, loader } = self;

        config.validate()?;
        let accept = config.accept_list()?;
        let default_langid = config.default_langid()?;
        let capacity = NonZeroUsize::new(config.cache_size)
            .ok_or_else(|| Error::config("cache_size must be greater than zero"))?;

        let store = Arc::new(MessageStore::new());
        store.merge_locales(&config.default_module_name, config.default_messages.clone());
        for (name, locales) in modules {
            store.merge_locales(&name, locales);
        }

        let cache = FormatterCache::new(capacity, Arc::clone(&store), loader, default_langid);
        let formatter = cache.get_or_create(&config.default_locale, &config.default_module_name).await;
        let default_context = FormatterContext {
            locale: config.default_locale.clone(),
            module: config.default_module_name.clone(),
            formatter,
        };

        tracing::debug!(
            name = config.name.as_str(),
            default_locale = config.default_locale.as_str(),
            locales = ?store.locales(),
            "Initialized intl"
        );

        Ok(Intl { config, accept, store, cache, default_context: RwLock::new(default_context) })
    }
}

/// Locale resolution, message storage and formatter caching for one service.
pub struct Intl {
    config: IntlConfig,
    accept: AcceptList,
    store: Arc<MessageStore>,
    cache: FormatterCache,
    default_context: RwLock<FormatterContext>,
}

impl Intl {
    /// Start building an instance from a configuration.
    pub fn builder(config: IntlConfig) -> IntlBuilder {
        IntlBuilder { config, modules: Vec::new(), loader: None }
    }

    /// Build an instance with no registered modules and no remote loader.
    pub async fn new(config: IntlConfig) -> Result<Self> {
        Self::builder(config).build().await
    }

    /// Active configuration.
    pub const fn config(&self) -> &IntlConfig {
        &self.config
    }

    /// Message store backing the cache.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Formatter cache.
    pub const fn cache(&self) -> &FormatterCache {
        &self.cache
    }

    /// Formatter context for `(locale, module)`. `None` selects the default module.
    pub async fn create_formatter_context(&self, locale: &str, module: Option<&str>) -> FormatterContext {
        let module = module.unwrap_or(&self.config.default_module_name);
        let formatter = self.cache.get_or_create(locale, module).await;
        FormatterContext { locale: locale.to_string(), module: module.to_string(), formatter }
    }

    /// Resolve the locale of a request, memoized on the request itself.
    pub fn resolve_locale<'a>(&self, request: &'a RequestContext) -> &'a str {
        request.locale.get_or_init(|| {
            let locale = resolve_locale(&request.signals, &self.accept, &self.config.default_locale);
            tracing::debug!(request_id = request.id.as_str(), locale = locale.as_str(), "Resolved request locale");
            locale
        })
    }

    /// Formatter context for a request's locale and the given module.
    pub async fn with_locale(&self, request: &RequestContext, module: Option<&str>) -> FormatterContext {
        let locale = self.resolve_locale(request);
        self.create_formatter_context(locale, module).await
    }

    /// Per-request hook for `http` based services.
    ///
    /// Resolves the locale once per request, storing it as [`ResolvedLocale`]
    /// in the request extensions, then inserts the default module's
    /// [`FormatterContext`] there for downstream handlers.
    pub async fn localize<B>(&self, request: &mut http::Request<B>) -> FormatterContext {
        let locale = if let Some(ResolvedLocale(locale)) = request.extensions().get::<ResolvedLocale>() {
            locale.clone()
        } else {
            let signals = LocaleSignals::from_http(request);
            let locale = resolve_locale(&signals, &self.accept, &self.config.default_locale);
            request.extensions_mut().insert(ResolvedLocale(locale.clone()));
            locale
        };

        let context = self.create_formatter_context(&locale, None).await;
        request.extensions_mut().insert(context.clone());
        context
    }

    /// The process-wide default context (default locale, default module).
    pub fn default_context(&self) -> FormatterContext {
        self.default_context.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Translate with the default context, for code running outside a request.
    pub fn translate(&self, id: &str, args: Option<&[(&str, &str)]>) -> String {
        self.default_context.read().unwrap_or_else(PoisonError::into_inner).translate(id, args)
    }

    /// Merge a module declared after startup.
    ///
    /// Mounting the default module also rebuilds the default context so that
    /// [`Intl::translate`] sees the new messages. Other cached formatters stay
    /// as they are until evicted.
    pub async fn mount_module(&self, name: &str, locales: LocaleMessages) {
        self.store.merge_locales(name, locales);

        if name == self.config.default_module_name {
            let locale = &self.config.default_locale;
            self.cache.invalidate(locale, name);
            let context = self.create_formatter_context(locale, Some(name)).await;
            *self.default_context.write().unwrap_or_else(PoisonError::into_inner) = context;
        }
    }
}

impl std::fmt::Debug for Intl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intl")
            .field("name", &self.config.name)
            .field("default_locale", &self.config.default_locale)
            .field("cache", &self.cache)
            .finish()
    }
}
