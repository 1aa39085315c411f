//! Configuration for the localization layer.
//!
//! Options can be built in code through [`IntlConfig::builder`] or loaded from
//! a YAML or JSON file. Every field is optional:
//!
//! ```yaml
//! name: intl
//! accept_language: "en-US,zh-CN"
//! default_locale: en-US
//! default_module_name: global
//! cache_size: 100
//! default_messages:
//!   en-US:
//!     hello: Hello World
//!   zh-CN:
//!     hello: 你好世界
//! ```

use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::cache::DEFAULT_CACHE_SIZE;
use crate::error::{Error, Result};
use crate::i18n::AcceptList;
use crate::store::LocaleMessages;

/// Options for an [`Intl`](crate::Intl) instance.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, PartialEq, Eq)]
#[builder(on(String, into))]
pub struct IntlConfig {
    /// Label of this instance in log output.
    #[serde(default = "default_name")]
    #[builder(default = default_name())]
    pub name: String,

    /// `*`, or a comma-separated list of the locales that may be served.
    #[serde(default = "default_accept_language")]
    #[builder(default = default_accept_language())]
    pub accept_language: String,

    /// Locale used when a request carries no acceptable locale.
    #[serde(default = "default_locale")]
    #[builder(default = default_locale())]
    pub default_locale: String,

    /// Module that `default_messages` are stored under.
    #[serde(default = "default_module_name")]
    #[builder(default = default_module_name())]
    pub default_module_name: String,

    /// Static messages per locale for the default module.
    #[serde(default)]
    #[builder(default)]
    pub default_messages: LocaleMessages,

    /// Maximum number of cached formatters.
    #[serde(default = "default_cache_size")]
    #[builder(default = default_cache_size())]
    pub cache_size: usize,
}

fn default_name() -> String {
    "intl".to_string()
}

fn default_accept_language() -> String {
    "*".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_module_name() -> String {
    "global".to_string()
}

const fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

impl Default for IntlConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IntlConfig {
    /// Load configuration from a YAML or JSON file, chosen by extension.
    ///
    /// Read failures surface as [`Error::Io`] and parse failures as
    /// [`Error::Json`] or [`Error::Yaml`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read config file");
        })?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        tracing::debug!(path = %path.display(), name = config.name.as_str(), "Loaded config");
        Ok(config)
    }

    /// Parse the accept list.
    pub fn accept_list(&self) -> Result<AcceptList> {
        AcceptList::parse(&self.accept_language)
    }

    /// Parse the default locale.
    pub fn default_langid(&self) -> Result<LanguageIdentifier> {
        self.default_locale.parse().map_err(|e| {
            Error::config(format!("Invalid default_locale {:?}: {}", self.default_locale, e))
        })
    }

    /// Check the configuration, failing fast on values that would otherwise
    /// only surface at request time.
    pub fn validate(&self) -> Result<()> {
        self.accept_list()?;
        self.default_langid()?;

        if self.cache_size == 0 {
            return Err(Error::config("cache_size must be greater than zero"));
        }
        if self.default_module_name.is_empty() {
            return Err(Error::config("default_module_name must not be empty"));
        }
        Ok(())
    }
}
