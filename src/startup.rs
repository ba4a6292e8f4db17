//! Startup sequence.
//!
//! The stored configuration is restored first. A configuration carried by
//! the launch URL then replaces it, and its parameter is stripped from the
//! URL once it has been applied. A link that does not decode is ignored and
//! left as it was.

use carportkit_layout::sharing::{clear_config_from_url, parse_config_from_url};
use carportkit_layout::ConfigStore;
use carportkit_settings::ConfigPersistence;
use tracing::info;

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    Persisted,
    Url,
}

/// Result of [`restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub source: ConfigSource,
    /// The launch URL with the configuration parameter removed, or as given
    /// when it carried no usable configuration.
    pub url: Option<String>,
}

/// Loads the persisted configuration, then the one carried by `url`, into
/// `store`.
pub fn restore(
    store: &mut ConfigStore,
    persistence: &ConfigPersistence,
    url: Option<&str>,
    param: &str,
) -> Restored {
    let mut source = ConfigSource::Default;
    if let Some(config) = persistence.load() {
        store.set_config(config);
        source = ConfigSource::Persisted;
    }

    let url = url.map(|url| match parse_config_from_url(url, param) {
        Some(config) => {
            store.set_config(config);
            source = ConfigSource::Url;
            clear_config_from_url(url, param)
        }
        None => url.to_string(),
    });

    info!("Configuration restored from {:?}", source);
    Restored { source, url }
}
