/*!
 * Filesystem Multiplexer
 * Dispatches URLs to the provider registered for their scheme
 */

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

use crate::provider::Provider;
use crate::traits::FileSystem;
use crate::types::*;

/// Scheme -> provider registry
///
/// Holds no filesystem state; every lookup builds a fresh handle through the
/// matching provider. At most one provider serves a scheme: registering a
/// scheme twice is an error. Schemes are matched case-insensitively.
pub struct Mux {
    providers: DashMap<String, Arc<dyn Provider>, RandomState>,
    registration: Mutex<()>,
}

impl Mux {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: DashMap::with_hasher(RandomState::new()),
            registration: Mutex::new(()),
        }
    }

    /// Registry pre-populated with `providers`
    pub fn with_providers<I, P>(providers: I) -> FsResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: Provider + 'static,
    {
        let mux = Self::new();
        for provider in providers {
            mux.add(provider)?;
        }
        Ok(mux)
    }

    /// Register a provider under each scheme it declares
    ///
    /// Fails with [`FsError::SchemeConflict`] when any of its schemes is
    /// already taken; nothing is registered in that case.
    pub fn add<P: Provider + 'static>(&self, provider: P) -> FsResult<()> {
        self.add_shared(Arc::new(provider))
    }

    /// Register an already shared provider
    pub fn add_shared(&self, provider: Arc<dyn Provider>) -> FsResult<()> {
        let mut schemes: Vec<String> = provider
            .schemes()
            .iter()
            .map(|s| s.to_ascii_lowercase())
            .collect();
        schemes.sort();
        schemes.dedup();

        if schemes.is_empty() {
            return Err(FsError::InvalidProvider(
                "provider declares no schemes".into(),
            ));
        }
        if let Some(blank) = schemes.iter().find(|s| s.is_empty()) {
            return Err(FsError::InvalidProvider(format!(
                "provider declares a blank scheme {blank:?}"
            )));
        }

        // Serialize writers so the conflict check and the inserts are atomic
        let _guard = self.registration.lock();

        if let Some(taken) = schemes.iter().find(|s| self.providers.contains_key(*s)) {
            return Err(FsError::SchemeConflict(taken.clone()));
        }

        for scheme in schemes {
            debug!(scheme = %scheme, "registered filesystem provider");
            self.providers.insert(scheme, Arc::clone(&provider));
        }

        Ok(())
    }

    /// Filesystem for a URL string
    ///
    /// Fails with [`FsError::InvalidUrl`] if the string does not parse and with
    /// [`FsError::UnsupportedScheme`] if no provider serves its scheme.
    /// Provider errors are returned as-is.
    pub fn lookup(&self, url: &str) -> FsResult<Box<dyn FileSystem>> {
        let parsed = Url::parse(url).map_err(|source| FsError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        self.lookup_url(&parsed)
    }

    /// Filesystem for an already parsed URL
    pub fn lookup_url(&self, url: &Url) -> FsResult<Box<dyn FileSystem>> {
        let provider = self.provider(url.scheme())?;
        trace!(scheme = %url.scheme(), "dispatching to filesystem provider");
        provider.construct(url)
    }

    /// Provider serving `scheme`
    fn provider(&self, scheme: &str) -> FsResult<Arc<dyn Provider>> {
        let key = scheme.to_ascii_lowercase();
        self.providers
            .get(&key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| FsError::UnsupportedScheme(scheme.to_string()))
    }

    /// Check if a provider serves `scheme`
    pub fn supports(&self, scheme: &str) -> bool {
        self.providers.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self
            .providers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        schemes.sort();
        schemes
    }
}

impl Default for Mux {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mux")
            .field("schemes", &self.schemes())
            .finish()
    }
}
