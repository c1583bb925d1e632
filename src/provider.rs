/*!
 * Providers
 * Pair URL schemes with a filesystem constructor
 */

use std::fmt;

use url::Url;

use crate::traits::FileSystem;
use crate::types::FsResult;

/// Plain constructor: parsed URL in, filesystem handle out
pub type Constructor = fn(&Url) -> FsResult<Box<dyn FileSystem>>;

/// A backend's registration with a [`Mux`](crate::Mux)
///
/// `construct` receives the full parsed URL; errors it returns reach the
/// caller of `lookup` untouched.
pub trait Provider: Send + Sync {
    /// Schemes served by this provider
    fn schemes(&self) -> &[&str];

    /// Build a new, caller-owned filesystem handle for `url`
    fn construct(&self, url: &Url) -> FsResult<Box<dyn FileSystem>>;
}

/// Provider backed by a plain function
///
/// `const`-constructible, so backends can expose a `static PROVIDER`.
#[derive(Clone, Copy)]
pub struct ProviderFn {
    constructor: Constructor,
    schemes: &'static [&'static str],
}

impl ProviderFn {
    pub const fn new(constructor: Constructor, schemes: &'static [&'static str]) -> Self {
        Self {
            constructor,
            schemes,
        }
    }
}

impl Provider for ProviderFn {
    fn schemes(&self) -> &[&str] {
        self.schemes
    }

    fn construct(&self, url: &Url) -> FsResult<Box<dyn FileSystem>> {
        (self.constructor)(url)
    }
}

impl fmt::Debug for ProviderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderFn")
            .field("schemes", &self.schemes)
            .finish_non_exhaustive()
    }
}
