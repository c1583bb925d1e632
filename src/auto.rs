/*!
 * Process-wide Registry
 * One lazily built multiplexer holding every provider linked into the crate
 */

use std::sync::OnceLock;
use tracing::debug;

use crate::local;
use crate::mux::Mux;
use crate::traits::FileSystem;
use crate::types::FsResult;

static MUX: OnceLock<Mux> = OnceLock::new();

/// Shared registry, built on first use
///
/// Concurrent first callers block until the single initialization finishes;
/// none of them can observe a partially populated registry.
pub fn mux() -> &'static Mux {
    MUX.get_or_init(build)
}

/// Filesystem for a URL using the shared registry
pub fn lookup(url: &str) -> FsResult<Box<dyn FileSystem>> {
    mux().lookup(url)
}

fn build() -> Mux {
    let mux = Mux::new();
    for provider in [local::PROVIDER] {
        // Built-in providers own distinct schemes
        let added = mux.add(provider);
        debug_assert!(added.is_ok(), "built-in provider rejected: {added:?}");
    }

    debug!(schemes = ?mux.schemes(), "initialized shared filesystem registry");
    mux
}
