//! Name → implementation registry

use super::{PrngAlgorithm, PrngImpl, Rbg, Threefry2x32, UnsafeRbg};
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Name of the default Threefry implementation
pub const THREEFRY2X32: &str = "threefry2x32";
/// Name of the Threefry/Philox hybrid
pub const RBG: &str = "rbg";
/// Name of the Philox-only implementation
pub const UNSAFE_RBG: &str = "unsafe_rbg";

/// Mapping from implementation name to implementation
///
/// Entries are never removed or replaced, so a handle obtained once stays
/// valid and keeps meaning the same algorithm for the life of the registry.
pub struct Registry {
    impls: RwLock<BTreeMap<&'static str, PrngImpl>>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            impls: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registry holding fresh handles for the built-in implementations
    ///
    /// Keys made through this registry are distinct from those of
    /// [`registry()`] and are rejected by its handles.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for prng in [
            PrngImpl::new(Threefry2x32),
            PrngImpl::new(Rbg),
            PrngImpl::new(UnsafeRbg),
        ] {
            // names are distinct constants
            let _ = registry.register_impl(prng);
        }
        registry
    }

    /// Register an algorithm under its own name
    pub fn register<A: PrngAlgorithm>(&self, algorithm: A) -> Result<PrngImpl> {
        self.register_impl(PrngImpl::new(algorithm))
    }

    /// Register an existing handle under its name
    ///
    /// Fails with [`Error::DuplicateImpl`] if the name is taken.
    pub fn register_impl(&self, prng: PrngImpl) -> Result<PrngImpl> {
        let mut impls = self.impls.write();
        let name = prng.name();
        if impls.contains_key(name) {
            return Err(Error::DuplicateImpl { name });
        }
        tracing::debug!(
            prng = name,
            tag = prng.tag(),
            key_words = prng.key_words(),
            shard_invariant = prng.shard_invariant(),
            "registered PRNG implementation"
        );
        impls.insert(name, prng.clone());
        Ok(prng)
    }

    /// Look up an implementation by name
    pub fn get(&self, name: &str) -> Result<PrngImpl> {
        self.impls
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownImpl {
                name: name.to_string(),
            })
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.impls.read().contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.impls.read().keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("names", &self.names()).finish()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, populated with the built-ins on first use
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::with_builtins)
}
