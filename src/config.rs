//! Process-wide default implementation
//!
//! One name selects the implementation used when a key is created without an
//! explicit choice. It starts as the `PRNGKEY_DEFAULT_IMPL` environment
//! variable (read once, on first access) or `threefry2x32`.
//!
//! # Resolution order
//!
//! ```text
//! explicit per-call name > process-wide default
//! ```
//!
//! Operations on an existing key always dispatch on the key's own
//! implementation, so changing the default never affects keys that already
//! exist.

use crate::error::{Error, Result};
use crate::prng::{PrngImpl, THREEFRY2X32, registry};
use parking_lot::RwLock;
use std::sync::OnceLock;

/// Environment variable consulted for the initial default
pub const DEFAULT_IMPL_ENV: &str = "PRNGKEY_DEFAULT_IMPL";

static DEFAULT_IMPL: OnceLock<RwLock<String>> = OnceLock::new();

fn default_cell() -> &'static RwLock<String> {
    DEFAULT_IMPL.get_or_init(|| {
        let name = match std::env::var(DEFAULT_IMPL_ENV) {
            Ok(name) if registry().contains(&name) => {
                tracing::debug!(prng = %name, "default PRNG implementation taken from {DEFAULT_IMPL_ENV}");
                name
            }
            Ok(name) => {
                tracing::warn!(
                    requested = %name,
                    fallback = THREEFRY2X32,
                    "{DEFAULT_IMPL_ENV} names an unregistered PRNG implementation"
                );
                THREEFRY2X32.to_string()
            }
            Err(_) => THREEFRY2X32.to_string(),
        };
        RwLock::new(name)
    })
}

/// Name of the current default implementation
pub fn default_impl_name() -> String {
    default_cell().read().clone()
}

/// Change the default implementation for keys created from now on
///
/// Fails with [`Error::UnknownImpl`] if `name` is not registered, leaving
/// the default unchanged.
pub fn set_default_impl(name: &str) -> Result<()> {
    let prng = registry().get(name)?;
    let mut current = default_cell().write();
    if current.as_str() != prng.name() {
        let previous = std::mem::replace(&mut *current, prng.name().to_string());
        tracing::info!(from = %previous, to = prng.name(), "default PRNG implementation changed");
    }
    Ok(())
}

/// The current default implementation
pub fn default_impl() -> Result<PrngImpl> {
    registry().get(&default_impl_name())
}

/// Resolve an optional explicit name against the default
pub fn resolve_impl(name: Option<&str>) -> Result<PrngImpl> {
    match name {
        Some(name) => registry().get(name),
        None => default_impl(),
    }
}
