//! Single-Slot Provider Cache
//!
//! Retains at most one built provider instance, keyed by exact configuration
//! equality. The read-check-and-possibly-rebuild happens under one lock, so
//! readers never observe a half-built instance. The cache is an explicit
//! object passed into the pipeline by the caller, which keeps cache-hit and
//! cache-miss behavior testable through an injected build factory.

use std::sync::{Arc, Mutex};

use super::provider::{build_provider, LlmProvider};
use super::types::{LlmError, LlmResult, ProviderConfig};

type BuildFn = dyn Fn(&ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> + Send + Sync;

struct CachedInstance {
    config: ProviderConfig,
    instance: Arc<dyn LlmProvider>,
}

/// Single-entry cache of the last-built provider instance.
pub struct ProviderCache {
    build: Box<BuildFn>,
    slot: Mutex<Option<CachedInstance>>,
}

impl ProviderCache {
    /// Cache backed by the real provider factory.
    pub fn new() -> Self {
        Self::with_factory(build_provider)
    }

    /// Cache with an injected build factory. Tests use this to count builds
    /// and to substitute mock providers.
    pub fn with_factory<F>(build: F) -> Self
    where
        F: Fn(&ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
            slot: Mutex::new(None),
        }
    }

    /// Return the cached instance when the configuration matches exactly,
    /// otherwise build a new one and replace the slot.
    pub fn get_or_build(&self, config: &ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
        let mut slot = self.slot.lock().map_err(|_| LlmError::Other {
            message: "provider cache lock poisoned".to_string(),
        })?;

        if let Some(cached) = slot.as_ref() {
            if cached.config == *config {
                return Ok(cached.instance.clone());
            }
        }

        let instance = (self.build)(config)?;
        *slot = Some(CachedInstance {
            config: config.clone(),
            instance: instance.clone(),
        });
        Ok(instance)
    }

    /// Drop the cached instance. Called on every settings mutation so the
    /// next generate call rebuilds from the fresh configuration.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

impl Default for ProviderCache {
    fn default() -> Self {
        Self::new()
    }
}
