//! Background profile enrichment.
//!
//! Enrichment is fire-and-forget: nothing awaits it, nothing retries it,
//! and its result may be discarded if the target is gone by the time it
//! completes. Ordering against other writers of the same tag is undefined;
//! last writer wins.

use crate::nbt::{SharedCompound, Tag};
use crate::profile::{GameProfile, ProfileCache};
use crate::server::LivePlayerRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Canonical-identity lookup backing enrichment. Lookup misses and I/O
/// failures both read as `None`.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Option<GameProfile>;
}

/// Spawns enrichment tasks on an explicitly supplied runtime handle.
#[derive(Clone)]
pub struct EnrichmentPool {
    resolver: Arc<dyn ProfileResolver>,
    cache: ProfileCache,
    handle: Handle,
}

impl EnrichmentPool {
    pub fn new(resolver: Arc<dyn ProfileResolver>, cache: ProfileCache, handle: Handle) -> Self {
        Self {
            resolver,
            cache,
            handle,
        }
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    /// Fire-and-forget cache fill for a name that missed the cache.
    pub fn prefetch(&self, name: &str) {
        let resolver = Arc::clone(&self.resolver);
        let cache = self.cache.clone();
        let name = name.to_owned();
        self.handle.spawn(async move {
            match resolver.resolve(&name).await {
                Some(profile) => cache.insert(&profile),
                None => log::debug!("Profile lookup for '{}' found nothing", name),
            }
        });
    }

    /// Fire-and-forget re-enrichment of a profile already written into a
    /// shared tag. On success the tag's `key` entry is replaced with the
    /// resolved profile and the cache is filled; on failure the placeholder
    /// written by the caller stays as it is.
    pub fn enrich_tag(&self, profile: &GameProfile, tag: &SharedCompound, key: &'static str) {
        let Some(name) = profile.name().map(str::to_owned) else {
            return;
        };

        let resolver = Arc::clone(&self.resolver);
        let cache = self.cache.clone();
        let tag = Arc::clone(tag);
        let seed = profile.clone();
        self.handle.spawn(async move {
            let resolved = if seed.is_complete() {
                Some(seed)
            } else {
                resolver.resolve(&name).await
            };

            let Some(resolved) = resolved else {
                log::debug!("Profile for '{}' not resolved, keeping placeholder", name);
                return;
            };

            cache.insert(&resolved);
            match tag.write() {
                Ok(mut root) => root.insert(key, Tag::Compound(resolved.to_tag())),
                Err(_) => log::debug!("Target tag lock poisoned, dropping enrichment for '{}'", name),
            }
        });
    }
}

/// The profile lookup bundle handed to the metadata layer: live registry,
/// cache, and enrichment pool, injected rather than ambient.
#[derive(Clone)]
pub struct ProfileServices {
    registry: Arc<dyn LivePlayerRegistry>,
    pool: EnrichmentPool,
}

impl ProfileServices {
    pub fn new(registry: Arc<dyn LivePlayerRegistry>, pool: EnrichmentPool) -> Self {
        Self { registry, pool }
    }

    pub fn cache(&self) -> &ProfileCache {
        self.pool.cache()
    }

    pub fn pool(&self) -> &EnrichmentPool {
        &self.pool
    }

    /// The one canonical resolution routine every construction path funnels
    /// through: live registry first (authoritative and free), then the
    /// cache, then a name-only placeholder. A cache miss schedules a
    /// background fill but never waits for it.
    pub fn resolve_profile(&self, name: &str) -> GameProfile {
        if let Some(profile) = self.registry.profile_of(name) {
            return profile;
        }
        if let Some(profile) = self.cache().get(name) {
            return profile;
        }
        self.pool.prefetch(name);
        GameProfile::placeholder(name)
    }
}
