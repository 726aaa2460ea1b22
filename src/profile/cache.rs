use crate::profile::GameProfile;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

pub const DEFAULT_PROFILE_CACHE_CAPACITY: usize = 1000;

/// Shared name-to-profile cache with LRU eviction. Keys are lowercased.
///
/// A probe never blocks on enrichment; it answers from what is already
/// cached. Concurrent population of the same name is harmless, the last
/// writer wins.
///
/// # Examples
///
/// ```
/// use playerdata::profile::{GameProfile, ProfileCache};
/// use uuid::Uuid;
///
/// let cache = ProfileCache::new(16);
/// cache.insert(&GameProfile::new(Uuid::new_v4(), "Alex"));
///
/// assert!(cache.get("alex").is_some());
/// assert!(cache.get("Steve").is_none());
/// ```
#[derive(Clone)]
pub struct ProfileCache {
    entries: Arc<Mutex<LruCache<String, GameProfile>>>,
}

impl ProfileCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub fn get(&self, name: &str) -> Option<GameProfile> {
        let mut entries = self.entries.lock().ok()?;
        entries.get(&name.to_lowercase()).cloned()
    }

    /// Caches a profile under its own name. Nameless profiles are skipped.
    pub fn insert(&self, profile: &GameProfile) {
        let Some(name) = profile.name() else {
            return;
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(name.to_lowercase(), profile.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_CACHE_CAPACITY)
    }
}
