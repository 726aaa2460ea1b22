use crate::player::OfflinePlayer;
use crate::profile::{GameProfile, ProfileServices};
use crate::server::{BanList, LivePlayerRegistry, OpRegistry, PlayerMetadataStore, Whitelist, WorldRegistry};
use crate::storage::PlayerDataStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Host-environment collaborators the resolver delegates to.
pub struct ServerHandles {
    pub live: Arc<dyn LivePlayerRegistry>,
    pub ops: Arc<dyn OpRegistry>,
    pub bans: Arc<dyn BanList>,
    pub whitelist: Arc<dyn Whitelist>,
    pub worlds: Arc<dyn WorldRegistry>,
    pub metadata: Arc<dyn PlayerMetadataStore>,
}

/// The wiring point for the crate: store, host collaborators, and profile
/// services, all injected at construction so nothing here is ambient.
///
/// Hands out [`OfflinePlayer`] handles by id, by name, or from a config
/// map.
pub struct PlayerService {
    store: Arc<PlayerDataStore>,
    handles: Arc<ServerHandles>,
    profiles: ProfileServices,
}

impl PlayerService {
    pub fn new(
        store: Arc<PlayerDataStore>,
        handles: ServerHandles,
        profiles: ProfileServices,
    ) -> Self {
        Self {
            store,
            handles: Arc::new(handles),
            profiles,
        }
    }

    pub fn store(&self) -> &Arc<PlayerDataStore> {
        &self.store
    }

    pub fn profiles(&self) -> &ProfileServices {
        &self.profiles
    }

    pub fn offline_player(&self, id: Uuid) -> OfflinePlayer {
        self.player_for(GameProfile::with_id(id))
    }

    /// The connected player's full profile when online, otherwise a
    /// name-only handle.
    pub fn offline_player_by_name(&self, name: &str) -> OfflinePlayer {
        let profile = self
            .handles
            .live
            .profile_of(name)
            .unwrap_or_else(|| GameProfile::placeholder(name));
        self.player_for(profile)
    }

    pub fn player_for(&self, profile: GameProfile) -> OfflinePlayer {
        OfflinePlayer::new(profile, Arc::clone(&self.store), Arc::clone(&self.handles))
    }

    /// Decodes the config-map encoding. Legacy maps carry a `name` instead
    /// of a `UUID` and resolve through the name lookup.
    pub fn deserialize_player(&self, map: &Map<String, Value>) -> Option<OfflinePlayer> {
        if let Some(name) = map.get("name").and_then(Value::as_str) {
            return Some(self.offline_player_by_name(name));
        }

        let id = map
            .get("UUID")
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())?;
        Some(self.offline_player(id))
    }
}
