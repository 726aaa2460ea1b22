//! The offline-capable player handle.
//!
//! Every accessor prefers the live view and falls back to the persisted
//! record with a fixed precedence, so the online and offline answers never
//! contradict each other in priority. Storage reads are expensive, so each
//! accessor loads the record once per call and reads all the fields it
//! needs from that one load.

use crate::nbt::TagCompound;
use crate::player::ServerHandles;
use crate::profile::GameProfile;
use crate::server::{LivePlayer, Location};
use crate::storage::PlayerDataStore;
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Sub-namespace of the player record reserved for server bookkeeping.
const BUKKIT: &str = "bukkit";

pub struct OfflinePlayer {
    profile: GameProfile,
    store: Arc<PlayerDataStore>,
    handles: Arc<ServerHandles>,
}

impl OfflinePlayer {
    pub(crate) fn new(
        profile: GameProfile,
        store: Arc<PlayerDataStore>,
        handles: Arc<ServerHandles>,
    ) -> Self {
        Self {
            profile,
            store,
            handles,
        }
    }

    pub fn profile(&self) -> &GameProfile {
        &self.profile
    }

    pub fn unique_id(&self) -> Option<Uuid> {
        self.profile.id()
    }

    /// The live handle when this player is connected.
    pub fn player(&self) -> Option<Arc<dyn LivePlayer>> {
        self.unique_id().and_then(|id| self.handles.live.player(id))
    }

    pub fn is_online(&self) -> bool {
        self.player().is_some()
    }

    /// Current name if online, else the identity's display-name hint, else
    /// the record's `lastKnownName`, else absent.
    pub fn name(&self) -> Option<String> {
        if let Some(player) = self.player() {
            return Some(player.name());
        }

        // A stale hint still outranks whatever name the record last saw
        if let Some(name) = self.profile.name() {
            return Some(name.to_owned());
        }

        self.bukkit_data()?
            .get_string("lastKnownName")
            .map(str::to_owned)
    }

    /// Epoch millis of first join: live value, then the record field, then
    /// the record file's mtime, `0` when there is no record at all.
    pub fn first_played(&self) -> i64 {
        if let Some(player) = self.player() {
            return player.first_played();
        }

        match self.bukkit_data() {
            Some(data) => data
                .get_long("firstPlayed")
                .unwrap_or_else(|| self.file_modified_millis()),
            None => 0,
        }
    }

    /// Epoch millis of last join, same fallback chain as [`first_played`].
    ///
    /// [`first_played`]: OfflinePlayer::first_played
    pub fn last_played(&self) -> i64 {
        if let Some(player) = self.player() {
            return player.last_played();
        }

        match self.bukkit_data() {
            Some(data) => data
                .get_long("lastPlayed")
                .unwrap_or_else(|| self.file_modified_millis()),
            None => 0,
        }
    }

    /// Record existence, not field inspection.
    pub fn has_played_before(&self) -> bool {
        self.data().is_some()
    }

    /// The bed spawn, present only when the record holds the full
    /// SpawnX/SpawnY/SpawnZ group. An empty or missing `SpawnWorld` means
    /// the server's default world.
    pub fn bed_spawn_location(&self) -> Option<Location> {
        let data = self.data()?;
        let x = data.get_int("SpawnX")?;
        let y = data.get_int("SpawnY")?;
        let z = data.get_int("SpawnZ")?;

        let world = match data.get_string("SpawnWorld") {
            Some(world) if !world.is_empty() => world.to_owned(),
            _ => self.handles.worlds.default_world(),
        };
        Some(Location::new(world, x, y, z))
    }

    pub fn is_op(&self) -> bool {
        self.handles.ops.is_op(&self.profile)
    }

    pub fn set_op(&self, value: bool) {
        if value == self.is_op() {
            return;
        }

        if value {
            self.handles.ops.add_op(&self.profile);
        } else {
            self.handles.ops.remove_op(&self.profile);
        }
    }

    /// Bans are name-keyed; a player whose name cannot be resolved is not
    /// banned and cannot be.
    pub fn is_banned(&self) -> bool {
        match self.name() {
            Some(name) => self.handles.bans.is_banned(&name),
            None => false,
        }
    }

    pub fn set_banned(&self, value: bool) {
        let Some(name) = self.name() else {
            return;
        };
        if value == self.handles.bans.is_banned(&name) {
            return;
        }

        if value {
            self.handles.bans.ban(&name);
        } else {
            self.handles.bans.pardon(&name);
        }
    }

    pub fn is_whitelisted(&self) -> bool {
        self.handles.whitelist.is_whitelisted(&self.profile)
    }

    pub fn set_whitelisted(&self, value: bool) {
        if value == self.is_whitelisted() {
            return;
        }

        if value {
            self.handles.whitelist.add(&self.profile);
        } else {
            self.handles.whitelist.remove(&self.profile);
        }
    }

    pub fn set_metadata(&self, key: &str, plugin: &str, value: Value) {
        if let Some(id) = self.unique_id() {
            self.handles.metadata.set_metadata(id, key, plugin, value);
        }
    }

    pub fn get_metadata(&self, key: &str) -> Vec<Value> {
        self.unique_id()
            .map(|id| self.handles.metadata.get_metadata(id, key))
            .unwrap_or_default()
    }

    pub fn has_metadata(&self, key: &str) -> bool {
        self.unique_id()
            .is_some_and(|id| self.handles.metadata.has_metadata(id, key))
    }

    pub fn remove_metadata(&self, key: &str, plugin: &str) {
        if let Some(id) = self.unique_id() {
            self.handles.metadata.remove_metadata(id, key, plugin);
        }
    }

    /// Config-map encoding: the id alone identifies the player.
    pub fn serialize_config(&self) -> Map<String, Value> {
        let mut result = Map::new();
        if let Some(id) = self.unique_id() {
            result.insert("UUID".to_owned(), Value::String(id.to_string()));
        }
        result
    }

    fn data(&self) -> Option<TagCompound> {
        self.unique_id().and_then(|id| self.store.load(id))
    }

    /// The reserved sub-namespace of an existing record; an empty compound
    /// when the record exists but carries none yet.
    fn bukkit_data(&self) -> Option<TagCompound> {
        let data = self.data()?;
        Some(data.get_compound(BUKKIT).cloned().unwrap_or_default())
    }

    fn file_modified_millis(&self) -> i64 {
        self.unique_id()
            .map(|id| self.store.last_modified_millis(id))
            .unwrap_or(0)
    }
}

/// Handles compare by resolved id only; a handle with no id equals nothing,
/// itself included. Deliberately no `Eq`: the relation is not reflexive.
impl PartialEq for OfflinePlayer {
    fn eq(&self, other: &Self) -> bool {
        match (self.unique_id(), other.unique_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for OfflinePlayer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unique_id().hash(state);
    }
}

impl fmt::Display for OfflinePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unique_id() {
            Some(id) => write!(f, "OfflinePlayer[UUID={}]", id),
            None => write!(f, "OfflinePlayer[UUID=]"),
        }
    }
}

impl fmt::Debug for OfflinePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfflinePlayer")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
