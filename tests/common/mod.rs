#![allow(dead_code)]

//! In-memory collaborator fakes shared by the integration tests.

use async_trait::async_trait;
use playerdata::{
    BanList, EnrichmentPool, GameProfile, LivePlayer, LivePlayerRegistry, OpRegistry,
    PlayerDataStore, PlayerMetadataStore, PlayerService, ProfileCache, ProfileResolver,
    ProfileServices, ServerHandles, Tag, TagCompound, Whitelist, WorldRegistry,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub struct FakeLivePlayer {
    profile: GameProfile,
    first_played: i64,
    last_played: i64,
}

impl LivePlayer for FakeLivePlayer {
    fn profile(&self) -> GameProfile {
        self.profile.clone()
    }

    fn name(&self) -> String {
        self.profile.name().unwrap_or_default().to_owned()
    }

    fn first_played(&self) -> i64 {
        self.first_played
    }

    fn last_played(&self) -> i64 {
        self.last_played
    }
}

#[derive(Default)]
pub struct FakeLiveRegistry {
    players: Mutex<HashMap<Uuid, Arc<FakeLivePlayer>>>,
}

impl FakeLiveRegistry {
    pub fn connect(&self, id: Uuid, name: &str, first_played: i64, last_played: i64) {
        let player = Arc::new(FakeLivePlayer {
            profile: GameProfile::new(id, name),
            first_played,
            last_played,
        });
        self.players.lock().unwrap().insert(id, player);
    }

    pub fn disconnect(&self, id: Uuid) {
        self.players.lock().unwrap().remove(&id);
    }
}

impl LivePlayerRegistry for FakeLiveRegistry {
    fn player(&self, id: Uuid) -> Option<Arc<dyn LivePlayer>> {
        let players = self.players.lock().unwrap();
        players
            .get(&id)
            .map(|player| Arc::clone(player) as Arc<dyn LivePlayer>)
    }

    fn player_by_name(&self, name: &str) -> Option<Arc<dyn LivePlayer>> {
        let players = self.players.lock().unwrap();
        players
            .values()
            .find(|player| {
                player
                    .profile
                    .name()
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .map(|player| Arc::clone(player) as Arc<dyn LivePlayer>)
    }
}

#[derive(Default)]
pub struct FakeOps {
    ops: Mutex<HashSet<Uuid>>,
    pub add_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
}

impl OpRegistry for FakeOps {
    fn is_op(&self, profile: &GameProfile) -> bool {
        profile
            .id()
            .is_some_and(|id| self.ops.lock().unwrap().contains(&id))
    }

    fn add_op(&self, profile: &GameProfile) {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = profile.id() {
            self.ops.lock().unwrap().insert(id);
        }
    }

    fn remove_op(&self, profile: &GameProfile) {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = profile.id() {
            self.ops.lock().unwrap().remove(&id);
        }
    }
}

#[derive(Default)]
pub struct FakeBans {
    banned: Mutex<HashSet<String>>,
    pub ban_calls: AtomicUsize,
    pub pardon_calls: AtomicUsize,
}

impl BanList for FakeBans {
    fn is_banned(&self, name: &str) -> bool {
        self.banned.lock().unwrap().contains(name)
    }

    fn ban(&self, name: &str) {
        self.ban_calls.fetch_add(1, Ordering::SeqCst);
        self.banned.lock().unwrap().insert(name.to_owned());
    }

    fn pardon(&self, name: &str) {
        self.pardon_calls.fetch_add(1, Ordering::SeqCst);
        self.banned.lock().unwrap().remove(name);
    }
}

#[derive(Default)]
pub struct FakeWhitelist {
    entries: Mutex<HashSet<Uuid>>,
    pub add_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
}

impl Whitelist for FakeWhitelist {
    fn is_whitelisted(&self, profile: &GameProfile) -> bool {
        profile
            .id()
            .is_some_and(|id| self.entries.lock().unwrap().contains(&id))
    }

    fn add(&self, profile: &GameProfile) {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = profile.id() {
            self.entries.lock().unwrap().insert(id);
        }
    }

    fn remove(&self, profile: &GameProfile) {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = profile.id() {
            self.entries.lock().unwrap().remove(&id);
        }
    }
}

pub struct FakeWorlds {
    pub default: String,
}

impl WorldRegistry for FakeWorlds {
    fn default_world(&self) -> String {
        self.default.clone()
    }
}

#[derive(Default)]
pub struct FakeMetadata {
    entries: Mutex<HashMap<(Uuid, String), Vec<(String, Value)>>>,
}

impl PlayerMetadataStore for FakeMetadata {
    fn set_metadata(&self, id: Uuid, key: &str, plugin: &str, value: Value) {
        let mut entries = self.entries.lock().unwrap();
        let slot = entries.entry((id, key.to_owned())).or_default();
        slot.retain(|(owner, _)| owner != plugin);
        slot.push((plugin.to_owned(), value));
    }

    fn get_metadata(&self, id: Uuid, key: &str) -> Vec<Value> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&(id, key.to_owned()))
            .map(|slot| slot.iter().map(|(_, value)| value.clone()).collect())
            .unwrap_or_default()
    }

    fn has_metadata(&self, id: Uuid, key: &str) -> bool {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&(id, key.to_owned()))
            .is_some_and(|slot| !slot.is_empty())
    }

    fn remove_metadata(&self, id: Uuid, key: &str, plugin: &str) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(slot) = entries.get_mut(&(id, key.to_owned())) {
            slot.retain(|(owner, _)| owner != plugin);
        }
    }
}

/// Canned canonical-identity lookups, with a call counter so tests can
/// assert which paths consulted the resolver.
#[derive(Default)]
pub struct StubResolver {
    known: Mutex<HashMap<String, GameProfile>>,
    pub calls: AtomicUsize,
}

impl StubResolver {
    pub fn know(&self, profile: GameProfile) {
        if let Some(name) = profile.name() {
            self.known
                .lock()
                .unwrap()
                .insert(name.to_lowercase(), profile.clone());
        }
    }
}

#[async_trait]
impl ProfileResolver for StubResolver {
    async fn resolve(&self, name: &str) -> Option<GameProfile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known.lock().unwrap().get(&name.to_lowercase()).cloned()
    }
}

pub struct TestServer {
    pub store: Arc<PlayerDataStore>,
    pub live: Arc<FakeLiveRegistry>,
    pub ops: Arc<FakeOps>,
    pub bans: Arc<FakeBans>,
    pub whitelist: Arc<FakeWhitelist>,
    pub metadata: Arc<FakeMetadata>,
    pub resolver: Arc<StubResolver>,
    pub cache: ProfileCache,
    pub service: PlayerService,
}

pub fn build_server(data_dir: &Path, handle: tokio::runtime::Handle) -> TestServer {
    let store = Arc::new(PlayerDataStore::new(data_dir).unwrap());
    let live = Arc::new(FakeLiveRegistry::default());
    let ops = Arc::new(FakeOps::default());
    let bans = Arc::new(FakeBans::default());
    let whitelist = Arc::new(FakeWhitelist::default());
    let worlds = Arc::new(FakeWorlds {
        default: "world".to_owned(),
    });
    let metadata = Arc::new(FakeMetadata::default());
    let resolver = Arc::new(StubResolver::default());
    let cache = ProfileCache::new(64);

    let pool = EnrichmentPool::new(
        Arc::clone(&resolver) as Arc<dyn ProfileResolver>,
        cache.clone(),
        handle,
    );
    let profiles = ProfileServices::new(Arc::clone(&live) as Arc<dyn LivePlayerRegistry>, pool);

    let handles = ServerHandles {
        live: Arc::clone(&live) as Arc<dyn LivePlayerRegistry>,
        ops: Arc::clone(&ops) as Arc<dyn OpRegistry>,
        bans: Arc::clone(&bans) as Arc<dyn BanList>,
        whitelist: Arc::clone(&whitelist) as Arc<dyn Whitelist>,
        worlds: Arc::clone(&worlds) as Arc<dyn WorldRegistry>,
        metadata: Arc::clone(&metadata) as Arc<dyn PlayerMetadataStore>,
    };

    let service = PlayerService::new(Arc::clone(&store), handles, profiles);

    TestServer {
        store,
        live,
        ops,
        bans,
        whitelist,
        metadata,
        resolver,
        cache,
        service,
    }
}

pub fn record_with_bukkit(
    last_known: Option<&str>,
    first_played: Option<i64>,
    last_played: Option<i64>,
) -> TagCompound {
    let mut bukkit = TagCompound::new();
    if let Some(name) = last_known {
        bukkit.insert_string("lastKnownName", name);
    }
    if let Some(millis) = first_played {
        bukkit.insert_long("firstPlayed", millis);
    }
    if let Some(millis) = last_played {
        bukkit.insert_long("lastPlayed", millis);
    }

    let mut root = TagCompound::new();
    root.insert("bukkit", Tag::Compound(bukkit));
    root
}

pub fn add_spawn(
    root: &mut TagCompound,
    x: Option<i32>,
    y: Option<i32>,
    z: Option<i32>,
    world: Option<&str>,
) {
    if let Some(x) = x {
        root.insert_int("SpawnX", x);
    }
    if let Some(y) = y {
        root.insert_int("SpawnY", y);
    }
    if let Some(z) = z {
        root.insert_int("SpawnZ", z);
    }
    if let Some(world) = world {
        root.insert_string("SpawnWorld", world);
    }
}

/// Polls until `condition` holds, failing the test after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not met within timeout");
}
