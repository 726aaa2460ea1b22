use crate::profile::GameProfile;
use std::sync::Arc;
use uuid::Uuid;

/// A currently connected player. The live view is authoritative for every
/// attribute it tracks.
pub trait LivePlayer: Send + Sync {
    fn profile(&self) -> GameProfile;
    fn name(&self) -> String;
    /// Epoch millis.
    fn first_played(&self) -> i64;
    /// Epoch millis.
    fn last_played(&self) -> i64;
}

/// The host's registry of connected players.
pub trait LivePlayerRegistry: Send + Sync {
    fn player(&self, id: Uuid) -> Option<Arc<dyn LivePlayer>>;
    fn player_by_name(&self, name: &str) -> Option<Arc<dyn LivePlayer>>;

    /// Full profile of a connected player, if any. This is the
    /// authoritative pre-cache branch of profile resolution.
    fn profile_of(&self, name: &str) -> Option<GameProfile> {
        self.player_by_name(name).map(|player| player.profile())
    }
}
