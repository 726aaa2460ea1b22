use serde_json::Value;
use uuid::Uuid;

/// Plugin-attached key/value metadata, keyed by player id, metadata key,
/// and the owning plugin. Pure delegation target; this crate stores
/// nothing itself.
pub trait PlayerMetadataStore: Send + Sync {
    fn set_metadata(&self, id: Uuid, key: &str, plugin: &str, value: Value);
    fn get_metadata(&self, id: Uuid, key: &str) -> Vec<Value>;
    fn has_metadata(&self, id: Uuid, key: &str) -> bool;
    fn remove_metadata(&self, id: Uuid, key: &str, plugin: &str);
}
