use crate::nbt::TagCompound;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Player identity: a stable unique id plus a possibly-stale display name.
///
/// A profile with no id is a placeholder pending enrichment. Only resolved
/// ids carry identity: two profiles are equal iff both ids are present and
/// equal, so placeholders never compare equal, themselves included. That
/// relation is not reflexive, which is why there is no `Eq` impl.
#[derive(Debug, Clone, Default)]
pub struct GameProfile {
    id: Option<Uuid>,
    name: Option<String>,
}

impl GameProfile {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    /// Name-only placeholder awaiting enrichment.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.id.is_some() && self.name.is_some()
    }

    pub fn to_tag(&self) -> TagCompound {
        let mut tag = TagCompound::new();
        if let Some(id) = self.id {
            tag.insert_string("Id", id.to_string());
        }
        if let Some(name) = &self.name {
            tag.insert_string("Name", name.clone());
        }
        tag
    }

    /// Both fields are optional on read; unparseable ids read as absent.
    pub fn from_tag(tag: &TagCompound) -> Self {
        let id = tag
            .get_string("Id")
            .and_then(|raw| Uuid::parse_str(raw).ok());
        let name = tag.get_string("Name").map(str::to_owned);
        Self { id, name }
    }
}

impl PartialEq for GameProfile {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for GameProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
