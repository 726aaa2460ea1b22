use crate::meta::{ItemMetaBase, Material};
use crate::nbt::{SharedCompound, Tag, TagCompound};
use crate::profile::{GameProfile, ProfileServices};
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

/// External owner key. Current records hold a profile compound here;
/// legacy records hold a bare name string. Both shapes decode, only the
/// compound shape is ever written.
pub const SKULL_OWNER: &str = "SkullOwner";
/// Internal full-fidelity profile key, the round-trip channel for this
/// object's exact state.
pub const SKULL_PROFILE: &str = "SkullProfile";
/// Config-map key for the owner name.
pub const SKULL_OWNER_CONFIG: &str = "skull-owner";

pub const MAX_OWNER_LENGTH: usize = 16;

const SKULL_HASH_SALT: u64 = 0xC6A4_A793_5BD1_E995;

/// Skull item metadata: the base item state plus an optional owner profile.
///
/// The owner may start as a name-only placeholder; background enrichment
/// fills in the id after the fact, targeting whatever shared tag the meta
/// was applied to rather than the meta itself.
#[derive(Debug, Clone, Default)]
pub struct SkullMeta {
    base: ItemMetaBase,
    profile: Option<GameProfile>,
}

impl SkullMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy constructor over another skull meta.
    pub fn from_meta(meta: &SkullMeta) -> Self {
        meta.clone()
    }

    /// Copy constructor over arbitrary item metadata; only another skull
    /// can contribute a profile.
    pub fn from_base(base: ItemMetaBase) -> Self {
        Self {
            base,
            profile: None,
        }
    }

    /// Tag constructor. Accepts both historical owner encodings, in order:
    /// a profile compound, then a non-empty bare name string.
    pub fn from_tag(tag: &TagCompound) -> Self {
        let base = ItemMetaBase::from_tag(tag);
        let profile = match tag.get(SKULL_OWNER) {
            Some(Tag::Compound(owner)) => Some(GameProfile::from_tag(owner)),
            Some(Tag::String(owner)) if !owner.is_empty() => {
                Some(GameProfile::placeholder(owner.as_str()))
            }
            _ => None,
        };
        Self { base, profile }
    }

    /// Config-map constructor; the owner name goes through [`set_owner`]
    /// and therefore through the usual resolution chain.
    ///
    /// [`set_owner`]: SkullMeta::set_owner
    pub fn from_config(map: &Map<String, Value>, services: &ProfileServices) -> Self {
        let mut meta = Self::from_base(ItemMetaBase::from_config(map));
        meta.set_owner(map.get(SKULL_OWNER_CONFIG).and_then(Value::as_str), services);
        meta
    }

    /// Name constructor: live registry, then the cache, then a name-only
    /// placeholder.
    pub fn with_owner(name: &str, services: &ProfileServices) -> Self {
        let mut meta = Self::new();
        meta.set_owner(Some(name), services);
        meta
    }

    pub fn base(&self) -> &ItemMetaBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ItemMetaBase {
        &mut self.base
    }

    pub fn profile(&self) -> Option<&GameProfile> {
        self.profile.as_ref()
    }

    pub fn has_owner(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.name().is_some())
    }

    pub fn owner(&self) -> Option<&str> {
        self.profile.as_ref().and_then(GameProfile::name)
    }

    /// Rejects an absent or over-long name without touching the held
    /// profile. A name that passes validation always succeeds: an
    /// unresolved lookup degrades to a placeholder, never to an error.
    pub fn set_owner(&mut self, name: Option<&str>, services: &ProfileServices) -> bool {
        let Some(name) = name else {
            return false;
        };
        if name.chars().count() > MAX_OWNER_LENGTH {
            return false;
        }

        self.profile = Some(services.resolve_profile(name));
        true
    }

    /// Writes the full profile under the internal key, replacing any prior
    /// value. Round-trips this object's exact state.
    pub fn serialize_internal(&self, tag: &mut TagCompound) {
        if let Some(profile) = &self.profile {
            tag.insert(SKULL_PROFILE, Tag::Compound(profile.to_tag()));
        }
    }

    /// Reads back only the internal key. The legacy `SkullOwner` key is
    /// write-only on this path; the tag constructor is what understands it.
    pub fn deserialize_internal(&mut self, tag: &TagCompound) {
        if let Some(profile) = tag.get_compound(SKULL_PROFILE) {
            self.profile = Some(GameProfile::from_tag(profile));
        }
    }

    /// Writes the externally visible encoding, then schedules a background
    /// re-enrichment of the same entry. The tag may be rewritten after this
    /// returns; holders of the tag are not notified.
    pub fn apply_to_item(&self, tag: &SharedCompound, services: &ProfileServices) {
        {
            let Ok(mut root) = tag.write() else {
                return;
            };
            self.base.apply_to_tag(&mut root);
            if let Some(profile) = &self.profile {
                root.insert(SKULL_OWNER, Tag::Compound(profile.to_tag()));
            }
        }

        if let Some(profile) = &self.profile {
            services.pool().enrich_tag(profile, tag, SKULL_OWNER);
        }
    }

    pub fn is_skull_empty(&self) -> bool {
        self.profile.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.is_skull_empty()
    }

    /// Skull metadata only attaches to skull items.
    pub fn applicable_to(&self, material: Material) -> bool {
        matches!(material, Material::Skull)
    }

    /// Profile component of structural equality: both sides must agree on
    /// holding an owner, and when both do, the profiles must carry the same
    /// resolved id.
    pub fn equals_common(&self, other: &SkullMeta) -> bool {
        if self.base != other.base {
            return false;
        }

        match (self.has_owner(), other.has_owner()) {
            (true, true) => self.profile == other.profile,
            (mine, theirs) => mine == theirs,
        }
    }

    /// Folds the profile into `base_hash`. Contributes nothing when no
    /// owner is held, so a meta without a profile hashes the same as one
    /// holding a nameless placeholder.
    pub fn apply_hash(&self, base_hash: u64) -> u64 {
        let mut hash = base_hash;
        if self.has_owner() {
            if let Some(profile) = &self.profile {
                hash = hash.wrapping_mul(61).wrapping_add(super::hash_of(profile));
            }
        }

        if hash == base_hash {
            hash
        } else {
            SKULL_HASH_SALT ^ hash
        }
    }

    pub fn meta_hash(&self) -> u64 {
        self.apply_hash(self.base.base_hash())
    }

    pub fn serialize_config(&self) -> Map<String, Value> {
        let mut map = Map::new();
        self.base.serialize_config(&mut map);
        if self.has_owner() {
            if let Some(owner) = self.owner() {
                map.insert(SKULL_OWNER_CONFIG.to_owned(), Value::String(owner.to_owned()));
            }
        }
        map
    }
}

/// Structural equality via [`SkullMeta::equals_common`]. No `Eq`: profile
/// identity requires resolved ids, so placeholder-owned metas never equal
/// anything, themselves included.
impl PartialEq for SkullMeta {
    fn eq(&self, other: &Self) -> bool {
        self.equals_common(other)
    }
}

impl Hash for SkullMeta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.meta_hash());
    }
}
