pub mod item;
pub mod skull;

pub use item::ItemMetaBase;
pub use skull::{MAX_OWNER_LENGTH, SKULL_OWNER, SKULL_PROFILE, SkullMeta};

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Item kinds metadata can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Skull,
    Stone,
    Bow,
    WrittenBook,
}

pub(crate) fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
