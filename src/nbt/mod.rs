pub mod compound;
pub mod value;

pub use compound::TagCompound;
pub use value::Tag;

use std::sync::{Arc, RwLock};

/// An item tag handed out to external holders. Background enrichment may
/// rewrite entries after the fact; the lock keeps readers from observing a
/// partially-written profile.
pub type SharedCompound = Arc<RwLock<TagCompound>>;

pub fn share(root: TagCompound) -> SharedCompound {
    Arc::new(RwLock::new(root))
}
