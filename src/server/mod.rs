pub mod access;
pub mod live;
pub mod metadata;
pub mod world;

pub use access::{BanList, OpRegistry, Whitelist};
pub use live::{LivePlayer, LivePlayerRegistry};
pub use metadata::PlayerMetadataStore;
pub use world::{Location, WorldRegistry};
