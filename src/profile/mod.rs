pub mod cache;
pub mod enrich;
pub mod profile;

pub use cache::{DEFAULT_PROFILE_CACHE_CAPACITY, ProfileCache};
pub use enrich::{EnrichmentPool, ProfileResolver, ProfileServices};
pub use profile::GameProfile;
