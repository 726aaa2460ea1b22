pub mod offline;
pub mod service;

pub use offline::OfflinePlayer;
pub use service::{PlayerService, ServerHandles};
