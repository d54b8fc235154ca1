pub mod error;
pub mod recent;
pub mod storage;

pub use error::StoreError;
pub use recent::{
    RecentSearchCache, RecentSearchEntry, MAX_RECENT_SEARCHES, RECENT_SEARCHES_KEY,
};
pub use storage::{FileStorage, MemoryStorage, SearchStorage};
