mod backend;
mod card_cache;

pub use backend::{CacheError, FileBackend, MemoryBackend, StorageBackend, DEFAULT_QUOTA_BYTES};
pub use card_cache::{CacheBlob, CacheStats, CardCache, CACHE_KEY, CACHE_VERSION};
