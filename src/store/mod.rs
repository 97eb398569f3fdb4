pub mod disk;
pub mod memory;

use anyhow::Result;

/// Access to the saved auth token.
///
/// Implementations must read the current value on every call: the token can
/// change between requests (login, logout, another session), so callers never
/// cache it at construction time.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub use disk::FileTokenStore;
pub use memory::MemoryTokenStore;
