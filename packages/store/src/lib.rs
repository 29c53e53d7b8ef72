//! Client-side session state: the session model, the injectable
//! [`SessionStore`], and the storage backends it persists through.

pub mod lease;
pub mod pending;
pub mod persistence;
pub mod session;
pub mod session_store;

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use lease::{Renewal, TokenLease};
pub use pending::PendingLogin;
pub use persistence::{KeyValueStore, Persistence, StorageError};
pub use session::{Claims, Session, SessionError};
pub use session_store::SessionStore;
