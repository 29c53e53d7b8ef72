//! # Filesystem-backed key/value storage
//!
//! [`FileStorage`] is a [`KeyValueStore`] that keeps each key in its own file.
//! It is used on desktop so a login survives app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── token       # bearer token
//! ├── user        # claims JSON
//! ├── userId      # subject identifier
//! ├── refreshToken
//! ├── expiresAt
//! └── refreshExpiresAt
//! ```
//!
//! ## Platform data directories
//!
//! Callers use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/fitness-tracker/session/` |
//! | Linux | `~/.local/share/fitness-tracker/session/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\fitness-tracker\session\` |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::persistence::{KeyValueStore, StorageError};

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.item_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)?;
        let path = self.item_path(key);

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(value.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&path, value)?;
        }

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
