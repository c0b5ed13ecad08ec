use std::fs;
use std::io;
#[cfg(unix)]
use std::path::Path;
use std::path::PathBuf;

use nicknames_common::{Storage, StorageError};
use tracing::{debug, warn};

#[cfg(unix)]
use crate::constants::STORAGE_FILE_MODE;
use crate::constants::{APP_DIR_NAME, STORAGE_FILE_EXT};

/// Storage backed by files in a directory
///
/// Each namespace is stored as `<dir>/<namespace>.json`. The directory is
/// created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform config directory for this application
    ///
    /// Returns None if the config directory cannot be determined.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Storage rooted at [`FileStorage::default_dir`]
    pub fn open_default() -> Result<Self, StorageError> {
        Self::default_dir()
            .map(Self::new)
            .ok_or(StorageError::NoConfigDir)
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    pub fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.{STORAGE_FILE_EXT}"))
    }
}

impl Storage for FileStorage {
    fn get(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(namespace)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write with restrictive permissions
    ///
    /// Blobs that parse as JSON are written pretty-printed so the file stays
    /// readable; anything else is written as given.
    fn set(&mut self, namespace: &str, blob: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let contents = match serde_json::from_str::<serde_json::Value>(blob)
            .and_then(|value| serde_json::to_string_pretty(&value))
        {
            Ok(pretty) => pretty,
            Err(e) => {
                warn!(namespace, error = %e, "storing blob that is not valid JSON");
                blob.to_string()
            }
        };

        let path = self.path_for(namespace);
        fs::write(&path, contents)?;

        #[cfg(unix)]
        set_storage_permissions(&path)?;

        debug!(path = %path.display(), "storage written");
        Ok(())
    }
}

/// Set storage file permissions to owner read/write only on Unix systems
#[cfg(unix)]
fn set_storage_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(STORAGE_FILE_MODE);
    fs::set_permissions(path, perms)
}
