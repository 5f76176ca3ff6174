use crate::results::StorageError;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

/// The keys under which game state is persisted.
pub mod keys {
    /// The active puzzle word, stored as a string.
    pub const CURRENT_WORD: &str = "currentWord";
    /// The accepted answers, most recent first, stored as a sequence of strings.
    pub const USED_WORDS: &str = "usedWords";
    /// Whether the next start should restore the saved game, stored as a bool.
    pub const LOAD_FROM_SAVE: &str = "loadFromSave";
}

/// A durable key-value store for encoded values.
///
/// Each key holds an independently decodable value. Implementations must be safe to share
/// between threads, so that writes can be moved off latency-sensitive threads.
pub trait PersistenceGateway: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Arc<G> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Encodes a value as RON text.
///
/// ```
/// use rs_word_scramble::decode;
/// use rs_word_scramble::encode;
///
/// let used = vec!["silk".to_string(), "worm".to_string()];
/// let bytes = encode(&used).unwrap();
/// assert_eq!(decode::<Vec<String>>(&bytes).unwrap(), used);
/// ```
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StorageError> {
    Ok(ron::to_string(value)?.into_bytes())
}

/// Decodes a value previously written by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StorageError> {
    Ok(ron::de::from_bytes(bytes)?)
}

/// Reads and decodes the value stored under `key`.
pub fn load_value<T, G>(gateway: &G, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    G: PersistenceGateway + ?Sized,
{
    match gateway.get(key)? {
        Some(bytes) => decode(&bytes).map(Some),
        None => Ok(None),
    }
}

/// Encodes `value` and stores it under `key`.
pub fn save_value<T, G>(gateway: &G, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    G: PersistenceGateway + ?Sized,
{
    gateway.set(key, encode(value)?)
}

/// Keeps values in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` iff a value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still a consistent map: every write is a single insert.
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceGateway for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// Stores each value in its own file, `<dir>/<key>.ron`.
///
/// The directory is the application's namespace. Values are written to a temporary file first
/// and then renamed into place, so a crash mid-write leaves the previous value intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store in `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    /// The directory holding this store's values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let is_valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !is_valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.ron")))
    }
}

impl PersistenceGateway for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("ron.tmp");
        fs::write(&tmp_path, &value)?;
        fs::rename(&tmp_path, &path)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn codec_used_words() -> Result<(), StorageError> {
        let used: Vec<String> = vec!["silk".into(), "worm".into(), "mörk".into()];

        assert_eq!(decode::<Vec<String>>(&encode(&used)?)?, used);
        assert_eq!(decode::<Vec<String>>(&encode(&Vec::<String>::new())?)?, Vec::<String>::new());
        Ok(())
    }

    #[test]
    fn codec_scalars() -> Result<(), StorageError> {
        assert!(decode::<bool>(&encode(&true)?)?);
        assert!(!decode::<bool>(&encode(&false)?)?);
        assert_eq!(decode::<String>(&encode("say \"hi\"")?)?, "say \"hi\"");
        Ok(())
    }

    #[test]
    fn codec_rejects_garbage() {
        assert_matches!(decode::<Vec<String>>(b"[\"silk\", "), Err(StorageError::Decode(_)));
        assert_matches!(decode::<bool>(b"\"yes\""), Err(StorageError::Decode(_)));
    }

    #[test]
    fn memory_store_get_missing() -> Result<(), StorageError> {
        let store = MemoryStore::new();

        assert_eq!(store.get(keys::CURRENT_WORD)?, None);
        assert!(!store.contains_key(keys::CURRENT_WORD));
        Ok(())
    }

    #[test]
    fn memory_store_typed_values() -> Result<(), StorageError> {
        let store = MemoryStore::new();

        save_value(&store, keys::LOAD_FROM_SAVE, &true)?;
        save_value(&store, keys::CURRENT_WORD, "silkworm")?;

        assert_eq!(load_value::<bool, _>(&store, keys::LOAD_FROM_SAVE)?, Some(true));
        assert_eq!(
            load_value::<String, _>(&store, keys::CURRENT_WORD)?.as_deref(),
            Some("silkworm")
        );
        assert_eq!(load_value::<Vec<String>, _>(&store, keys::USED_WORDS)?, None);
        Ok(())
    }

    #[test]
    fn file_store_persists_across_instances() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;

        {
            let store = FileStore::open(dir.path())?;
            save_value(&store, keys::USED_WORDS, &vec!["silk".to_string()])?;
        }
        let store = FileStore::open(dir.path())?;

        assert_eq!(store.dir(), dir.path());
        assert_eq!(
            load_value::<Vec<String>, _>(&store, keys::USED_WORDS)?,
            Some(vec!["silk".to_string()])
        );
        assert!(store.dir().join("usedWords.ron").exists());
        assert!(!store.dir().join("usedWords.ron.tmp").exists());
        Ok(())
    }

    #[test]
    fn file_store_overwrites() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path().join("nested"))?;

        store.set(keys::CURRENT_WORD, b"\"first\"".to_vec())?;
        store.set(keys::CURRENT_WORD, b"\"second\"".to_vec())?;

        assert_eq!(store.get(keys::CURRENT_WORD)?, Some(b"\"second\"".to_vec()));
        Ok(())
    }

    #[test]
    fn file_store_rejects_bad_keys() -> Result<(), StorageError> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        assert_matches!(store.get(""), Err(StorageError::InvalidKey(_)));
        assert_matches!(
            store.set("../escape", Vec::new()),
            Err(StorageError::InvalidKey(key)) if key == "../escape"
        );
        Ok(())
    }
}
