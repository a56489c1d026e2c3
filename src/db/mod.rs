use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::room::StoredRoom;
use crate::models::user::User;

const ROOMS_FILE: &str = "rooms.json";
const USERS_FILE: &str = "users.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed store file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Flat-file JSON store over a data directory.
///
/// Collections are read whole and written whole. There is no locking or
/// versioning: concurrent writers race and the last write wins. That is the
/// intended scope of a local single-user store.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Store {
            data_dir: data_dir.into(),
        }
    }

    /// Reads `DATA_DIR` from the environment, defaulting to `./data`.
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Store::new(data_dir)
    }

    /// All rooms in insertion order. A store that has never been written
    /// reads as empty.
    pub fn list_rooms(&self) -> Result<Vec<StoredRoom>, StoreError> {
        self.read_collection(ROOMS_FILE)
    }

    /// Overwrites the whole room collection. Callers merge with the
    /// existing contents before calling this.
    pub fn write_rooms(&self, rooms: &[StoredRoom]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_vec_pretty(rooms)?;
        fs::write(self.data_dir.join(ROOMS_FILE), json)?;
        Ok(())
    }

    pub fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self.read_collection(USERS_FILE)?;
        Ok(users.into_iter().find(|user| user.id == id))
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.data_dir.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}
