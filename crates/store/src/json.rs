//! Single-file JSON-backed ticket store.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ticketd_core::Ticket;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Persisted layout: the ticket collection and nothing else.
#[derive(Debug, Deserialize)]
struct Database {
    tickets: Vec<Ticket>,
}

/// Borrowed view of the collection for serialization.
#[derive(Serialize)]
struct DatabaseView<'a> {
    tickets: &'a [Ticket],
}

/// Durable holder of the ticket collection.
///
/// The canonical collection lives in memory behind a mutex and the backing
/// file is rewritten in full after every successful mutation. Mutating
/// operations hold the lock across their whole read-modify-write-persist
/// sequence, so writes never interleave and the backing file has at most
/// one writer at a time.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    pub(crate) tickets: Mutex<Vec<Ticket>>,
}

impl JsonStore {
    /// Open the store, loading the backing file.
    ///
    /// An absent file initializes an empty collection and creates the file.
    /// A file that exists but does not parse is a hard error, surfaced at
    /// startup before the server accepts requests.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let loaded = match fs::read(&path).await {
            Ok(bytes) => Some(serde_json::from_slice::<Database>(&bytes)?.tickets),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::Io(e)),
        };
        let fresh = loaded.is_none();

        let store = Self {
            path,
            tickets: Mutex::new(loaded.unwrap_or_default()),
        };

        if fresh {
            let tickets = store.tickets.lock().await;
            store.persist(&tickets).await?;
        }

        tracing::debug!(path = %store.path.display(), "ticket database loaded");
        Ok(store)
    }

    /// Serialize the whole collection and replace the backing file.
    ///
    /// Callers must hold the collection lock. Data goes to a uniquely-named
    /// temp file which is fsynced and renamed over the target, so a reader
    /// of the backing file never observes a partial write.
    pub(crate) async fn persist(&self, tickets: &[Ticket]) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(&DatabaseView { tickets })?;

        let temp_name = format!(".tmp.{}", Uuid::new_v4());
        let temp_path = self.path.with_file_name(
            self.path
                .file_name()
                .map(|n| format!("{}{}", n.to_string_lossy(), temp_name))
                .unwrap_or_else(|| temp_name.clone()),
        );
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
        }
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            count = tickets.len(),
            "ticket database persisted"
        );
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
