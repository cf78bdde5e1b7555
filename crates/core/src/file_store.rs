//! Filesystem-backed storage for uploaded images.
//!
//! Files live flat under one base directory and are addressed by a
//! [`FileRef`]: the public URL path `<public_prefix>/<generated name>`.
//! The HTTP layer serves the base directory under the same prefix, so a
//! client can fetch a file by prepending its known origin to the reference.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::CoreError;
use crate::uploads::{generate_file_name, ImageMediaType};

/// Attempts at finding an unused name before giving up.
const MAX_NAME_ATTEMPTS: usize = 8;

/// An uploaded file as received from the client, before storage.
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name supplied by the client, if any. Only its extension is used.
    pub file_name: Option<String>,
    /// Declared `Content-Type` of the part.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Reference to a stored file, persisted verbatim in records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef(String);

impl FileRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat directory of uploaded images with generated unique names.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
    public_prefix: String,
}

impl FileStore {
    /// Create a store rooted at `base_dir`, publishing files under
    /// `public_prefix` (e.g. `/uploads/developers`).
    pub fn new(base_dir: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Check an upload's declared media type without touching the disk.
    pub fn validate(upload: &Upload) -> Result<ImageMediaType, CoreError> {
        ImageMediaType::parse(&upload.content_type)
    }

    /// Validate and persist an upload, returning its reference.
    ///
    /// The file is created exclusively and flushed to disk before this
    /// returns, so a reference handed out always points at complete bytes.
    pub async fn store(&self, upload: &Upload) -> Result<FileRef, CoreError> {
        let media_type = Self::validate(upload)?;

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| {
                CoreError::Internal(format!(
                    "Failed to create upload directory {}: {e}",
                    self.base_dir.display()
                ))
            })?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = generate_file_name(upload.file_name.as_deref(), media_type);
            let path = self.base_dir.join(&name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(CoreError::Internal(format!(
                        "Failed to create {}: {e}",
                        path.display()
                    )))
                }
            };

            let written = async {
                file.write_all(&upload.bytes).await?;
                file.sync_all().await
            }
            .await;

            if let Err(e) = written {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                return Err(CoreError::Internal(format!(
                    "Failed to write {}: {e}",
                    path.display()
                )));
            }

            let file_ref = FileRef(format!("{}/{name}", self.public_prefix));
            tracing::debug!(file_ref = %file_ref, bytes = upload.bytes.len(), "Stored upload");
            return Ok(file_ref);
        }

        Err(CoreError::Internal(format!(
            "Could not find an unused file name after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }

    /// Delete the file behind `file_ref`.
    ///
    /// Returns `Ok(true)` if a file was removed and `Ok(false)` if it was
    /// already gone or the reference does not belong to this store.
    pub async fn remove(&self, file_ref: &str) -> std::io::Result<bool> {
        let Some(path) = self.path_of(file_ref) else {
            tracing::warn!(file_ref, "Ignoring removal of a reference outside the upload store");
            return Ok(false);
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(file_ref, "Removed stored file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Resolve a reference to its on-disk path.
    ///
    /// Only plain file names directly under the public prefix resolve;
    /// anything that could escape the base directory yields `None`.
    pub fn path_of(&self, file_ref: &str) -> Option<PathBuf> {
        let name = file_ref
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;

        let safe = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(&['/', '\\', '\0'][..]);

        safe.then(|| self.base_dir.join(name))
    }

    /// Whether the file behind `file_ref` is present on disk.
    pub async fn exists(&self, file_ref: &str) -> bool {
        match self.path_of(file_ref) {
            Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn png(name: &str) -> Upload {
        Upload {
            file_name: Some(name.to_string()),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn store_writes_bytes_and_returns_prefixed_ref() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "/uploads/developers/");

        let file_ref = store.store(&png("x.png")).await.unwrap();

        assert!(file_ref.as_str().starts_with("/uploads/developers/"));
        assert!(file_ref.as_str().ends_with(".png"));
        let path = store.path_of(file_ref.as_str()).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn store_rejects_unsupported_type_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("devs"), "/uploads/developers");
        let upload = Upload {
            file_name: Some("cat.gif".into()),
            content_type: "image/gif".into(),
            bytes: b"GIF89a".to_vec(),
        };

        let err = store.store(&upload).await.unwrap_err();

        assert!(matches!(err, CoreError::UnsupportedMediaType(_)));
        assert!(!dir.path().join("devs").exists());
    }

    #[tokio::test]
    async fn concurrent_stores_produce_distinct_refs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "/uploads/developers");

        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.store(&png("x.png")).await }));
        }

        let mut refs = HashSet::new();
        for handle in handles {
            let file_ref = handle.await.unwrap().unwrap();
            assert!(refs.insert(file_ref.into_string()));
        }
        assert_eq!(refs.len(), 32);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "/uploads/developers");
        let file_ref = store.store(&png("a.png")).await.unwrap();

        assert!(store.exists(file_ref.as_str()).await);
        assert!(store.remove(file_ref.as_str()).await.unwrap());
        assert!(!store.exists(file_ref.as_str()).await);
        assert!(!store.remove(file_ref.as_str()).await.unwrap());
    }

    #[tokio::test]
    async fn remove_ignores_foreign_references() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "/uploads/developers");

        assert!(!store.remove("/etc/passwd").await.unwrap());
        assert!(!store.remove("/uploads/developers/../secret").await.unwrap());
    }

    #[test]
    fn path_of_rejects_traversal() {
        let store = FileStore::new("/srv/uploads/developers", "/uploads/developers");

        assert_eq!(
            store.path_of("/uploads/developers/1-2.png"),
            Some(PathBuf::from("/srv/uploads/developers/1-2.png"))
        );
        assert_eq!(store.path_of("/uploads/developers/"), None);
        assert_eq!(store.path_of("/uploads/developers/.."), None);
        assert_eq!(store.path_of("/uploads/developers/a/b.png"), None);
        assert_eq!(store.path_of("/uploads/developersX/a.png"), None);
        assert_eq!(store.path_of("/uploads/cats/a.png"), None);
    }
}
