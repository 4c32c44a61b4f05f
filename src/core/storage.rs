use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use uuid::Uuid;

pub const LICENSE_BUCKET: &str = "license-pictures";
pub const PROFILE_BUCKET: &str = "profile-pictures";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    License,
    Profile,
}

impl ImageKind {
    pub fn bucket(&self) -> &'static str {
        match self {
            ImageKind::License => LICENSE_BUCKET,
            ImageKind::Profile => PROFILE_BUCKET,
        }
    }

    pub fn folder(&self) -> &'static str {
        match self {
            ImageKind::License => "licenses",
            ImageKind::Profile => "profiles",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage path: {0}")]
    InvalidPath(String),
    #[error("write to bucket {bucket} failed: {source}")]
    Io {
        bucket: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Object path `<folder>/<account id>/<uuid v7>.<ext>`; the extension comes
/// from the uploaded file name and defaults to `bin`.
pub fn storage_path(kind: ImageKind, account_id: &Uuid, file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|x| x.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin".to_string());
    format!("{}/{}/{}.{}", kind.folder(), account_id, Uuid::now_v7(), ext)
}

fn check_relative(bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
    let joined = Path::new(bucket).join(path);
    let is_clean = !bucket.is_empty()
        && !path.is_empty()
        && !path.contains('\\')
        && joined
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !is_clean {
        return Err(StorageError::InvalidPath(format!("{}/{}", bucket, path)));
    }
    Ok(joined)
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), StorageError>;
}

/// Stores objects as files under `root/<bucket>/<path>`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_url: &str) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let target = self.root.join(check_relative(bucket, path)?);
        let io_err = |source| StorageError::Io {
            bucket: bucket.to_string(),
            source,
        };
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        tokio::fs::write(&target, bytes).await.map_err(io_err)?;
        tracing::debug!("stored object {}", target.display());
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), StorageError> {
        let target = self.root.join(check_relative(bucket, path)?);
        match tokio::fs::remove_file(&target).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                bucket: bucket.to_string(),
                source,
            }),
        }
    }
}

/// In-process store, mostly for tests. Uploads can be made to fail on demand.
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    fail_uploads: AtomicBool,
    public_url: String,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("http://localhost/storage")
    }
}

impl MemoryBlobStore {
    pub fn new(public_url: &str) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_uploads: AtomicBool::new(false),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|x| x.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .ok()?
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        check_relative(bucket, path)?;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!(
                "upload to {} rejected",
                bucket
            )));
        }
        let mut objects = self
            .objects
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        objects.insert((bucket.to_string(), path.to_string()), bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_url, bucket, path)
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), StorageError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        objects.remove(&(bucket.to_string(), path.to_string()));
        Ok(())
    }
}
