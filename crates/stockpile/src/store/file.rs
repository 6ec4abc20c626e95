use super::{CorruptDataPolicy, DataStore};
use crate::error::{Result, StockpileError};
use crate::serializer::Serializer;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct FileStore<T, S> {
    path: PathBuf,
    serializer: S,
    on_corrupt: CorruptDataPolicy,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S> FileStore<T, S>
where
    S: Serializer<T>,
{
    /// Fails before touching the filesystem if `path` is empty.
    pub fn new(path: impl Into<PathBuf>, serializer: S) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StockpileError::InvalidArgument(
                "file path must not be empty".to_string(),
            ));
        }

        Ok(Self {
            path,
            serializer,
            on_corrupt: CorruptDataPolicy::default(),
            lock: Mutex::new(()),
            _entity: PhantomData,
        })
    }

    pub fn with_corrupt_policy(mut self, policy: CorruptDataPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("data");
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }

    fn corrupt(&self, err: StockpileError) -> Result<Vec<T>> {
        match self.on_corrupt {
            CorruptDataPolicy::TreatAsEmpty => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "data file is unreadable, treating as empty"
                );
                Ok(Vec::new())
            }
            CorruptDataPolicy::Fail => Err(StockpileError::CorruptData {
                path: self.path.clone(),
                source: Box::new(err),
            }),
        }
    }
}

#[async_trait]
impl<T, S> DataStore<T> for FileStore<T, S>
where
    T: Send + Sync,
    S: Serializer<T>,
{
    async fn load(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file yet");
                return Ok(Vec::new());
            }
            // Not valid UTF-8: same as any other undecodable content
            Err(e) if e.kind() == ErrorKind::InvalidData => return self.corrupt(e.into()),
            Err(e) => return Err(e.into()),
        };

        match self.serializer.try_deserialize(&content) {
            Ok(entities) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = entities.len(),
                    "loaded entities"
                );
                Ok(entities)
            }
            Err(e) => self.corrupt(e),
        }
    }

    async fn save(&self, entities: &[T]) -> Result<usize> {
        let _guard = self.lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = self.serializer.serialize(entities)?;

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, content).await?;
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            count = entities.len(),
            "saved entities"
        );
        Ok(entities.len())
    }
}
