use super::DataStore;
use crate::error::{Result, StockpileError};
use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// In-memory store for testing.
///
/// Holds the last saved snapshot and counts loads and saves so tests can
/// check lazy-loading behaviour.
pub struct MemoryStore<T> {
    snapshot: Mutex<Vec<T>>,
    simulate_load_error: AtomicBool,
    simulate_write_error: AtomicBool,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::with_entities(Vec::new())
    }
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: Vec<T>) -> Self {
        Self {
            snapshot: Mutex::new(entities),
            simulate_load_error: AtomicBool::new(false),
            simulate_write_error: AtomicBool::new(false),
            loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        }
    }

    /// Make every following load fail with an I/O error.
    pub fn set_simulate_load_error(&self, simulate: bool) {
        self.simulate_load_error.store(simulate, Ordering::SeqCst);
    }

    /// Make every following save fail with an I/O error.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<T: Clone> MemoryStore<T> {
    /// Current snapshot, without counting as a load.
    pub async fn snapshot(&self) -> Vec<T> {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl<T> DataStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>> {
        let snapshot = self.snapshot.lock().await;
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.simulate_load_error.load(Ordering::SeqCst) {
            return Err(StockpileError::Io(io::Error::other("Simulated load error")));
        }
        Ok(snapshot.clone())
    }

    async fn save(&self, entities: &[T]) -> Result<usize> {
        let mut snapshot = self.snapshot.lock().await;
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(StockpileError::Io(io::Error::other("Simulated write error")));
        }
        *snapshot = entities.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(entities.len())
    }
}
