//! # Unit of Work
//!
//! Groups the repositories of one editing session behind a single commit
//! point. Mutations go through [`UnitOfWork::products`] and stay in memory
//! until [`UnitOfWork::save_changes`] writes every repository to its store.
//!
//! Disposal drops the cached sets. It is idempotent and also happens on `Drop`,
//! so pending changes are discarded unless saved first.

use crate::config::StockpileConfig;
use crate::error::{Result, StockpileError};
use crate::model::Product;
use crate::repository::{ProductRepository, Repository};
use crate::serializer::JsonSerializer;
use crate::store::file::FileStore;
use std::path::Path;

pub struct UnitOfWork {
    products: ProductRepository,
    disposed: bool,
}

impl UnitOfWork {
    pub fn new(products: ProductRepository) -> Self {
        Self {
            products,
            disposed: false,
        }
    }

    /// Build a file-backed unit of work from `config`, resolving a relative
    /// data file against `data_dir`.
    pub fn from_config(config: &StockpileConfig, data_dir: &Path) -> Result<Self> {
        let path = config.resolve_data_file(data_dir);
        let serializer = JsonSerializer::<Product>::new()
            .with_key_case(config.key_case())
            .with_pretty(config.pretty);
        let store: FileStore<Product, _> =
            FileStore::new(path, serializer)?.with_corrupt_policy(config.on_corrupt());

        tracing::debug!(path = %store.file_path().display(), "opening unit of work");
        Ok(Self::new(Repository::new(store)))
    }

    /// The product repository. Always the same instance for this unit of work.
    pub fn products(&mut self) -> &mut ProductRepository {
        &mut self.products
    }

    /// Persist every repository, returning the number of records written.
    pub async fn save_changes(&self) -> Result<usize> {
        if self.disposed {
            return Err(StockpileError::Disposed);
        }
        self.products.save().await
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.products.release();
        self.disposed = true;
        tracing::info!("unit of work disposed");
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::{CorruptDataPolicy, DataStore};
    use crate::test_utils::{SharedStore, TestEnv};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn product(id: i32, name: &str) -> Product {
        Product::new(format!("P{:03}", id), name, "Cat", Decimal::new(500, 2), 4).with_id(id)
    }

    #[test]
    fn test_products_returns_the_same_repository() {
        let mut uow = UnitOfWork::new(Repository::new(MemoryStore::new()));
        let first: *const ProductRepository = uow.products();
        let second: *const ProductRepository = uow.products();
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn test_save_changes_writes_pending_mutations() {
        let store = Arc::new(MemoryStore::with_entities(vec![product(1, "A")]));
        let mut uow = UnitOfWork::new(Repository::new(SharedStore(Arc::clone(&store))));

        let mut new = product(0, "B");
        assert!(uow.products().add(&mut new).await.is_success());
        assert_eq!(store.snapshot().await.len(), 1);

        assert_eq!(uow.save_changes().await.unwrap(), 2);
        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_save_changes_propagates_store_errors() {
        let store = Arc::new(MemoryStore::new());
        store.set_simulate_write_error(true);
        let uow = UnitOfWork::new(Repository::new(SharedStore(Arc::clone(&store))));

        let err = uow.save_changes().await.unwrap_err();
        assert!(err.to_string().contains("Simulated write error"));
    }

    #[tokio::test]
    async fn test_dispose_is_idempotent_and_blocks_saving() {
        let mut uow = UnitOfWork::new(Repository::new(MemoryStore::with_entities(vec![
            product(1, "A"),
        ])));
        uow.products().get_all().await.unwrap();
        assert!(uow.products().is_loaded());

        uow.dispose();
        uow.dispose();
        assert!(uow.is_disposed());
        assert!(!uow.products().is_loaded());
        assert!(uow.products().entities().is_empty());
        assert!(matches!(
            uow.save_changes().await,
            Err(StockpileError::Disposed)
        ));
    }

    #[tokio::test]
    async fn test_dropping_discards_unsaved_changes() {
        let store = Arc::new(MemoryStore::with_entities(vec![product(1, "A")]));
        {
            let mut uow = UnitOfWork::new(Repository::new(SharedStore(Arc::clone(&store))));
            let mut new = product(0, "Unsaved");
            assert!(uow.products().add(&mut new).await.is_success());
        }
        assert_eq!(store.snapshot().await.len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_from_config_uses_data_file_under_data_dir() {
        let env = TestEnv::new();

        let mut uow = env.unit_of_work();
        let mut laptop = product(0, "Laptop");
        assert!(uow.products().add(&mut laptop).await.is_success());
        uow.save_changes().await.unwrap();

        assert_eq!(env.data_path(), env.root.join("Data").join("Products.json"));
        assert!(env.read_raw().contains("Laptop"));
    }

    #[tokio::test]
    async fn test_from_config_honours_strict_corrupt_policy() {
        let mut env = TestEnv::new();
        env.config.on_corrupt = Some(CorruptDataPolicy::Fail);
        env.write_raw("{ invalid json }");

        let mut uow = env.unit_of_work();
        assert!(matches!(
            uow.products().get_all().await,
            Err(StockpileError::CorruptData { .. })
        ));
        assert!(matches!(
            env.store().load().await,
            Err(StockpileError::CorruptData { .. })
        ));
    }
}
