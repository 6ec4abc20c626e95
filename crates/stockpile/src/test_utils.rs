use crate::config::StockpileConfig;
use crate::error::Result;
use crate::model::Product;
use crate::repository::Repository;
use crate::serializer::JsonSerializer;
use crate::store::file::FileStore;
use crate::store::memory::MemoryStore;
use crate::store::DataStore;
use crate::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;

pub type ProductFileStore = FileStore<Product, JsonSerializer<Product>>;

/// The five-product inventory used across tests.
pub fn sample_products() -> Vec<Product> {
    [
        (1, "P001", "Laptop", "Electronics", "999.99", 10),
        (2, "P002", "Mouse", "Electronics", "29.99", 50),
        (3, "P003", "Desk", "Furniture", "299.99", 5),
        (4, "P004", "Chair", "Furniture", "149.99", 20),
        (5, "P005", "Monitor", "Electronics", "399.99", 15),
    ]
    .into_iter()
    .map(|(id, code, name, category, price, stock)| {
        let price = Decimal::from_str(price).expect("valid decimal literal");
        Product::new(code, name, category, price, stock).with_id(id)
    })
    .collect()
}

/// A [`MemoryStore`] the test keeps a handle on after giving it to a repository.
pub struct SharedStore<T>(pub Arc<MemoryStore<T>>);

#[async_trait]
impl<T> DataStore<T> for SharedStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>> {
        self.0.load().await
    }

    async fn save(&self, entities: &[T]) -> Result<usize> {
        self.0.save(entities).await
    }
}

/// Memory-backed unit of work plus the store behind it.
pub fn memory_unit_of_work(products: Vec<Product>) -> (UnitOfWork, Arc<MemoryStore<Product>>) {
    let store = Arc::new(MemoryStore::with_entities(products));
    let uow = UnitOfWork::new(Repository::new(SharedStore(Arc::clone(&store))));
    (uow, store)
}

pub struct TestEnv {
    // Keeps the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub config: StockpileConfig,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
            config: StockpileConfig::default(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.config.resolve_data_file(&self.root)
    }

    pub fn store(&self) -> ProductFileStore {
        FileStore::new(self.data_path(), JsonSerializer::new())
            .expect("data path is not empty")
            .with_corrupt_policy(self.config.on_corrupt())
    }

    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::from_config(&self.config, &self.root).expect("data path is not empty")
    }

    /// Put raw text in the data file, creating its directory.
    pub fn write_raw(&self, content: impl AsRef<[u8]>) {
        let path = self.data_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create data dir");
        }
        std::fs::write(path, content).expect("failed to write data file");
    }

    pub fn read_raw(&self) -> String {
        std::fs::read_to_string(self.data_path()).expect("failed to read data file")
    }
}
