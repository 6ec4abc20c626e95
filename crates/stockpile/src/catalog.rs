//! # Product Catalog
//!
//! The state behind an inventory screen: the product list as last loaded or
//! edited, and the message of the last failure. A view binds to
//! [`ProductCatalog::products`] and [`ProductCatalog::error_message`] and calls
//! the operations below.
//!
//! ## Operation Flow
//!
//! Every operation starts by clearing the error message. Mutations then go to
//! the repository. A failed [`OperationResult`] stores its message and stops
//! there: the list is untouched and nothing is saved. On success the list is
//! updated and the unit of work is saved straight away.
//!
//! Opening the catalog loads the products. A load failure leaves the list empty
//! and sets the error message instead of failing the open.

use crate::browse::dialog::{pick, DialogHost};
use crate::model::{BrowserColumn, Product};
use crate::outcome::OperationResult;
use crate::unit_of_work::UnitOfWork;
use std::rc::Rc;

const GENERIC_FAILURE: &str = "Operation failed.";

pub struct ProductCatalog {
    unit_of_work: UnitOfWork,
    products: Vec<Rc<Product>>,
    error_message: Option<String>,
    columns: Option<Vec<BrowserColumn>>,
}

impl ProductCatalog {
    /// Open the catalog over `unit_of_work` and load its products.
    pub async fn open(unit_of_work: UnitOfWork) -> Self {
        let mut catalog = Self {
            unit_of_work,
            products: Vec::new(),
            error_message: None,
            columns: None,
        };
        let loaded = catalog.load().await;
        tracing::debug!(products = catalog.products.len(), outcome = %loaded, "catalog opened");
        catalog
    }

    /// Columns used by [`choose_product`](Self::choose_product).
    pub fn with_columns(mut self, columns: Vec<BrowserColumn>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn products(&self) -> &[Rc<Product>] {
        &self.products
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    pub async fn add_product(&mut self, product: &mut Product) -> OperationResult {
        self.error_message = None;

        let result = self.unit_of_work.products().add(&mut *product).await;
        if !result.is_success() {
            return self.fail(result);
        }

        self.products.push(Rc::new(product.clone()));
        self.save().await
    }

    pub async fn update_product(&mut self, product: &Product) -> OperationResult {
        self.error_message = None;

        let result = self.unit_of_work.products().update(product).await;
        if !result.is_success() {
            return self.fail(result);
        }

        if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
            *slot = Rc::new(product.clone());
        }
        self.save().await
    }

    pub async fn delete_product(&mut self, product: &Product) -> OperationResult {
        self.error_message = None;

        let result = self.unit_of_work.products().delete(product).await;
        if !result.is_success() {
            return self.fail(result);
        }

        self.products.retain(|p| p.id != product.id);
        self.save().await
    }

    pub async fn save_changes(&mut self) -> OperationResult {
        self.error_message = None;
        self.save().await
    }

    /// Discard unsaved changes and re-read every product from storage.
    pub async fn reload(&mut self) -> OperationResult {
        self.error_message = None;
        if let Err(e) = self.unit_of_work.products().reload().await {
            self.products.clear();
            return self.fail_with(format!("Failed to load products: {}", e));
        }
        self.load().await
    }

    /// Let the user pick a product from the current list.
    pub fn choose_product<H>(
        &self,
        host: &mut H,
        title: &str,
        current: Option<Rc<Product>>,
    ) -> Option<Rc<Product>>
    where
        H: DialogHost<Product> + ?Sized,
    {
        pick(
            host,
            Some(self.products.clone()),
            title,
            current,
            self.columns.clone(),
        )
    }

    async fn load(&mut self) -> OperationResult {
        match self.unit_of_work.products().get_all().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog loaded");
                self.products = products.into_iter().map(Rc::new).collect();
                OperationResult::ok()
            }
            Err(e) => {
                self.products.clear();
                self.fail_with(format!("Failed to load products: {}", e))
            }
        }
    }

    async fn save(&mut self) -> OperationResult {
        match self.unit_of_work.save_changes().await {
            Ok(_) => OperationResult::ok(),
            Err(e) => self.fail_with(format!("Failed to save changes: {}", e)),
        }
    }

    fn fail(&mut self, result: OperationResult) -> OperationResult {
        let message = result.error_message().unwrap_or(GENERIC_FAILURE).to_string();
        self.fail_with(message)
    }

    fn fail_with(&mut self, message: String) -> OperationResult {
        tracing::warn!(error = %message, "catalog operation failed");
        self.error_message = Some(message.clone());
        OperationResult::fail(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::collection::BrowseCollection;
    use crate::store::memory::MemoryStore;
    use crate::test_utils::{memory_unit_of_work, sample_products};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    async fn open_with_samples() -> (ProductCatalog, Arc<MemoryStore<Product>>) {
        let (uow, store) = memory_unit_of_work(sample_products());
        (ProductCatalog::open(uow).await, store)
    }

    #[tokio::test]
    async fn test_open_loads_products() {
        let (catalog, _) = open_with_samples().await;
        assert_eq!(catalog.products().len(), 5);
        assert!(catalog.error_message().is_none());
    }

    #[tokio::test]
    async fn test_open_with_failing_store_sets_error() {
        let (uow, store) = memory_unit_of_work(sample_products());
        store.set_simulate_load_error(true);

        let catalog = ProductCatalog::open(uow).await;
        assert!(catalog.products().is_empty());
        assert!(catalog
            .error_message()
            .unwrap()
            .contains("Failed to load products"));
    }

    #[tokio::test]
    async fn test_add_appends_and_saves() {
        let (mut catalog, store) = open_with_samples().await;
        let mut keyboard =
            Product::new("P006", "Keyboard", "Electronics", Decimal::new(7999, 2), 30);

        assert!(catalog.add_product(&mut keyboard).await.is_success());
        assert_eq!(keyboard.id, 6);
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.snapshot().await.len(), 6);
    }

    #[tokio::test]
    async fn test_failed_add_sets_message_and_skips_save() {
        let (mut catalog, store) = open_with_samples().await;
        let mut duplicate = sample_products().remove(0);

        let result = catalog.add_product(&mut duplicate).await;
        assert!(!result.is_success());
        assert_eq!(
            catalog.error_message(),
            Some("A product with Id 1 already exists.")
        );
        assert_eq!(catalog.products().len(), 5);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_listed_product() {
        let (mut catalog, store) = open_with_samples().await;
        let mut mouse = sample_products().remove(1);
        mouse.stock = 0;

        assert!(catalog.update_product(&mouse).await.is_success());
        assert_eq!(catalog.products()[1].stock, 0);
        assert_eq!(store.snapshot().await[1].stock, 0);
    }

    #[tokio::test]
    async fn test_failed_update_sets_message() {
        let (mut catalog, _) = open_with_samples().await;
        let ghost = Product::default().with_id(999);

        let result = catalog.update_product(&ghost).await;
        assert!(!result.is_success());
        assert_eq!(
            catalog.error_message(),
            Some("Product with Id 999 was not found.")
        );
    }

    #[tokio::test]
    async fn test_delete_removes_and_saves() {
        let (mut catalog, store) = open_with_samples().await;
        let desk = sample_products().remove(2);

        assert!(catalog.delete_product(&desk).await.is_success());
        assert_eq!(catalog.products().len(), 4);
        assert!(catalog.products().iter().all(|p| p.id != 3));
        assert_eq!(store.snapshot().await.len(), 4);
    }

    #[tokio::test]
    async fn test_failed_delete_sets_message() {
        let (mut catalog, store) = open_with_samples().await;
        let ghost = Product::default().with_id(42);

        assert!(!catalog.delete_product(&ghost).await.is_success());
        assert!(catalog.error_message().unwrap().contains("not found"));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_save_failure_sets_message() {
        let (mut catalog, store) = open_with_samples().await;
        store.set_simulate_write_error(true);

        let result = catalog.save_changes().await;
        assert!(!result.is_success());
        assert!(catalog
            .error_message()
            .unwrap()
            .starts_with("Failed to save changes"));
    }

    #[tokio::test]
    async fn test_operations_clear_previous_error() {
        let (mut catalog, _) = open_with_samples().await;

        catalog.set_error_message(Some("Previous error".to_string()));
        assert!(catalog.save_changes().await.is_success());
        assert!(catalog.error_message().is_none());

        catalog.set_error_message(Some("Previous error".to_string()));
        let mut chair = sample_products().remove(3);
        chair.price = Decimal::new(12999, 2);
        assert!(catalog.update_product(&chair).await.is_success());
        assert!(catalog.error_message().is_none());
    }

    #[tokio::test]
    async fn test_reload_discards_unsaved_repository_changes() {
        let (mut catalog, store) = open_with_samples().await;
        store.set_simulate_write_error(true);
        let mut extra = Product::new("P009", "Lamp", "Furniture", Decimal::new(2500, 2), 3);
        assert!(!catalog.add_product(&mut extra).await.is_success());
        assert_eq!(catalog.products().len(), 6);

        store.set_simulate_write_error(false);
        assert!(catalog.reload().await.is_success());
        assert_eq!(catalog.products().len(), 5);
        assert!(catalog.error_message().is_none());
    }

    struct PickByName(&'static str);

    impl DialogHost<Product> for PickByName {
        fn show(&mut self, _title: &str, browser: &mut BrowseCollection<Product>) {
            browser.initialize();
            browser.set_search_text(self.0);
            let first = browser.visible_items().first().cloned();
            browser.select(first);
            browser.confirm();
        }
    }

    #[tokio::test]
    async fn test_choose_product_browses_current_list() {
        let (catalog, _) = open_with_samples().await;
        let catalog = catalog.with_columns(vec![BrowserColumn::new("name", "Name")]);

        let chosen = catalog.choose_product(&mut PickByName("monitor"), "Select Product", None);
        assert_eq!(chosen.unwrap().name, "Monitor");
    }
}
