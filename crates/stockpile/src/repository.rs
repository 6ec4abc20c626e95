//! # Repository
//!
//! An in-memory working copy of one entity type, backed by a [`DataStore`].
//!
//! ## Lifecycle
//!
//! ```text
//! NotLoaded --(get_all | get_by_id | add | update | delete)--> Loaded
//! Loaded    --(reload)--> Loaded   (in-memory set discarded, re-read)
//! ```
//!
//! The first read or mutation loads the full set from the store. After that,
//! mutations only touch memory; nothing reaches disk until [`Repository::save`]
//! is called (normally through [`crate::unit_of_work::UnitOfWork::save_changes`]).
//! Dropping the repository without saving discards pending changes.
//!
//! ## Identity Rules
//!
//! - Records are matched by id only, never by the rest of their value.
//! - `add` with id `0` assigns `max(id) + 1` (or `1` for an empty set) and
//!   writes the id back into the caller's entity.
//! - `add` with a non-zero id that is already taken fails; the set is untouched.
//! - `update` replaces the matching record in its existing slot.
//!
//! Expected failures come back as [`OperationResult`]; only store errors
//! surface as `Err`.

use crate::error::Result;
use crate::model::{Entity, EntityId, Product};
use crate::outcome::OperationResult;
use crate::store::DataStore;

const NULL_ENTITY: &str = "Entity cannot be null.";

pub struct Repository<T> {
    store: Box<dyn DataStore<T>>,
    entities: Vec<T>,
    loaded: bool,
}

pub type ProductRepository = Repository<Product>;

impl<T> Repository<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    pub fn new(store: impl DataStore<T> + 'static) -> Self {
        Self {
            store: Box::new(store),
            entities: Vec::new(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The in-memory set as it stands, without triggering a load.
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub async fn get_all(&mut self) -> Result<Vec<T>> {
        self.ensure_loaded().await?;
        Ok(self.entities.clone())
    }

    pub async fn get_by_id(&mut self, id: EntityId) -> Result<Option<T>> {
        self.ensure_loaded().await?;
        Ok(self.entities.iter().find(|e| e.id() == id).cloned())
    }

    pub async fn add<'a>(&mut self, entity: impl Into<Option<&'a mut T>>) -> OperationResult
    where
        T: 'a,
    {
        let Some(entity) = entity.into() else {
            return OperationResult::fail(NULL_ENTITY);
        };
        if let Err(e) = self.ensure_loaded().await {
            return OperationResult::fail(e.to_string());
        }

        if entity.has_id() && self.position_of(entity.id()).is_some() {
            return OperationResult::fail(format!(
                "A {} with Id {} already exists.",
                T::KIND.to_lowercase(),
                entity.id()
            ));
        }

        if !entity.has_id() {
            let max = self.entities.iter().map(|e| e.id()).max().unwrap_or(0);
            let Some(next) = max.checked_add(1) else {
                return OperationResult::fail(format!(
                    "No {} Id is available after {}.",
                    T::KIND.to_lowercase(),
                    max
                ));
            };
            entity.set_id(next);
        }

        self.entities.push(entity.clone());
        OperationResult::ok()
    }

    pub async fn update<'a>(&mut self, entity: impl Into<Option<&'a T>>) -> OperationResult
    where
        T: 'a,
    {
        let Some(entity) = entity.into() else {
            return OperationResult::fail(NULL_ENTITY);
        };
        if let Err(e) = self.ensure_loaded().await {
            return OperationResult::fail(e.to_string());
        }

        match self.position_of(entity.id()) {
            Some(index) => {
                self.entities[index] = entity.clone();
                OperationResult::ok()
            }
            None => self.not_found(entity.id()),
        }
    }

    pub async fn delete<'a>(&mut self, entity: impl Into<Option<&'a T>>) -> OperationResult
    where
        T: 'a,
    {
        let Some(entity) = entity.into() else {
            return OperationResult::fail(NULL_ENTITY);
        };
        if let Err(e) = self.ensure_loaded().await {
            return OperationResult::fail(e.to_string());
        }

        let id = entity.id();
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != id);
        if self.entities.len() < before {
            OperationResult::ok()
        } else {
            self.not_found(id)
        }
    }

    /// Write the whole in-memory set to the store.
    pub async fn save(&self) -> Result<usize> {
        self.store.save(&self.entities).await
    }

    /// Discard the in-memory set, unsaved changes included, and re-read it.
    pub async fn reload(&mut self) -> Result<()> {
        self.entities = self.store.load().await?;
        self.loaded = true;
        tracing::debug!(
            kind = T::KIND,
            count = self.entities.len(),
            "repository reloaded"
        );
        Ok(())
    }

    /// Drop the cached set and return to the not-loaded state.
    pub(crate) fn release(&mut self) {
        self.entities = Vec::new();
        self.loaded = false;
    }

    async fn ensure_loaded(&mut self) -> Result<()> {
        if !self.loaded {
            self.reload().await?;
        }
        Ok(())
    }

    fn position_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    fn not_found(&self, id: EntityId) -> OperationResult {
        OperationResult::fail(format!("{} with Id {} was not found.", T::KIND, id))
    }
}
