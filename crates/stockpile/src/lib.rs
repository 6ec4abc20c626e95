//! # Stockpile Architecture
//!
//! Stockpile keeps a small inventory of records in a single JSON file and gives
//! a UI layer everything it needs to list, edit and pick them. It renders
//! nothing and owns no window: a view binds to its state and calls its
//! operations.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation State (catalog.rs, browse/)                   │
//! │  - ProductCatalog: list + error message for a main screen   │
//! │  - BrowseCollection: filter + selection for a pick dialog   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Unit of Work (unit_of_work.rs)                             │
//! │  - One commit point over the repositories                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                 │
//! │  - Lazily loaded in-memory set, CRUD by id                  │
//! │  - Expected failures as OperationResult, not errors         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, serializer.rs)                      │
//! │  - Abstract DataStore trait, whole-set load and save        │
//! │  - FileStore (production), MemoryStore (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Nothing Is Written Implicitly
//!
//! Repository mutations live in memory until a save. The catalog saves after
//! each successful edit; code driving a [`unit_of_work::UnitOfWork`] directly
//! decides for itself. Dropping a unit of work discards what was not saved.
//!
//! ## Threading
//!
//! Storage is async and `Send`: a [`store::file::FileStore`] serializes its own
//! loads and saves behind one lock. Presentation state is single-threaded and
//! shares items as `Rc`, the way a UI thread would own it.
//!
//! ## Module Overview
//!
//! - [`model`]: `Product`, the `Entity` trait, column descriptors
//! - [`outcome`]: `OperationResult`
//! - [`serializer`]: JSON encoding with case-insensitive keys
//! - [`store`]: Storage abstraction and implementations
//! - [`repository`]: Per-type in-memory working copy
//! - [`unit_of_work`]: Save and dispose for a whole session
//! - [`browse`]: Filterable pick-one list and dialog host
//! - [`catalog`]: Main-screen product list
//! - [`config`]: Configuration management
//! - [`logging`]: Subscriber setup
//! - [`error`]: Error types

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod outcome;
pub mod repository;
pub mod serializer;
pub mod store;
pub mod unit_of_work;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
