//! # Domain Model
//!
//! The records stockpile keeps, and the display configuration used to browse them.
//!
//! ## Identity
//!
//! Every stored record implements [`Entity`]: it carries an integer [`EntityId`]
//! that is unique within its collection once assigned. Two records are "the same
//! record" when their ids match, no matter what their other fields hold. The
//! value `0` is the unassigned sentinel: [`crate::repository::Repository::add`]
//! replaces it with the next free id.
//!
//! ## Field Naming
//!
//! Fields use plain snake_case Rust names. The JSON serializer matches incoming
//! keys against these names ignoring case and `_`, so `Id`, `iD` and `ID` all
//! land on `id`. That lookup is read from `Product::default()`.
//!
//! ## Column Descriptors
//!
//! [`BrowserColumn`] is not business data. It tells a browsing view which field
//! to project, how to label it and how to lay it out. A column naming a field the
//! displayed type does not have is simply never matched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier type shared by all entities.
pub type EntityId = i32;

/// Sentinel meaning "no id assigned yet".
pub const UNASSIGNED_ID: EntityId = 0;

/// A record identified by a unique integer id.
pub trait Entity {
    /// Human-readable name of the record type, used in messages.
    const KIND: &'static str = "Entity";

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    fn has_id(&self) -> bool {
        self.id() != UNASSIGNED_ID
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i32,
}

impl Product {
    /// Create an unsaved product; the repository assigns its id on add.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        stock: i32,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            code: code.into(),
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Stretch,
}

/// How a browsing view should render one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserColumn {
    /// Name of the field to project
    pub data_field: String,
    /// Label shown in the column header
    pub header: String,
    /// `None` means size automatically
    pub width: Option<f64>,
    pub format: Option<String>,
    pub horizontal_alignment: Option<Alignment>,
}

impl BrowserColumn {
    pub fn new(data_field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            data_field: data_field.into(),
            header: header.into(),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.horizontal_alignment = Some(alignment);
        self
    }

    pub fn is_auto_width(&self) -> bool {
        self.width.is_none()
    }
}
