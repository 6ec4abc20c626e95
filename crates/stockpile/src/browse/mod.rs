//! # Browsing
//!
//! Presentation-neutral state for a "pick one" list: a live text filter over a
//! fixed set of items, a selection that survives filtering, and named change
//! notifications for whatever view layer renders it.
//!
//! ## Pieces
//!
//! - [`Browsable`]: how an item exposes its searchable text and its identity.
//! - [`collection::BrowseCollection`]: the list, filter and selection state.
//! - [`notify::Notifier`]: pub/sub of [`notify::BrowseProperty`] changes.
//! - [`dialog::DialogHost`] and [`dialog::pick`]: modal "pick one" wiring.
//!
//! ## Items Are Shared
//!
//! Items are held as `Rc<T>`. The caller keeps its own handles, and the last
//! selection rule ("the same instance") is `Rc::ptr_eq` on those handles.
//!
//! ## Searchable Text
//!
//! The filter matches against [`Browsable::field_texts`]. Types that derive
//! `Serialize` can implement it with [`serialized_field_texts`], which returns
//! the text of every top-level field and skips nulls.

use crate::model::{EntityId, Product};
use serde::Serialize;
use serde_json::Value;

pub mod collection;
pub mod dialog;
pub mod notify;

/// An item that can be listed, searched and selected in a browse collection.
pub trait Browsable {
    /// Text of every field the filter should search.
    fn field_texts(&self) -> Vec<String>;

    /// Text of a single named field, for column projection.
    fn field_text(&self, _field: &str) -> Option<String> {
        None
    }

    /// Entity id, for types that have one. Entities are matched by id only.
    fn entity_id(&self) -> Option<EntityId> {
        None
    }

    /// Value equality used to resolve a selection. Off unless a type opts in.
    fn same_value(&self, _other: &Self) -> bool {
        false
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Text of every top-level serialized field of `item`, nulls skipped.
///
/// Scalars that don't serialize to an object yield their own text.
pub fn serialized_field_texts<T: Serialize>(item: &T) -> Vec<String> {
    match serde_json::to_value(item) {
        Ok(Value::Object(map)) => map.values().filter_map(value_text).collect(),
        Ok(other) => value_text(&other).into_iter().collect(),
        Err(e) => {
            tracing::warn!(error = %e, "item is not searchable");
            Vec::new()
        }
    }
}

/// Text of the serialized field named `field`, if `item` has one.
pub fn serialized_field_text<T: Serialize>(item: &T, field: &str) -> Option<String> {
    match serde_json::to_value(item).ok()? {
        Value::Object(map) => map.get(field).and_then(value_text),
        _ => None,
    }
}

impl Browsable for Product {
    fn field_texts(&self) -> Vec<String> {
        serialized_field_texts(self)
    }

    fn field_text(&self, field: &str) -> Option<String> {
        serialized_field_text(self, field)
    }

    fn entity_id(&self) -> Option<EntityId> {
        Some(self.id)
    }
}
