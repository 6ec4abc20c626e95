//! # Serializers
//!
//! A [`Serializer`] turns a full entity sequence into text and back. It holds no
//! state besides its options, and the file store hands it complete snapshots only.
//!
//! ## Decoding Contract
//!
//! [`Serializer::deserialize`] never fails outward:
//! - empty or whitespace-only input yields an empty sequence
//! - malformed input yields an empty sequence (logged at `warn`)
//!
//! [`Serializer::try_deserialize`] is the strict variant used by the file store
//! when it runs under [`crate::store::CorruptDataPolicy::Fail`].
//!
//! ## JSON Key Handling
//!
//! [`JsonSerializer`] matches every top-level key of every array element against
//! the entity's own field names, ignoring case and `_`/`-` separators, so
//! `Price`, `price`, `PRICE` and `pRiCe` all decode into `price`. Keys naming no
//! field are passed on in snake_case. On output, keys are written as the entity
//! names them unless a [`KeyCase`] says otherwise.

use crate::error::Result;
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;

pub trait Serializer<T>: Send + Sync {
    /// Extension (with leading dot) of files written in this format.
    fn file_extension(&self) -> &str;

    fn serialize(&self, entities: &[T]) -> Result<String>;

    /// Strict decode; malformed content is an error.
    fn try_deserialize(&self, content: &str) -> Result<Vec<T>>;

    /// Lenient decode; malformed content reads as "no records".
    fn deserialize(&self, content: &str) -> Vec<T> {
        match self.try_deserialize(content) {
            Ok(entities) => entities,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed content, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Casing applied to object keys on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    /// Keep the entity's own field names
    #[default]
    AsIs,
    PascalCase,
    CamelCase,
}

impl KeyCase {
    fn apply(self, key: &str) -> String {
        match self {
            KeyCase::AsIs => key.to_string(),
            KeyCase::PascalCase => key.to_upper_camel_case(),
            KeyCase::CamelCase => key.to_lower_camel_case(),
        }
    }
}

pub struct JsonSerializer<T> {
    key_case: KeyCase,
    pretty: bool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JsonSerializer<T> {
    /// Indented output, entity field names as-is.
    pub fn new() -> Self {
        Self {
            key_case: KeyCase::AsIs,
            pretty: true,
            _entity: PhantomData,
        }
    }

    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }
}

fn rename_keys(value: Value, rename: impl Fn(&str) -> String) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(
                        map.into_iter()
                            .map(|(k, v)| (rename(&k), v))
                            .collect::<Map<String, Value>>(),
                    ),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Case- and separator-insensitive form of a key: `StOcK`, `stock` and
/// `STOCK` all fold to `stock`, `unit_price` and `UnitPrice` to `unitprice`.
fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folded key to canonical field name, read from a default entity.
fn field_lookup<T: Serialize + Default>() -> HashMap<String, String> {
    match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .map(|(k, _)| (fold_key(&k), k))
            .collect(),
        _ => HashMap::new(),
    }
}

impl<T> Serializer<T> for JsonSerializer<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn file_extension(&self) -> &str {
        ".json"
    }

    fn serialize(&self, entities: &[T]) -> Result<String> {
        let mut value = serde_json::to_value(entities)?;
        if self.key_case != KeyCase::AsIs {
            let key_case = self.key_case;
            value = rename_keys(value, |k| key_case.apply(k));
        }

        let content = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(content)
    }

    fn try_deserialize(&self, content: &str) -> Result<Vec<T>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(content)?;
        if value.is_null() {
            return Ok(Vec::new());
        }

        let fields = field_lookup::<T>();
        let folded = rename_keys(value, |k| {
            fields
                .get(&fold_key(k))
                .cloned()
                .unwrap_or_else(|| k.to_snake_case())
        });
        let entities: Vec<T> = serde_json::from_value(folded)?;
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use rust_decimal::Decimal;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("P001", "Laptop", "Electronics", Decimal::new(99999, 2), 5).with_id(1),
            Product::new("P002", "Desk", "Furniture", Decimal::new(29999, 2), 2).with_id(2),
        ]
    }

    #[test]
    fn test_file_extension_is_json() {
        let serializer = JsonSerializer::<Product>::new();
        assert_eq!(serializer.file_extension(), ".json");
    }

    #[test]
    fn test_serialize_writes_json_array() {
        let serializer = JsonSerializer::<Product>::new();
        let json = serializer.serialize(&sample()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["name"], "Laptop");
    }

    #[test]
    fn test_serialize_empty_is_empty_array() {
        let serializer = JsonSerializer::<Product>::new().with_pretty(false);
        assert_eq!(serializer.serialize(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_serialize_honours_key_case() {
        let serializer = JsonSerializer::<Product>::new().with_key_case(KeyCase::PascalCase);
        let json = serializer.serialize(&sample()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["Name"], "Laptop");
        assert_eq!(value[0]["Id"], 1);
        assert!(value[0].get("name").is_none());

        let serializer = JsonSerializer::<Product>::new().with_key_case(KeyCase::CamelCase);
        let json = serializer.serialize(&sample()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["category"], "Furniture");
    }

    #[test]
    fn test_roundtrip_preserves_values_and_order() {
        let serializer = JsonSerializer::<Product>::new().with_key_case(KeyCase::PascalCase);
        let products = sample();
        let json = serializer.serialize(&products).unwrap();
        assert_eq!(serializer.deserialize(&json), products);
    }

    #[test]
    fn test_deserialize_matches_keys_case_insensitively() {
        let serializer = JsonSerializer::<Product>::new();
        let json = r#"[
            {"Id": 1, "Code": "P001", "NAME": "Laptop", "category": "Electronics", "Price": 10.5, "Stock": 3}
        ]"#;
        let products = serializer.deserialize(json);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].name, "Laptop");
        assert_eq!(products[0].category, "Electronics");
        assert_eq!(products[0].price, Decimal::new(105, 1));
        assert_eq!(products[0].stock, 3);
    }

    #[test]
    fn test_deserialize_mixed_case_keys() {
        let serializer = JsonSerializer::<Product>::new();
        let json = r#"[{"iD": 7, "NaMe": "Laptop", "cATEGORY": "Electronics", "StOcK": 3, "PRICE": "1.50"}]"#;
        let products = serializer.try_deserialize(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 7);
        assert_eq!(products[0].name, "Laptop");
        assert_eq!(products[0].category, "Electronics");
        assert_eq!(products[0].stock, 3);
        assert_eq!(products[0].price, Decimal::new(150, 2));
    }

    #[test]
    fn test_fold_key_ignores_case_and_separators() {
        assert_eq!(fold_key("StOcK"), "stock");
        assert_eq!(fold_key("unit_price"), fold_key("UnitPrice"));
        assert_eq!(fold_key("unit-price"), "unitprice");
    }

    #[test]
    fn test_deserialize_blank_input_is_empty() {
        let serializer = JsonSerializer::<Product>::new();
        assert!(serializer.deserialize("").is_empty());
        assert!(serializer.deserialize("   \n\t").is_empty());
        assert!(serializer.deserialize("null").is_empty());
    }

    #[test]
    fn test_deserialize_malformed_is_empty() {
        let serializer = JsonSerializer::<Product>::new();
        assert!(serializer.deserialize("{ invalid json }").is_empty());
        assert!(serializer.deserialize(r#"{"id": 1}"#).is_empty());
    }

    #[test]
    fn test_try_deserialize_reports_malformed() {
        let serializer = JsonSerializer::<Product>::new();
        assert!(serializer.try_deserialize("{ invalid json }").is_err());
        assert!(serializer.try_deserialize("").unwrap().is_empty());
    }
}
