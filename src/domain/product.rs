use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type ProductId = i64;

/// Flat product snapshot as returned by the product lookup endpoint.
///
/// Only the fields the page renders are typed; everything else the backend
/// sends is kept in `extra` so the snapshot round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFlat {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductFlat {
    #[allow(dead_code)]
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            location: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unknown_fields() {
        let raw = r#"{"id":10,"name":"Beamer","location":"B-12","catalogNumber":"X-77","requiresApproval":true}"#;
        let product: ProductFlat = serde_json::from_str(raw).unwrap();

        assert_eq!(product.id, 10);
        assert_eq!(product.name, "Beamer");
        assert_eq!(product.location.as_deref(), Some("B-12"));
        assert_eq!(product.description, None);
        assert_eq!(product.extra.get("catalogNumber"), Some(&Value::from("X-77")));
        assert_eq!(product.extra.get("requiresApproval"), Some(&Value::from(true)));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["catalogNumber"], "X-77");
    }

    #[test]
    fn null_or_missing_name_is_empty() {
        let product: ProductFlat = serde_json::from_str(r#"{"id":11,"name":null}"#).unwrap();
        assert_eq!(product.id, 11);
        assert_eq!(product.name, "");

        let product: ProductFlat = serde_json::from_str(r#"{"id":12}"#).unwrap();
        assert_eq!(product.name, "");
    }
}
