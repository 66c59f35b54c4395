use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

pub const NO_INFORMATION: &str = "No information available.";
pub const NOT_AVAILABLE: &str = "Not available.";

/// One catalog entry, as shown on a grid card and in the detail overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub info: String,
    pub advantages: String,
    pub disadvantages: String,
    pub uses: String,
    pub benefits: String,
    pub model: String,
}

/// A single object of the `/api/search` response array. Fields that are not
/// strings are treated as absent rather than failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub advantages: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub disadvantages: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub uses: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub benefits: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl Item {
    /// Build an item from a card's `data-*` attributes.
    ///
    /// Missing attributes are left empty; placeholders are only applied to
    /// search results.
    pub fn from_attributes(attrs: &HashMap<String, String>) -> Self {
        let get = |key: &str| attrs.get(key).cloned().unwrap_or_default();
        Self {
            name: get("data-name"),
            info: get("data-info"),
            advantages: get("data-advantages"),
            disadvantages: get("data-disadvantages"),
            uses: get("data-uses"),
            benefits: get("data-benefits"),
            model: get("data-model"),
        }
    }

    /// Labelled text sections for the detail overlay, in display order.
    pub fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("Info", &self.info),
            ("Advantages", &self.advantages),
            ("Disadvantages", &self.disadvantages),
            ("Uses", &self.uses),
            ("Benefits", &self.benefits),
        ]
    }
}

// Empty strings are falsy on the page, so they get the placeholder too.
fn or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

impl From<SearchHit> for Item {
    fn from(hit: SearchHit) -> Self {
        Self {
            name: hit.name.unwrap_or_default(),
            info: or_default(hit.info, NO_INFORMATION),
            advantages: or_default(hit.advantages, NOT_AVAILABLE),
            disadvantages: or_default(hit.disadvantages, NOT_AVAILABLE),
            uses: or_default(hit.uses, NOT_AVAILABLE),
            benefits: or_default(hit.benefits, NOT_AVAILABLE),
            model: hit.model.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes_reads_data_fields() {
        let mut attrs = HashMap::new();
        attrs.insert("data-name".to_string(), "Aloe".to_string());
        attrs.insert("data-model".to_string(), "aloe.glb".to_string());
        attrs.insert("class".to_string(), "box".to_string());

        let item = Item::from_attributes(&attrs);
        assert_eq!(item.name, "Aloe");
        assert_eq!(item.model, "aloe.glb");
        // Markup items are not defaulted
        assert_eq!(item.advantages, "");
        assert_eq!(item.info, "");
    }

    #[test]
    fn test_search_hit_defaults() {
        let hit: SearchHit = serde_json::from_str(r#"{"name":"Fern","model":"m.glb"}"#).unwrap();
        let item = Item::from(hit);
        assert_eq!(item.name, "Fern");
        assert_eq!(item.info, NO_INFORMATION);
        assert_eq!(item.advantages, NOT_AVAILABLE);
        assert_eq!(item.disadvantages, NOT_AVAILABLE);
        assert_eq!(item.uses, NOT_AVAILABLE);
        assert_eq!(item.benefits, NOT_AVAILABLE);
        assert_eq!(item.model, "m.glb");
    }

    #[test]
    fn test_search_hit_null_and_empty_fields() {
        let hit: SearchHit = serde_json::from_str(
            r#"{"name":"Mint","info":"","uses":null,"benefits":"Fresh breath","extra":42}"#,
        )
        .unwrap();
        let item = Item::from(hit);
        assert_eq!(item.info, NO_INFORMATION);
        assert_eq!(item.uses, NOT_AVAILABLE);
        assert_eq!(item.benefits, "Fresh breath");
        assert_eq!(item.model, "");
    }

    #[test]
    fn test_search_hit_wrong_types_fall_back() {
        let hits: Vec<SearchHit> = serde_json::from_str(
            r#"[{"name":"Fern","uses":["tea","salve"]},{"name":"Moss","info":42,"model":{"src":"m.glb"}}]"#,
        )
        .unwrap();
        let items: Vec<Item> = hits.into_iter().map(Item::from).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Fern");
        assert_eq!(items[0].uses, NOT_AVAILABLE);
        assert_eq!(items[1].name, "Moss");
        assert_eq!(items[1].info, NO_INFORMATION);
        assert_eq!(items[1].model, "");
    }

    #[test]
    fn test_missing_name_is_empty() {
        let item = Item::from(SearchHit::default());
        assert_eq!(item.name, "");
    }
}
