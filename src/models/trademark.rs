//! Trademark search result record.

use serde::{Deserialize, Serialize};

/// Logo value for rows without an image.
pub const NO_IMAGE_FOUND: &str = "No image found";

/// One row of the registry results table.
///
/// Fields are private so a record cannot change after extraction; key order
/// in serialized output follows declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrademarkRecord {
    id: String,
    number: String,
    name: String,
    logo_url: String,
    class: String,
    status: String,
    details_page_url: String,
}

impl TrademarkRecord {
    /// Storage source name for this record kind.
    pub const SOURCE_NAME: &'static str = "Trademark";

    /// Create a record from already-cleaned field values.
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        name: impl Into<String>,
        logo_url: impl Into<String>,
        class: impl Into<String>,
        status: impl Into<String>,
        details_page_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            name: name.into(),
            logo_url: logo_url.into(),
            class: class.into(),
            status: status.into(),
            details_page_url: details_page_url.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logo_url(&self) -> &str {
        &self.logo_url
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn details_page_url(&self) -> &str {
        &self.details_page_url
    }

    /// Whether the row carried a logo image.
    pub fn has_logo(&self) -> bool {
        self.logo_url != NO_IMAGE_FOUND
    }

    /// Convert to an order-preserving JSON object.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    /// Pretty-printed JSON. Unicode and slashes are written unescaped.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrademarkRecord {
        TrademarkRecord::new(
            "1234567",
            "1234567",
            "Café Société Pty Ltd",
            "https://example.com/img/1234567.png",
            "Class 9 Goods",
            "Registered",
            "https://search.ipaustralia.gov.au/trademarks/search/view/1234567",
        )
    }

    #[test]
    fn test_to_map_preserves_key_order() {
        let keys: Vec<String> = sample().to_map().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "number",
                "name",
                "logoUrl",
                "class",
                "status",
                "detailsPageUrl"
            ]
        );
    }

    #[test]
    fn test_to_json_is_human_readable() {
        let json = sample().to_json();
        assert!(json.contains("Café Société"));
        assert!(json.contains("https://example.com/img/1234567.png"));
        assert!(!json.contains("\\/"));
        assert!(!json.contains("\\u"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_round_trips() {
        let record = sample();
        let parsed: TrademarkRecord = serde_json::from_str(&record.to_json()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_has_logo() {
        assert!(sample().has_logo());
        let no_logo = TrademarkRecord::new("1", "1", "n", NO_IMAGE_FOUND, "All", "", "");
        assert!(!no_logo.has_logo());
    }
}
