use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// How a product satisfies an ingredient.
///
/// Variants are declared in tier precedence order: when two matches have the
/// same confidence, the earlier variant ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Normalized names are identical.
    Exact,
    /// The product is a known equivalent of the ingredient.
    Equivalency,
    /// Some ingredient tokens appear in the product name.
    Partial,
    /// Ingredient and product share a category.
    Category,
    /// The product is a declared substitute for the ingredient.
    Substitute,
}

impl MatchType {
    pub const ALL: [MatchType; 5] = [
        MatchType::Exact,
        MatchType::Equivalency,
        MatchType::Partial,
        MatchType::Category,
        MatchType::Substitute,
    ];

    /// Rank within tier precedence, 0 being the strongest tier.
    pub fn precedence(self) -> u8 {
        match self {
            MatchType::Exact => 0,
            MatchType::Equivalency => 1,
            MatchType::Partial => 2,
            MatchType::Category => 3,
            MatchType::Substitute => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Equivalency => "equivalency",
            MatchType::Partial => "partial",
            MatchType::Category => "category",
            MatchType::Substitute => "substitute",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product from the household inventory snapshot supplied with a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryProduct {
    /// Store identifiers arrive as strings or numbers; both are kept as text.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub product_id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl InventoryProduct {
    pub fn new(product_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// An ingredient line from a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    pub fn with_amount(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = Some(quantity);
        self.unit = Some(unit.into());
        self
    }
}

/// A scored candidate product for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientMatch {
    pub product_id: String,
    pub product_name: String,
    pub match_type: MatchType,
    /// 0..=100.
    pub confidence: u8,
    /// Human-readable explanation of why the tier fired.
    pub reason: String,
    /// Echoed from the recipe ingredient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Feasibility summary for a whole recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    /// True iff `missing_ingredients` is empty.
    pub can_make: bool,
    pub available_count: usize,
    pub total_count: usize,
    /// Ingredient names in recipe order.
    pub missing_ingredients: Vec<String>,
    /// Ingredient names in recipe order.
    pub available_ingredients: Vec<String>,
    /// 0..=100, rounded to nearest.
    pub percentage_available: u8,
}

/// Match lists keyed by the recipe ingredient name exactly as supplied.
pub type MatchesByIngredient = HashMap<String, Vec<IngredientMatch>>;

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_type_order_follows_precedence() {
        let mut sorted = MatchType::ALL;
        sorted.sort();
        assert_eq!(sorted, MatchType::ALL);
        for pair in MatchType::ALL.windows(2) {
            assert!(pair[0].precedence() < pair[1].precedence());
        }
    }

    #[test]
    fn wire_format_is_camel_case() {
        let m = IngredientMatch {
            product_id: "1".into(),
            product_name: "Green Onion Bunch".into(),
            match_type: MatchType::Equivalency,
            confidence: 90,
            reason: "\"green onion\" is an equivalent of \"scallion\"".into(),
            quantity: Some(2.0),
            unit: None,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["productId"], "1");
        assert_eq!(value["matchType"], "equivalency");
        assert_eq!(value["quantity"], 2.0);
        assert!(value.get("unit").is_none());
    }

    #[test]
    fn numeric_product_ids_are_accepted() {
        let product: InventoryProduct =
            serde_json::from_value(json!({"productId": 42, "productName": "Butter"})).unwrap();
        assert_eq!(product.product_id, "42");
        assert_eq!(product.category, None);

        let product: InventoryProduct =
            serde_json::from_value(json!({"productId": "sku-9", "productName": "Milk", "category": "Dairy"}))
                .unwrap();
        assert_eq!(product.product_id, "sku-9");
        assert_eq!(product.category.as_deref(), Some("Dairy"));
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = AvailabilityReport {
            can_make: true,
            available_count: 0,
            total_count: 0,
            missing_ingredients: vec![],
            available_ingredients: vec![],
            percentage_available: 0,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["canMake"], true);
        assert_eq!(value["percentageAvailable"], 0);
        assert!(value["missingIngredients"].as_array().unwrap().is_empty());
    }
}
