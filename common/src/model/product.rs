use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nutrition facts per 100 g as reported by the product service.
///
/// The service leaves unknown values out or sends `null`; both are kept as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub proteins: Option<f64>,
    #[serde(default)]
    pub fats: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub kcal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HarmfulComponent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Explanatory metadata attached to a product score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtraInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmful_components: Option<Vec<HarmfulComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendedfor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<String>,
}

/// A product record as cached by the scan store and persisted in the
/// local scan history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub product_name: String,
    pub barcode: String,
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<String>,
    pub score: Option<f64>,
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<ExtraInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ingredients: Option<String>,
}

/// The loosely-typed shape of a scan as it arrives from `/api/find`.
///
/// The product service is not strict about `product_name` (may be absent or
/// `null`) or `score` (sometimes a string), so those are accepted as-is and
/// coerced by [`ScanPayload::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPayload {
    #[serde(default)]
    pub product_name: Option<String>,
    pub barcode: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub allergens: Option<String>,
    #[serde(default)]
    pub score: Value,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub extra: Option<ExtraInfo>,
    #[serde(default)]
    pub image_front: Option<String>,
    #[serde(default)]
    pub image_ingredients: Option<String>,
}

impl ScanPayload {
    /// Coerces the payload into a [`ScanResult`]: a missing name becomes an
    /// empty string and any non-numeric score becomes `None`.
    pub fn normalize(self) -> ScanResult {
        ScanResult {
            product_name: self.product_name.unwrap_or_default(),
            barcode: self.barcode,
            manufacturer: self.manufacturer,
            allergens: self.allergens,
            score: self.score.as_f64(),
            nutrition: self.nutrition,
            extra: self.extra,
            image_front: self.image_front,
            image_ingredients: self.image_ingredients,
        }
    }
}

impl From<ScanResult> for ScanPayload {
    fn from(scan: ScanResult) -> Self {
        Self {
            product_name: Some(scan.product_name),
            barcode: scan.barcode,
            manufacturer: scan.manufacturer,
            allergens: scan.allergens,
            score: scan.score.map(Value::from).unwrap_or(Value::Null),
            nutrition: scan.nutrition,
            extra: scan.extra,
            image_front: scan.image_front,
            image_ingredients: scan.image_ingredients,
        }
    }
}
